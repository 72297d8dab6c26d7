// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines `FixedPalette`, a bounded color table with nearest-color search.

use super::error::PaletteError;
use crate::math::Color;
use std::fmt;

/// A palette of at most [`FixedPalette::CAPACITY`] colors.
///
/// Only the first [`len`](FixedPalette::len) entries are active. Equality and
/// searches ignore the inactive tail.
#[derive(Clone)]
pub struct FixedPalette {
    colors: [Color; FixedPalette::CAPACITY],
    len: usize,
}

impl FixedPalette {
    /// The maximum number of colors a palette can hold.
    pub const CAPACITY: usize = 256;

    /// Creates an empty palette.
    pub const fn new() -> Self {
        Self {
            colors: [Color::BLACK; Self::CAPACITY],
            len: 0,
        }
    }

    /// Creates a palette of `len` black entries.
    pub fn with_len(len: usize) -> Result<Self, PaletteError> {
        let mut palette = Self::new();
        palette.resize(len)?;
        Ok(palette)
    }

    /// Creates a palette holding `colors`, in order.
    pub fn from_colors(colors: &[Color]) -> Result<Self, PaletteError> {
        let mut palette = Self::with_len(colors.len())?;
        palette.colors[..colors.len()].copy_from_slice(colors);
        Ok(palette)
    }

    /// The default two-color palette of monochrome bitmaps: black then white.
    pub fn monochrome() -> Self {
        let mut palette = Self::new();
        palette.colors[0] = Color::BLACK;
        palette.colors[1] = Color::WHITE;
        palette.len = 2;
        palette
    }

    /// Number of active colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the palette has no active color.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Changes the number of active colors.
    ///
    /// Entries that become active keep whatever color they last held.
    pub fn resize(&mut self, len: usize) -> Result<(), PaletteError> {
        if len > Self::CAPACITY {
            return Err(PaletteError::TooManyColors {
                requested: len,
                capacity: Self::CAPACITY,
            });
        }
        self.len = len;
        Ok(())
    }

    /// Returns the color at `index`, or `None` past the active colors.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.as_slice().get(index).copied()
    }

    /// Replaces the color at `index`.
    pub fn set(&mut self, index: usize, color: Color) -> Result<(), PaletteError> {
        if index >= self.len {
            return Err(PaletteError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.colors[index] = color;
        Ok(())
    }

    /// Appends a color, returning its index.
    pub fn push(&mut self, color: Color) -> Result<u8, PaletteError> {
        let index = self.len;
        self.resize(index + 1)?;
        self.colors[index] = color;
        Ok(index as u8)
    }

    /// The active colors.
    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        &self.colors[..self.len]
    }

    /// Iterates over the active colors.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.as_slice().iter()
    }

    /// Returns the index of the color closest to `target`.
    ///
    /// Entries are scanned in index order. An exact match returns immediately;
    /// otherwise the entry with the smallest squared distance wins, and ties go
    /// to the lowest index. An empty palette yields `0`.
    pub fn find_closest_color_index(&self, target: Color) -> u8 {
        let mut closest = 0usize;
        let mut min_distance = u32::MAX;

        for (index, color) in self.as_slice().iter().enumerate() {
            if *color == target {
                return index as u8;
            }

            let distance = color.distance_squared(&target);
            if distance < min_distance {
                min_distance = distance;
                closest = index;
            }
        }

        closest as u8
    }

    /// `true` when both palettes have the same active colors in the same order.
    pub fn is_same_palette(&self, other: &FixedPalette) -> bool {
        self.len == other.len && self.as_slice().iter().eq(other.as_slice().iter())
    }
}

impl Default for FixedPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for FixedPalette {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_palette(other)
    }
}

impl Eq for FixedPalette {}

impl fmt::Debug for FixedPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
