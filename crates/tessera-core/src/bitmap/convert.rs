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

//! Bit-depth conversion and palette remapping.
//!
//! Indexed to indexed conversions never look at pixel colors: each source
//! index is translated through a 256-entry table built once from the two
//! palettes. Conversions into or out of true color materialize or quantize
//! the actual colors.

use super::error::BitmapError;
use super::palette::FixedPalette;
use super::storage::Bitmap;
use super::BitDepth;
use crate::math::Color;
use std::collections::HashMap;

/// Builds the source-index to destination-index table used by palette remaps.
///
/// Indices past the end of `from` behave like black, matching how they read.
pub(crate) fn remap_table(from: &FixedPalette, to: &FixedPalette) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (index, slot) in table.iter_mut().enumerate() {
        let color = from.get(index).unwrap_or(Color::BLACK);
        *slot = to.find_closest_color_index(color);
    }
    table
}

impl Bitmap {
    /// Converts to `depth`, choosing the destination palette automatically.
    ///
    /// Returns `None` when the bitmap already has that depth. The palette is
    /// carried over whenever it fits the new depth. A 1-bit target whose
    /// palette would not fit gets black and white; an 8-bit target converted
    /// from a palette-less true-color bitmap gets up to 256 of its colors, in
    /// order of first appearance.
    pub fn convert_to_depth(&self, depth: BitDepth) -> Option<Bitmap> {
        if depth == self.depth {
            return None;
        }
        let palette = self.palette_for(depth);
        Some(self.convert_into(depth, &palette))
    }

    /// Converts to `depth` using the caller's `palette`.
    ///
    /// Returns `Ok(None)` when both the depth and the palette already match.
    ///
    /// # Errors
    /// Returns [`BitmapError::InvalidPaletteSize`] if `palette` cannot be
    /// addressed by `depth`.
    pub fn convert_to_depth_with_palette(
        &self,
        depth: BitDepth,
        palette: &FixedPalette,
    ) -> Result<Option<Bitmap>, BitmapError> {
        if depth == self.depth && self.palette == *palette {
            return Ok(None);
        }
        let max = depth.max_palette_len();
        if palette.len() > max {
            return Err(BitmapError::InvalidPaletteSize {
                depth,
                requested: palette.len(),
                max,
            });
        }
        Ok(Some(self.convert_into(depth, palette)))
    }

    fn palette_for(&self, depth: BitDepth) -> FixedPalette {
        let current = self.effective_palette();
        match depth {
            BitDepth::TrueColor32 => self.palette.clone(),
            BitDepth::Mono1 if current.is_empty() || current.len() > 2 => {
                FixedPalette::monochrome()
            }
            BitDepth::Indexed8 if current.is_empty() => self.distinct_colors(),
            _ => current.into_owned(),
        }
    }

    /// Collects up to 256 distinct colors in scan order.
    fn distinct_colors(&self) -> FixedPalette {
        let mut palette = FixedPalette::new();
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let color = self.read_texel(x, y);
                if palette.iter().any(|c| *c == color) {
                    continue;
                }
                if palette.push(color).is_err() {
                    return palette;
                }
            }
        }
        palette
    }

    /// Converts without validating `palette`; callers guarantee it fits `depth`.
    pub(crate) fn convert_into(&self, depth: BitDepth, palette: &FixedPalette) -> Bitmap {
        let mut out = Bitmap::blank(self.size, depth, palette.clone());
        let (width, height) = (self.size.x, self.size.y);

        match (self.depth.is_indexed(), depth.is_indexed()) {
            (true, true) => {
                let table = remap_table(&self.effective_palette(), &out.effective_palette());
                for y in 0..height {
                    for x in 0..width {
                        let index = table[usize::from(self.read_index(x, y))];
                        out.write_index(x, y, index);
                    }
                }
            }
            (true, false) => {
                let source = self.effective_palette();
                for y in 0..height {
                    for x in 0..width {
                        let index = usize::from(self.read_index(x, y));
                        out.write_texel(x, y, source.get(index).unwrap_or(Color::BLACK));
                    }
                }
            }
            (false, true) => {
                let target = out.effective_palette().into_owned();
                let mut nearest: HashMap<Color, u8> = HashMap::new();
                for y in 0..height {
                    for x in 0..width {
                        let color = self.read_texel(x, y);
                        let index = *nearest
                            .entry(color)
                            .or_insert_with(|| target.find_closest_color_index(color));
                        out.write_index(x, y, index);
                    }
                }
            }
            (false, false) => out.pixels.copy_from_slice(&self.pixels),
        }

        log::trace!(
            "Converted {}x{} bitmap from {:?} to {:?}",
            width,
            height,
            self.depth,
            depth
        );
        out
    }
}
