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

//! Defines the 24-bit `Color` type used by palettes and true-color pixels.

/// An opaque RGB color with 8 bits per channel.
///
/// Equality is an exact channel match. [`Color::distance_squared`] is the metric
/// used by nearest-color searches; it is a plain Euclidean distance in channel
/// space, not a perceptual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Color {
    /// The red channel.
    pub red: u8,
    /// The green channel.
    pub green: u8,
    /// The blue channel.
    pub blue: u8,
}

impl Color {
    // --- Common Color Constants ---

    /// `#000000`
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// `#FFFFFF`
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// `#FF0000`
    pub const RED: Self = Self::new(255, 0, 0);
    /// `#00FF00`
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// `#0000FF`
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from a `0x00RRGGBB` value.
    #[inline]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Packs the color as `0x00RRGGBB`.
    #[inline]
    pub const fn to_rgb(&self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// Squared Euclidean distance between two colors in channel space.
    #[inline]
    pub fn distance_squared(&self, other: &Color) -> u32 {
        let dr = i32::from(self.red) - i32::from(other.red);
        let dg = i32::from(self.green) - i32::from(other.green);
        let db = i32::from(self.blue) - i32::from(other.blue);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Self::from_rgb(rgb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}
