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

//! Software bitmaps and the composition engine that moves pixels between them.
//!
//! A [`Bitmap`] owns a word-aligned pixel buffer in one of three encodings
//! ([`BitDepth`]) and, for indexed encodings, a [`FixedPalette`]. The
//! conversion half of the engine turns one encoding into another, remapping
//! palette indices when it can and materializing colors when it must. The
//! blit half copies rectangular regions, taking a direct row copy when the
//! layouts agree and staging through a 32-bit intermediate when they do not.
//!
//! Other pixel containers plug in through the [`Surface`] trait, with
//! [`blit_surface`] as their per-pixel composition path.

mod blit;
mod convert;
mod error;
mod palette;
mod storage;
mod surface;

pub use error::{BitmapError, PaletteError};
pub use palette::FixedPalette;
pub use storage::Bitmap;
pub use surface::{blit_surface, RgbaSurface, Surface};

/// The pixel encoding of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel, eight pixels per byte, most significant bit first.
    Mono1,
    /// 8 bits per pixel, each byte an index into the palette.
    Indexed8,
    /// 32 bits per pixel, stored as `[red, green, blue, 0]`.
    TrueColor32,
}

impl BitDepth {
    /// Bits used by one pixel.
    #[inline]
    pub const fn bits_per_pixel(&self) -> u32 {
        match self {
            BitDepth::Mono1 => 1,
            BitDepth::Indexed8 => 8,
            BitDepth::TrueColor32 => 32,
        }
    }

    /// `true` for encodings that store palette indices.
    #[inline]
    pub const fn is_indexed(&self) -> bool {
        !matches!(self, BitDepth::TrueColor32)
    }

    /// The largest palette a bitmap of this depth may carry.
    ///
    /// True-color bitmaps may carry a palette too; it is kept so a fallback
    /// conversion can restore it, but it does not affect the pixels.
    #[inline]
    pub const fn max_palette_len(&self) -> usize {
        match self {
            BitDepth::Mono1 => 2,
            BitDepth::Indexed8 | BitDepth::TrueColor32 => FixedPalette::CAPACITY,
        }
    }
}
