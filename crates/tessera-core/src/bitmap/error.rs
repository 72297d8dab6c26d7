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

//! Defines the hierarchy of error types for the bitmap subsystem.

use super::BitDepth;

/// An error raised while building or editing a [`FixedPalette`](super::FixedPalette).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// More colors were requested than a palette can hold.
    #[error("a palette holds at most {capacity} colors, {requested} were requested")]
    TooManyColors {
        /// The number of colors asked for.
        requested: usize,
        /// The palette capacity.
        capacity: usize,
    },
    /// An entry outside the active colors was addressed.
    #[error("palette index {index} is outside the {len} active colors")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of active colors.
        len: usize,
    },
}

/// An error raised by bitmap construction or depth conversion.
///
/// Geometry never produces an error: out-of-range rectangles are clamped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitmapError {
    /// The palette size does not fit the bit depth.
    #[error("a {depth:?} bitmap supports at most {max} palette colors, {requested} were requested")]
    InvalidPaletteSize {
        /// The bit depth of the bitmap being built.
        depth: BitDepth,
        /// The requested palette size.
        requested: usize,
        /// The largest palette the depth can address.
        max: usize,
    },
    /// A palette operation failed.
    #[error(transparent)]
    Palette(#[from] PaletteError),
    /// The operation only applies to indexed bitmaps.
    #[error("{0:?} bitmaps store colors, not palette indices")]
    NotIndexed(BitDepth),
    /// The source image cannot be represented with 16-bit dimensions.
    #[error("an image of {width}x{height} exceeds the maximum bitmap size")]
    TooLarge {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },
}
