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

//! # Tessera Core
//!
//! Foundational crate containing the pixel types, the bitmap composition
//! engine, byte streams and the resource contracts shared by every other
//! Tessera crate.

#![warn(missing_docs)]

pub mod bitmap;
pub mod math;
pub mod resource;
pub mod stream;

pub use bitmap::{
    blit_surface, BitDepth, Bitmap, BitmapError, FixedPalette, PaletteError, RgbaSurface, Surface,
};
pub use math::{Color, Rect, Vec2};
pub use resource::{AsAny, Resource, ResourceType};
pub use stream::{FileStream, MemoryStream, Stream, StreamError};
