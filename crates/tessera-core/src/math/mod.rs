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

//! Integer math primitives for pixel-space geometry and 24-bit colors.
//!
//! Everything here is a small `Copy` value type. Coordinates use `u16`
//! components, which bounds a bitmap to 65535 pixels per axis.

pub mod color;
pub mod rect;
pub mod vector;

pub use self::color::Color;
pub use self::rect::Rect;
pub use self::vector::Vec2;
