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

//! Defines the axis-aligned `Rect` used to address bitmap regions.

use super::vector::Vec2;

/// An axis-aligned rectangle described by its top-left `origin` and its `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its origin and size components.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Creates a rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }

    /// Creates a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// The exclusive bottom-right corner, widened to `u32` so it cannot overflow.
    #[inline]
    pub fn end(&self) -> (u32, u32) {
        (
            u32::from(self.origin.x) + u32::from(self.size.x),
            u32::from(self.origin.y) + u32::from(self.size.y),
        )
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u32 {
        self.size.area()
    }

    /// `true` when the rectangle covers no pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x == 0 || self.size.y == 0
    }

    /// Returns `true` if `point` lies inside the rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        let (end_x, end_y) = self.end();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && u32::from(point.x) < end_x
            && u32::from(point.y) < end_y
    }

    /// Clamps the rectangle so it lies entirely within `bounds` (a size anchored at zero).
    ///
    /// The origin is clamped first, then the size is shrunk to what is left.
    pub fn clamped_to(&self, bounds: Vec2) -> Rect {
        let origin = self.origin.clamp(bounds);
        let size = self.size.clamp(bounds.saturating_sub(origin));
        Rect { origin, size }
    }
}
