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

//! Defines the `Vec2` pixel coordinate / extent type.

/// A two-dimensional integer vector, used both for positions and for sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    /// The horizontal component.
    pub x: u16,
    /// The vertical component.
    pub y: u16,
}

impl Vec2 {
    /// The origin, `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns `x * y` without overflowing.
    #[inline]
    pub fn area(&self) -> u32 {
        u32::from(self.x) * u32::from(self.y)
    }

    /// Component-wise minimum against `maximums`.
    #[inline]
    pub fn clamp(&self, maximums: Vec2) -> Self {
        Self {
            x: self.x.min(maximums.x),
            y: self.y.min(maximums.y),
        }
    }

    /// Component-wise subtraction that stops at zero.
    #[inline]
    pub fn saturating_sub(&self, rhs: Vec2) -> Self {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

impl From<(u16, u16)> for Vec2 {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}
