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

//! Pixel storage, construction and per-pixel access for [`Bitmap`].

use super::error::BitmapError;
use super::palette::FixedPalette;
use super::BitDepth;
use crate::math::{Color, Rect, Vec2};
use crate::resource::Resource;
use image::RgbaImage;
use std::borrow::Cow;

/// One true-color pixel as laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub(crate) struct Texel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub pad: u8,
}

impl From<Color> for Texel {
    #[inline]
    fn from(c: Color) -> Self {
        Self {
            red: c.red,
            green: c.green,
            blue: c.blue,
            pad: 0,
        }
    }
}

impl From<Texel> for Color {
    #[inline]
    fn from(t: Texel) -> Self {
        Color::new(t.red, t.green, t.blue)
    }
}

/// An in-memory bitmap with exclusively owned pixel storage.
///
/// Rows are padded to a 4-byte boundary, so the buffer always holds
/// `stride * height` bytes. The size and depth are fixed for the lifetime of
/// the bitmap; only pixels and palette entries change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub(super) size: Vec2,
    pub(super) depth: BitDepth,
    pub(super) stride: usize,
    pub(super) pixels: Vec<u8>,
    pub(super) palette: FixedPalette,
}

impl Bitmap {
    /// Creates a zero-filled bitmap with a palette of `palette_len` black entries.
    ///
    /// # Errors
    /// Returns [`BitmapError::InvalidPaletteSize`] if `palette_len` exceeds what
    /// `depth` can address (2 for 1-bit, 256 otherwise).
    pub fn new(size: Vec2, depth: BitDepth, palette_len: usize) -> Result<Self, BitmapError> {
        Self::check_palette_len(depth, palette_len)?;
        Ok(Self::blank(size, depth, FixedPalette::with_len(palette_len)?))
    }

    /// Creates a zero-filled bitmap carrying `palette`.
    pub fn with_palette(
        size: Vec2,
        depth: BitDepth,
        palette: FixedPalette,
    ) -> Result<Self, BitmapError> {
        Self::check_palette_len(depth, palette.len())?;
        Ok(Self::blank(size, depth, palette))
    }

    /// Builds a bitmap whose palette is already known to fit `depth`.
    pub(crate) fn blank(size: Vec2, depth: BitDepth, palette: FixedPalette) -> Self {
        let stride = Self::compute_stride(size.x, depth);
        Self {
            size,
            depth,
            stride,
            pixels: vec![0; stride * usize::from(size.y)],
            palette,
        }
    }

    fn check_palette_len(depth: BitDepth, requested: usize) -> Result<(), BitmapError> {
        let max = depth.max_palette_len();
        if requested > max {
            return Err(BitmapError::InvalidPaletteSize {
                depth,
                requested,
                max,
            });
        }
        Ok(())
    }

    /// Bytes per row: `ceil(width * bits_per_pixel / 32) * 4`.
    #[inline]
    pub fn compute_stride(width: u16, depth: BitDepth) -> usize {
        (usize::from(width) * depth.bits_per_pixel() as usize).div_ceil(32) * 4
    }

    /// The size in pixels.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// The width in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.size.x
    }

    /// The height in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.size.y
    }

    /// The rectangle covering the whole bitmap.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// The pixel encoding.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.depth
    }

    /// Bytes between the starts of two consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The raw pixel bytes, `stride * height` long.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The palette.
    #[inline]
    pub fn palette(&self) -> &FixedPalette {
        &self.palette
    }

    /// Replaces the whole palette.
    pub fn set_palette(&mut self, palette: FixedPalette) -> Result<(), BitmapError> {
        Self::check_palette_len(self.depth, palette.len())?;
        self.palette = palette;
        Ok(())
    }

    /// Changes one palette entry.
    ///
    /// # Errors
    /// Fails when `index` is outside the active palette.
    pub fn set_palette_color(&mut self, index: usize, color: Color) -> Result<(), BitmapError> {
        self.palette.set(index, color)?;
        Ok(())
    }

    /// Returns a palette entry, or `None` when `index` is out of range.
    #[inline]
    pub fn palette_color(&self, index: usize) -> Option<Color> {
        self.palette.get(index)
    }

    /// `true` when both bitmaps carry identical palettes.
    #[inline]
    pub fn has_same_palette(&self, other: &Bitmap) -> bool {
        self.palette == other.palette
    }

    /// The palette used to interpret indices. A monochrome bitmap without a
    /// palette reads as black and white.
    pub(crate) fn effective_palette(&self) -> Cow<'_, FixedPalette> {
        if self.depth == BitDepth::Mono1 && self.palette.is_empty() {
            Cow::Owned(FixedPalette::monochrome())
        } else {
            Cow::Borrowed(&self.palette)
        }
    }

    #[inline]
    fn in_bounds(&self, pos: Vec2) -> bool {
        pos.x < self.size.x && pos.y < self.size.y
    }

    // --- Raw accessors; callers guarantee `x < width` and `y < height`. ---

    #[inline]
    pub(crate) fn read_index(&self, x: u16, y: u16) -> u8 {
        let row = usize::from(y) * self.stride;
        match self.depth {
            BitDepth::Mono1 => {
                let byte = self.pixels[row + usize::from(x / 8)];
                (byte >> (7 - (x % 8))) & 1
            }
            BitDepth::Indexed8 => self.pixels[row + usize::from(x)],
            BitDepth::TrueColor32 => 0,
        }
    }

    #[inline]
    pub(crate) fn write_index(&mut self, x: u16, y: u16, index: u8) {
        let row = usize::from(y) * self.stride;
        match self.depth {
            BitDepth::Mono1 => {
                let byte = &mut self.pixels[row + usize::from(x / 8)];
                let mask = 0x80u8 >> (x % 8);
                if index & 1 != 0 {
                    *byte |= mask;
                } else {
                    *byte &= !mask;
                }
            }
            BitDepth::Indexed8 => self.pixels[row + usize::from(x)] = index,
            BitDepth::TrueColor32 => {}
        }
    }

    #[inline]
    pub(crate) fn read_texel(&self, x: u16, y: u16) -> Color {
        let offset = usize::from(y) * self.stride + usize::from(x) * 4;
        let texel: Texel = *bytemuck::from_bytes(&self.pixels[offset..offset + 4]);
        texel.into()
    }

    #[inline]
    pub(crate) fn write_texel(&mut self, x: u16, y: u16, color: Color) {
        let offset = usize::from(y) * self.stride + usize::from(x) * 4;
        self.pixels[offset..offset + 4].copy_from_slice(bytemuck::bytes_of(&Texel::from(color)));
    }

    // --- Checked per-pixel access ---

    /// The palette index at `pos`, for indexed bitmaps.
    pub fn get_index(&self, pos: Vec2) -> Option<u8> {
        if !self.depth.is_indexed() || !self.in_bounds(pos) {
            return None;
        }
        Some(self.read_index(pos.x, pos.y))
    }

    /// Writes a palette index. Out-of-bounds positions are ignored.
    ///
    /// # Errors
    /// Returns [`BitmapError::NotIndexed`] on a true-color bitmap.
    pub fn set_index(&mut self, pos: Vec2, index: u8) -> Result<(), BitmapError> {
        if !self.depth.is_indexed() {
            return Err(BitmapError::NotIndexed(self.depth));
        }
        if self.in_bounds(pos) {
            self.write_index(pos.x, pos.y, index);
        }
        Ok(())
    }

    /// The color at `pos`. Indices outside the palette read as black.
    pub fn color_at(&self, pos: Vec2) -> Option<Color> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(match self.depth {
            BitDepth::TrueColor32 => self.read_texel(pos.x, pos.y),
            _ => {
                let index = self.read_index(pos.x, pos.y);
                self.effective_palette()
                    .get(usize::from(index))
                    .unwrap_or(Color::BLACK)
            }
        })
    }

    /// Writes a color. Indexed bitmaps store the nearest palette entry.
    /// Out-of-bounds positions are ignored.
    pub fn set_color(&mut self, pos: Vec2, color: Color) {
        if !self.in_bounds(pos) {
            return;
        }
        match self.depth {
            BitDepth::TrueColor32 => self.write_texel(pos.x, pos.y, color),
            _ => {
                let index = self.effective_palette().find_closest_color_index(color);
                self.write_index(pos.x, pos.y, index);
            }
        }
    }

    /// Sets every pixel to `color` (or its nearest palette entry).
    pub fn fill(&mut self, color: Color) {
        match self.depth {
            BitDepth::TrueColor32 => {
                let texel = Texel::from(color);
                for y in 0..self.size.y {
                    let start = usize::from(y) * self.stride;
                    let row = &mut self.pixels[start..start + usize::from(self.size.x) * 4];
                    bytemuck::cast_slice_mut::<u8, Texel>(row).fill(texel);
                }
            }
            BitDepth::Indexed8 => {
                let index = self.palette.find_closest_color_index(color);
                for y in 0..self.size.y {
                    let start = usize::from(y) * self.stride;
                    self.pixels[start..start + usize::from(self.size.x)].fill(index);
                }
            }
            BitDepth::Mono1 => {
                let index = self.effective_palette().find_closest_color_index(color);
                for y in 0..self.size.y {
                    for x in 0..self.size.x {
                        self.write_index(x, y, index);
                    }
                }
            }
        }
    }

    // --- Interop with the `image` crate ---

    /// Creates a true-color bitmap from an RGBA image, dropping alpha.
    ///
    /// # Errors
    /// Returns [`BitmapError::TooLarge`] if either dimension exceeds `u16::MAX`.
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self, BitmapError> {
        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(BitmapError::TooLarge { width, height });
        };

        let mut bitmap = Self::blank(Vec2::new(w, h), BitDepth::TrueColor32, FixedPalette::new());
        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b, _] = pixel.0;
            bitmap.write_texel(x as u16, y as u16, Color::new(r, g, b));
        }
        Ok(bitmap)
    }

    /// Renders the bitmap into an opaque RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(u32::from(self.size.x), u32::from(self.size.y), |x, y| {
            let c = self
                .color_at(Vec2::new(x as u16, y as u16))
                .unwrap_or(Color::BLACK);
            image::Rgba([c.red, c.green, c.blue, 255])
        })
    }
}

impl Resource for Bitmap {}
