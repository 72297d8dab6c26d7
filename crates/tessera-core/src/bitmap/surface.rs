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

//! The [`Surface`] abstraction over pixel containers.

use super::blit::clip_blit;
use super::error::BitmapError;
use super::storage::Bitmap;
use super::BitDepth;
use crate::math::{Color, Rect, Vec2};
use image::{Rgba, RgbaImage};

/// Anything that exposes addressable pixels.
///
/// Every surface can receive a blit from any other through
/// [`Surface::blit_from`]. [`Bitmap`] also has an inherent `blit_from` taking
/// another bitmap, which is preferred by method resolution and uses the fast
/// row-copy engine.
pub trait Surface {
    /// Size in pixels.
    fn size(&self) -> Vec2;

    /// The pixel encoding.
    fn bit_depth(&self) -> BitDepth;

    /// The color at `pos`, or `None` outside the surface.
    fn get_pixel(&self, pos: Vec2) -> Option<Color>;

    /// Writes a color. Out-of-bounds positions are ignored.
    fn set_pixel(&mut self, pos: Vec2, color: Color);

    /// Copies `src_rect` of `src` to `dst_pos`, pixel by pixel.
    ///
    /// Clamping follows the bitmap blit: the rectangle is cut to both
    /// surfaces and an empty result is a no-op.
    fn blit_from(&mut self, src: &dyn Surface, src_rect: Rect, dst_pos: Vec2) {
        let Some(rect) = clip_blit(src.size(), self.size(), src_rect, dst_pos) else {
            return;
        };

        for row in 0..rect.size.y {
            for col in 0..rect.size.x {
                let from = Vec2::new(rect.origin.x + col, rect.origin.y + row);
                if let Some(color) = src.get_pixel(from) {
                    self.set_pixel(Vec2::new(dst_pos.x + col, dst_pos.y + row), color);
                }
            }
        }
    }
}

impl Surface for Bitmap {
    fn size(&self) -> Vec2 {
        Bitmap::size(self)
    }

    fn bit_depth(&self) -> BitDepth {
        Bitmap::bit_depth(self)
    }

    fn get_pixel(&self, pos: Vec2) -> Option<Color> {
        self.color_at(pos)
    }

    fn set_pixel(&mut self, pos: Vec2, color: Color) {
        self.set_color(pos, color);
    }
}

/// A 32-bit surface backed by an [`RgbaImage`], the way a platform window
/// buffer or decoded texture would present itself.
///
/// Alpha is written as opaque and ignored on read.
#[derive(Debug, Clone)]
pub struct RgbaSurface {
    image: RgbaImage,
}

impl RgbaSurface {
    /// Creates a black surface.
    pub fn new(size: Vec2) -> Self {
        Self {
            image: RgbaImage::from_pixel(
                u32::from(size.x),
                u32::from(size.y),
                Rgba([0, 0, 0, 255]),
            ),
        }
    }

    /// Wraps an existing image.
    pub fn from_image(image: RgbaImage) -> Result<Self, BitmapError> {
        let (width, height) = image.dimensions();
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(BitmapError::TooLarge { width, height });
        }
        Ok(Self { image })
    }

    /// The backing image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Unwraps the backing image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Surface for RgbaSurface {
    fn size(&self) -> Vec2 {
        let (w, h) = self.image.dimensions();
        Vec2::new(w as u16, h as u16)
    }

    fn bit_depth(&self) -> BitDepth {
        BitDepth::TrueColor32
    }

    fn get_pixel(&self, pos: Vec2) -> Option<Color> {
        self.image
            .get_pixel_checked(u32::from(pos.x), u32::from(pos.y))
            .map(|p| Color::new(p.0[0], p.0[1], p.0[2]))
    }

    fn set_pixel(&mut self, pos: Vec2, color: Color) {
        if let Some(p) = self
            .image
            .get_pixel_mut_checked(u32::from(pos.x), u32::from(pos.y))
        {
            *p = Rgba([color.red, color.green, color.blue, 255]);
        }
    }
}

/// Copies `src_rect` of `src` to `dst_pos` in `dst`, one pixel at a time.
///
/// Clamping follows [`Bitmap::blit_from`]. Use the bitmap method when both
/// sides are bitmaps; this path exists for everything else.
pub fn blit_surface(dst: &mut dyn Surface, src: &dyn Surface, src_rect: Rect, dst_pos: Vec2) {
    dst.blit_from(src, src_rect, dst_pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::FixedPalette;

    #[test]
    fn test_rgba_surface_pixels() {
        let mut surface = RgbaSurface::new(Vec2::new(2, 2));
        assert_eq!(surface.get_pixel(Vec2::new(1, 1)), Some(Color::BLACK));
        surface.set_pixel(Vec2::new(1, 0), Color::RED);
        surface.set_pixel(Vec2::new(5, 5), Color::RED);
        assert_eq!(surface.get_pixel(Vec2::new(1, 0)), Some(Color::RED));
        assert_eq!(surface.get_pixel(Vec2::new(2, 0)), None);
        assert_eq!(surface.image().get_pixel(1, 0).0[3], 255);
    }

    #[test]
    fn test_blit_bitmap_onto_rgba_surface() {
        let palette = FixedPalette::from_colors(&[Color::BLACK, Color::GREEN]).unwrap();
        let mut bmp = Bitmap::with_palette(Vec2::new(2, 2), BitDepth::Indexed8, palette).unwrap();
        bmp.set_index(Vec2::new(1, 1), 1).unwrap();

        let mut surface = RgbaSurface::new(Vec2::new(3, 3));
        blit_surface(&mut surface, &bmp, bmp.bounds(), Vec2::new(2, 2));

        assert_eq!(surface.get_pixel(Vec2::new(2, 2)), Some(Color::BLACK));
        // (1, 1) of the bitmap would land at (3, 3), outside the surface.
        assert_eq!(surface.get_pixel(Vec2::new(2, 1)), Some(Color::BLACK));

        blit_surface(&mut surface, &bmp, Rect::new(1, 1, 1, 1), Vec2::ZERO);
        assert_eq!(surface.get_pixel(Vec2::ZERO), Some(Color::GREEN));
    }

    #[test]
    fn test_blit_rgba_surface_into_bitmap() {
        let mut surface = RgbaSurface::new(Vec2::new(2, 1));
        surface.set_pixel(Vec2::new(0, 0), Color::WHITE);
        let mut bmp = Bitmap::new(Vec2::new(2, 1), BitDepth::Mono1, 0).unwrap();
        blit_surface(&mut bmp, &surface, Rect::new(0, 0, 2, 1), Vec2::ZERO);
        assert_eq!(bmp.get_index(Vec2::new(0, 0)), Some(1));
        assert_eq!(bmp.get_index(Vec2::new(1, 0)), Some(0));
    }

    #[test]
    fn test_surfaces_share_the_blit_contract() {
        let mut source = RgbaSurface::new(Vec2::new(3, 2));
        source.set_pixel(Vec2::new(2, 1), Color::BLUE);

        let mut rgba = RgbaSurface::new(Vec2::new(4, 4));
        rgba.blit_from(&source, Rect::new(1, 0, 8, 8), Vec2::new(1, 1));
        assert_eq!(rgba.get_pixel(Vec2::new(2, 2)), Some(Color::BLUE));
        assert_eq!(rgba.get_pixel(Vec2::new(1, 1)), Some(Color::BLACK));

        let mut bmp = Bitmap::new(Vec2::new(4, 4), BitDepth::TrueColor32, 0).unwrap();
        Surface::blit_from(&mut bmp, &source, Rect::new(0, 0, 3, 2), Vec2::new(1, 2));
        assert_eq!(bmp.color_at(Vec2::new(3, 3)), Some(Color::BLUE));

        let mut untouched = RgbaSurface::new(Vec2::new(2, 2));
        untouched.blit_from(&source, Rect::new(0, 0, 2, 2), Vec2::new(2, 0));
        assert_eq!(untouched.get_pixel(Vec2::new(1, 0)), Some(Color::BLACK));
    }
}
