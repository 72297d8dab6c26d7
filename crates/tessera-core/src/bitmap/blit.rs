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

//! Rectangular pixel copies between bitmaps.

use super::storage::Bitmap;
use super::BitDepth;
use crate::math::{Rect, Vec2};

/// Clips a blit against both bitmaps.
///
/// `src_rect` is clamped to the source bounds, then shrunk so the placement at
/// `dst_pos` fits the destination. Returns `None` when nothing is left to copy.
pub(crate) fn clip_blit(
    src_size: Vec2,
    dst_size: Vec2,
    src_rect: Rect,
    dst_pos: Vec2,
) -> Option<Rect> {
    let src_rect = src_rect.clamped_to(src_size);
    let room = dst_size.saturating_sub(dst_pos);
    let size = src_rect.size.clamp(room);
    if size.x == 0 || size.y == 0 {
        return None;
    }
    Some(Rect::from_origin_size(src_rect.origin, size))
}

impl Bitmap {
    /// Copies `rect` (clamped to this bitmap) into a new bitmap of the same
    /// depth and palette.
    pub fn clone_region(&self, rect: Rect) -> Bitmap {
        let rect = rect.clamped_to(self.size);
        let mut out = Bitmap::blank(rect.size, self.depth, self.palette.clone());
        out.blit_from(self, rect, Vec2::ZERO);
        out
    }

    /// `true` when a blit of `src_rect` to `dst_pos` can copy raw bytes.
    ///
    /// Both bitmaps must carry the same palette. A 1-bit destination also
    /// needs byte-aligned source and destination columns; if the width is not
    /// a whole number of bytes, the regions widened to byte boundaries must
    /// still fit both bitmaps.
    pub fn can_fast_copy_from(&self, src: &Bitmap, src_rect: Rect, dst_pos: Vec2) -> bool {
        if !self.has_same_palette(src) {
            return false;
        }
        if self.depth != BitDepth::Mono1 {
            return true;
        }
        if src_rect.origin.x % 8 != 0 || dst_pos.x % 8 != 0 {
            return false;
        }
        let width = u32::from(src_rect.size.x);
        if width % 8 == 0 {
            return true;
        }
        let widened = width.next_multiple_of(8);
        u32::from(src_rect.origin.x) + widened <= u32::from(src.width())
            && u32::from(dst_pos.x) + widened <= u32::from(self.width())
    }

    /// Copies `src_rect` of `src` to `dst_pos` in this bitmap.
    ///
    /// Rectangles are clamped to both bitmaps; an empty intersection leaves
    /// this bitmap untouched. Depth and palette mismatches are resolved by
    /// converting the source, or by staging this bitmap through true color.
    pub fn blit_from(&mut self, src: &Bitmap, src_rect: Rect, dst_pos: Vec2) {
        let Some(src_rect) = clip_blit(src.size, self.size, src_rect, dst_pos) else {
            return;
        };

        let fast = self.can_fast_copy_from(src, src_rect, dst_pos);
        if !fast && self.depth != BitDepth::TrueColor32 {
            self.blit_through_true_color(src, src_rect, dst_pos);
            return;
        }

        if src.depth != self.depth {
            if src_rect == src.bounds() || self.depth == BitDepth::TrueColor32 {
                let converted = src.convert_into(self.depth, &self.palette);
                self.blit_from(&converted, src_rect, dst_pos);
            } else {
                let region = src
                    .clone_region(src_rect)
                    .convert_into(self.depth, &self.palette);
                let whole = region.bounds();
                self.blit_from(&region, whole, dst_pos);
            }
            return;
        }

        self.copy_rows(src, src_rect, dst_pos);
    }

    /// The universal path: widen to 32 bits, blit there, come back.
    fn blit_through_true_color(&mut self, src: &Bitmap, src_rect: Rect, dst_pos: Vec2) {
        let depth = self.depth;
        let palette = self.palette.clone();

        let mut staging = self.convert_into(BitDepth::TrueColor32, &palette);
        self.pixels = Vec::new();

        staging.blit_from(src, src_rect, dst_pos);
        self.pixels = staging.convert_into(depth, &palette).pixels;
    }

    /// Raw row copy between bitmaps of equal depth. The region is already clipped.
    fn copy_rows(&mut self, src: &Bitmap, src_rect: Rect, dst_pos: Vec2) {
        let width = usize::from(src_rect.size.x);
        let (sx, sy) = (usize::from(src_rect.origin.x), usize::from(src_rect.origin.y));
        let (dx, dy) = (usize::from(dst_pos.x), usize::from(dst_pos.y));

        match self.depth {
            BitDepth::Mono1 => {
                let whole = width / 8;
                let tail = width % 8;
                let mask = if tail == 0 { 0 } else { 0xFFu8 << (8 - tail) };

                for row in (0..usize::from(src_rect.size.y)).rev() {
                    let s = (sy + row) * src.stride + sx / 8;
                    let d = (dy + row) * self.stride + dx / 8;
                    self.pixels[d..d + whole].copy_from_slice(&src.pixels[s..s + whole]);
                    if tail != 0 {
                        let last = &mut self.pixels[d + whole];
                        *last = (*last & !mask) | (src.pixels[s + whole] & mask);
                    }
                }
            }
            BitDepth::Indexed8 | BitDepth::TrueColor32 => {
                let bytes = self.depth.bits_per_pixel() as usize / 8;
                let len = width * bytes;

                for row in (0..usize::from(src_rect.size.y)).rev() {
                    let s = (sy + row) * src.stride + sx * bytes;
                    let d = (dy + row) * self.stride + dx * bytes;
                    self.pixels[d..d + len].copy_from_slice(&src.pixels[s..s + len]);
                }
            }
        }
    }

    /// Copies a region of this bitmap onto another place in itself.
    ///
    /// Overlapping regions are handled like `memmove`: the result is as if the
    /// source had been copied out first.
    pub fn blit_within(&mut self, src_rect: Rect, dst_pos: Vec2) {
        let Some(src_rect) = clip_blit(self.size, self.size, src_rect, dst_pos) else {
            return;
        };

        if self.depth == BitDepth::Mono1 {
            let region = self.clone_region(src_rect);
            let whole = region.bounds();
            self.blit_from(&region, whole, dst_pos);
            return;
        }

        let bytes = self.depth.bits_per_pixel() as usize / 8;
        let len = usize::from(src_rect.size.x) * bytes;
        let (sx, sy) = (usize::from(src_rect.origin.x), usize::from(src_rect.origin.y));
        let (dx, dy) = (usize::from(dst_pos.x), usize::from(dst_pos.y));

        let copy_row = |pixels: &mut Vec<u8>, stride: usize, row: usize| {
            let s = (sy + row) * stride + sx * bytes;
            let d = (dy + row) * stride + dx * bytes;
            pixels.copy_within(s..s + len, d);
        };

        let rows = usize::from(src_rect.size.y);
        if dy > sy {
            for row in (0..rows).rev() {
                copy_row(&mut self.pixels, self.stride, row);
            }
        } else {
            for row in 0..rows {
                copy_row(&mut self.pixels, self.stride, row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::FixedPalette;
    use crate::math::Color;

    fn numbered(size: Vec2) -> Bitmap {
        let palette = FixedPalette::with_len(256).unwrap();
        let mut bmp = Bitmap::with_palette(size, BitDepth::Indexed8, palette).unwrap();
        for y in 0..size.y {
            for x in 0..size.x {
                bmp.set_index(Vec2::new(x, y), (y * size.x + x) as u8).unwrap();
            }
        }
        bmp
    }

    #[test]
    fn test_clip_blit_intersects_both_bitmaps() {
        let rect = clip_blit(Vec2::new(4, 4), Vec2::new(8, 8), Rect::new(1, 1, 10, 10), Vec2::new(6, 0));
        assert_eq!(rect, Some(Rect::new(1, 1, 2, 3)));
        assert_eq!(
            clip_blit(Vec2::new(4, 4), Vec2::new(8, 8), Rect::new(0, 0, 4, 4), Vec2::new(8, 0)),
            None
        );
        assert_eq!(
            clip_blit(Vec2::new(4, 4), Vec2::new(8, 8), Rect::new(4, 0, 4, 4), Vec2::ZERO),
            None
        );
    }

    #[test]
    fn test_fast_copy_requires_same_palette() {
        let a = Bitmap::new(Vec2::new(8, 8), BitDepth::Indexed8, 2).unwrap();
        let mut b = Bitmap::new(Vec2::new(8, 8), BitDepth::Indexed8, 2).unwrap();
        assert!(b.can_fast_copy_from(&a, a.bounds(), Vec2::ZERO));
        b.set_palette_color(1, Color::WHITE).unwrap();
        assert!(!b.can_fast_copy_from(&a, a.bounds(), Vec2::ZERO));
    }

    #[test]
    fn test_fast_copy_mono_alignment() {
        let src = Bitmap::new(Vec2::new(16, 2), BitDepth::Mono1, 2).unwrap();
        let dst = Bitmap::new(Vec2::new(16, 2), BitDepth::Mono1, 2).unwrap();
        assert!(dst.can_fast_copy_from(&src, Rect::new(0, 0, 16, 2), Vec2::new(0, 0)));
        assert!(!dst.can_fast_copy_from(&src, Rect::new(3, 0, 8, 2), Vec2::new(0, 0)));
        assert!(!dst.can_fast_copy_from(&src, Rect::new(0, 0, 8, 2), Vec2::new(4, 0)));
        // 5 columns widen to 8, which still fits both bitmaps.
        assert!(dst.can_fast_copy_from(&src, Rect::new(8, 0, 5, 2), Vec2::new(8, 0)));

        let narrow = Bitmap::new(Vec2::new(13, 2), BitDepth::Mono1, 2).unwrap();
        assert!(!dst.can_fast_copy_from(&narrow, Rect::new(8, 0, 5, 2), Vec2::new(0, 0)));
    }

    #[test]
    fn test_indexed_direct_copy() {
        let src = numbered(Vec2::new(4, 4));
        let mut dst = Bitmap::with_palette(Vec2::new(6, 6), BitDepth::Indexed8, src.palette().clone()).unwrap();
        dst.blit_from(&src, Rect::new(1, 1, 2, 2), Vec2::new(3, 4));
        assert_eq!(dst.get_index(Vec2::new(3, 4)), Some(5));
        assert_eq!(dst.get_index(Vec2::new(4, 5)), Some(10));
        assert_eq!(dst.get_index(Vec2::new(2, 4)), Some(0));
        assert_eq!(dst.get_index(Vec2::new(5, 5)), Some(0));
    }

    #[test]
    fn test_mono_partial_byte_does_not_touch_neighbours() {
        let mut src = Bitmap::new(Vec2::new(16, 1), BitDepth::Mono1, 0).unwrap();
        src.fill(Color::WHITE);
        let mut dst = Bitmap::new(Vec2::new(16, 1), BitDepth::Mono1, 0).unwrap();
        dst.blit_from(&src, Rect::new(0, 0, 3, 1), Vec2::ZERO);
        assert_eq!(dst.pixels()[0], 0b1110_0000);
        assert_eq!(dst.pixels()[1], 0);
    }

    #[test]
    fn test_misaligned_mono_goes_through_fallback() {
        let mut src = Bitmap::new(Vec2::new(8, 1), BitDepth::Mono1, 0).unwrap();
        src.fill(Color::WHITE);
        let mut dst = Bitmap::new(Vec2::new(16, 1), BitDepth::Mono1, 0).unwrap();
        dst.blit_from(&src, Rect::new(0, 0, 4, 1), Vec2::new(6, 0));
        assert_eq!(dst.pixels()[0], 0b0000_0011);
        assert_eq!(dst.pixels()[1], 0b1100_0000);
        assert_eq!(dst.bit_depth(), BitDepth::Mono1);
        assert_eq!(dst.pixels().len(), dst.stride());
    }

    #[test]
    fn test_palette_mismatch_recolors_through_true_color() {
        let src_pal = FixedPalette::from_colors(&[Color::BLACK, Color::RED]).unwrap();
        let mut src = Bitmap::with_palette(Vec2::new(2, 1), BitDepth::Indexed8, src_pal).unwrap();
        src.set_index(Vec2::new(1, 0), 1).unwrap();

        let dst_pal = FixedPalette::from_colors(&[Color::RED, Color::BLACK]).unwrap();
        let mut dst = Bitmap::with_palette(Vec2::new(2, 1), BitDepth::Indexed8, dst_pal).unwrap();
        dst.blit_from(&src, src.bounds(), Vec2::ZERO);

        assert_eq!(dst.get_index(Vec2::new(0, 0)), Some(1));
        assert_eq!(dst.get_index(Vec2::new(1, 0)), Some(0));
        assert_eq!(dst.color_at(Vec2::new(1, 0)), Some(Color::RED));
    }

    #[test]
    fn test_clone_region_clamps() {
        let src = numbered(Vec2::new(4, 4));
        let region = src.clone_region(Rect::new(2, 3, 10, 10));
        assert_eq!(region.size(), Vec2::new(2, 1));
        assert_eq!(region.get_index(Vec2::new(0, 0)), Some(14));
        assert_eq!(region.get_index(Vec2::new(1, 0)), Some(15));
    }

    #[test]
    fn test_blit_within_handles_overlap() {
        let mut bmp = numbered(Vec2::new(4, 4));
        bmp.blit_within(Rect::new(0, 0, 3, 3), Vec2::new(1, 1));
        assert_eq!(bmp.get_index(Vec2::new(1, 1)), Some(0));
        assert_eq!(bmp.get_index(Vec2::new(3, 3)), Some(10));
        assert_eq!(bmp.get_index(Vec2::new(2, 1)), Some(1));

        let mut bmp = numbered(Vec2::new(4, 4));
        bmp.blit_within(Rect::new(1, 1, 3, 3), Vec2::ZERO);
        assert_eq!(bmp.get_index(Vec2::new(0, 0)), Some(5));
        assert_eq!(bmp.get_index(Vec2::new(2, 2)), Some(15));
    }

    #[test]
    fn test_blit_within_mono() {
        let mut bmp = Bitmap::new(Vec2::new(8, 1), BitDepth::Mono1, 0).unwrap();
        bmp.set_index(Vec2::new(0, 0), 1).unwrap();
        bmp.set_index(Vec2::new(1, 0), 1).unwrap();
        bmp.blit_within(Rect::new(0, 0, 4, 1), Vec2::new(1, 0));
        assert_eq!(bmp.pixels()[0], 0b1110_0000);
    }
}
