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

//! End-to-end composition scenarios across depths and palettes.

use tessera_core::{BitDepth, Bitmap, Color, FixedPalette, Rect, Vec2};

fn black_and_white() -> FixedPalette {
    FixedPalette::from_colors(&[Color::BLACK, Color::WHITE]).unwrap()
}

fn checkerboard(size: Vec2) -> Bitmap {
    let mut bmp = Bitmap::with_palette(size, BitDepth::Indexed8, black_and_white()).unwrap();
    for y in 0..size.y {
        for x in 0..size.x {
            bmp.set_index(Vec2::new(x, y), ((x + y) % 2) as u8).unwrap();
        }
    }
    bmp
}

#[test]
fn test_checkerboard_onto_true_color() {
    let src = checkerboard(Vec2::new(4, 4));
    let mut dst = Bitmap::new(Vec2::new(8, 8), BitDepth::TrueColor32, 0).unwrap();
    dst.fill(Color::BLACK);

    dst.blit_from(&src, src.bounds(), Vec2::new(2, 2));

    let inside = Rect::new(2, 2, 4, 4);
    for y in 0..8u16 {
        for x in 0..8u16 {
            let pos = Vec2::new(x, y);
            let expected = if inside.contains(pos) {
                if (x - 2 + y - 2) % 2 == 0 {
                    Color::BLACK
                } else {
                    Color::WHITE
                }
            } else {
                Color::BLACK
            };
            assert_eq!(dst.color_at(pos), Some(expected), "pixel at ({x}, {y})");
        }
    }
}

#[test]
fn test_palette_remap_is_lossless_for_exact_colors() {
    let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
    let palette = FixedPalette::from_colors(&colors).unwrap();
    let mut src = Bitmap::with_palette(Vec2::new(4, 4), BitDepth::Indexed8, palette).unwrap();
    for y in 0..4u16 {
        for x in 0..4u16 {
            src.set_index(Vec2::new(x, y), ((x * 3 + y) % 4) as u8).unwrap();
        }
    }

    let shuffled = FixedPalette::from_colors(&[
        Color::new(9, 9, 9),
        Color::WHITE,
        Color::BLUE,
        Color::GREEN,
        Color::RED,
    ])
    .unwrap();
    let out = src
        .convert_to_depth_with_palette(BitDepth::Indexed8, &shuffled)
        .unwrap()
        .unwrap();

    for y in 0..4u16 {
        for x in 0..4u16 {
            let pos = Vec2::new(x, y);
            let index = out.get_index(pos).unwrap();
            assert_eq!(shuffled.get(usize::from(index)), src.color_at(pos));
        }
    }
}

#[test]
fn test_true_color_round_trip_through_indexed() {
    let colors = [Color::RED, Color::new(12, 34, 56), Color::WHITE];
    let mut src = Bitmap::new(Vec2::new(5, 3), BitDepth::TrueColor32, 0).unwrap();
    for y in 0..3u16 {
        for x in 0..5u16 {
            src.set_color(Vec2::new(x, y), colors[usize::from(x + y) % 3]);
        }
    }

    let palette = FixedPalette::from_colors(&colors).unwrap();
    let indexed = src
        .convert_to_depth_with_palette(BitDepth::Indexed8, &palette)
        .unwrap()
        .unwrap();
    let back = indexed.convert_to_depth(BitDepth::TrueColor32).unwrap();

    for y in 0..3u16 {
        for x in 0..5u16 {
            let pos = Vec2::new(x, y);
            assert_eq!(back.color_at(pos), src.color_at(pos));
        }
    }
}

#[test]
fn test_oversized_rect_copies_only_the_intersection() {
    let mut src = Bitmap::new(Vec2::new(4, 4), BitDepth::TrueColor32, 0).unwrap();
    src.fill(Color::RED);
    let mut dst = Bitmap::new(Vec2::new(6, 6), BitDepth::TrueColor32, 0).unwrap();

    dst.blit_from(&src, Rect::new(1, 1, 100, 100), Vec2::new(4, 3));

    for y in 0..6u16 {
        for x in 0..6u16 {
            let expected = if x >= 4 && y >= 3 { Color::RED } else { Color::BLACK };
            assert_eq!(dst.color_at(Vec2::new(x, y)), Some(expected));
        }
    }
    assert_eq!(dst.pixels().len(), dst.stride() * 6);
}

#[test]
fn test_empty_intersection_leaves_destination_untouched() {
    let src = checkerboard(Vec2::new(4, 4));
    let mut dst = Bitmap::with_palette(Vec2::new(8, 8), BitDepth::Indexed8, black_and_white()).unwrap();
    dst.fill(Color::WHITE);
    let before = dst.pixels().to_vec();

    dst.blit_from(&src, Rect::new(0, 0, 0, 4), Vec2::ZERO);
    dst.blit_from(&src, Rect::new(0, 0, 4, 0), Vec2::ZERO);
    dst.blit_from(&src, src.bounds(), Vec2::new(8, 0));
    dst.blit_from(&src, src.bounds(), Vec2::new(0, 200));
    dst.blit_from(&src, Rect::new(50, 50, 4, 4), Vec2::ZERO);

    assert_eq!(dst.pixels(), before.as_slice());
}

#[test]
fn test_partial_blit_across_depths() {
    let src = checkerboard(Vec2::new(16, 16));
    let mut dst = Bitmap::new(Vec2::new(16, 4), BitDepth::Mono1, 0).unwrap();

    dst.blit_from(&src, Rect::new(3, 5, 10, 2), Vec2::new(1, 1));

    for x in 0..10u16 {
        let expected = ((3 + x + 5) % 2) as u8;
        assert_eq!(dst.get_index(Vec2::new(1 + x, 1)), Some(expected));
    }
    assert_eq!(dst.get_index(Vec2::new(0, 1)), Some(0));
    assert_eq!(dst.get_index(Vec2::new(11, 1)), Some(0));
    assert_eq!(dst.get_index(Vec2::new(1, 0)), Some(0));
}
