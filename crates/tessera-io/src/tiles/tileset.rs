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

use crate::resource::ResourcePtr;
use tessera_core::{Bitmap, Rect, Resource, Vec2};

/// A grid of equally sized tiles cut out of one bitmap.
///
/// Tiles are numbered from zero, row-major. The image may have a `margin`
/// around the grid and `spacing` between tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    bitmap: ResourcePtr<Bitmap>,
    tile_size: Vec2,
    tile_count: u16,
    first_gid: u16,
    margin: u16,
    spacing: u16,
    columns: Option<u16>,
}

impl Tileset {
    /// Creates a tileset with no margin, no spacing and a first global id of 1.
    pub fn new(bitmap: ResourcePtr<Bitmap>, tile_size: Vec2, tile_count: u16) -> Self {
        Self {
            bitmap,
            tile_size,
            tile_count,
            first_gid: 1,
            margin: 0,
            spacing: 0,
            columns: None,
        }
    }

    /// Sets the border around the grid, in pixels.
    pub fn with_margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the gap between neighbouring tiles, in pixels.
    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the map id that refers to tile 0.
    pub fn with_first_gid(mut self, first_gid: u16) -> Self {
        self.first_gid = first_gid;
        self
    }

    /// Fixes the number of columns instead of deriving it from the image width.
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = Some(columns);
        self
    }

    /// The source image.
    pub fn bitmap(&self) -> &ResourcePtr<Bitmap> {
        &self.bitmap
    }

    /// Size of one tile.
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> u16 {
        self.tile_count
    }

    /// The map id of tile 0.
    pub fn first_gid(&self) -> u16 {
        self.first_gid
    }

    /// Border around the grid.
    pub fn margin(&self) -> u16 {
        self.margin
    }

    /// Gap between tiles.
    pub fn spacing(&self) -> u16 {
        self.spacing
    }

    /// Converts a map id to a tile index. Id 0 and ids below the first id
    /// are empty cells.
    pub fn tile_for_gid(&self, gid: u16) -> Option<u16> {
        if gid == 0 || gid < self.first_gid {
            return None;
        }
        Some(gid - self.first_gid)
    }

    /// Tiles per row in an image `image_width` pixels wide.
    pub fn columns_for(&self, image_width: u16) -> u16 {
        if let Some(columns) = self.columns {
            return columns;
        }
        let step = u32::from(self.tile_size.x) + u32::from(self.spacing);
        if step == 0 {
            return 0;
        }
        let usable = u32::from(image_width).saturating_sub(2 * u32::from(self.margin))
            + u32::from(self.spacing);
        (usable / step).min(u32::from(u16::MAX)) as u16
    }

    /// Where `tile` sits in the source image. Loads the image if needed.
    pub fn tile_rect(&self, tile: u16) -> Option<Rect> {
        let bitmap = self.bitmap.get()?;
        self.tile_rect_in(tile, bitmap.width())
    }

    pub(crate) fn tile_rect_in(&self, tile: u16, image_width: u16) -> Option<Rect> {
        if tile >= self.tile_count {
            return None;
        }
        let columns = self.columns_for(image_width);
        if columns == 0 {
            return None;
        }

        let (col, row) = (u32::from(tile % columns), u32::from(tile / columns));
        let x = u32::from(self.margin) + col * (u32::from(self.tile_size.x) + u32::from(self.spacing));
        let y = u32::from(self.margin) + row * (u32::from(self.tile_size.y) + u32::from(self.spacing));

        Some(Rect::new(
            u16::try_from(x).ok()?,
            u16::try_from(y).ok()?,
            self.tile_size.x,
            self.tile_size.y,
        ))
    }

    /// Blits `tile` into `destination` at `position`.
    ///
    /// Unknown tiles and an image that fails to load draw nothing.
    pub fn draw_tile(&self, tile: u16, destination: &mut Bitmap, position: Vec2) {
        if let Some(image) = self.bitmap.get() {
            self.draw_tile_from(&image, tile, destination, position);
        }
    }

    pub(crate) fn draw_tile_from(
        &self,
        image: &Bitmap,
        tile: u16,
        destination: &mut Bitmap,
        position: Vec2,
    ) {
        if let Some(rect) = self.tile_rect_in(tile, image.width()) {
            destination.blit_from(image, rect, position);
        }
    }
}

impl Resource for Tileset {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceManager;
    use crate::source::MemorySource;
    use tessera_core::{BitDepth, Color};

    /// 2x2 tiles of 4x4 pixels with a 1 pixel margin and 2 pixels of spacing,
    /// each tile filled with its own color.
    fn sheet(manager: &ResourceManager) -> Tileset {
        let mut image = Bitmap::new(Vec2::new(12, 12), BitDepth::TrueColor32, 0).unwrap();
        let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let layout = Tileset::new(ResourcePtr::null(), Vec2::new(4, 4), 4)
            .with_margin(1)
            .with_spacing(2);
        for (tile, color) in colors.iter().enumerate() {
            let rect = layout.tile_rect_in(tile as u16, 12).unwrap();
            for y in 0..4 {
                for x in 0..4 {
                    image.set_color(Vec2::new(rect.origin.x + x, rect.origin.y + y), *color);
                }
            }
        }
        let bitmap = manager.make("sheet.png", image);
        Tileset::new(bitmap, Vec2::new(4, 4), 4)
            .with_margin(1)
            .with_spacing(2)
    }

    #[test]
    fn test_tile_rect_is_row_major_with_margin_and_spacing() {
        let tileset = Tileset::new(ResourcePtr::null(), Vec2::new(4, 4), 4)
            .with_margin(1)
            .with_spacing(2);
        assert_eq!(tileset.columns_for(12), 2);
        assert_eq!(tileset.tile_rect_in(0, 12), Some(Rect::new(1, 1, 4, 4)));
        assert_eq!(tileset.tile_rect_in(1, 12), Some(Rect::new(7, 1, 4, 4)));
        assert_eq!(tileset.tile_rect_in(2, 12), Some(Rect::new(1, 7, 4, 4)));
        assert_eq!(tileset.tile_rect_in(4, 12), None);
    }

    #[test]
    fn test_explicit_columns_win() {
        let tileset = Tileset::new(ResourcePtr::null(), Vec2::new(8, 8), 10).with_columns(5);
        assert_eq!(tileset.tile_rect_in(7, 16), Some(Rect::new(16, 8, 8, 8)));
    }

    #[test]
    fn test_gid_mapping() {
        let tileset = Tileset::new(ResourcePtr::null(), Vec2::new(8, 8), 10).with_first_gid(5);
        assert_eq!(tileset.tile_for_gid(0), None);
        assert_eq!(tileset.tile_for_gid(4), None);
        assert_eq!(tileset.tile_for_gid(5), Some(0));
        assert_eq!(tileset.tile_for_gid(9), Some(4));
    }

    #[test]
    fn test_draw_tile_blits_the_right_cell() {
        let manager = ResourceManager::new(MemorySource::new());
        let tileset = sheet(&manager);
        let mut dst = Bitmap::new(Vec2::new(8, 4), BitDepth::TrueColor32, 0).unwrap();

        tileset.draw_tile(3, &mut dst, Vec2::new(4, 0));
        tileset.draw_tile(9, &mut dst, Vec2::ZERO);

        assert_eq!(dst.color_at(Vec2::new(4, 0)), Some(Color::WHITE));
        assert_eq!(dst.color_at(Vec2::new(7, 3)), Some(Color::WHITE));
        assert_eq!(dst.color_at(Vec2::new(0, 0)), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_tile_without_image_is_a_no_op() {
        let tileset = Tileset::new(ResourcePtr::null(), Vec2::new(4, 4), 4);
        let mut dst = Bitmap::new(Vec2::new(4, 4), BitDepth::Indexed8, 2).unwrap();
        let before = dst.clone();
        tileset.draw_tile(0, &mut dst, Vec2::ZERO);
        assert_eq!(dst, before);
    }
}
