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

use super::Tileset;
use tessera_core::{Bitmap, Resource, Vec2};

/// A rectangular grid of map ids drawn with one [`Tileset`].
///
/// Id `0` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    size: Vec2,
    tiles: Vec<u16>,
    tileset: Option<Tileset>,
}

impl TileMap {
    /// Creates an empty map without a tileset.
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            tiles: vec![0; size.area() as usize],
            tileset: None,
        }
    }

    /// Attaches the tileset used for drawing.
    pub fn with_tileset(mut self, tileset: Tileset) -> Self {
        self.tileset = Some(tileset);
        self
    }

    /// Replaces the tileset.
    pub fn set_tileset(&mut self, tileset: Tileset) {
        self.tileset = Some(tileset);
    }

    /// Size in cells.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// The tileset, if any.
    pub fn tileset(&self) -> Option<&Tileset> {
        self.tileset.as_ref()
    }

    /// Every cell, row-major.
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.size.x && y < self.size.y)
            .then(|| usize::from(y) * usize::from(self.size.x) + usize::from(x))
    }

    /// The id at `(x, y)`, or `None` outside the map.
    pub fn tile(&self, x: u16, y: u16) -> Option<u16> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Writes the id at `(x, y)`. Returns `false` outside the map.
    pub fn set_tile(&mut self, x: u16, y: u16, gid: u16) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = gid;
                true
            }
            None => false,
        }
    }

    /// The largest id used by any cell, `0` for an empty map.
    pub fn highest_tile_id(&self) -> u16 {
        self.tiles.iter().copied().max().unwrap_or(0)
    }

    /// Draws every non-empty cell into `destination`, with cell `(0, 0)` at `origin`.
    ///
    /// Cells that would start outside `u16` coordinates are skipped; nothing
    /// is drawn without a tileset or when its image fails to load.
    pub fn draw(&self, destination: &mut Bitmap, origin: Vec2) {
        let Some(tileset) = &self.tileset else {
            return;
        };
        let Some(image) = tileset.bitmap().get() else {
            log::warn!("Tile map drawn without a usable tileset image");
            return;
        };
        let tile_size = tileset.tile_size();

        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let Some(tile) = self.tile(x, y).and_then(|gid| tileset.tile_for_gid(gid)) else {
                    continue;
                };
                let px = u32::from(origin.x) + u32::from(x) * u32::from(tile_size.x);
                let py = u32::from(origin.y) + u32::from(y) * u32::from(tile_size.y);
                let (Ok(px), Ok(py)) = (u16::try_from(px), u16::try_from(py)) else {
                    continue;
                };
                tileset.draw_tile_from(&image, tile, destination, Vec2::new(px, py));
            }
        }
    }
}

impl Resource for TileMap {}
