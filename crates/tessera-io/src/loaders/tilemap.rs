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

//! Tiled-style JSON maps.

use crate::resource::{LoadContext, ResourceLoader};
use crate::tiles::{TileMap, Tileset};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tessera_core::{Bitmap, Resource, ResourceType, Stream, Vec2};

#[derive(Debug, Deserialize)]
struct MapDocument {
    width: u16,
    height: u16,
    layers: Vec<LayerDocument>,
    tilesets: Vec<TilesetDocument>,
}

#[derive(Debug, Deserialize)]
struct LayerDocument {
    width: u16,
    height: u16,
    data: Vec<u16>,
}

#[derive(Debug, Deserialize)]
struct TilesetDocument {
    #[serde(default = "default_first_gid")]
    firstgid: u16,
    image: String,
    tilecount: u16,
    tilewidth: u16,
    tileheight: u16,
    #[serde(default)]
    spacing: u16,
    #[serde(default)]
    margin: u16,
    #[serde(default)]
    columns: Option<u16>,
}

fn default_first_gid() -> u16 {
    1
}

/// Loads [`TileMap`]s from JSON in the format written by the Tiled editor.
///
/// Only the first layer and the first tileset are used. The tileset image is
/// referenced lazily through the loading manager, so it is decoded the first
/// time the map is drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileMapLoader;

impl ResourceLoader for TileMapLoader {
    fn supports_type(&self, resource_type: ResourceType) -> bool {
        resource_type == ResourceType::of::<TileMap>()
    }

    fn can_load(&self, stream: &mut dyn Stream) -> bool {
        let mut head = [0u8; 64];
        let count = match stream.peek(&mut head) {
            Ok(count) => count,
            Err(_) => return false,
        };
        let text = head[..count].strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&head[..count]);
        text.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{')
    }

    fn read_load(
        &self,
        stream: &mut dyn Stream,
        context: &LoadContext<'_>,
    ) -> Result<Box<dyn Resource>> {
        let bytes = stream.read_to_vec()?;
        let document: MapDocument = serde_json::from_slice(&bytes)
            .with_context(|| format!("World '{}' is not valid", context.name()))?;

        let size = Vec2::new(document.width, document.height);

        let Some(layer) = document.layers.first() else {
            bail!("World '{}' has no layers", context.name());
        };
        if layer.width != size.x || layer.height != size.y {
            bail!(
                "Layer is {}x{} but the world is {}x{}",
                layer.width,
                layer.height,
                size.x,
                size.y
            );
        }
        if layer.data.len() != size.area() as usize {
            bail!(
                "Layer data has {} cells, expected {}",
                layer.data.len(),
                size.area()
            );
        }

        let Some(tileset) = document.tilesets.first() else {
            bail!("No tileset in world '{}'", context.name());
        };

        let bitmap = context.manager().lazy::<Bitmap>(&tileset.image);
        let mut sheet = Tileset::new(
            bitmap,
            Vec2::new(tileset.tilewidth, tileset.tileheight),
            tileset.tilecount,
        )
        .with_first_gid(tileset.firstgid)
        .with_margin(tileset.margin)
        .with_spacing(tileset.spacing);
        if let Some(columns) = tileset.columns {
            sheet = sheet.with_columns(columns);
        }

        let mut map = TileMap::new(size);
        for (i, gid) in layer.data.iter().enumerate() {
            let x = (i % usize::from(size.x)) as u16;
            let y = (i / usize::from(size.x)) as u16;
            map.set_tile(x, y, *gid);
        }

        let highest = map.highest_tile_id();
        let last_gid = u32::from(tileset.firstgid) + u32::from(tileset.tilecount);
        if highest != 0 && u32::from(highest) >= last_gid {
            bail!(
                "Inconsistent number of tiles, map uses id {} but the tileset knows about {}",
                highest,
                tileset.tilecount
            );
        }

        map.set_tileset(sheet);
        log::info!("Map '{}' loaded successfully", context.name());
        Ok(Box::new(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::MemoryStream;

    #[test]
    fn test_can_load_sniffs_json_objects() {
        let loader = TileMapLoader;
        assert!(loader.can_load(&mut MemoryStream::new(b"  \n {\"width\": 2}".to_vec())));
        assert!(loader.can_load(&mut MemoryStream::new(b"\xEF\xBB\xBF{}".to_vec())));
        assert!(!loader.can_load(&mut MemoryStream::new(b"[1, 2]".to_vec())));
        assert!(!loader.can_load(&mut MemoryStream::new(Vec::new())));
    }

    #[test]
    fn test_tileset_defaults() {
        let doc: TilesetDocument = serde_json::from_str(
            r#"{"image": "a.png", "tilecount": 4, "tilewidth": 8, "tileheight": 8}"#,
        )
        .unwrap();
        assert_eq!(doc.firstgid, 1);
        assert_eq!(doc.spacing, 0);
        assert_eq!(doc.margin, 0);
        assert_eq!(doc.columns, None);
    }
}
