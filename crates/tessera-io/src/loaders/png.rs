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

//! PNG decoding into true-color bitmaps.

use crate::resource::{LoadContext, ResourceLoader};
use anyhow::{Context, Result};
use image::ImageFormat;
use tessera_core::{Bitmap, Resource, ResourceType, Stream};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decodes PNG files into 32-bit [`Bitmap`]s. Alpha is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngBitmapLoader;

impl ResourceLoader for PngBitmapLoader {
    fn supports_type(&self, resource_type: ResourceType) -> bool {
        resource_type == ResourceType::of::<Bitmap>()
    }

    fn can_load(&self, stream: &mut dyn Stream) -> bool {
        let mut signature = [0u8; 8];
        stream.read(&mut signature).is_ok() && signature == PNG_SIGNATURE
    }

    fn read_load(
        &self,
        stream: &mut dyn Stream,
        context: &LoadContext<'_>,
    ) -> Result<Box<dyn Resource>> {
        let bytes = stream.read_to_vec()?;

        // Decode the image using the `image` crate
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .with_context(|| format!("Failed to decode PNG '{}'", context.name()))?;

        let bitmap = Bitmap::from_rgba_image(&image.to_rgba8())?;
        log::debug!(
            "Decoded '{}' into a {}x{} bitmap",
            context.name(),
            bitmap.width(),
            bitmap.height()
        );
        Ok(Box::new(bitmap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceManager;
    use crate::source::MemorySource;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use tessera_core::{Color, MemoryStream, Vec2};

    fn encode(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_can_load_checks_signature() {
        let loader = PngBitmapLoader;
        let png = encode(&RgbaImage::new(1, 1));
        assert!(loader.can_load(&mut MemoryStream::new(png)));
        assert!(!loader.can_load(&mut MemoryStream::new(b"{\"width\": 1}".to_vec())));
        assert!(!loader.can_load(&mut MemoryStream::new(vec![0x89, b'P'])));
    }

    #[test]
    fn test_decodes_through_the_manager() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let source = MemorySource::new().with("hero.png", encode(&image));

        let manager = ResourceManager::new(source);
        manager.add_loader(PngBitmapLoader);

        let bitmap = manager.lazy::<Bitmap>("hero.png").get().unwrap();
        assert_eq!(bitmap.size(), Vec2::new(3, 2));
        assert_eq!(bitmap.color_at(Vec2::new(2, 1)), Some(Color::new(10, 20, 30)));
    }

    #[test]
    fn test_corrupt_png_fails_softly() {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(b"garbage");
        let manager = ResourceManager::new(MemorySource::new().with("bad.png", bytes));
        manager.add_loader(PngBitmapLoader);

        assert!(manager.lazy::<Bitmap>("bad.png").get().is_none());
    }
}
