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

//! # Tessera IO
//!
//! Everything between a resource name and a usable resource: stream sources,
//! the reference-counted [`ResourceManager`] cache, the [`ResourcePtr`] handle,
//! the [`ResourceLoader`] contract and the built-in loaders.

#![warn(missing_docs)]

pub mod error;
pub mod loaders;
pub mod resource;
pub mod source;
pub mod tiles;

pub use error::ResourceError;
pub use loaders::{PngBitmapLoader, TileMapLoader};
pub use resource::{LoadContext, ResourceLoader, ResourceManager, ResourceManagerSettings, ResourcePtr};
pub use source::{DirectorySource, MemorySource, StreamSource};
pub use tiles::{TileMap, Tileset};
