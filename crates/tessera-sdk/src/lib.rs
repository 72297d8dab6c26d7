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

//! # Tessera SDK
//!
//! The engine loop that drives everything else: configuration, logging
//! bootstrap, the engine state machine, timed actions and per-frame resource
//! updates.

#![warn(missing_docs)]

pub mod action;
pub mod config;
pub mod engine;
pub mod logging;

pub use action::{Action, ActionError, ActionQueue};
pub use config::EngineConfig;
pub use engine::{Engine, EngineState};
pub use logging::init_logging;

/// Re-exports for applications built on the engine.
pub mod prelude {
    pub use crate::{Action, Engine, EngineConfig, EngineState};
    pub use tessera_core::{BitDepth, Bitmap, Color, FixedPalette, Rect, Resource, Vec2};
    pub use tessera_io::{ResourceManager, ResourcePtr, TileMap, Tileset};
}
