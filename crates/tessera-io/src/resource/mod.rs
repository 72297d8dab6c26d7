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

//! The reference-counted resource cache.
//!
//! A [`ResourceManager`] maps `(name, type)` pairs to control blocks. Each
//! block is created the first time the pair is requested, loads its payload
//! lazily on first dereference, and is removed from the cache the moment the
//! last [`ResourcePtr`] to it is dropped.

mod control_block;
mod handle;
mod loader;
mod manager;

pub use handle::ResourcePtr;
pub use loader::{LoadContext, ResourceLoader};
pub use manager::{ResourceManager, ResourceManagerSettings};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
