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

//! The contract shared by every asset the resource manager can hold.
//!
//! This module only defines what a resource *is*. Loading, caching and
//! reference counting live in `tessera-io`.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

/// Upcasting helpers for type-erased resources.
///
/// Implemented for every `Any + Send + Sync` type; never implement it by hand.
pub trait AsAny: Any + Send + Sync {
    /// Borrows `self` as [`Any`] so it can be downcast.
    fn as_any(&self) -> &dyn Any;

    /// Converts a shared resource into a shared [`Any`] so it can be downcast
    /// without cloning the payload.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A loadable, shareable asset: bitmaps, tilesets, maps and so on.
///
/// The supertraits make resources safe to share between the thread that
/// loads them and the threads that use them.
///
/// # Examples
///
/// ```
/// use tessera_core::resource::Resource;
///
/// struct Sound {
///     samples: Vec<i16>,
/// }
///
/// impl Resource for Sound {}
/// ```
pub trait Resource: AsAny {
    /// Advances any time-dependent state. The default does nothing.
    fn tick(&self, _delta: Duration) {}
}

/// The runtime type of a resource, used as half of a cache key.
#[derive(Clone, Copy)]
pub struct ResourceType {
    id: TypeId,
    name: &'static str,
}

impl ResourceType {
    /// The resource type of `T`.
    pub fn of<T: Resource>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The Rust type name, for diagnostics only.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ResourceType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceType {}

impl Hash for ResourceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.name.rsplit("::").next().unwrap_or(self.name);
        f.write_str(short)
    }
}
