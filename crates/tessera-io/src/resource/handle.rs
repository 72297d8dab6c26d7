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

use super::control_block::ControlBlock;
use super::ResourceManager;
use crate::error::ResourceError;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tessera_core::{AsAny, Resource, ResourceType};

/// A reference-counted handle to a cached resource.
///
/// Cloning a handle takes another reference on the cache entry; dropping the
/// last handle evicts the entry and frees the resource. Moving a handle
/// transfers its reference without touching the count.
///
/// A handle may be null (see [`ResourcePtr::null`] and [`Default`]); every
/// accessor on a null handle reports [`ResourceError::NullHandle`] or `None`.
pub struct ResourcePtr<T: Resource> {
    block: Option<Arc<ControlBlock>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourcePtr<T> {
    /// Wraps a block whose count already includes this handle.
    pub(crate) fn from_block(block: Arc<ControlBlock>) -> Self {
        Self {
            block: Some(block),
            _marker: PhantomData,
        }
    }

    /// A handle to nothing.
    pub const fn null() -> Self {
        Self {
            block: None,
            _marker: PhantomData,
        }
    }

    /// `true` if the handle refers to no cache entry.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.block.is_none()
    }

    /// The resource name, if the handle is not null.
    pub fn name(&self) -> Option<&str> {
        self.block.as_deref().map(ControlBlock::name)
    }

    /// The number of live handles to the same entry, `0` for a null handle.
    pub fn ref_count(&self) -> usize {
        self.block.as_deref().map_or(0, ControlBlock::ref_count)
    }

    /// `true` if the payload is available without loading.
    pub fn is_loaded(&self) -> bool {
        self.block.as_deref().is_some_and(ControlBlock::is_loaded)
    }

    /// Loads the resource now if it is not loaded yet.
    pub fn ensure_load(&self) -> Result<(), ResourceError> {
        self.block()?.resource().map(drop)
    }

    /// Returns the resource, loading it on first access.
    ///
    /// # Errors
    /// - [`ResourceError::NullHandle`] for a null handle.
    /// - [`ResourceError::LoadFailed`] when no loader could produce it.
    /// - [`ResourceError::LoadTimedOut`] when another thread's load took too long.
    /// - [`ResourceError::TypeMismatch`] when a loader returned another type.
    pub fn try_get(&self) -> Result<Arc<T>, ResourceError> {
        let block = self.block()?;
        let resource = block.resource()?;
        AsAny::into_any_arc(resource)
            .downcast::<T>()
            .map_err(|_| ResourceError::TypeMismatch {
                name: block.name().to_owned(),
                expected: ResourceType::of::<T>(),
            })
    }

    /// Returns the resource, or `None` if it is null or failed to load.
    pub fn get(&self) -> Option<Arc<T>> {
        self.try_get().ok()
    }

    /// The manager caching this resource, while it is alive.
    pub fn owner(&self) -> Option<ResourceManager> {
        self.block
            .as_deref()
            .and_then(ControlBlock::owner)
            .map(ResourceManager::from_inner)
    }

    /// Moves the reference out, leaving a null handle behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn block(&self) -> Result<&ControlBlock, ResourceError> {
        self.block.as_deref().ok_or(ResourceError::NullHandle)
    }
}

impl<T: Resource> Clone for ResourcePtr<T> {
    fn clone(&self) -> Self {
        if let Some(block) = &self.block {
            block.add_ref();
        }
        Self {
            block: self.block.clone(),
            _marker: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if *self == *source {
            return;
        }
        *self = source.clone();
    }
}

impl<T: Resource> Drop for ResourcePtr<T> {
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            ControlBlock::release(block);
        }
    }
}

impl<T: Resource> Default for ResourcePtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Resource> PartialEq for ResourcePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.block, &other.block) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Resource> Eq for ResourcePtr<T> {}

impl<T: Resource> fmt::Debug for ResourcePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block {
            Some(block) => f
                .debug_struct("ResourcePtr")
                .field("name", &block.name())
                .field("type", &block.resource_type())
                .field("refs", &block.ref_count())
                .field("loaded", &block.is_loaded())
                .finish(),
            None => f.write_str("ResourcePtr(null)"),
        }
    }
}
