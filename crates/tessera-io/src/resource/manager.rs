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
use super::loader::{LoadContext, ResourceLoader};
use super::{lock, ResourcePtr};
use crate::error::ResourceError;
use crate::source::StreamSource;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tessera_core::{Resource, ResourceType};

/// Tuning knobs for a [`ResourceManager`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceManagerSettings {
    /// How long a caller waits for another thread's in-flight load of the
    /// same resource. `None` waits indefinitely.
    ///
    /// Only waiters are bounded. The thread running the loaders always runs
    /// them to completion, however long the stream read and decode take.
    pub load_wait_timeout: Option<Duration>,
}

pub(crate) struct ManagerInner {
    blocks: Mutex<Vec<Arc<ControlBlock>>>,
    loaders: RwLock<Vec<Arc<dyn ResourceLoader>>>,
    source: Box<dyn StreamSource>,
    pub(crate) settings: ResourceManagerSettings,
}

impl ManagerInner {
    /// Drops one reference of `block` and evicts it at zero.
    ///
    /// The evicted block is handed back so the caller can drop it outside the
    /// cache lock.
    pub(crate) fn release(&self, block: &Arc<ControlBlock>) -> Option<Arc<ControlBlock>> {
        let mut blocks = lock(&self.blocks);
        if block.remove_ref() > 0 {
            return None;
        }

        match blocks.iter().position(|b| Arc::ptr_eq(b, block)) {
            Some(index) => {
                log::info!(
                    "Unloading resource '{}' ({})",
                    block.name(),
                    block.resource_type()
                );
                Some(blocks.swap_remove(index))
            }
            None => {
                log::error!(
                    "Failed to find cache entry for resource '{}' ({})",
                    block.name(),
                    block.resource_type()
                );
                debug_assert!(false, "released a control block that is not cached");
                None
            }
        }
    }
}

/// The reference-counted resource cache.
///
/// Cloning the manager is cheap and yields another handle to the same cache.
/// The manager is `Send + Sync`; loads of different resources may run on
/// different threads, and loads of the same resource are coalesced.
///
/// # Examples
///
/// ```
/// use tessera_core::{BitDepth, Bitmap, Vec2};
/// use tessera_io::{MemorySource, ResourceManager};
///
/// let manager = ResourceManager::new(MemorySource::new());
/// let bitmap = Bitmap::new(Vec2::new(8, 8), BitDepth::Indexed8, 2).unwrap();
///
/// let handle = manager.make("generated", bitmap);
/// assert_eq!(handle.get().unwrap().width(), 8);
/// assert_eq!(manager.len(), 1);
///
/// drop(handle);
/// assert!(manager.is_empty());
/// ```
#[derive(Clone)]
pub struct ResourceManager {
    inner: Arc<ManagerInner>,
}

impl ResourceManager {
    /// Creates a manager reading from `source` with default settings.
    pub fn new(source: impl StreamSource + 'static) -> Self {
        Self::with_settings(source, ResourceManagerSettings::default())
    }

    /// Creates a manager reading from `source`.
    pub fn with_settings(
        source: impl StreamSource + 'static,
        settings: ResourceManagerSettings,
    ) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                blocks: Mutex::new(Vec::new()),
                loaders: RwLock::new(Vec::new()),
                source: Box::new(source),
                settings,
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<ManagerInner>) -> Self {
        Self { inner }
    }

    /// The settings this manager was built with.
    pub fn settings(&self) -> &ResourceManagerSettings {
        &self.inner.settings
    }

    /// Registers a loader. Loaders are tried in registration order.
    pub fn add_loader(&self, loader: impl ResourceLoader + 'static) {
        let mut loaders = self
            .inner
            .loaders
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        loaders.push(Arc::new(loader));
        log::debug!("Registered resource loader #{}", loaders.len());
    }

    /// Number of registered loaders.
    pub fn loader_count(&self) -> usize {
        self.inner
            .loaders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns a handle to `name`, creating an empty cache entry if needed.
    ///
    /// Nothing is loaded until the handle is dereferenced.
    pub fn lazy<T: Resource>(&self, name: &str) -> ResourcePtr<T> {
        ResourcePtr::from_block(self.acquire(name, ResourceType::of::<T>(), None))
    }

    /// Returns a handle to `name` after making sure it is loaded.
    pub fn load<T: Resource>(&self, name: &str) -> Result<ResourcePtr<T>, ResourceError> {
        let handle = self.lazy::<T>(name);
        handle.try_get()?;
        Ok(handle)
    }

    /// Caches `value` under `name`, bypassing the loaders.
    ///
    /// If `name` is already cached with this type, the existing entry wins:
    /// `value` is dropped and the returned handle shares the cached payload.
    pub fn make<T: Resource>(&self, name: &str, value: T) -> ResourcePtr<T> {
        self.take_ownership(name, Box::new(value))
    }

    /// Caches an already boxed `value` under `name`, bypassing the loaders.
    pub fn take_ownership<T: Resource>(&self, name: &str, value: Box<T>) -> ResourcePtr<T> {
        let resource: Arc<dyn Resource> = Arc::<T>::from(value);
        ResourcePtr::from_block(self.acquire(name, ResourceType::of::<T>(), Some(resource)))
    }

    /// Finds or creates the block for `(name, resource_type)` and takes a
    /// reference on it, all under the cache lock.
    fn acquire(
        &self,
        name: &str,
        resource_type: ResourceType,
        preset: Option<Arc<dyn Resource>>,
    ) -> Arc<ControlBlock> {
        let mut blocks = lock(&self.inner.blocks);

        let existing = blocks
            .iter()
            .find(|b| b.matches(name, resource_type))
            .cloned();
        if let Some(block) = existing {
            block.add_ref();
            log::debug!("Resource '{}' ({}) already known", name, resource_type);
            drop(blocks);
            if preset.is_some() {
                log::debug!("Discarding new value for cached resource '{}'", name);
            }
            return block;
        }

        let block = Arc::new(ControlBlock::new(
            name.to_owned(),
            resource_type,
            Arc::downgrade(&self.inner),
            preset,
        ));
        blocks.push(Arc::clone(&block));
        log::info!("New resource '{}' ({})", name, resource_type);
        block
    }

    /// Runs the loaders for `(name, resource_type)`.
    ///
    /// Every failure is logged and reported as `None`.
    pub(crate) fn load_raw(
        &self,
        name: &str,
        resource_type: ResourceType,
    ) -> Option<Arc<dyn Resource>> {
        let candidates: Vec<Arc<dyn ResourceLoader>> = self
            .inner
            .loaders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|loader| loader.supports_type(resource_type))
            .cloned()
            .collect();

        if candidates.is_empty() {
            log::error!("No loader registered for {} '{}'", resource_type, name);
            return None;
        }

        let mut stream = match self.inner.source.open(name) {
            Ok(stream) => stream,
            Err(e) => {
                log::error!("Failed to open stream for '{}': {}", name, e);
                return None;
            }
        };

        let context = LoadContext {
            manager: self,
            name,
            resource_type,
        };

        for loader in candidates {
            if let Err(e) = stream.seek(0) {
                log::error!("Failed to rewind stream for '{}': {}", name, e);
                return None;
            }
            if !loader.can_load(stream.as_mut()) {
                continue;
            }
            if let Err(e) = stream.seek(0) {
                log::error!("Failed to rewind stream for '{}': {}", name, e);
                return None;
            }

            return match loader.read_load(stream.as_mut(), &context) {
                Ok(resource) => {
                    log::info!("Loaded {} '{}'", resource_type, name);
                    Some(Arc::from(resource))
                }
                Err(e) => {
                    log::error!("Failed to load {} '{}': {:#}", resource_type, name, e);
                    None
                }
            };
        }

        log::error!("No loader accepted the data of {} '{}'", resource_type, name);
        None
    }

    /// Forwards a frame's elapsed time to every loaded resource.
    pub fn tick(&self, delta: Duration) {
        let loaded: Vec<Arc<dyn Resource>> = lock(&self.inner.blocks)
            .iter()
            .filter_map(|block| block.loaded())
            .collect();

        for resource in &loaded {
            resource.tick(delta);
        }
    }

    /// Number of cached blocks, loaded or not.
    pub fn len(&self) -> usize {
        lock(&self.inner.blocks).len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if a block exists for `(name, resource_type)`.
    pub fn contains(&self, name: &str, resource_type: ResourceType) -> bool {
        lock(&self.inner.blocks)
            .iter()
            .any(|block| block.matches(name, resource_type))
    }

    /// Live handle count of the block for `(name, resource_type)`.
    pub fn ref_count(&self, name: &str, resource_type: ResourceType) -> Option<usize> {
        lock(&self.inner.blocks)
            .iter()
            .find(|block| block.matches(name, resource_type))
            .map(|block| block.ref_count())
    }

    /// `true` if both values refer to the same cache.
    pub fn ptr_eq(&self, other: &ResourceManager) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceManager")
            .field("resources", &self.len())
            .field("loaders", &self.loader_count())
            .field("settings", &self.inner.settings)
            .finish()
    }
}
