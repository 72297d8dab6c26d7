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

//! Cache entries: one per live `(name, type)` pair.

use super::lock;
use super::manager::ManagerInner;
use super::ResourceManager;
use crate::error::ResourceError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};
use tessera_core::{Resource, ResourceType};

/// Where a control block is in its life.
pub(crate) enum LoadState {
    /// Nothing loaded. Either nobody asked yet or the last attempt failed.
    Empty,
    /// One caller is running the loaders; others wait on the condvar.
    Loading,
    /// The payload is available.
    Loaded(Arc<dyn Resource>),
}

struct Slot {
    state: LoadState,
    /// Bumped on every failed attempt so waiters can tell that the load they
    /// waited for is over.
    failed_loads: u64,
}

/// A cache entry owning zero or one resource and the count of handles to it.
///
/// The reference count is only decremented, and the block only created,
/// while the manager's cache lock is held; that is what keeps a block from
/// being evicted between its creation and its first handle.
pub(crate) struct ControlBlock {
    name: String,
    resource_type: ResourceType,
    refs: AtomicUsize,
    slot: Mutex<Slot>,
    ready: Condvar,
    owner: Weak<ManagerInner>,
}

/// Puts the block back to `Empty` if the loading caller unwinds.
struct PendingLoad<'a> {
    block: &'a ControlBlock,
    settled: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut slot = lock(&self.block.slot);
        if matches!(slot.state, LoadState::Loading) {
            slot.state = LoadState::Empty;
            slot.failed_loads += 1;
        }
        self.block.ready.notify_all();
    }
}

impl ControlBlock {
    /// Creates a block holding one reference, for the handle about to wrap it.
    pub(crate) fn new(
        name: String,
        resource_type: ResourceType,
        owner: Weak<ManagerInner>,
        preset: Option<Arc<dyn Resource>>,
    ) -> Self {
        let state = match preset {
            Some(resource) => LoadState::Loaded(resource),
            None => LoadState::Empty,
        };
        Self {
            name,
            resource_type,
            refs: AtomicUsize::new(1),
            slot: Mutex::new(Slot {
                state,
                failed_loads: 0,
            }),
            ready: Condvar::new(),
            owner,
        }
    }

    #[inline]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    #[inline]
    pub(crate) fn matches(&self, name: &str, resource_type: ResourceType) -> bool {
        self.resource_type == resource_type && self.name == name
    }

    #[inline]
    pub(crate) fn ref_count(&self) -> usize {
        self.refs.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn add_ref(&self) {
        self.refs.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops one reference and returns how many are left.
    #[inline]
    pub(crate) fn remove_ref(&self) -> usize {
        self.refs.fetch_sub(1, Ordering::AcqRel) - 1
    }

    pub(crate) fn owner(&self) -> Option<Arc<ManagerInner>> {
        self.owner.upgrade()
    }

    /// Gives one reference back, evicting the block when it was the last.
    pub(crate) fn release(this: Arc<Self>) {
        match this.owner() {
            Some(owner) => {
                // Dropped here, after the cache lock is gone, since the payload
                // may itself hold handles.
                let evicted = owner.release(&this);
                drop(evicted);
            }
            None => {
                this.remove_ref();
            }
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        matches!(lock(&self.slot).state, LoadState::Loaded(_))
    }

    /// The payload if it is already loaded. Never triggers a load.
    pub(crate) fn loaded(&self) -> Option<Arc<dyn Resource>> {
        match &lock(&self.slot).state {
            LoadState::Loaded(resource) => Some(Arc::clone(resource)),
            _ => None,
        }
    }

    /// Returns the payload, loading it first if nobody has.
    ///
    /// Concurrent callers on an unloaded block share a single load: the first
    /// one runs the loaders, the rest wait for its outcome. A failed load
    /// leaves the block empty, so the next dereference tries again.
    pub(crate) fn resource(&self) -> Result<Arc<dyn Resource>, ResourceError> {
        let started = Instant::now();
        let mut slot = lock(&self.slot);
        let mut waited_on = None;
        loop {
            if let LoadState::Loaded(resource) = &slot.state {
                return Ok(Arc::clone(resource));
            }
            if waited_on.is_some_and(|failed_loads| failed_loads != slot.failed_loads) {
                return Err(self.load_failed());
            }
            if matches!(slot.state, LoadState::Empty) {
                break;
            }
            waited_on.get_or_insert(slot.failed_loads);
            slot = self.wait_for_load(slot, started)?;
        }
        slot.state = LoadState::Loading;
        drop(slot);

        let mut pending = PendingLoad {
            block: self,
            settled: false,
        };
        let loaded = self.load();

        let mut slot = lock(&self.slot);
        let result = match loaded {
            Some(resource) => {
                slot.state = LoadState::Loaded(Arc::clone(&resource));
                Ok(resource)
            }
            None => {
                slot.state = LoadState::Empty;
                slot.failed_loads += 1;
                Err(self.load_failed())
            }
        };
        pending.settled = true;
        self.ready.notify_all();
        drop(slot);
        result
    }

    fn load(&self) -> Option<Arc<dyn Resource>> {
        let Some(owner) = self.owner() else {
            log::error!(
                "Cannot load '{}' ({}): its resource manager is gone",
                self.name,
                self.resource_type
            );
            return None;
        };
        ResourceManager::from_inner(owner).load_raw(&self.name, self.resource_type)
    }

    fn wait_timeout(&self) -> Option<Duration> {
        self.owner().and_then(|owner| owner.settings.load_wait_timeout)
    }

    fn wait_for_load<'a>(
        &self,
        slot: MutexGuard<'a, Slot>,
        started: Instant,
    ) -> Result<MutexGuard<'a, Slot>, ResourceError> {
        let Some(limit) = self.wait_timeout() else {
            return Ok(self.ready.wait(slot).unwrap_or_else(PoisonError::into_inner));
        };

        let waited = started.elapsed();
        let Some(left) = limit.checked_sub(waited).filter(|left| !left.is_zero()) else {
            log::warn!("Timed out waiting for '{}' to load", self.name);
            return Err(ResourceError::LoadTimedOut {
                name: self.name.clone(),
                waited,
            });
        };

        let (slot, _) = self
            .ready
            .wait_timeout(slot, left)
            .unwrap_or_else(PoisonError::into_inner);
        Ok(slot)
    }

    fn load_failed(&self) -> ResourceError {
        ResourceError::LoadFailed {
            name: self.name.clone(),
            resource_type: self.resource_type,
        }
    }
}
