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

//! The contract between the resource manager and format decoders.

use super::ResourceManager;
use tessera_core::{Resource, ResourceType, Stream};

/// Decodes resources of one or more types from byte streams.
///
/// The manager sequences the calls: it asks [`supports_type`], rewinds the
/// stream, asks [`can_load`], rewinds again and finally calls [`read_load`].
/// Loaders are tried in registration order and the first one that accepts
/// the stream is the only one to decode it.
///
/// [`supports_type`]: ResourceLoader::supports_type
/// [`can_load`]: ResourceLoader::can_load
/// [`read_load`]: ResourceLoader::read_load
pub trait ResourceLoader: Send + Sync {
    /// `true` if this loader can produce resources of `resource_type`.
    fn supports_type(&self, resource_type: ResourceType) -> bool;

    /// Probes the start of `stream`. Reading is fine; the stream is rewound
    /// before the next call.
    fn can_load(&self, stream: &mut dyn Stream) -> bool;

    /// Decodes the whole stream into a resource.
    fn read_load(
        &self,
        stream: &mut dyn Stream,
        context: &LoadContext<'_>,
    ) -> anyhow::Result<Box<dyn Resource>>;
}

/// What a loader knows about the load in progress.
pub struct LoadContext<'a> {
    pub(crate) manager: &'a ResourceManager,
    pub(crate) name: &'a str,
    pub(crate) resource_type: ResourceType,
}

impl<'a> LoadContext<'a> {
    /// The manager that owns the resource being loaded. Loaders use it to
    /// reference dependent resources lazily.
    pub fn manager(&self) -> &'a ResourceManager {
        self.manager
    }

    /// The name of the resource being loaded.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The type requested by the caller.
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }
}
