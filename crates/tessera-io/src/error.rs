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

//! Errors surfaced by resource handles.

use std::time::Duration;
use tessera_core::ResourceType;

/// Why a handle could not produce its resource.
///
/// Load failures are also logged where they happen; callers are expected to
/// treat them as a missing asset, not as a reason to stop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    /// The handle does not refer to any control block.
    #[error("the resource handle is null")]
    NullHandle,
    /// The loaded payload is not of the type the handle expects.
    #[error("resource '{name}' was loaded, but not as a {expected}")]
    TypeMismatch {
        /// The resource name.
        name: String,
        /// The type the handle was created for.
        expected: ResourceType,
    },
    /// No loader could produce the resource.
    #[error("resource '{name}' ({resource_type}) failed to load")]
    LoadFailed {
        /// The resource name.
        name: String,
        /// The requested type.
        resource_type: ResourceType,
    },
    /// Another thread's load did not finish in time.
    #[error("gave up waiting for '{name}' after {waited:?}")]
    LoadTimedOut {
        /// The resource name.
        name: String,
        /// How long this caller waited.
        waited: Duration,
    },
}
