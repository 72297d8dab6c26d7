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

//! Where resource bytes come from.
//!
//! The resource manager never touches the file system itself; it asks its
//! [`StreamSource`] to open a stream for a resource name.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tessera_core::stream::{FileStream, MemoryStream, Stream, StreamError};

/// Opens byte streams by resource name.
pub trait StreamSource: Send + Sync {
    /// Opens the stream for `name`.
    ///
    /// # Errors
    /// [`StreamError::NotFound`] when nothing exists under that name, or the
    /// underlying I/O error.
    fn open(&self, name: &str) -> Result<Box<dyn Stream>, StreamError>;
}

/// Resolves names as relative paths under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl StreamSource for DirectorySource {
    fn open(&self, name: &str) -> Result<Box<dyn Stream>, StreamError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| StreamError::NotFound(name.to_owned()))?;

        match FileStream::open(&path) {
            Ok(stream) => Ok(Box::new(stream)),
            Err(StreamError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(StreamError::NotFound(name.to_owned()))
            }
            Err(e) => Err(e),
        }
    }
}

/// An in-memory name to bytes table.
///
/// Clones share the same table, so a test can keep one clone to add entries
/// after handing another to a manager.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Arc<RwLock<HashMap<String, Arc<[u8]>>>>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, builder style.
    pub fn with(self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Adds or replaces an entry.
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let bytes: Vec<u8> = bytes.into();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), bytes.into());
    }

    /// Removes an entry, returning whether it existed.
    pub fn remove(&self, name: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }
}

impl StreamSource for MemorySource {
    fn open(&self, name: &str) -> Result<Box<dyn Stream>, StreamError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let bytes = entries
            .get(name)
            .ok_or_else(|| StreamError::NotFound(name.to_owned()))?;
        Ok(Box::new(MemoryStream::new(bytes.to_vec())))
    }
}
