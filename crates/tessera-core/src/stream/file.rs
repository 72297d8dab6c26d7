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

use super::{Stream, StreamError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// A stream over a file on disk.
#[derive(Debug)]
pub struct FileStream {
    file: File,
    size: u64,
    position: u64,
}

impl FileStream {
    /// Opens `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let file = File::open(path.as_ref())?;
        let size = file.metadata()?.len();
        Ok(Self {
            file,
            size,
            position: 0,
        })
    }
}

impl Stream for FileStream {
    fn stream_size(&self) -> u64 {
        self.size
    }

    fn current_position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, position: u64) -> Result<(), StreamError> {
        if position > self.size {
            return Err(StreamError::SeekOutOfRange {
                position,
                size: self.size,
            });
        }
        self.file.seek(SeekFrom::Start(position))?;
        self.position = position;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        let remaining = self.remaining();
        if buf.len() as u64 > remaining {
            return Err(StreamError::ReadPastEnd {
                requested: buf.len(),
                remaining,
            });
        }
        if let Err(e) = self.file.read_exact(buf) {
            // Put the cursor back where the caller expects it.
            self.file.seek(SeekFrom::Start(self.position))?;
            return Err(e.into());
        }
        self.position += buf.len() as u64;
        Ok(())
    }
}
