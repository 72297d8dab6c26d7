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

/// A stream over an owned byte buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    data: Vec<u8>,
    position: usize,
}

impl MemoryStream {
    /// Wraps `data`, positioned at the start.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Returns the wrapped bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Stream for MemoryStream {
    fn stream_size(&self) -> u64 {
        self.data.len() as u64
    }

    fn current_position(&self) -> u64 {
        self.position as u64
    }

    fn seek(&mut self, position: u64) -> Result<(), StreamError> {
        if position > self.stream_size() {
            return Err(StreamError::SeekOutOfRange {
                position,
                size: self.stream_size(),
            });
        }
        self.position = position as usize;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        let remaining = self.data.len() - self.position;
        if buf.len() > remaining {
            return Err(StreamError::ReadPastEnd {
                requested: buf.len(),
                remaining: remaining as u64,
            });
        }
        buf.copy_from_slice(&self.data[self.position..self.position + buf.len()]);
        self.position += buf.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_bounds() {
        let mut stream = MemoryStream::new(vec![0u8; 4]);
        assert!(stream.seek(4).is_ok());
        assert!(stream.end_of_stream());
        assert!(matches!(
            stream.seek(5),
            Err(StreamError::SeekOutOfRange { position: 5, size: 4 })
        ));
        assert_eq!(stream.current_position(), 4);
    }

    #[test]
    fn test_read_past_end_leaves_position() {
        let mut stream = MemoryStream::new(vec![7u8, 8, 9]);
        let mut buf = [0u8; 2];
        stream.read(&mut buf).unwrap();
        assert_eq!(buf, [7, 8]);
        assert!(matches!(
            stream.read(&mut buf),
            Err(StreamError::ReadPastEnd { requested: 2, remaining: 1 })
        ));
        assert_eq!(stream.current_position(), 2);
        assert_eq!(stream.remaining(), 1);
    }
}
