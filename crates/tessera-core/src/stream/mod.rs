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

//! Seekable byte sources consumed by resource loaders.

mod file;
mod memory;

pub use file::FileStream;
pub use memory::MemoryStream;

/// An error raised by a [`Stream`] or by whatever opens one.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A seek targeted a position past the end of the stream.
    #[error("cannot seek to {position}, the stream is {size} bytes long")]
    SeekOutOfRange {
        /// The requested absolute position.
        position: u64,
        /// The stream size.
        size: u64,
    },
    /// A read asked for more bytes than remain.
    #[error("cannot read {requested} bytes, only {remaining} remain")]
    ReadPastEnd {
        /// Bytes asked for.
        requested: usize,
        /// Bytes left before the end.
        remaining: u64,
    },
    /// No stream exists under the given name.
    #[error("no stream named '{0}'")]
    NotFound(String),
    /// The underlying I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A seekable, sequential byte source.
///
/// Reads are exact: a read either fills the whole buffer or fails without
/// moving the position.
pub trait Stream: Send {
    /// Total size in bytes.
    fn stream_size(&self) -> u64;

    /// The current absolute position.
    fn current_position(&self) -> u64;

    /// Moves to an absolute position. Seeking to the very end is allowed.
    fn seek(&mut self, position: u64) -> Result<(), StreamError>;

    /// Fills `buf` entirely from the current position.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), StreamError>;

    /// Bytes between the current position and the end.
    fn remaining(&self) -> u64 {
        self.stream_size().saturating_sub(self.current_position())
    }

    /// `true` once every byte has been read.
    fn end_of_stream(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads everything from the current position to the end.
    fn read_to_vec(&mut self) -> Result<Vec<u8>, StreamError> {
        let mut buf = vec![0; self.remaining() as usize];
        self.read(&mut buf)?;
        Ok(buf)
    }

    /// Reads one line of at most `max_len` bytes.
    ///
    /// Stops after a `\n` (not included) or at the end of the stream.
    /// Carriage returns are dropped.
    fn read_line(&mut self, max_len: usize) -> Result<String, StreamError> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        while line.len() < max_len && !self.end_of_stream() {
            self.read(&mut byte)?;
            match byte[0] {
                b'\n' => break,
                b'\r' => {}
                b => line.push(b),
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Reads up to `buf.len()` bytes without moving the position, returning
    /// how many were copied.
    fn peek(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let start = self.current_position();
        let count = buf.len().min(self.remaining() as usize);
        self.read(&mut buf[..count])?;
        self.seek(start)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_splits_and_strips() {
        let mut stream = MemoryStream::new(b"first\r\nsecond\nlast".to_vec());
        assert_eq!(stream.read_line(64).unwrap(), "first");
        assert_eq!(stream.read_line(64).unwrap(), "second");
        assert_eq!(stream.read_line(64).unwrap(), "last");
        assert!(stream.end_of_stream());
        assert_eq!(stream.read_line(64).unwrap(), "");
    }

    #[test]
    fn test_read_line_respects_max_len() {
        let mut stream = MemoryStream::new(b"abcdef\n".to_vec());
        assert_eq!(stream.read_line(4).unwrap(), "abcd");
        assert_eq!(stream.read_line(4).unwrap(), "ef");
    }

    #[test]
    fn test_peek_keeps_position() {
        let mut stream = MemoryStream::new(vec![1, 2, 3]);
        stream.seek(1).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(stream.peek(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[2, 3]);
        assert_eq!(stream.current_position(), 1);
        assert_eq!(stream.read_to_vec().unwrap(), vec![2, 3]);
    }
}
