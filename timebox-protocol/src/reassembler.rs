//! Frame reassembly for the device byte stream.
//!
//! Frames are delimited by a start sentinel and an end sentinel:
//!
//! ```text
//! ... garbage ... │ 0x01 │ escaped payload + checksum │ 0x02 │ 0x01 ...
//! ```
//!
//! The interior of a frame is opaque here; a
//! [`MessageCodec`](crate::MessageCodec) turns it into a payload.

use timebox_core::{Result, TimeboxError};

/// First byte of every frame.
pub const FRAME_START: u8 = 0x01;

/// Last byte of every frame.
pub const FRAME_END: u8 = 0x02;

/// Accumulates received bytes and splits them into garbage runs and frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReassembler {
    buffer: Vec<u8>,
}

impl FrameReassembler {
    /// Create an empty reassembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly received bytes.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Whether there is garbage to drain or a complete frame to take.
    ///
    /// A buffered frame start without an end sentinel is still waiting for
    /// data and reports `false`.
    pub fn has_frame_or_garbage(&self) -> bool {
        match self.buffer.first() {
            None => false,
            Some(&FRAME_START) => self.buffer.contains(&FRAME_END),
            Some(_) => true,
        }
    }

    /// Whether the buffer starts with something other than a frame start.
    pub fn starts_with_garbage(&self) -> bool {
        self.buffer.first().is_some_and(|&b| b != FRAME_START)
    }

    /// Remove and return everything before the first frame start, or the
    /// whole buffer if there is none.
    pub fn take_garbage(&mut self) -> Vec<u8> {
        let end = self
            .buffer
            .iter()
            .position(|&b| b == FRAME_START)
            .unwrap_or(self.buffer.len());
        self.buffer.drain(..end).collect()
    }

    /// Remove and return everything up to and including the first end
    /// sentinel.
    ///
    /// The returned bytes are not checked for a leading frame start; call
    /// [`starts_with_garbage`](Self::starts_with_garbage) first.
    pub fn take_frame(&mut self) -> Result<Vec<u8>> {
        let end = self
            .buffer
            .iter()
            .position(|&b| b == FRAME_END)
            .ok_or(TimeboxError::NoFrameAvailable)?;
        Ok(self.buffer.drain(..=end).collect())
    }

    /// Drop all buffered bytes, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.buffer.len();
        self.buffer.clear();
        dropped
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The buffered bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}
