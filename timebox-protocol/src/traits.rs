//! Seams to the byte transport and the frame codec.
//!
//! The radio link and the frame interior (escaping and checksum) live
//! outside this crate; a [`Session`](crate::Session) only needs these two
//! operations from each.

use std::time::Duration;
use timebox_core::Result;

/// A connected, bidirectional byte link to the device.
pub trait Transport {
    /// Send raw bytes, returning how many were written.
    fn send(&mut self, data: &[u8]) -> Result<usize>;

    /// Receive at most `max` bytes, waiting no longer than `timeout`.
    ///
    /// Returns an empty vector when nothing arrived in time.
    fn receive(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>>;
}

/// Converts between payloads and the frames carried on the link.
pub trait MessageCodec {
    /// Wrap a payload into a transmittable frame, sentinels included.
    fn encode(&self, payload: &[u8]) -> Vec<u8>;

    /// Unwrap a frame taken from a [`FrameReassembler`](crate::FrameReassembler).
    fn decode(&self, frame: &[u8]) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        (**self).send(data)
    }

    fn receive(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>> {
        (**self).receive(max, timeout)
    }
}

impl<C: MessageCodec + ?Sized> MessageCodec for &C {
    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        (**self).encode(payload)
    }

    fn decode(&self, frame: &[u8]) -> Result<Vec<u8>> {
        (**self).decode(frame)
    }
}
