//! Device session: one transport, one codec, one reassembly buffer.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use timebox_core::{Result, TimeboxError};
use tracing::{debug, warn};

use crate::command::{Command, View, command_payload};
use crate::reassembler::FrameReassembler;
use crate::traits::{MessageCodec, Transport};

/// Connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bluetooth address of the device.
    pub host: String,
    /// RFCOMM channel.
    pub port: u8,
    /// Largest read requested from the transport per poll.
    pub receive_chunk: usize,
    /// How long a poll waits for data, in milliseconds.
    pub poll_timeout_ms: u64,
}

impl SessionConfig {
    /// Address of the unit the tools were first written against.
    pub const DEFAULT_HOST: &'static str = "11:75:58:48:2F:DA";

    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TimeboxError::invalid_argument(format!("session config: {e}")))
    }

    /// The poll timeout as a [`Duration`].
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: 4,
            receive_chunk: 1024,
            poll_timeout_ms: 100,
        }
    }
}

/// One item drained from the receive buffer.
#[derive(Debug)]
pub enum Inbound {
    /// Bytes that did not belong to any frame.
    Garbage(Vec<u8>),
    /// A frame the codec decoded.
    Reply(Vec<u8>),
    /// A frame the codec rejected.
    Undecodable {
        /// The raw frame, sentinels included.
        frame: Vec<u8>,
        /// Why decoding failed.
        error: TimeboxError,
    },
}

/// A session with one device.
#[derive(Debug)]
pub struct Session<T, C> {
    transport: T,
    codec: C,
    config: SessionConfig,
    inbound: FrameReassembler,
}

impl<T: Transport, C: MessageCodec> Session<T, C> {
    /// Create a session over a connected transport.
    pub fn new(transport: T, codec: C, config: SessionConfig) -> Self {
        Self {
            transport,
            codec,
            config,
            inbound: FrameReassembler::new(),
        }
    }

    /// Read whatever the transport has within the poll timeout and buffer
    /// it. Returns the number of bytes received.
    pub fn poll(&mut self) -> Result<usize> {
        let bytes = self
            .transport
            .receive(self.config.receive_chunk, self.config.poll_timeout())?;
        if !bytes.is_empty() {
            debug!(len = bytes.len(), buffered = self.inbound.len(), "received");
            self.inbound.append(&bytes);
        }
        Ok(bytes.len())
    }

    /// Split the buffer into garbage runs and decoded frames.
    ///
    /// Stops when only a partial frame, or nothing, remains.
    pub fn drain(&mut self) -> Vec<Inbound> {
        let mut items = Vec::new();
        while self.inbound.has_frame_or_garbage() {
            if self.inbound.starts_with_garbage() {
                let garbage = self.inbound.take_garbage();
                warn!(len = garbage.len(), "discarding bytes outside a frame");
                items.push(Inbound::Garbage(garbage));
                continue;
            }

            let Ok(frame) = self.inbound.take_frame() else {
                break;
            };
            match self.codec.decode(&frame) {
                Ok(payload) => {
                    debug!(len = payload.len(), "reply");
                    items.push(Inbound::Reply(payload));
                }
                Err(error) => {
                    warn!(%error, len = frame.len(), "undecodable frame");
                    items.push(Inbound::Undecodable { frame, error });
                }
            }
        }
        items
    }

    /// Encode and send a raw payload.
    pub fn send_payload(&mut self, payload: &[u8]) -> Result<usize> {
        let frame = self.codec.encode(payload);
        debug!(payload = payload.len(), frame = frame.len(), "sending");
        self.transport.send(&frame)
    }

    /// Send a command with its arguments.
    pub fn send_command(&mut self, command: Command, args: &[u8]) -> Result<usize> {
        debug!(%command, args = args.len(), "command");
        let payload = command_payload(command, args)?;
        self.send_payload(&payload)
    }

    /// Switch the display to the clock, optionally in `color`.
    pub fn show_clock(&mut self, color: Option<[u8; 3]>) -> Result<usize> {
        self.send_command(Command::SetView, &View::Clock.args(color))
    }

    /// Switch the display to the temperature, optionally in `color`.
    pub fn show_temperature(&mut self, color: Option<[u8; 3]>) -> Result<usize> {
        self.send_command(Command::SetView, &View::Temperature.args(color))
    }

    /// Drop everything buffered, returning how many bytes were discarded.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.inbound.clear();
        if dropped > 0 {
            debug!(dropped, "discarded pending input");
        }
        dropped
    }

    /// The receive buffer.
    pub fn reassembler(&self) -> &FrameReassembler {
        &self.inbound
    }

    /// The connection parameters.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Take the transport and codec back.
    pub fn into_parts(self) -> (T, C) {
        (self.transport, self.codec)
    }
}
