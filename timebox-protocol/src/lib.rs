//! # TimeBox-Protocol: talking to the device
//!
//! Frame reassembly over the device byte stream, the command table, and a
//! [`Session`] that ties a transport and a codec together.
//!
//! ```text
//! Transport ──bytes──▶ FrameReassembler ──frames──▶ MessageCodec ──▶ payloads
//!     ▲                                                 │
//!     └───────────── frames ◀── encode ◀── command_payload
//! ```
//!
//! ## Example
//!
//! ```rust
//! use timebox_protocol::FrameReassembler;
//!
//! let mut reassembler = FrameReassembler::new();
//! reassembler.append(&[0x05, 0x01, 0xAA, 0x02, 0x01, 0xBB]);
//!
//! assert_eq!(reassembler.take_garbage(), vec![0x05]);
//! assert_eq!(reassembler.take_frame().unwrap(), vec![0x01, 0xAA, 0x02]);
//! assert!(!reassembler.has_frame_or_garbage());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod command;
pub mod reassembler;
pub mod session;
pub mod traits;

pub use command::{Command, View, command_payload};
pub use reassembler::{FRAME_END, FRAME_START, FrameReassembler};
pub use session::{Inbound, Session, SessionConfig};
pub use traits::{MessageCodec, Transport};
