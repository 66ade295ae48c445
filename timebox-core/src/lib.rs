//! # TimeBox Core
//!
//! Core components shared by the TimeBox-rs crates.
//!
//! - [`bitstream`]: LSB-first bit reader/writer for variable-width code words
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     timebox info / show / glyph / frames / payload      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Image + Protocol                                    │
//! │     GIF container, canvas, fonts, frame reassembly      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Sub-block LZW (code table, decoder, encoder)        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, TimeboxError                   │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

pub use bitstream::{BitReader, BitWriter};
pub use error::{Result, TimeboxError};
