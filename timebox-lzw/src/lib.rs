//! # TimeBox-LZW: Sub-block LZW for GIF image data
//!
//! This crate decodes (and, for fixtures and asset authoring, encodes) the
//! LZW streams stored in GIF image blocks, one sub-block at a time.
//!
//! ## Stream dialect
//!
//! - **LSB-first bit order**, code width starting at `min_code_size + 1`
//! - **Leading clear code** in every sub-block, **EOI** to finish it
//! - **Value-triggered widening**: the width grows right after a code equal
//!   to `(1 << width) - 1` is read, up to 12 bits
//! - **Per-sub-block restart**: the table and bit cursor never carry over from
//!   one sub-block to the next
//!
//! Streams whose compressed data spans sub-blocks without restarting are
//! outside this dialect.
//!
//! ## Example
//!
//! ```rust
//! use timebox_lzw::{LzwConfig, compress_subblock, decompress_subblock};
//!
//! let config = LzwConfig::new(2, 4).unwrap();
//! let indices = [0, 1, 1, 2, 3, 3, 3, 0];
//!
//! let compressed = compress_subblock(&indices, config).unwrap();
//! let decoded = decompress_subblock(&compressed, config).unwrap();
//!
//! assert_eq!(decoded, indices);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;

pub use config::{LzwConfig, MAX_CODE_WIDTH, MAX_TABLE_SIZE};
pub use decoder::LzwDecoder;
pub use dictionary::{CodeEntry, CodeTable};
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

/// Decompress one sub-block with the given configuration.
///
/// # Example
///
/// ```rust
/// use timebox_lzw::{LzwConfig, decompress_subblock};
///
/// // clear, 0, 6, 0, eoi packed with 3-bit codes
/// let config = LzwConfig::new(2, 2).unwrap();
/// let indices = decompress_subblock(&[0x84, 0x51], config).unwrap();
/// assert_eq!(indices, vec![0, 0, 0, 0]);
/// ```
pub fn decompress_subblock(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(config).decode_subblock(data)
}

/// Compress color indices into one self-contained sub-block stream.
pub fn compress_subblock(indices: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(indices)
}
