//! LZW decoder for a single GIF sub-block.
//!
//! Every sub-block is decoded as a self-contained stream: a fresh code table
//! and bit reader per call, a leading clear code, and an end-of-information
//! code to finish. Two details deviate from textbook GIF LZW:
//!
//! - the code width grows right after a code whose *value* equals
//!   `(1 << width) - 1`, not when the table size reaches that threshold;
//! - a clear code resets the table but leaves the code width where it is.

use crate::config::{LzwConfig, MAX_CODE_WIDTH, widening_code};
use crate::dictionary::CodeTable;
use crate::error::{LzwError, Result};
use timebox_core::BitReader;
use tracing::trace;

/// LZW decoder for sub-block data.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Code size and color table size of the active image block.
    config: LzwConfig,
    /// Code width reached at the end of the last decoded sub-block.
    code_width: u8,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            config,
            code_width: config.initial_code_width(),
        }
    }

    /// Decode one sub-block into a flat sequence of color indices.
    ///
    /// # Errors
    ///
    /// - [`LzwError::MissingClearCode`] if the first code is not the clear code
    /// - [`LzwError::InvalidCode`] for a code the table cannot resolve
    /// - [`LzwError::Bitstream`] if the data ends before end-of-information
    pub fn decode_subblock(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(data);
        let mut table = CodeTable::new(self.config);
        let mut width = self.config.initial_code_width();
        let mut output = Vec::with_capacity(data.len() * 2);

        let first = reader.read_bits(width)?;
        if !table.is_clear_code(first) {
            return Err(LzwError::MissingClearCode {
                expected: self.config.clear_code(),
                found: first,
            });
        }

        let mut prev_code: Option<u16> = None;

        loop {
            let code = reader.read_bits(width)?;

            if code == widening_code(width) && width < MAX_CODE_WIDTH {
                width += 1;
                trace!(code, width, "code width increased");
            }

            if table.is_clear_code(code) {
                table.initialize();
                prev_code = None;
                continue;
            }

            if table.is_end_of_information(code) {
                break;
            }

            let Some(prev) = prev_code else {
                // First code after a clear: nothing to derive from yet.
                output.extend_from_slice(table.indices(code)?);
                prev_code = Some(code);
                continue;
            };

            if table.has(code) {
                let current = table.indices(code)?;
                output.extend_from_slice(current);
                let k = current[0];

                let mut entry = table.indices(prev)?.to_vec();
                entry.push(k);
                table.insert_next(entry);
            } else if code == table.next_key() {
                // KwKwK: the code is the entry about to be created.
                let previous = table.indices(prev)?;
                let k = previous[0];
                let mut entry = previous.to_vec();
                entry.push(k);

                output.extend_from_slice(&entry);
                table.insert_next(entry);
            } else {
                return Err(LzwError::InvalidCode {
                    code,
                    next: table.next_key(),
                });
            }

            prev_code = Some(code);
        }

        self.code_width = width;
        Ok(output)
    }

    /// Code width reached by the last successful decode.
    pub fn code_width(&self) -> u8 {
        self.code_width
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;
    use timebox_core::{BitWriter, TimeboxError};

    fn pack(codes: &[(u16, u8)]) -> Vec<u8> {
        let mut writer = BitWriter::new();
        for &(code, width) in codes {
            writer.write_bits(code, width).unwrap();
        }
        writer.into_vec()
    }

    #[test]
    fn test_decode_known_stream() {
        // clear, 0, 6 (KwKwK), 0, eoi at 3 bits
        let config = LzwConfig::new(2, 2).unwrap();
        let mut decoder = LzwDecoder::new(config);

        let indices = decoder.decode_subblock(&[0x84, 0x51]).unwrap();
        assert_eq!(indices, vec![0, 0, 0, 0]);
        assert_eq!(decoder.code_width(), 3);
    }

    #[test]
    fn test_decode_requires_leading_clear_code() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        let data = pack(&[(1, 3), (5, 3)]);
        let err = decoder.decode_subblock(&data).unwrap_err();
        assert!(matches!(
            err,
            LzwError::MissingClearCode {
                expected: 4,
                found: 1
            }
        ));
    }

    #[test]
    fn test_decode_truncated_stream() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        // No end-of-information code before the data runs out.
        let data = pack(&[(4, 3), (1, 3)]);
        let err = decoder.decode_subblock(&data).unwrap_err();
        let err: TimeboxError = err.into();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_width_grows_on_code_value() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        // 7 == (1 << 3) - 1, so everything after it is read with 4 bits.
        let data = pack(&[(4, 3), (0, 3), (6, 3), (7, 3), (8, 4), (5, 4)]);
        let indices = decoder.decode_subblock(&data).unwrap();

        assert_eq!(indices, vec![0; 10]);
        assert_eq!(decoder.code_width(), 4);
    }

    #[test]
    fn test_clear_code_keeps_width() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        // Grow to 4 bits, clear, then keep reading 4-bit codes.
        let data = pack(&[
            (4, 3),
            (0, 3),
            (6, 3),
            (7, 3),
            (4, 4),
            (3, 4),
            (3, 4),
            (6, 4),
            (5, 4),
        ]);
        let indices = decoder.decode_subblock(&data).unwrap();

        assert_eq!(indices, vec![0, 0, 0, 0, 0, 0, 3, 3, 3, 3]);
        assert_eq!(decoder.code_width(), 4);
    }

    #[test]
    fn test_mid_stream_clear_restarts_table() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        let data = pack(&[(4, 3), (1, 3), (4, 3), (2, 3), (5, 3)]);
        assert_eq!(decoder.decode_subblock(&data).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_empty_stream() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        let data = pack(&[(4, 3), (5, 3)]);
        assert!(decoder.decode_subblock(&data).unwrap().is_empty());
    }

    #[test]
    fn test_code_beyond_next_key() {
        let config = LzwConfig::new(2, 4).unwrap();
        let mut decoder = LzwDecoder::new(config);

        let data = pack(&[(4, 3), (0, 3), (7, 3), (5, 4)]);
        let err = decoder.decode_subblock(&data).unwrap_err();
        assert!(matches!(err, LzwError::InvalidCode { code: 7, next: 6 }));
    }

    #[test]
    fn test_roundtrip_with_encoder() {
        let config = LzwConfig::new(3, 8).unwrap();
        let original: Vec<u8> = (0..200u32).map(|i| ((i * 7) % 5) as u8).collect();

        let mut encoder = LzwEncoder::new(config).unwrap();
        let compressed = encoder.encode(&original).unwrap();

        let mut decoder = LzwDecoder::new(config);
        assert_eq!(decoder.decode_subblock(&compressed).unwrap(), original);
        assert_eq!(decoder.code_width(), encoder.code_width());
    }
}
