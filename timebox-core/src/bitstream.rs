//! Bit-level I/O for variable-width code words.
//!
//! GIF packs LZW code words LSB-first: the first code occupies the least
//! significant bits of the first byte, and a code that does not fit in the
//! rest of a byte continues in the low bits of the next one. Bits read
//! earlier end up in the low end of the assembled value.
//!
//! # Example
//!
//! ```
//! use timebox_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let bytes = writer.into_vec();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{Result, TimeboxError};

/// Widest code word the reader and writer handle in one call.
pub const MAX_BITS_PER_READ: u8 = 16;

/// LSB-first bit reader over an in-memory byte slice.
///
/// Running past the end of the slice is a [`TimeboxError::TruncatedInput`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Index of the byte holding the next unread bit.
    byte_pos: usize,
    /// Bit offset (0-7) of the next unread bit inside `data[byte_pos]`.
    bit_pos: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
            total_bits_read: 0,
        }
    }

    /// Read `count` bits (1-16) and assemble them LSB-first.
    pub fn read_bits(&mut self, count: u8) -> Result<u16> {
        if count == 0 || count > MAX_BITS_PER_READ {
            return Err(TimeboxError::invalid_argument(format!(
                "bit width {count} outside 1..={MAX_BITS_PER_READ}"
            )));
        }

        let mut value: u32 = 0;
        let mut acquired: u8 = 0;

        while acquired < count {
            let byte = *self
                .data
                .get(self.byte_pos)
                .ok_or_else(|| TimeboxError::truncated(self.byte_pos, 1))?;

            let available = 8 - self.bit_pos;
            let take = available.min(count - acquired);
            let bits = (u32::from(byte) >> self.bit_pos) & ((1u32 << take) - 1);

            value |= bits << acquired;
            acquired += take;
            self.bit_pos += take;

            if self.bit_pos == 8 {
                self.bit_pos = 0;
                self.byte_pos += 1;
            }
        }

        self.total_bits_read += u64::from(count);
        Ok(value as u16)
    }

    /// Index of the byte holding the next unread bit.
    pub fn byte_position(&self) -> usize {
        self.byte_pos
    }

    /// Bit offset inside the current byte.
    pub fn bit_position(&self) -> u8 {
        self.bit_pos
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of unread bits left in the input.
    pub fn bits_remaining(&self) -> u64 {
        let total = self.data.len() as u64 * 8;
        total.saturating_sub(self.byte_pos as u64 * 8 + u64::from(self.bit_pos))
    }
}

/// LSB-first bit writer producing an owned byte vector.
///
/// The final partial byte is zero-padded in its high bits.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Pending bits (LSB-first).
    buffer: u32,
    /// Number of pending bits in `buffer`.
    bits_in_buffer: u8,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits (1-16) of `value`.
    pub fn write_bits(&mut self, value: u16, count: u8) -> Result<()> {
        if count == 0 || count > MAX_BITS_PER_READ {
            return Err(TimeboxError::invalid_argument(format!(
                "bit width {count} outside 1..={MAX_BITS_PER_READ}"
            )));
        }

        let masked = u32::from(value) & ((1u32 << count) - 1);
        self.buffer |= masked << self.bits_in_buffer;
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            self.output.push((self.buffer & 0xFF) as u8);
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }

        Ok(())
    }

    /// Number of bytes the writer would produce if finished now.
    pub fn len(&self) -> usize {
        self.output.len() + usize::from(self.bits_in_buffer > 0)
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush the pending partial byte and return the output.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            self.output.push((self.buffer & 0xFF) as u8);
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_within_and_across_bytes() {
        let data = [0b1010_1100, 0b0011_0101];
        let mut reader = BitReader::new(&data);

        // Two codes inside the first byte, one straddling, one tail nibble.
        assert_eq!(reader.read_bits(3).unwrap(), 0b100);
        assert_eq!(reader.read_bits(4).unwrap(), 0b0101);
        assert_eq!(reader.read_bits(5).unwrap(), 11);
        assert_eq!(reader.read_bits(4).unwrap(), 0b0011);
        assert_eq!(reader.bits_remaining(), 0);
    }

    #[test]
    fn test_read_twelve_bits() {
        let data = [0xAB, 0xCD];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(12).unwrap(), 0xDAB);
        assert_eq!(reader.byte_position(), 1);
        assert_eq!(reader.bit_position(), 4);
        assert_eq!(reader.read_bits(4).unwrap(), 0xC);
        assert_eq!(reader.bits_read(), 16);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(6).unwrap(), 0x3F);
        let err = reader.read_bits(3).unwrap_err();
        assert!(matches!(err, TimeboxError::TruncatedInput { offset: 1, .. }));
    }

    #[test]
    fn test_invalid_width() {
        let mut reader = BitReader::new(&[0x00, 0x00, 0x00]);
        assert!(reader.read_bits(0).is_err());
        assert!(reader.read_bits(17).is_err());
    }

    #[test]
    fn test_writer_packs_lsb_first() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1100, 4).unwrap();
        writer.write_bits(0x1FF, 9).unwrap();
        assert_eq!(writer.len(), 2);
        assert_eq!(writer.into_vec(), vec![0xE5, 0xFF]);
    }

    #[test]
    fn test_writer_pads_partial_byte() {
        let mut writer = BitWriter::new();
        assert!(writer.is_empty());
        writer.write_bits(0b11, 2).unwrap();
        assert_eq!(writer.into_vec(), vec![0b11]);
    }

    #[test]
    fn test_roundtrip_mixed_widths() {
        let codes: [(u16, u8); 6] = [(4, 3), (0, 3), (6, 3), (300, 9), (4095, 12), (1, 1)];

        let mut writer = BitWriter::new();
        for (value, width) in codes {
            writer.write_bits(value, width).unwrap();
        }
        let bytes = writer.into_vec();

        let mut reader = BitReader::new(&bytes);
        for (value, width) in codes {
            assert_eq!(reader.read_bits(width).unwrap(), value);
        }
    }
}
