//! LZW configuration for one GIF image block.

use crate::error::{LzwError, Result};

/// Widest code word a GIF stream may use.
pub const MAX_CODE_WIDTH: u8 = 12;

/// Number of codes addressable with [`MAX_CODE_WIDTH`] bits.
pub const MAX_TABLE_SIZE: usize = 1 << MAX_CODE_WIDTH;

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// The `lzw_min_code_size` byte of the image block.
    pub min_code_size: u8,
    /// Number of entries in the active color table.
    pub color_table_size: u16,
}

impl LzwConfig {
    /// Full 256-color table with 8-bit minimum code size.
    pub const GIF_8BIT: Self = Self {
        min_code_size: 8,
        color_table_size: 256,
    };

    /// Create a validated configuration.
    ///
    /// The minimum code size must leave room for at least one more bit
    /// before reaching [`MAX_CODE_WIDTH`], and the color table holds 1 to 256
    /// entries.
    pub fn new(min_code_size: u8, color_table_size: u16) -> Result<Self> {
        if min_code_size == 0 || min_code_size >= MAX_CODE_WIDTH {
            return Err(LzwError::InvalidCodeSize(min_code_size));
        }
        if color_table_size == 0 || color_table_size > 256 {
            return Err(LzwError::InvalidTableSize(color_table_size));
        }
        Ok(Self {
            min_code_size,
            color_table_size,
        })
    }

    /// Get the clear code value (`1 << min_code_size`).
    pub fn clear_code(&self) -> u16 {
        1 << self.min_code_size
    }

    /// Get the end-of-information code value (clear_code + 1).
    pub fn eoi_code(&self) -> u16 {
        self.clear_code() + 1
    }

    /// Get the first key handed out to derived entries.
    pub fn first_code(&self) -> u16 {
        self.eoi_code().max(self.color_table_size - 1) + 1
    }

    /// Code width at the start of every sub-block.
    pub fn initial_code_width(&self) -> u8 {
        self.min_code_size + 1
    }

    /// Whether every literal sits below the clear code.
    pub fn literals_below_clear_code(&self) -> bool {
        self.color_table_size <= self.clear_code()
    }
}

/// The code value whose appearance widens the code width.
pub(crate) fn widening_code(width: u8) -> u16 {
    ((1u32 << width) - 1) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_8bit_config() {
        let config = LzwConfig::GIF_8BIT;
        assert_eq!(config.clear_code(), 256);
        assert_eq!(config.eoi_code(), 257);
        assert_eq!(config.first_code(), 258);
        assert_eq!(config.initial_code_width(), 9);
        assert!(config.literals_below_clear_code());
    }

    #[test]
    fn test_small_table_config() {
        let config = LzwConfig::new(2, 2).unwrap();
        assert_eq!(config.clear_code(), 4);
        assert_eq!(config.eoi_code(), 5);
        assert_eq!(config.first_code(), 6);
        assert_eq!(config.initial_code_width(), 3);
    }

    #[test]
    fn test_table_larger_than_clear_code() {
        let config = LzwConfig::new(2, 8).unwrap();
        assert_eq!(config.first_code(), 8);
        assert!(!config.literals_below_clear_code());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            LzwConfig::new(0, 2),
            Err(LzwError::InvalidCodeSize(0))
        ));
        assert!(matches!(
            LzwConfig::new(12, 2),
            Err(LzwError::InvalidCodeSize(12))
        ));
        assert!(matches!(
            LzwConfig::new(8, 0),
            Err(LzwError::InvalidTableSize(0))
        ));
        assert!(matches!(
            LzwConfig::new(8, 257),
            Err(LzwError::InvalidTableSize(257))
        ));
    }

    #[test]
    fn test_widening_code() {
        assert_eq!(widening_code(3), 7);
        assert_eq!(widening_code(9), 511);
        assert_eq!(widening_code(12), 4095);
    }
}
