//! GIF header, color table and image descriptor parsing.

use serde::Serialize;
use timebox_core::{Result, TimeboxError};

use crate::canvas::Rgb;

/// Length of the signature (`GIF87a` / `GIF89a`).
pub const SIGNATURE_LEN: usize = 6;

/// Length of the logical screen descriptor.
pub const SCREEN_DESCRIPTOR_LEN: usize = 7;

/// Length of an image descriptor including its `0x2C` separator.
pub const IMAGE_DESCRIPTOR_LEN: usize = 10;

/// Block introducers and the trailer.
pub mod markers {
    /// Extension introducer.
    pub const EXTENSION: u8 = 0x21;
    /// Image separator.
    pub const IMAGE: u8 = 0x2C;
    /// End of file.
    pub const TRAILER: u8 = 0x3B;
}

/// Flag bits of the logical screen descriptor.
pub mod screen_flags {
    /// A global color table follows the descriptor.
    pub const GLOBAL_COLOR_TABLE: u8 = 0b1000_0000;
    /// Color resolution minus one.
    pub const COLOR_RESOLUTION: u8 = 0b0111_0000;
    /// The global color table is sorted by importance.
    pub const SORTED: u8 = 0b0000_1000;
    /// `N` where the table holds `2^(N+1)` entries.
    pub const TABLE_SIZE: u8 = 0b0000_0111;
}

/// Flag bits of an image descriptor.
pub mod image_flags {
    /// A local color table follows the descriptor.
    pub const LOCAL_COLOR_TABLE: u8 = 0b1000_0000;
    /// Rows are stored interlaced.
    pub const INTERLACED: u8 = 0b0100_0000;
    /// `N` where the local table holds `2^(N+1)` entries.
    pub const TABLE_SIZE: u8 = 0b0000_0111;
}

/// Number of entries encoded by a 3-bit table size field.
pub fn table_len(size_bits: u8) -> usize {
    1 << ((size_bits & 0b111) + 1)
}

/// Logical screen descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenDescriptor {
    /// Canvas width in pixels.
    pub width: u16,
    /// Canvas height in pixels.
    pub height: u16,
    /// Whether a global color table follows.
    pub has_global_color_table: bool,
    /// Raw color resolution field (0-7).
    pub color_resolution: u8,
    /// Bits per primary color (`color_resolution + 1`).
    pub bits_per_pixel: u8,
    /// Whether the global table is sorted.
    pub sorted: bool,
    /// Number of global color table entries.
    pub global_color_table_size: usize,
    /// Background color index.
    pub background_color_index: u8,
    /// Pixel aspect ratio byte.
    pub pixel_aspect_ratio: u8,
}

impl ScreenDescriptor {
    /// Parse the 7 bytes following the signature.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let [w0, w1, h0, h1, flags, background, aspect] = *bytes else {
            return Err(TimeboxError::malformed_header(format!(
                "screen descriptor is {} bytes, expected {SCREEN_DESCRIPTOR_LEN}",
                bytes.len()
            )));
        };

        let color_resolution = (flags & screen_flags::COLOR_RESOLUTION) >> 4;

        Ok(Self {
            width: u16::from_le_bytes([w0, w1]),
            height: u16::from_le_bytes([h0, h1]),
            has_global_color_table: flags & screen_flags::GLOBAL_COLOR_TABLE != 0,
            color_resolution,
            bits_per_pixel: color_resolution + 1,
            sorted: flags & screen_flags::SORTED != 0,
            global_color_table_size: table_len(flags & screen_flags::TABLE_SIZE),
            background_color_index: background,
            pixel_aspect_ratio: aspect,
        })
    }

    /// Serialize back to the 7-byte wire form.
    pub fn to_bytes(&self) -> [u8; SCREEN_DESCRIPTOR_LEN] {
        let size_bits = self.global_color_table_size.max(2).trailing_zeros() as u8 - 1;
        let mut flags = ((self.color_resolution & 0b111) << 4) | (size_bits & 0b111);
        if self.has_global_color_table {
            flags |= screen_flags::GLOBAL_COLOR_TABLE;
        }
        if self.sorted {
            flags |= screen_flags::SORTED;
        }
        let [w0, w1] = self.width.to_le_bytes();
        let [h0, h1] = self.height.to_le_bytes();
        [
            w0,
            w1,
            h0,
            h1,
            flags,
            self.background_color_index,
            self.pixel_aspect_ratio,
        ]
    }
}

/// A color table (palette).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<Rgb>,
}

impl ColorTable {
    /// Parse consecutive RGB triples.
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            colors: bytes
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
        }
    }

    /// Build from colors.
    pub fn from_colors(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Look up an index.
    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All entries in index order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Image descriptor plus what decoding its data produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDescriptor {
    /// Left edge on the canvas.
    pub left: u16,
    /// Top edge on the canvas.
    pub top: u16,
    /// Image width.
    pub width: u16,
    /// Image height.
    pub height: u16,
    /// Whether a local color table was present (it is skipped).
    pub has_local_color_table: bool,
    /// Whether the interlace flag was set (it is not honored).
    pub interlaced: bool,
    /// Entries in the skipped local color table, zero if absent.
    pub local_color_table_size: usize,
    /// LZW minimum code size.
    pub min_code_size: u8,
    /// Number of data sub-blocks.
    pub subblock_count: usize,
    /// Number of color indices decoded from all sub-blocks.
    pub pixel_count: usize,
}

impl ImageDescriptor {
    /// Parse the 10-byte descriptor starting at the `0x2C` separator.
    ///
    /// `min_code_size` and the decode counters are filled in by the reader.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let [separator, l0, l1, t0, t1, w0, w1, h0, h1, flags] = *bytes else {
            return Err(TimeboxError::protocol_violation(format!(
                "image descriptor is {} bytes, expected {IMAGE_DESCRIPTOR_LEN}",
                bytes.len()
            )));
        };
        if separator != markers::IMAGE {
            return Err(TimeboxError::protocol_violation(format!(
                "expected image separator 0x2C, found {separator:#04x}"
            )));
        }

        let has_local_color_table = flags & image_flags::LOCAL_COLOR_TABLE != 0;

        Ok(Self {
            left: u16::from_le_bytes([l0, l1]),
            top: u16::from_le_bytes([t0, t1]),
            width: u16::from_le_bytes([w0, w1]),
            height: u16::from_le_bytes([h0, h1]),
            has_local_color_table,
            interlaced: flags & image_flags::INTERLACED != 0,
            local_color_table_size: if has_local_color_table {
                table_len(flags & image_flags::TABLE_SIZE)
            } else {
                0
            },
            min_code_size: 0,
            subblock_count: 0,
            pixel_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen_descriptor() {
        // 300 x 11, global table of 2^(5+1) entries, 8-bit resolution, sorted
        let bytes = [0x2C, 0x01, 0x0B, 0x00, 0b1111_1101, 3, 49];
        let screen = ScreenDescriptor::parse(&bytes).unwrap();

        assert_eq!(screen.width, 300);
        assert_eq!(screen.height, 11);
        assert!(screen.has_global_color_table);
        assert_eq!(screen.color_resolution, 7);
        assert_eq!(screen.bits_per_pixel, 8);
        assert!(screen.sorted);
        assert_eq!(screen.global_color_table_size, 64);
        assert_eq!(screen.background_color_index, 3);
        assert_eq!(screen.pixel_aspect_ratio, 49);

        assert_eq!(screen.to_bytes(), bytes);
    }

    #[test]
    fn test_short_screen_descriptor() {
        let err = ScreenDescriptor::parse(&[1, 0, 1]).unwrap_err();
        assert!(matches!(err, TimeboxError::MalformedHeader { .. }));
    }

    #[test]
    fn test_parse_image_descriptor() {
        let bytes = [0x2C, 1, 0, 2, 0, 11, 0, 9, 0, 0b1100_0010];
        let image = ImageDescriptor::parse(&bytes).unwrap();

        assert_eq!((image.left, image.top), (1, 2));
        assert_eq!((image.width, image.height), (11, 9));
        assert!(image.has_local_color_table);
        assert!(image.interlaced);
        assert_eq!(image.local_color_table_size, 8);
    }

    #[test]
    fn test_color_table() {
        let table = ColorTable::parse(&[255, 0, 0, 0, 255, 0]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1), Some([0, 255, 0]));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn test_table_len() {
        assert_eq!(table_len(0), 2);
        assert_eq!(table_len(7), 256);
    }
}
