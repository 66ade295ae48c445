//! GIF container support.
//!
//! The reader handles the subset of GIF89a that TimeBox assets use: one
//! global color table, single-block extensions, non-interlaced image data
//! and LZW streams that restart in every sub-block.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────┬───────────────────┬──────────────┬────────────┬─────────┐
//! │ GIF89a   │ screen descriptor │ global table │ extensions │ images  │ 0x3B
//! │ 6 bytes  │ 7 bytes           │ 3 * 2^(N+1)  │ 0x21 ...   │ 0x2C ...│
//! └──────────┴───────────────────┴──────────────┴────────────┴─────────┘
//! ```

mod header;
mod writer;

pub use header::{
    ColorTable, IMAGE_DESCRIPTOR_LEN, ImageDescriptor, SCREEN_DESCRIPTOR_LEN, SIGNATURE_LEN,
    ScreenDescriptor, markers,
};
pub use writer::GifWriter;

use std::fs;
use std::path::Path;
use timebox_core::{Result, TimeboxError};
use timebox_lzw::{LzwConfig, LzwDecoder};
use tracing::{debug, warn};

use crate::canvas::PixelCanvas;

/// Bounds-checked forward cursor over the file bytes.
#[derive(Debug)]
struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Result<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> Result<u8> {
        self.data
            .get(self.pos + ahead)
            .copied()
            .ok_or_else(|| TimeboxError::truncated(self.pos + ahead, 1))
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos + len;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| TimeboxError::truncated(self.pos, end - self.data.len()))?;
        self.pos = end;
        Ok(slice)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// A fully decoded GIF file.
#[derive(Debug, Clone)]
pub struct GifReader {
    signature: [u8; SIGNATURE_LEN],
    screen: ScreenDescriptor,
    color_table: ColorTable,
    images: Vec<ImageDescriptor>,
    canvas: PixelCanvas,
}

impl GifReader {
    /// Read and decode a GIF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path)?;
        Self::decode(&data)
    }

    /// Decode a GIF held in memory.
    ///
    /// Any structural violation aborts the whole decode; no partial canvas
    /// is returned.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let header_len = SIGNATURE_LEN + SCREEN_DESCRIPTOR_LEN;
        if data.len() < header_len {
            return Err(TimeboxError::malformed_header(format!(
                "file is {} bytes, shorter than the {header_len}-byte header",
                data.len()
            )));
        }

        let mut cursor = ByteCursor::new(data);

        let mut signature = [0u8; SIGNATURE_LEN];
        signature.copy_from_slice(cursor.take(SIGNATURE_LEN)?);
        if !signature.starts_with(b"GIF") {
            debug!(?signature, "unexpected signature, continuing");
        }

        let screen = ScreenDescriptor::parse(cursor.take(SCREEN_DESCRIPTOR_LEN)?)?;
        debug!(
            width = screen.width,
            height = screen.height,
            table_size = screen.global_color_table_size,
            "logical screen"
        );

        if screen.width == 0 || screen.height == 0 {
            return Err(TimeboxError::malformed_header(format!(
                "empty logical screen {}x{}",
                screen.width, screen.height
            )));
        }
        if !screen.has_global_color_table {
            return Err(TimeboxError::unsupported("image without a global color table"));
        }

        let color_table = ColorTable::parse(cursor.take(3 * screen.global_color_table_size)?);

        let mut reader = Self {
            signature,
            canvas: PixelCanvas::new(usize::from(screen.width), usize::from(screen.height)),
            screen,
            color_table,
            images: Vec::new(),
        };

        Self::skip_extensions(&mut cursor)?;

        while cursor.peek()? == markers::IMAGE {
            let image = reader.decode_image(&mut cursor)?;
            reader.images.push(image);
        }

        let trailer = cursor.read_u8()?;
        if trailer != markers::TRAILER {
            return Err(TimeboxError::protocol_violation(format!(
                "expected trailer 0x3B at offset {}, found {trailer:#04x}",
                cursor.position() - 1
            )));
        }

        Ok(reader)
    }

    /// Skip extension blocks of the form
    /// `0x21, label, size, payload[size], 0x00`.
    fn skip_extensions(cursor: &mut ByteCursor<'_>) -> Result<()> {
        while cursor.peek()? == markers::EXTENSION {
            let label = cursor.peek_at(1)?;
            let size = usize::from(cursor.peek_at(2)?);
            let block = cursor.take(4 + size)?;

            if block.last() != Some(&0) {
                return Err(TimeboxError::unsupported(format!(
                    "extension {label:#04x} spanning several sub-blocks"
                )));
            }
            debug!(label, size, "skipped extension block");
        }
        Ok(())
    }

    fn decode_image(&mut self, cursor: &mut ByteCursor<'_>) -> Result<ImageDescriptor> {
        let mut image = ImageDescriptor::parse(cursor.take(IMAGE_DESCRIPTOR_LEN)?)?;

        if image.has_local_color_table {
            warn!(
                entries = image.local_color_table_size,
                "local color table not supported, using the global table"
            );
            cursor.take(3 * image.local_color_table_size)?;
        }
        if image.interlaced {
            debug!("interlace flag set, rows are painted in stored order");
        }

        image.min_code_size = cursor.read_u8()?;
        let config = LzwConfig::new(image.min_code_size, self.color_table.len() as u16)
            .map_err(|e| TimeboxError::protocol_violation(e.to_string()))?;
        let mut decoder = LzwDecoder::new(config);

        let left = usize::from(image.left);
        let right = left + usize::from(image.width);
        let (mut x, mut y) = (left, usize::from(image.top));

        loop {
            let len = usize::from(cursor.read_u8()?);
            if len == 0 {
                break;
            }
            let subblock = cursor.take(len)?;
            let indices = decoder.decode_subblock(subblock)?;
            debug!(
                offset = cursor.position() - len,
                len,
                pixels = indices.len(),
                "decoded sub-block"
            );

            for index in indices {
                let color = self.color_table.get(index).ok_or_else(|| {
                    TimeboxError::protocol_violation(format!(
                        "color index {index} outside the {}-entry color table",
                        self.color_table.len()
                    ))
                })?;
                if !self.canvas.contains(x, y) {
                    return Err(TimeboxError::protocol_violation(format!(
                        "pixel ({x}, {y}) outside the {}x{} canvas",
                        self.canvas.width(),
                        self.canvas.height()
                    )));
                }
                let [r, g, b] = color;
                self.canvas.put_pixel(x, y, r, g, b)?;

                x += 1;
                if x == right {
                    x = left;
                    y += 1;
                }
                image.pixel_count += 1;
            }
            image.subblock_count += 1;
        }

        Ok(image)
    }

    /// The six signature bytes.
    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature
    }

    /// The logical screen descriptor.
    pub fn screen(&self) -> &ScreenDescriptor {
        &self.screen
    }

    /// The global color table.
    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// Image blocks in file order.
    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    /// The decoded canvas.
    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Take ownership of the decoded canvas.
    pub fn into_canvas(self) -> PixelCanvas {
        self.canvas
    }
}

/// Decode a GIF held in memory straight to its canvas.
pub fn decode_gif(data: &[u8]) -> Result<PixelCanvas> {
    GifReader::decode(data).map(GifReader::into_canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 canvas, two-entry table, one sub-block with four index-0 pixels.
    fn two_by_two() -> Vec<u8> {
        let mut gif = b"GIF89a".to_vec();
        gif.extend_from_slice(&[2, 0, 2, 0, 0x80, 0, 0]);
        gif.extend_from_slice(&[0xFF, 0x80, 0x00, 0x00, 0x00, 0x00]);
        gif.extend_from_slice(&[0x2C, 0, 0, 0, 0, 2, 0, 2, 0, 0]);
        gif.extend_from_slice(&[2, 2, 0x84, 0x51, 0]);
        gif.push(0x3B);
        gif
    }

    #[test]
    fn test_decode_two_by_two() {
        let reader = GifReader::decode(&two_by_two()).unwrap();

        assert_eq!(reader.signature(), b"GIF89a");
        assert_eq!(reader.screen().global_color_table_size, 2);
        let canvas = reader.canvas();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(canvas.get_pixel(x, y).unwrap(), [0xFF, 0x80, 0x00]);
            }
        }

        let image = &reader.images()[0];
        assert_eq!(image.min_code_size, 2);
        assert_eq!(image.subblock_count, 1);
        assert_eq!(image.pixel_count, 4);
    }

    #[test]
    fn test_short_file() {
        let err = GifReader::decode(b"GIF89a\x02\x00").unwrap_err();
        assert!(matches!(err, TimeboxError::MalformedHeader { .. }));
    }

    #[test]
    fn test_bad_trailer() {
        let mut gif = two_by_two();
        *gif.last_mut().unwrap() = 0x00;
        let err = GifReader::decode(&gif).unwrap_err();
        assert!(matches!(err, TimeboxError::DecodeProtocolViolation { .. }));
    }

    #[test]
    fn test_missing_trailer() {
        let mut gif = two_by_two();
        gif.pop();
        assert!(GifReader::decode(&gif).unwrap_err().is_truncation());
    }

    #[test]
    fn test_zero_width_screen() {
        let mut gif = two_by_two();
        gif[6] = 0;
        let err = GifReader::decode(&gif).unwrap_err();
        assert!(matches!(err, TimeboxError::MalformedHeader { .. }));
    }

    #[test]
    fn test_no_global_color_table() {
        let mut gif = two_by_two();
        gif[10] = 0x00;
        let err = GifReader::decode(&gif).unwrap_err();
        assert!(matches!(err, TimeboxError::UnsupportedFeature { .. }));
    }

    #[test]
    fn test_cursor_take_past_end() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        assert_eq!(cursor.take(2).unwrap(), &[1, 2]);
        let err = cursor.take(4).unwrap_err();
        assert!(matches!(
            err,
            TimeboxError::TruncatedInput {
                offset: 2,
                needed: 3
            }
        ));
    }
}
