//! Single-image GIF89a writer.

use std::collections::HashMap;
use timebox_core::{Result, TimeboxError};
use timebox_lzw::{LzwConfig, LzwEncoder};
use tracing::debug;

use super::header::{ScreenDescriptor, markers, table_len};
use crate::canvas::{PixelCanvas, Rgb};

/// Pixels compressed into each sub-block.
const PIXELS_PER_SUBBLOCK: usize = 128;

/// Largest payload a sub-block length byte can announce.
const MAX_SUBBLOCK_LEN: usize = 255;

/// Writes GIF files that [`GifReader`](super::GifReader) decodes back.
///
/// Each sub-block holds an independent LZW stream, so the output follows
/// the same per-sub-block restart rule the reader expects.
#[derive(Debug, Clone)]
pub struct GifWriter {
    palette: Vec<Rgb>,
}

impl GifWriter {
    /// Create a writer for a palette of 1 to 256 colors.
    pub fn new(palette: Vec<Rgb>) -> Result<Self> {
        if palette.is_empty() || palette.len() > 256 {
            return Err(TimeboxError::invalid_argument(format!(
                "palette holds {} colors, expected 1 to 256",
                palette.len()
            )));
        }
        Ok(Self { palette })
    }

    /// Create a writer whose palette is the distinct colors of `canvas` in
    /// first-seen order.
    pub fn for_canvas(canvas: &PixelCanvas) -> Result<Self> {
        let mut palette: Vec<Rgb> = Vec::new();
        for color in canvas.pixels() {
            if !palette.contains(color) {
                palette.push(*color);
            }
        }
        Self::new(palette)
    }

    /// The palette in index order.
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// `N` of the `2^(N+1)`-entry table holding the palette.
    fn table_size_bits(&self) -> u8 {
        (0..8u8)
            .find(|&bits| table_len(bits) >= self.palette.len())
            .unwrap_or(7)
    }

    /// Write a GIF whose pixels are palette indices in row-major order.
    pub fn write_indexed(&self, width: u16, height: u16, indices: &[u8]) -> Result<Vec<u8>> {
        if width == 0 || height == 0 {
            return Err(TimeboxError::invalid_argument(format!(
                "image size {width}x{height} is empty"
            )));
        }
        let expected = usize::from(width) * usize::from(height);
        if indices.len() != expected {
            return Err(TimeboxError::invalid_argument(format!(
                "{} indices for a {width}x{height} image",
                indices.len()
            )));
        }
        if let Some(&index) = indices
            .iter()
            .find(|&&i| usize::from(i) >= self.palette.len())
        {
            return Err(TimeboxError::invalid_argument(format!(
                "index {index} outside the {}-color palette",
                self.palette.len()
            )));
        }

        let size_bits = self.table_size_bits();
        let table_size = table_len(size_bits);
        let min_code_size = (size_bits + 1).max(2);

        let screen = ScreenDescriptor {
            width,
            height,
            has_global_color_table: true,
            color_resolution: 7,
            bits_per_pixel: 8,
            sorted: false,
            global_color_table_size: table_size,
            background_color_index: 0,
            pixel_aspect_ratio: 0,
        };

        let mut out = b"GIF89a".to_vec();
        out.extend_from_slice(&screen.to_bytes());
        for slot in 0..table_size {
            out.extend_from_slice(&self.palette.get(slot).copied().unwrap_or([0; 3]));
        }

        out.push(markers::IMAGE);
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.push(0);

        out.push(min_code_size);
        let config = LzwConfig::new(min_code_size, table_size as u16)?;
        let mut encoder = LzwEncoder::new(config)?;
        for chunk in indices.chunks(PIXELS_PER_SUBBLOCK) {
            let block = encoder.encode(chunk)?;
            if block.len() > MAX_SUBBLOCK_LEN {
                return Err(TimeboxError::protocol_violation(format!(
                    "compressed sub-block is {} bytes",
                    block.len()
                )));
            }
            out.push(block.len() as u8);
            out.extend_from_slice(&block);
        }
        out.push(0);
        out.push(markers::TRAILER);

        debug!(
            width,
            height,
            colors = self.palette.len(),
            bytes = out.len(),
            "wrote GIF"
        );
        Ok(out)
    }

    /// Write a canvas, mapping every pixel to its palette index.
    pub fn write_canvas(&self, canvas: &PixelCanvas) -> Result<Vec<u8>> {
        let width = u16::try_from(canvas.width())
            .map_err(|_| TimeboxError::invalid_argument("canvas wider than 65535 pixels"))?;
        let height = u16::try_from(canvas.height())
            .map_err(|_| TimeboxError::invalid_argument("canvas taller than 65535 pixels"))?;

        let lookup: HashMap<Rgb, u8> = self
            .palette
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &color)| (color, i as u8))
            .collect();

        let indices = canvas
            .pixels()
            .iter()
            .map(|color| {
                lookup.get(color).copied().ok_or_else(|| {
                    TimeboxError::invalid_argument(format!("color {color:?} not in the palette"))
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        self.write_indexed(width, height, &indices)
    }
}
