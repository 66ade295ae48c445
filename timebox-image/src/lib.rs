//! # TimeBox-Image: pixels for an 11 x 11 LED matrix
//!
//! This crate turns GIF assets into pixel grids the TimeBox can show.
//!
//! ## Features
//!
//! - **GIF reading** of the single-table, per-sub-block-restart subset the
//!   device assets use, with the parsed metadata exposed
//! - **GIF writing** of files the reader decodes back
//! - **Pixel canvas** with 8-bit to 4-bit device cropping
//! - **Gamma tables** mapping 8-bit intensities to 4-bit LED levels
//! - **Sprite fonts** cut from a GIF strip of glyphs `A` to `Z`
//!
//! ## Example
//!
//! ```rust
//! use timebox_image::{GifReader, GifWriter};
//!
//! let writer = GifWriter::new(vec![[0, 0, 0], [255, 0, 0]]).unwrap();
//! let gif = writer.write_indexed(2, 1, &[0, 1]).unwrap();
//!
//! let reader = GifReader::decode(&gif).unwrap();
//! assert_eq!(reader.canvas().get_pixel(1, 0).unwrap(), [255, 0, 0]);
//!
//! let device = reader.canvas().to_device_image(0, 0);
//! assert_eq!(device.get_pixel(1, 0).unwrap(), [15, 0, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod canvas;
pub mod font;
pub mod gamma;
pub mod gif;

pub use canvas::{DEVICE_HEIGHT, DEVICE_WIDTH, PixelCanvas, Rgb};
pub use font::{FontConfig, SpriteFont};
pub use gamma::GammaTable;
pub use gif::{ColorTable, GifReader, GifWriter, ImageDescriptor, ScreenDescriptor, decode_gif};
