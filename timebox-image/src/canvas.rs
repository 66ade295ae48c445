//! Rectangular RGB pixel grid.
//!
//! A canvas holds whatever intensities its owner writes: 8-bit values for a
//! decoded GIF, 4-bit values for an image headed to the device. Gamma-mapped
//! writes take raw 8-bit values and store the 4-bit mapping.

use timebox_core::{Result, TimeboxError};

use crate::gamma::GammaTable;

/// One pixel: red, green, blue.
pub type Rgb = [u8; 3];

/// Width of the device display.
pub const DEVICE_WIDTH: usize = 11;

/// Height of the device display.
pub const DEVICE_HEIGHT: usize = 11;

/// A 2-D RGB grid with an attached gamma table.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    /// Row-major pixels.
    pixels: Vec<Rgb>,
    gamma: GammaTable,
}

impl PixelCanvas {
    /// Create a black canvas with a linear gamma curve.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width * height],
            gamma: GammaTable::default(),
        }
    }

    /// Create a black canvas the size of the device display.
    pub fn device() -> Self {
        Self::new(DEVICE_WIDTH, DEVICE_HEIGHT)
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies on the canvas.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(TimeboxError::invalid_argument(format!(
                "pixel ({x}, {y}) outside the {}x{} canvas",
                self.width, self.height
            )));
        }
        Ok(y * self.width + x)
    }

    /// Set a pixel to the given channel values as-is.
    pub fn put_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.pixels[offset] = [r, g, b];
        Ok(())
    }

    /// Set a pixel from raw 8-bit values routed through the gamma table.
    pub fn put_pixel_gamma(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) -> Result<()> {
        let [r, g, b] = self.gamma.map_rgb([r, g, b]);
        self.put_pixel(x, y, r, g, b)
    }

    /// Read a pixel.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgb> {
        let offset = self.offset(x, y)?;
        Ok(self.pixels[offset])
    }

    /// Change the gamma value, recomputing the table only if it differs.
    pub fn set_gamma(&mut self, gamma: f64) -> Result<()> {
        if self.gamma.gamma() != gamma {
            self.gamma = GammaTable::new(gamma)?;
        }
        Ok(())
    }

    /// The active gamma value.
    pub fn gamma(&self) -> f64 {
        self.gamma.gamma()
    }

    /// The active gamma table.
    pub fn gamma_table(&self) -> &GammaTable {
        &self.gamma
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Crop an 11 x 11 window at `(left, top)` and reduce 8-bit channels to
    /// 4-bit by dropping the low nibble.
    ///
    /// Window pixels that fall outside this canvas stay black.
    pub fn to_device_image(&self, left: usize, top: usize) -> PixelCanvas {
        let mut device = PixelCanvas::device();
        for y in 0..DEVICE_HEIGHT {
            for x in 0..DEVICE_WIDTH {
                let (sx, sy) = (left + x, top + y);
                if self.contains(sx, sy) {
                    let [r, g, b] = self.pixels[sy * self.width + sx];
                    device.pixels[y * DEVICE_WIDTH + x] = [r >> 4, g >> 4, b >> 4];
                }
            }
        }
        device
    }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::device()
    }
}
