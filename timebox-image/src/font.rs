//! Sprite fonts: glyphs `A` to `Z` cut from a single GIF strip.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use timebox_core::{Result, TimeboxError};

use crate::canvas::{PixelCanvas, Rgb};
use crate::gamma::GammaTable;
use crate::gif::GifReader;

/// Glyph geometry and gamma of a sprite font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Glyph width in pixels.
    pub glyph_width: usize,
    /// Glyph height in pixels.
    pub glyph_height: usize,
    /// Horizontal distance between the left edges of two glyphs.
    pub spacing: usize,
    /// Gamma applied to glyph pixels.
    pub gamma: f64,
}

impl FontConfig {
    /// The 9 x 9 arcade font shipped with the device tools.
    pub const ARCADE_CLASSIC: Self = Self {
        glyph_width: 9,
        glyph_height: 9,
        spacing: 10,
        gamma: 0.6,
    };
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::ARCADE_CLASSIC
    }
}

/// A decoded sprite font.
#[derive(Debug, Clone)]
pub struct SpriteFont {
    config: FontConfig,
    sheet: PixelCanvas,
    gamma: GammaTable,
}

impl SpriteFont {
    /// Decode a font sheet held in memory.
    pub fn from_gif(data: &[u8], config: FontConfig) -> Result<Self> {
        if config.glyph_width == 0 || config.glyph_height == 0 {
            return Err(TimeboxError::invalid_argument("glyph size must be non-zero"));
        }
        let gamma = GammaTable::new(config.gamma)?;
        let sheet = GifReader::decode(data)?.into_canvas();
        Ok(Self {
            config,
            sheet,
            gamma,
        })
    }

    /// Read and decode a font sheet file.
    pub fn open(path: impl AsRef<Path>, config: FontConfig) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_gif(&data, config)
    }

    /// The font geometry.
    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Replace the gamma curve.
    pub fn set_gamma(&mut self, gamma: f64) -> Result<()> {
        if gamma != self.config.gamma {
            self.gamma = GammaTable::new(gamma)?;
            self.config.gamma = gamma;
        }
        Ok(())
    }

    fn glyph_index(ch: char) -> Result<usize> {
        let upper = ch.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(TimeboxError::invalid_argument(format!(
                "no glyph for {ch:?}"
            )));
        }
        Ok(usize::from(upper as u8 - b'A'))
    }

    /// Gamma-mapped color of pixel `(x, y)` of the glyph for `ch`.
    ///
    /// Letters are case-insensitive.
    pub fn glyph_pixel(&self, ch: char, x: usize, y: usize) -> Result<Rgb> {
        let glyph = Self::glyph_index(ch)?;
        if x >= self.config.glyph_width || y >= self.config.glyph_height {
            return Err(TimeboxError::invalid_argument(format!(
                "({x}, {y}) outside the {}x{} glyph",
                self.config.glyph_width, self.config.glyph_height
            )));
        }
        let raw = self.sheet.get_pixel(x + glyph * self.config.spacing, y)?;
        Ok(self.gamma.map_rgb(raw))
    }

    /// Render one glyph onto a canvas of the glyph size.
    pub fn render_glyph(&self, ch: char) -> Result<PixelCanvas> {
        let mut canvas = PixelCanvas::new(self.config.glyph_width, self.config.glyph_height);
        for y in 0..self.config.glyph_height {
            for x in 0..self.config.glyph_width {
                let [r, g, b] = self.glyph_pixel(ch, x, y)?;
                canvas.put_pixel(x, y, r, g, b)?;
            }
        }
        Ok(canvas)
    }
}
