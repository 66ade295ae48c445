//! Glyph command implementation.

use std::path::Path;
use timebox_image::{FontConfig, SpriteFont};

use crate::utils::hex_grid;

pub fn cmd_glyph(
    font: &Path,
    letter: char,
    config: FontConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let font = SpriteFont::open(font, config)?;
    let glyph = font.render_glyph(letter)?;

    println!(
        "Glyph {} ({}x{}, gamma {})",
        letter.to_ascii_uppercase(),
        config.glyph_width,
        config.glyph_height,
        config.gamma
    );
    print!("{}", hex_grid(&glyph));
    Ok(())
}
