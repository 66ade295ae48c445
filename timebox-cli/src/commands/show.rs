//! Show command implementation.

use std::path::Path;
use timebox_image::GifReader;

use crate::utils::hex_grid;

pub fn cmd_show(gif: &Path, left: usize, top: usize) -> Result<(), Box<dyn std::error::Error>> {
    let reader = GifReader::open(gif)?;
    let device = reader.canvas().to_device_image(left, top);

    print!("{}", hex_grid(&device));
    Ok(())
}
