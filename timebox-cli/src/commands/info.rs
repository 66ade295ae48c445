//! Info command implementation.

use serde::Serialize;
use std::path::Path;
use timebox_image::{GifReader, ImageDescriptor, ScreenDescriptor};

/// JSON output for GIF inspection.
#[derive(Debug, Serialize)]
struct GifInfoJson<'a> {
    file: String,
    size: u64,
    signature: String,
    screen: &'a ScreenDescriptor,
    color_table_size: usize,
    images: &'a [ImageDescriptor],
}

pub fn cmd_info(gif: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let reader = GifReader::open(gif)?;
    let metadata = std::fs::metadata(gif)?;
    let signature = String::from_utf8_lossy(reader.signature()).into_owned();

    if json {
        let output = GifInfoJson {
            file: gif.display().to_string(),
            size: metadata.len(),
            signature,
            screen: reader.screen(),
            color_table_size: reader.color_table().len(),
            images: reader.images(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let screen = reader.screen();

    println!("GIF Information");
    println!("===============");
    println!("File: {}", gif.display());
    println!("Size: {} bytes", metadata.len());
    println!("Signature: {}", signature);

    println!();
    println!("Logical Screen:");
    println!("  Dimensions: {}x{}", screen.width, screen.height);
    println!("  Bits per pixel: {}", screen.bits_per_pixel);
    println!(
        "  Global color table: {} entries{}",
        screen.global_color_table_size,
        if screen.sorted { " (sorted)" } else { "" }
    );
    println!("  Background index: {}", screen.background_color_index);
    println!("  Pixel aspect ratio: {}", screen.pixel_aspect_ratio);

    for (i, image) in reader.images().iter().enumerate() {
        println!();
        println!("Image {}:", i + 1);
        println!(
            "  Position: ({}, {}), size {}x{}",
            image.left, image.top, image.width, image.height
        );
        println!("  LZW minimum code size: {}", image.min_code_size);
        println!("  Sub-blocks: {}", image.subblock_count);
        println!("  Pixels decoded: {}", image.pixel_count);
        if image.has_local_color_table {
            println!(
                "  Local color table: {} entries (ignored)",
                image.local_color_table_size
            );
        }
        if image.interlaced {
            println!("  Interlaced: yes (rows shown in stored order)");
        }
    }

    Ok(())
}
