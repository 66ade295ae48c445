//! Formatting helpers for the CLI.

use timebox_core::{Result, TimeboxError};
use timebox_image::PixelCanvas;

/// Render a canvas of 4-bit channels as rows of `RGB` hex triples.
pub fn hex_grid(canvas: &PixelCanvas) -> String {
    let mut out = String::new();
    for row in canvas.pixels().chunks(canvas.width().max(1)) {
        let cells: Vec<String> = row
            .iter()
            .map(|[r, g, b]| format!("{:X}{:X}{:X}", r & 0xF, g & 0xF, b & 0xF))
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Space separated lower-case hex bytes.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse hex byte arguments such as `0f`, `0x0F` or `f`.
pub fn parse_hex_bytes(args: &[String]) -> Result<Vec<u8>> {
    args.iter()
        .map(|arg| {
            let digits = arg
                .strip_prefix("0x")
                .or_else(|| arg.strip_prefix("0X"))
                .unwrap_or(arg);
            u8::from_str_radix(digits, 16)
                .map_err(|_| TimeboxError::invalid_argument(format!("not a hex byte: {arg:?}")))
        })
        .collect()
}
