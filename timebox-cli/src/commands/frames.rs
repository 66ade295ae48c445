//! Frames command implementation.

use std::path::Path;
use timebox_protocol::FrameReassembler;
use tracing::debug;

use crate::utils::hex_bytes;

/// One item split from a capture.
#[derive(Debug, PartialEq, Eq)]
enum Piece {
    Garbage(Vec<u8>),
    Frame(Vec<u8>),
}

/// Feed `capture` through a reassembler in `chunk`-byte reads.
///
/// Returns the pieces in arrival order and the bytes still pending.
fn split_capture(
    capture: &[u8],
    chunk: usize,
) -> Result<(Vec<Piece>, Vec<u8>), Box<dyn std::error::Error>> {
    if chunk == 0 {
        return Err("chunk size must be non-zero".into());
    }

    let mut reassembler = FrameReassembler::new();
    let mut pieces = Vec::new();

    for read in capture.chunks(chunk) {
        reassembler.append(read);
        debug!(len = read.len(), buffered = reassembler.len(), "read");

        while reassembler.has_frame_or_garbage() {
            if reassembler.starts_with_garbage() {
                pieces.push(Piece::Garbage(reassembler.take_garbage()));
            } else {
                pieces.push(Piece::Frame(reassembler.take_frame()?));
            }
        }
    }

    Ok((pieces, reassembler.as_bytes().to_vec()))
}

pub fn cmd_frames(capture: &Path, chunk: usize) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(capture)?;
    let (pieces, pending) = split_capture(&data, chunk)?;

    for piece in &pieces {
        match piece {
            Piece::Garbage(bytes) => {
                println!("garbage ({:3} bytes): {}", bytes.len(), hex_bytes(bytes))
            }
            Piece::Frame(bytes) => {
                println!("frame   ({:3} bytes): {}", bytes.len(), hex_bytes(bytes))
            }
        }
    }
    if !pending.is_empty() {
        println!(
            "pending ({:3} bytes): {}",
            pending.len(),
            hex_bytes(&pending)
        );
    }

    let frames = pieces
        .iter()
        .filter(|p| matches!(p, Piece::Frame(_)))
        .count();
    println!();
    println!(
        "{} frame(s), {} garbage run(s), {} byte(s) pending",
        frames,
        pieces.len() - frames,
        pending.len()
    );
    Ok(())
}
