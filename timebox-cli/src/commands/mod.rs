//! Command implementations for the TimeBox CLI.

pub mod frames;
pub mod glyph;
pub mod info;
pub mod payload;
pub mod show;

pub use frames::cmd_frames;
pub use glyph::cmd_glyph;
pub use info::cmd_info;
pub use payload::cmd_payload;
pub use show::cmd_show;
