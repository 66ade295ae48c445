//! Device commands and payload construction.

use std::fmt;
use std::str::FromStr;
use timebox_core::{Result, TimeboxError};

/// Commands understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Turn the radio on or off.
    SwitchRadio = 0x05,
    /// Set the speaker volume.
    SetVolume = 0x08,
    /// Query the speaker volume.
    GetVolume = 0x09,
    /// Mute or unmute.
    SetMute = 0x0a,
    /// Query the mute state.
    GetMute = 0x0b,
    /// Set the clock.
    SetDateTime = 0x18,
    /// Show a static image.
    SetImage = 0x44,
    /// Switch the display view.
    SetView = 0x45,
    /// Upload one animation frame.
    SetAnimationFrame = 0x49,
    /// Query the temperature sensor.
    GetTemperature = 0x59,
    /// Query the radio frequency.
    GetRadioFrequency = 0x60,
    /// Tune the radio.
    SetRadioFrequency = 0x61,
}

impl Command {
    /// Every command, in opcode order.
    pub const ALL: [Command; 12] = [
        Command::SwitchRadio,
        Command::SetVolume,
        Command::GetVolume,
        Command::SetMute,
        Command::GetMute,
        Command::SetDateTime,
        Command::SetImage,
        Command::SetView,
        Command::SetAnimationFrame,
        Command::GetTemperature,
        Command::GetRadioFrequency,
        Command::SetRadioFrequency,
    ];

    /// The opcode byte.
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Look up a command by opcode.
    pub fn from_opcode(opcode: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.opcode() == opcode)
    }

    /// The lower-case, space separated command name.
    pub fn name(self) -> &'static str {
        match self {
            Command::SwitchRadio => "switch radio",
            Command::SetVolume => "set volume",
            Command::GetVolume => "get volume",
            Command::SetMute => "set mute",
            Command::GetMute => "get mute",
            Command::SetDateTime => "set date time",
            Command::SetImage => "set image",
            Command::SetView => "set view",
            Command::SetAnimationFrame => "set animation frame",
            Command::GetTemperature => "get temperature",
            Command::GetRadioFrequency => "get radio frequency",
            Command::SetRadioFrequency => "set radio frequency",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = TimeboxError;

    /// Parse a command name. Case and runs of whitespace are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| TimeboxError::invalid_argument(format!("unknown command {s:?}")))
    }
}

/// Build the payload for `command`: a little-endian 16-bit length covering
/// itself, the opcode and the arguments, then the opcode, then the arguments.
pub fn command_payload(command: Command, args: &[u8]) -> Result<Vec<u8>> {
    let len = u16::try_from(args.len() + 3).map_err(|_| {
        TimeboxError::invalid_argument(format!("{} argument bytes do not fit", args.len()))
    })?;

    let mut payload = Vec::with_capacity(args.len() + 3);
    payload.extend_from_slice(&len.to_le_bytes());
    payload.push(command.opcode());
    payload.extend_from_slice(args);
    Ok(payload)
}

/// Built-in display views selected with [`Command::SetView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Time of day.
    Clock,
    /// Temperature in Celsius.
    Temperature,
}

impl View {
    /// Arguments for [`Command::SetView`], optionally followed by a color.
    pub fn args(self, color: Option<[u8; 3]>) -> Vec<u8> {
        let mut args = match self {
            View::Clock => vec![0x00, 0x01],
            View::Temperature => vec![0x01, 0x00],
        };
        if let Some(color) = color {
            args.extend_from_slice(&color);
        }
        args
    }
}
