//! Payload command implementation.

use timebox_protocol::{Command, command_payload};

use crate::utils::{hex_bytes, parse_hex_bytes};

pub fn cmd_payload(command: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let command: Command = command.parse()?;
    let args = parse_hex_bytes(args)?;
    let payload = command_payload(command, &args)?;

    println!("{} (opcode {:#04x})", command, command.opcode());
    println!("{}", hex_bytes(&payload));
    Ok(())
}
