//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod mkdsk;
pub mod catalog;
pub mod put;
pub mod get;
pub mod modify;
pub mod tape;

use crate::DYNERR;
use crate::fs::rkdos::types::{ATTR_READ_ONLY,ATTR_HIDDEN};

pub const RCH: &str = "unreachable was reached";

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("command could not be interpreted")]
    InvalidCommand,
    #[error("invalid hex address")]
    InvalidAddress,
    #[error("operation cancelled")]
    Cancelled
}

/// Parse a bare hex address argument the way the original tools did.
pub fn parse_hex_addr(s: &str) -> Result<u16,DYNERR> {
    match u16::from_str_radix(s,16) {
        Ok(addr) => Ok(addr),
        Err(_) => Err(Box::new(CommandError::InvalidAddress))
    }
}

/// Translate the attribute flags into the directory attribute byte.
pub fn attr_byte(read_only: bool,hidden: bool) -> u8 {
    let mut attr = 0;
    if read_only {
        attr |= ATTR_READ_ONLY;
    }
    if hidden {
        attr |= ATTR_HIDDEN;
    }
    attr
}
