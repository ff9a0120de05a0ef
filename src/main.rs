//! # Command Line Interface
//!
//! Dispatch commands to `commands` module.

use env_logger;
#[cfg(windows)]
use colored;
use rkkit::commands;
use rkkit::commands::CommandError;
mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).unwrap();

    let main_cmd = cli::build_cli();
    let matches = main_cmd.get_matches();

    // Create a blank disk image

    if let Some(cmd) = matches.subcommand_matches("mkdsk") {
        return commands::mkdsk::mkdsk(cmd);
    }

    // Catalog a disk image

    if let Some(cmd) = matches.subcommand_matches("catalog") {
        return commands::catalog::catalog(cmd);
    }

    // Add a file to a disk image

    if let Some(cmd) = matches.subcommand_matches("put") {
        return commands::put::put(cmd);
    }

    // Extract a file from a disk image

    if let Some(cmd) = matches.subcommand_matches("get") {
        return commands::get::get(cmd);
    }

    // Delete a file

    if let Some(cmd) = matches.subcommand_matches("delete") {
        return commands::modify::delete(cmd);
    }

    // Change attributes of a file

    if let Some(cmd) = matches.subcommand_matches("access") {
        return commands::modify::access(cmd);
    }

    // Wrap a binary in a tape framing

    if let Some(cmd) = matches.subcommand_matches("tape") {
        return commands::tape::wrap(cmd);
    }

    log::error!("no subcommand was found, try `rkkit --help`");
    Err(Box::new(CommandError::InvalidCommand))
}
