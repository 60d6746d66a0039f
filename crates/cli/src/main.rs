use anyhow::Result;
use clap::{Parser, Subcommand};
use mzscope::commands::{browse_command, header_command, map_command};

/// Interactive explorer for segmented 16-bit MZ executables.
///
/// This CLI is a thin wrapper around `mzscope-core` (exposed in code as
/// `mzscope_core`). All substantive logic lives in the library so it can
/// be tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "mzscope",
    version,
    about = "Interactive explorer for segmented 16-bit MZ executables",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and print the fixed MZ header of an executable.
    Header {
        /// Path to the executable.
        file: String,
    },

    /// Map reachable code from a seed address into pseudo-functions.
    ///
    /// Follows jump and call targets from the seed (default: the header's
    /// CS:IP entry point), then prints each region bounded by discovered
    /// call targets. Unresolvable branch targets are reported on stderr
    /// and skipped.
    Map {
        /// Path to the executable.
        file: String,

        /// Exploration seed address (any base, e.g. 0x527c). Defaults to
        /// the entry point from the header.
        #[arg(long)]
        seed: Option<String>,

        /// Emit the raw exploration result as JSON instead of the
        /// function partition.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Browse the executable interactively.
    ///
    /// Line-oriented commands: `goto <addr>`, `mode <hex|bin|asm>`,
    /// `show [!]<count>`, `find <hex>`, `label <name> [addr]`, `header`,
    /// `save`, `quit`; empty input pulls the next line. Labels persist in
    /// a JSON sidecar next to the executable.
    Browse {
        /// Path to the executable.
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Header { file } => header_command(&file)?,
        Command::Map { file, seed, json } => map_command(&file, seed.as_deref(), json)?,
        Command::Browse { file } => browse_command(&file)?,
    }

    Ok(())
}
