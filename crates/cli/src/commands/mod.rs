//! Command implementations for the mzscope CLI.
//!
//! Each subcommand is a plain function so integration tests can call the
//! behavior directly without spawning the binary.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use mzscope_core::decode::CapstoneSource;
use mzscope_core::explore::{explore, report::write_function_map};
use mzscope_core::image::{Image, MzHeader};
use mzscope_core::labels::{store_path_for, LabelTable};
use mzscope_core::session::command::Command;
use mzscope_core::session::Session;

use crate::parse_address_arg;

/// Print the parsed MZ header of `file`.
pub fn header_command(file: &str) -> Result<()> {
    let image = Image::load(file).context("Failed to open executable")?;
    let header = MzHeader::parse(image.bytes())
        .with_context(|| format!("Not a valid MZ executable: {file}"))?;
    println!("{header}");
    Ok(())
}

/// Explore reachable code from the entry point (or `--seed`) and print the
/// function partition, or the raw exploration result as JSON.
pub fn map_command(file: &str, seed: Option<&str>, json: bool) -> Result<()> {
    let image = Image::load(file).context("Failed to open executable")?;

    let seed = match seed {
        Some(arg) => parse_address_arg(arg)?,
        None => MzHeader::parse(image.bytes())
            .with_context(|| format!("Not a valid MZ executable: {file}"))?
            .entry_linear(),
    };

    let source = CapstoneSource::new().context("Failed to initialize decoder")?;
    let map = explore(&image, &source, seed);

    for diagnostic in &map.diagnostics {
        eprintln!("{diagnostic}");
    }

    if json {
        let serialized =
            serde_json::to_string_pretty(&map).context("Failed to serialize exploration")?;
        println!("{serialized}");
    } else {
        let stdout = io::stdout();
        write_function_map(&mut stdout.lock(), &image, &source, &map)
            .context("Failed to write function map")?;
    }

    Ok(())
}

/// Run the interactive browsing session over `file`.
///
/// Labels load from the sidecar store at startup (an unreadable store is
/// reported and replaced with an empty table) and persist on `save`, on
/// `quit`, and on end of input.
pub fn browse_command(file: &str) -> Result<()> {
    let image = Image::load(file).context("Failed to open executable")?;
    let store = store_path_for(Path::new(file));
    let labels = match LabelTable::load(&store) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("warning: ignoring label store {}: {e}", store.display());
            LabelTable::new()
        }
    };
    let source = CapstoneSource::new().context("Failed to initialize decoder")?;
    let mut session = Session::new(image, labels, Box::new(source));

    println!("mzscope v{}", mzscope_core::version());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("(mzscope) ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line).context("Failed to read command")? == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(command) => {
                if !dispatch(&mut session, &store, command)? {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    session
        .labels()
        .save(&store)
        .with_context(|| format!("Failed to save labels to {}", store.display()))?;
    println!("saved labels to {}", store.display());
    Ok(())
}

/// Execute one command against the session. Returns `false` when the
/// session should end; the caller performs the final save.
fn dispatch(session: &mut Session, store: &Path, command: Command) -> Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        // A failed save aborts only the save; the session stays usable and
        // the quit-time save still runs.
        Command::Save => match session.labels().save(store) {
            Ok(()) => println!("saved labels to {}", store.display()),
            Err(e) => eprintln!("failed to save labels to {}: {e}", store.display()),
        },
        Command::Header => match MzHeader::parse(session.image().bytes()) {
            Ok(header) => println!("{header}"),
            Err(e) => eprintln!("{e}"),
        },
        Command::Goto(address) => session.goto(address),
        Command::Find(pattern) => session.find(pattern),
        Command::SetMode(mode) => session.set_mode(mode),
        Command::Label { name, address } => session.label(name, address),
        Command::Show { count, restart } => {
            if restart {
                session.reset();
            }
            for _ in 0..count {
                match session.next_line() {
                    Some(line) => println!("{line}"),
                    None => {
                        println!("(end of data)");
                        break;
                    }
                }
            }
        }
        Command::Next => match session.next_line() {
            Some(line) => println!("{line}"),
            None => println!("(end of data)"),
        },
    }
    Ok(true)
}
