//! Command-line interface for physical infrastructure inventory translation.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use physinfra_inventory::{switches_from_document, RawSwitch, SwitchRecord, SwitchRecordBuilder};
use serde::Serialize;
use tracing::{debug, error, info};

/// Environment variable names
mod env_vars {
    pub const LOG_JSON: &str = "PHYSINFRA_LOG_JSON";
}

/// physinfra - Normalize physical switch inventory from the management API.
#[derive(Parser, Debug)]
#[command(name = "physinfra")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Translate raw switch JSON documents into normalized records.
    Translate {
        /// Input files. Reads stdin when empty or "-".
        files: Vec<PathBuf>,
        /// Pretty-print the output.
        #[arg(short, long)]
        pretty: bool,
        /// Print the switches that translated even if others failed.
        #[arg(short, long)]
        keep_going: bool,
    },
    /// Print the health-state lookup table.
    HealthStates,
}

/// One translated switch in the output array.
#[derive(Serialize)]
struct TranslatedSwitch<'a> {
    uuid: &'a str,
    record: &'a SwitchRecord,
}

fn init_logging(verbose: bool) {
    let json_logging = std::env::var(env_vars::LOG_JSON)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "physinfra={0},physinfra_inventory={0}",
            default_level
        ))
    });

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Translate {
            files,
            pretty,
            keep_going,
        } => translate(&files, pretty, keep_going),
        Command::HealthStates => health_states(),
    }
}

fn read_switches(path: &Path) -> Result<Vec<physinfra_inventory::Result<RawSwitch>>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    let switches = switches_from_document(document)
        .with_context(|| format!("Failed to parse switch descriptors in {}", path.display()))?;
    debug!("Read {} switch(es) from {}", switches.len(), path.display());
    Ok(switches)
}

fn translate(files: &[PathBuf], pretty: bool, keep_going: bool) -> Result<()> {
    let stdin = [PathBuf::from("-")];
    let inputs = if files.is_empty() { &stdin[..] } else { files };

    let mut switches = Vec::new();
    for path in inputs {
        switches.extend(read_switches(path)?);
    }

    let builder = SwitchRecordBuilder::new();
    let mut translated = Vec::with_capacity(switches.len());
    let mut failed = 0usize;
    for (index, switch) in switches.iter().enumerate() {
        let result = match switch {
            Ok(switch) => builder.build(switch),
            Err(e) => {
                error!("Switch #{} could not be parsed: {}", index, e);
                failed += 1;
                continue;
            }
        };
        match result {
            Ok(entry) => translated.push(entry),
            Err(e) => {
                error!("Switch #{} could not be translated: {}", index, e);
                failed += 1;
            }
        }
    }

    if failed > 0 && !keep_going {
        bail!("{} of {} switch(es) failed to translate", failed, switches.len());
    }

    let output: Vec<_> = translated
        .iter()
        .map(|(uuid, record)| TranslatedSwitch { uuid, record })
        .collect();
    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    info!("Translated {} switch(es), {} failed", translated.len(), failed);
    Ok(())
}

fn health_states() -> Result<()> {
    let builder = SwitchRecordBuilder::new();
    let table = builder.health_states();

    for (vendor, state) in table.entries() {
        println!("{:<16} {}", vendor, state);
    }
    match table.when_unreported() {
        Some(state) => println!("{:<16} {}", "(unreported)", state),
        None => println!("{:<16} null", "(unreported)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_translate() {
        let args = Args::parse_from(["physinfra", "translate", "a.json", "b.json", "--pretty"]);
        match args.command {
            Command::Translate {
                files,
                pretty,
                keep_going,
            } => {
                assert_eq!(files.len(), 2);
                assert!(pretty);
                assert!(!keep_going);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
