//! inidoc command line tool
//!
//! Reads and edits INI files without disturbing comments or layout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use inidoc::{IniFileBuilder, Options};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "inidoc")]
#[command(about = "Read and edit INI files in place")]
struct Args {
    /// Compare section and key names exactly
    #[arg(long, global = true)]
    case_sensitive: bool,

    /// Options file (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a value; exits with status 1 when the entry does not exist
    Get {
        file: PathBuf,
        section: String,
        key: String,
    },

    /// Assign a value and save the file
    Set {
        file: PathBuf,
        section: String,
        key: String,
        value: String,

        /// Never wrap the value in quotes
        #[arg(long)]
        no_quotes: bool,
    },

    /// Print every entry
    Dump {
        file: PathBuf,

        /// Print a JSON array instead of tab separated lines
        #[arg(long)]
        json: bool,
    },
}

fn options(args: &Args) -> anyhow::Result<Options> {
    let mut options = match &args.config {
        Some(path) => Options::from_file(path)
            .with_context(|| format!("Failed to read options from {:?}", path))?,
        None => Options::default(),
    };
    if args.case_sensitive {
        options.case_sensitive = true;
    }
    Ok(options)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let options = options(&args)?;

    match args.command {
        Command::Get { file, section, key } => {
            let ini = IniFileBuilder::new()
                .path(&file)
                .options(options)
                .load()
                .with_context(|| format!("Failed to load {:?}", file))?;

            if !ini.document().contains(&section, &key) {
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", ini.get(&section, &key));
        }
        Command::Set {
            file,
            section,
            key,
            value,
            no_quotes,
        } => {
            let mut ini = IniFileBuilder::new()
                .path(&file)
                .options(options)
                .load()
                .with_context(|| format!("Failed to load {:?}", file))?;
            if no_quotes {
                ini.set_options(ini.options().clone().with_force_save_without_quotes(true));
            }

            let outcome = ini.set(&section, &key, value.as_str());
            info!("[{}] {}: {:?}", section, key, outcome);

            if outcome.is_mutation() {
                ini.save()
                    .with_context(|| format!("Failed to save {:?}", file))?;
            }
        }
        Command::Dump { file, json } => {
            let ini = IniFileBuilder::new()
                .path(&file)
                .options(options)
                .load()
                .with_context(|| format!("Failed to load {:?}", file))?;

            if json {
                println!("{}", ini.to_json()?);
            } else {
                for entry in ini.document().entries() {
                    println!("{}\t{}\t{}", entry.section, entry.key, entry.value);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
