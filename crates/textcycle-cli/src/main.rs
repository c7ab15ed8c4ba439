mod commands;
mod input;
mod reload;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::bind::BindMode;
use commands::run::{CycleOverrides, load_config};

#[derive(Parser)]
#[command(name = "textcycle")]
#[command(version, about = "Cycle a text overlay source through a list of strings")]
struct Args {
    /// Config file (defaults to <config dir>/textcycle/config.toml)
    #[arg(short, long, global = true, env = "TEXTCYCLE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start cycling text (default)
    Run {
        #[command(flatten)]
        overrides: CycleOverrides,
    },
    /// List available text sources
    Sources {
        #[command(flatten)]
        overrides: CycleOverrides,
    },
    /// Create an empty text source
    CreateSource {
        name: String,
        #[command(flatten)]
        overrides: CycleOverrides,
    },
    /// Show or change the next-text hotkey
    Bind {
        /// Key combination, e.g. "ctrl+shift+n"
        combo: Option<String>,
        /// Keep existing bindings instead of replacing them
        #[arg(long, requires = "combo")]
        add: bool,
        /// Remove all bindings
        #[arg(long, conflicts_with = "combo")]
        clear: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    ShowConfig {
        #[command(flatten)]
        overrides: CycleOverrides,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose {
        "textcycle=debug"
    } else {
        "textcycle=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let config_path = args.config.as_deref();

    match args.command {
        None => commands::run::run(config_path, &CycleOverrides::default()),
        Some(Command::Run { overrides }) => commands::run::run(config_path, &overrides),
        Some(Command::Sources { overrides }) => commands::sources::list(config_path, &overrides),
        Some(Command::CreateSource { name, overrides }) => {
            commands::sources::create(config_path, &overrides, &name)
        }
        Some(Command::Bind { combo, add, clear }) => {
            let config = load_config(config_path, &CycleOverrides::default())?;
            let mode = if add { BindMode::Add } else { BindMode::Replace };
            commands::bind::run(&config, combo.as_deref(), mode, clear)
        }
        Some(Command::Init { force }) => commands::config::init(config_path, force),
        Some(Command::ShowConfig { overrides }) => commands::config::show(config_path, &overrides),
    }
}
