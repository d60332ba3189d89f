//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use shm_core::config::{Layout, paths};
use shm_editor::fields::FieldId;

mod commands;

#[derive(Parser)]
#[command(name = "shm")]
#[command(version)]
#[command(about = "Shine maker: generate SpriteType shine markup for game mods")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that read the saved field values.
#[derive(clap::Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Ignore the config file and start from built-in defaults
    #[arg(long = "no-config")]
    no_config: bool,

    /// Markup layout (overrides the config file)
    #[arg(long, value_name = "LAYOUT")]
    layout: Option<Layout>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render shine markup from field values
    Generate {
        /// Set a field, e.g. --set "Name=beacon" (repeatable)
        #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(FieldId, String)>,

        /// Number of shines (classic layout only)
        #[arg(short = 'n', long)]
        count: Option<String>,

        /// Write to a file instead of stdout (".txt" is added without an extension)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,

        /// Remember the field values in the config file
        #[arg(long, conflicts_with = "no_config")]
        remember: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Interactive editing session (reads commands from stdin)
    Session {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the fields with their defaults and saved values
    Fields {
        #[arg(long = "no-config")]
        no_config: bool,
    },

    /// Print markup with line numbers and syntax highlighting
    Highlight {
        /// File to read (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Number visual rows wrapped at this width
        #[arg(long, value_name = "COLUMNS")]
        wrap: Option<u16>,

        /// Disable colors
        #[arg(long = "no-color", env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
        no_color: bool,

        /// List highlight spans instead of printing the text
        #[arg(long)]
        spans: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration
    Show,
}

/// Parses `FIELD=VALUE`. The field is matched by label, with or without
/// the trailing colon, ignoring case.
fn parse_assignment(raw: &str) -> Result<(FieldId, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field =
        FieldId::from_key(key).ok_or_else(|| format!("unknown field '{}'", key.trim()))?;
    Ok((field, value.to_string()))
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = shm_core::logging::init(&paths::logs_dir());

    match cli.command {
        Commands::Generate {
            set,
            count,
            output,
            copy,
            remember,
            source,
        } => commands::generate::run(&commands::generate::GenerateOptions {
            assignments: set,
            count,
            output,
            copy,
            remember,
            no_config: source.no_config,
            layout: source.layout,
        }),
        Commands::Session { source } => commands::session::run(source.no_config, source.layout),
        Commands::Fields { no_config } => commands::fields::run(no_config),
        Commands::Highlight {
            file,
            wrap,
            no_color,
            spans,
        } => commands::highlight::run(file.as_deref(), wrap, !no_color, spans),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(),
        },
    }
}
