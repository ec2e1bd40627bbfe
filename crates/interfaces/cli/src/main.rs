mod input;
mod logging;
mod profile_cmds;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use tone_analyzer::{
    ProfileGenerator, build_rephrase_prompt, render_profile, render_value, validate_profile,
};
use tone_config::AppConfig;
use tone_store::ProfileStore;

#[derive(Debug, Parser)]
#[command(
    name = "tone",
    version,
    about = "Derive communication-style profiles from message history"
)]
struct Cli {
    /// TOML config file; a missing file means defaults.
    #[arg(long, global = true, value_name = "PATH", default_value = "config/default.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a profile from messages (JSON array or one per line; `-` for stdin).
    Analyze {
        #[arg(value_name = "INPUT")]
        input: String,
        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
    /// Check a profile JSON document against the label sets and metric ranges.
    Validate {
        #[arg(value_name = "PROFILE")]
        profile: String,
    },
    /// Render a profile JSON document as a markdown style report.
    Render {
        #[arg(value_name = "PROFILE")]
        profile: String,
    },
    /// Build the rewrite prompt for a message in a profile's style.
    Prompt {
        /// Message to rephrase.
        message: String,
        /// Use a stored profile.
        #[arg(long, conflicts_with = "profile")]
        id: Option<String>,
        /// Use a profile JSON document (`-` for stdin).
        #[arg(long, value_name = "PROFILE")]
        profile: Option<String>,
    },
    /// Manage stored profiles.
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileCommands {
    /// Generate and store a profile under ID.
    Save {
        id: String,
        #[arg(value_name = "INPUT")]
        input: String,
        /// Regenerate even when the stored profile came from the same messages.
        #[arg(long)]
        force: bool,
    },
    Show {
        id: String,
        #[arg(long, value_enum, default_value = "report")]
        format: OutputFormat,
    },
    List,
    Remove {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Compact JSON.
    Json,
    /// Indented JSON.
    Pretty,
    /// Markdown style report.
    Report,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)?;
    let _log_guard = logging::init(&config.logging)?;
    debug!(config = %cli.config.display(), store = %config.store.path, "loaded configuration");

    let generator = ProfileGenerator::new(config.analyzer.clone());

    match cli.command {
        Commands::Analyze { input, format } => {
            let messages = input::read_messages(&input)?;
            let profile = generator.generate_from(messages)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&profile)?),
                OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&profile)?),
                OutputFormat::Report => print!("{}", render_profile(&profile)?),
            }
        }
        Commands::Validate { profile } => {
            let candidate = input::read_json(&profile)?;
            let report = validate_profile(&candidate);
            if !report.valid {
                for error in &report.errors {
                    eprintln!("  {error}");
                }
                bail!("profile failed validation with {} errors", report.errors.len());
            }
            println!("profile is valid");
        }
        Commands::Render { profile } => {
            let candidate = input::read_json(&profile)?;
            print!("{}", render_value(&candidate)?);
        }
        Commands::Prompt { message, id, profile } => {
            let report = match (id, profile) {
                (Some(id), _) => {
                    let store = ProfileStore::open(&config.store.path)?;
                    render_profile(&store.load(&id)?.profile)?
                }
                (None, Some(source)) => render_value(&input::read_json(&source)?)?,
                (None, None) => bail!("prompt needs a profile: pass --id or --profile"),
            };
            println!("{}", build_rephrase_prompt(&report, &message));
        }
        Commands::Profile { command } => {
            let mut store = ProfileStore::open(&config.store.path)?;
            match command {
                ProfileCommands::Save { id, input, force } => {
                    let messages = input::read_messages(&input)?;
                    profile_cmds::run_profile_save(&mut store, &generator, &id, messages, force)?;
                }
                ProfileCommands::Show { id, format } => {
                    profile_cmds::run_profile_show(&store, &id, format)?;
                }
                ProfileCommands::List => profile_cmds::run_profile_list(&store),
                ProfileCommands::Remove { id, yes } => {
                    profile_cmds::run_profile_remove(&mut store, &id, yes)?;
                }
            }
        }
    }

    Ok(())
}
