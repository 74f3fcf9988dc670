mod script;


use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use rectplan::config::EngineConfig;
use rectplan::engine::Action;
use rectplan::error::ConfigError;
use rectplan::render;
use serde_json::json;
use tracing::Level;

use crate::script::{Replay, Script, ScriptError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("cannot render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

#[derive(Parser, Debug)]
#[command(name = "rectplan-cli", about = "Replay gesture scripts against the rectangle layout engine")]
struct Cli {
    /// Log engine events to stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON gesture script and print the final scene.
    Replay {
        script: PathBuf,

        /// Answer to every snap confirmation prompt.
        #[arg(long, value_enum, env = "RECTPLAN_CONFIRM", default_value_t = ConfirmPolicy::Accept)]
        confirm: ConfirmPolicy,

        /// Engine config file (JSON). Without it, `RECTPLAN_*` variables apply.
        #[arg(long, env = "RECTPLAN_CONFIG")]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ConfirmPolicy {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Render nodes and actions as JSON.
    Json,
    /// One line per shape.
    Summary,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    match cli.command {
        Command::Replay { script, confirm, config, format } => run_replay(&script, confirm, config.as_deref(), format),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json { path: path.to_owned(), source })
}

/// Config from a JSON file if one is given, otherwise from `RECTPLAN_*` variables.
fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = path else {
        return Ok(EngineConfig::from_env());
    };
    let config: EngineConfig = read_json(path)?;
    config.validate().map_err(|source| CliError::Config { path: path.to_owned(), source })?;
    Ok(config)
}

fn run_replay(
    script_path: &Path,
    confirm: ConfirmPolicy,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let script: Script = read_json(script_path)?;

    let mut replay = Replay::new(config, script.viewport);
    let accept = confirm == ConfirmPolicy::Accept;
    replay.core.set_confirmer(move |message: &str| {
        tracing::info!(prompt = message, accept, "snap confirmation");
        accept
    });
    replay.run(&script.steps)?;
    if !replay.core.input.is_idle() {
        tracing::warn!(state = ?replay.core.input, "script ended with a gesture still in progress");
    }

    match format {
        OutputFormat::Json => print_json(&replay)?,
        OutputFormat::Summary => print_summary(&replay),
    }
    Ok(())
}

fn print_json(replay: &Replay) -> Result<(), CliError> {
    let value = json!({
        "zoom_percent": replay.core.zoom_percent(),
        "nodes": render::scene_nodes(&replay.core),
        "actions": replay.actions,
    });
    let rendered = serde_json::to_string_pretty(&value)?;
    println!("{rendered}");
    Ok(())
}

fn print_summary(replay: &Replay) {
    for group in replay.core.scene.iter() {
        let b = group.bounds();
        let id = group.id.to_string();
        let name = replay.name_of(&group.id).unwrap_or(&id);
        println!(
            "{name}: x={:.1} y={:.1} {:.1} x {:.1} mm",
            b.top_left.x, b.top_left.y, b.width, b.height
        );
    }
    let snaps = replay
        .actions
        .iter()
        .filter(|a| matches!(a, Action::SnapApplied { .. }))
        .count();
    println!("shapes: {}, snaps applied: {snaps}, zoom: {:.0}%", replay.core.scene.len(), replay.core.zoom_percent());
}
