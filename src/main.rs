//! lingoplay REPL host
//!
//! Drives the global player with text commands against a simulated
//! audio device, from stdin or a script file.

use std::{error::Error, io::IsTerminal, path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use lingoplay::{
    cli::{CliService, LineOutcome, SessionContext, formatting::format_error},
    config::{Config, ConfigPaths},
    runtime_state::PlayerPreferences,
    services::playback::MemoryDevice,
    tracing_config,
};

/// Length reported by the simulated device for every source.
const SIMULATED_TRACK_SECONDS: f64 = 300.0;

/// Global audio player REPL
#[derive(Parser, Debug)]
#[command(name = "lingoplay", version, about)]
struct Args {
    /// Configuration file [default: $XDG_CONFIG_HOME/lingoplay/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Route the host starts on
    #[arg(long, default_value = "/")]
    route: String,

    /// Also write logs to ~/.lingoplay/logs
    #[arg(long)]
    log_file: bool,

    /// Neither load nor save player preferences
    #[arg(long)]
    no_preferences: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => ConfigPaths::main_config()?,
    };
    let config = Config::load(&config_path)?;

    if args.log_file {
        tracing_config::init_with_file(config.general.log_level)?;
    } else {
        tracing_config::init(config.general.log_level)?;
    }
    info!(config = %config_path.display(), "Starting lingoplay");

    let persist = config.player.remember_preferences && !args.no_preferences;
    let device = MemoryDevice::new().with_default_duration(SIMULATED_TRACK_SECONDS);
    let context = Arc::new(SessionContext::new(config, device, args.route.clone())?);

    if persist {
        match PlayerPreferences::load(&context.config.player).await {
            Ok(preferences) => preferences.apply(&context.orchestrator),
            Err(e) => warn!(error = %e, "Could not load preferences"),
        }
    }

    let service = CliService::new(context.clone());
    let interactive = args.script.is_none() && std::io::stdin().is_terminal();

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    run_repl(&service, reader, interactive).await?;

    if persist {
        let preferences = PlayerPreferences::from_session(&context.orchestrator.snapshot());
        if let Err(e) = preferences.save().await {
            warn!(error = %e, "Could not save preferences");
        }
    }

    context.shutdown();
    info!("Stopped lingoplay");
    Ok(())
}

/// Reads lines until end of input or `quit`, printing each result.
///
/// A failing command prints its error and the loop continues.
async fn run_repl(
    service: &CliService,
    reader: Box<dyn AsyncBufRead + Unpin>,
    interactive: bool,
) -> Result<(), Box<dyn Error>> {
    let mut lines = reader.lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if interactive {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match service.execute_line(&line).await {
            Ok(LineOutcome::Quit) => break,
            Ok(LineOutcome::Output(text)) if text.is_empty() => {}
            Ok(LineOutcome::Output(text)) => {
                stdout.write_all(format!("{text}\n").as_bytes()).await?;
            }
            Err(e) => {
                stdout.flush().await?;
                eprintln!("{}", format_error(&e.to_string()));
            }
        }
    }

    stdout.flush().await?;
    Ok(())
}
