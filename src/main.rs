//! `hyprsession` — command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

use hyprsession::config::Config;
use hyprsession::gateway::Hyprctl;
use hyprsession::process::{ProcFs, ShellLauncher};
use hyprsession::session::{Restorer, SessionData, SnapshotReader};
use hyprsession::store::SessionStore;
use hyprsession::{Error, Result, rules};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "hyprsession", about = "Save and restore Hyprland window sessions", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session file to read or write instead of the configured one.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Capture the current windows and save them.
    Save,
    /// Close the current windows and bring back the saved session.
    Restore {
        /// Milliseconds to wait for relaunched applications to map.
        #[arg(long)]
        settle_ms: Option<u64>,
    },
    /// Write static window rules for the saved session.
    Rules {
        /// Do not add a `source` line to the Hyprland config.
        #[arg(long)]
        no_patch: bool,
    },
    /// Print the launch command derived from a window class.
    Resolve { class: String },
    /// List the saved session.
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.log_format) {
        eprintln!("hyprsession: {e}");
        return ExitCode::FAILURE;
    }

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| Error::Io {
            context: "failed to build tokio runtime".into(),
            source,
        })
        .and_then(|rt| rt.block_on(run(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hyprsession failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    let store = SessionStore::new(&config.session_file);
    let gateway = Hyprctl::new(config.hyprctl.clone());

    match cli.command {
        Command::Save => {
            let procfs = ProcFs::default();
            let session = SnapshotReader::new(&gateway, &procfs).capture().await?;
            store.save(&session).await?;
            tracing::info!(
                windows = session.len(),
                path = %store.path().display(),
                "session saved"
            );
        }
        Command::Restore { settle_ms } => {
            let config = config.with_settle_delay_ms(settle_ms)?;
            let saved = store.load().await?;
            tracing::info!(windows = saved.len(), "restoring session");
            Restorer::new(&gateway, &ShellLauncher, config.restore_options())
                .restore(&saved)
                .await?;
        }
        Command::Rules { no_patch } => {
            let saved = store.load().await?;
            rules::install(&saved, &config.rules_file, &config.hyprland_config, !no_patch).await?;
        }
        Command::Resolve { class } => {
            println!("{}", config.launch_resolver().resolve(&class));
        }
        Command::Show => {
            let saved = store.load().await?;
            print_session(&saved);
        }
    }
    Ok(())
}

fn print_session(session: &SessionData) {
    for window in session.windows() {
        let workspace = window
            .workspace
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let [x, y] = window.at;
        let [w, h] = window.size;
        let floating = if window.floating { " floating" } else { "" };
        println!(
            "{}\tws {workspace}\t{x},{y} {w}x{h}{floating}\t{}",
            window.class, window.cmdline
        );
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber.try_init(),
        LogFormat::Json => subscriber.json().try_init(),
    }
    .map_err(|e| Error::Logging(e.to_string()))
}
