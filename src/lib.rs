//! **hyprsession** — save and restore a Hyprland window layout.
//!
//! A session is captured as an ordered list of windows (class, workspace,
//! position, size, floating state and the command line that launched the
//! owning process). Restoring closes the current windows, relaunches the
//! saved applications, waits for them to map, pairs each saved window with
//! a fresh one of the same class and replays its placement in a single
//! batched `hyprctl` call.
//!
//! The compositor, the process table and the process launcher are all
//! reached through traits ([`gateway::Gateway`], [`process::ProcessTable`],
//! [`process::Launcher`]) so the capture and restore logic runs against
//! fakes in tests.

pub mod config;
pub mod gateway;
pub mod launch;
pub mod process;
pub mod rules;
pub mod session;
pub mod store;

/// Top-level error for the `hyprsession` binary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Capture(#[from] session::CaptureError),
    #[error(transparent)]
    Restore(#[from] session::RestoreError),
    #[error(transparent)]
    Store(#[from] store::StoreError),
    #[error("failed to init logging: {0}")]
    Logging(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shared result type for the binary.
pub type Result<T> = std::result::Result<T, Error>;
