//! Process table lookups and application launching.
//!
//! [`ProcessTable`] recovers the command line a window's owning process was
//! started with; [`Launcher`] starts a saved command line again. Both are
//! best-effort from the caller's point of view: a failure affects only the
//! one window being handled.

use std::future::Future;

mod launcher;
mod procfs;

pub use launcher::ShellLauncher;
pub use procfs::{ProcFs, join_args};

/// Command-line lookup error.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("invalid pid {0}")]
    InvalidPid(i64),
    #[error("process {pid} has no command line")]
    Empty { pid: i64 },
    #[error("cannot read command line of process {pid}: {source}")]
    Read {
        pid: i64,
        #[source]
        source: std::io::Error,
    },
}

/// Application launch error.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("empty launch command")]
    EmptyCommand,
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Maps a process id to its launch command line.
pub trait ProcessTable {
    /// Command line of process `pid`, ready to hand to `sh -c`.
    fn cmdline(&self, pid: i64) -> impl Future<Output = Result<String, ProcessError>> + Send;
}

/// Starts an application from a shell command line without waiting for it.
pub trait Launcher {
    /// Start `command`. Returns once the process is spawned.
    fn launch(&self, command: &str) -> Result<(), LaunchError>;
}
