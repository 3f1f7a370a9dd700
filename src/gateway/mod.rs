//! Compositor gateway — the only path by which hyprsession talks to Hyprland.
//!
//! A [`Gateway`] takes one command string and returns the compositor's raw
//! stdout. Queries (`clients -j`, `activewindow -j`) are read-only;
//! `dispatch` directives and `--batch` bodies mutate live compositor state.
//! The production backend is [`Hyprctl`]; tests substitute a scripted fake.

use std::future::Future;

pub mod directive;
mod hyprctl;

pub use hyprctl::Hyprctl;

/// Gateway invocation error.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The compositor control binary could not be started.
    #[error("failed to run `{program} {command}`: {source}")]
    Spawn {
        program: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The control binary ran but reported failure.
    #[error("`{command}` failed (exit code {code:?}): {stderr}")]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Sends a single command to the compositor.
///
/// One attempt, no retries. The returned future completes once the
/// underlying invocation has exited.
pub trait Gateway {
    /// Run `command` and return the compositor's stdout.
    ///
    /// Fails with [`GatewayError`] if the command cannot be started or
    /// reports failure.
    fn execute(&self, command: &str) -> impl Future<Output = Result<String, GatewayError>> + Send;
}
