//! Detached `sh -c` launcher.

use std::process::Stdio;

use tokio::process::Command;

use super::{LaunchError, Launcher};

/// Spawns each command through `sh -c` in its own process group with null
/// stdio, and does not wait for it to exit.
#[derive(Debug, Clone, Default)]
pub struct ShellLauncher;

impl Launcher for ShellLauncher {
    fn launch(&self, command: &str) -> Result<(), LaunchError> {
        let command = command.trim();
        if command.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: command.to_string(),
                source,
            })?;

        tracing::debug!(command, pid = ?child.id(), "launched");
        // Dropping the handle leaves the application running.
        drop(child);
        Ok(())
    }
}
