//! `hyprctl` backend for [`Gateway`].

use tokio::process::Command;

use super::{Gateway, GatewayError};

/// Runs commands through the `hyprctl` binary.
#[derive(Debug, Clone)]
pub struct Hyprctl {
    program: String,
}

impl Hyprctl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Hyprctl {
    fn default() -> Self {
        Self::new("hyprctl")
    }
}

/// Split a command string into `hyprctl` arguments.
///
/// A `--batch` body is passed as a single argument; hyprctl splits it on
/// `;` itself.
fn command_args(command: &str) -> Vec<String> {
    let command = command.trim();
    if let Some(body) = command.strip_prefix("--batch ") {
        return vec!["--batch".to_string(), body.trim().to_string()];
    }
    command.split_whitespace().map(str::to_string).collect()
}

impl Gateway for Hyprctl {
    async fn execute(&self, command: &str) -> Result<String, GatewayError> {
        tracing::debug!(program = %self.program, command, "hyprctl");

        let output = Command::new(&self.program)
            .args(command_args(command))
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|source| GatewayError::Spawn {
                program: self.program.clone(),
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(GatewayError::Exit {
                command: command.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
