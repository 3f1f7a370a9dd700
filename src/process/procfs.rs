//! `/proc`-backed [`ProcessTable`].

use std::path::PathBuf;

use super::{ProcessError, ProcessTable};

/// Reads `/proc/{pid}/cmdline`.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    /// Use a different procfs mount point.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::with_root("/proc")
    }
}

impl ProcessTable for ProcFs {
    async fn cmdline(&self, pid: i64) -> Result<String, ProcessError> {
        if pid <= 0 {
            return Err(ProcessError::InvalidPid(pid));
        }
        let path = self.root.join(pid.to_string()).join("cmdline");
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|source| ProcessError::Read { pid, source })?;

        let text = String::from_utf8_lossy(&raw);
        let args: Vec<&str> = text.split('\0').filter(|a| !a.is_empty()).collect();
        if args.is_empty() {
            return Err(ProcessError::Empty { pid });
        }
        Ok(join_args(&args))
    }
}

/// Join an argument vector into a command line `sh -c` can run again.
///
/// Arguments containing anything beyond a conservative set of shell-safe
/// characters are single-quoted.
pub fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
