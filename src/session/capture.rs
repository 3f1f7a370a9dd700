//! Session capture — list clients, recover each one's launch command.
//!
//! An empty or non-array client list is an empty session, not an error.
//! A cmdline lookup failure only blanks that one window's `cmdline`.

use serde_json::Value;

use crate::gateway::{Gateway, GatewayError, directive};
use crate::process::{ProcessError, ProcessTable};

use super::{SessionData, Window};

/// Capture error.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("compositor query failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("compositor returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a `clients -j` response.
///
/// Blank output or a JSON value that is not an array yields no windows.
/// Array elements that do not look like a window are skipped.
pub fn parse_clients(raw: &str) -> Result<Vec<Window>, CaptureError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let Value::Array(items) = serde_json::from_str::<Value>(raw)? else {
        tracing::warn!("client list is not a JSON array; treating as empty");
        return Ok(Vec::new());
    };

    let mut windows = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Window>(item) {
            Ok(window) => windows.push(window),
            Err(e) => tracing::warn!(error = %e, "skipping undecodable client entry"),
        }
    }
    Ok(windows)
}

/// Parse an `activewindow -j` response into the focused window's address.
pub fn parse_active_address(raw: &str) -> Result<Option<String>, CaptureError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(raw)?;
    Ok(value
        .get("address")
        .and_then(Value::as_str)
        .filter(|a| !a.is_empty())
        .map(str::to_string))
}

/// Query the live client list without cmdline enrichment.
pub async fn list_windows<G: Gateway>(gateway: &G) -> Result<Vec<Window>, CaptureError> {
    let raw = gateway.execute(directive::CLIENTS).await?;
    parse_clients(&raw)
}

/// Query the focused window's address, if any window has focus.
pub async fn active_address<G: Gateway>(gateway: &G) -> Result<Option<String>, CaptureError> {
    let raw = gateway.execute(directive::ACTIVE_WINDOW).await?;
    parse_active_address(&raw)
}

/// Fold one window's cmdline lookup outcome into the window.
fn apply_cmdline(mut window: Window, outcome: Result<String, ProcessError>) -> Window {
    match outcome {
        Ok(cmdline) => window.cmdline = cmdline,
        Err(e) => {
            tracing::warn!(
                address = %window.address,
                class = %window.class,
                error = %e,
                "cannot recover launch command"
            );
            window.cmdline = String::new();
        }
    }
    window
}

/// Builds [`SessionData`] snapshots from the live compositor.
pub struct SnapshotReader<'a, G, P> {
    gateway: &'a G,
    processes: &'a P,
}

impl<'a, G: Gateway, P: ProcessTable> SnapshotReader<'a, G, P> {
    pub fn new(gateway: &'a G, processes: &'a P) -> Self {
        Self { gateway, processes }
    }

    /// Capture every window in compositor order, each with its launch
    /// command.
    pub async fn capture(&self) -> Result<SessionData, CaptureError> {
        let windows = list_windows(self.gateway).await?;
        let mut enriched = Vec::with_capacity(windows.len());
        for window in windows {
            let outcome = self.processes.cmdline(window.pid).await;
            enriched.push(apply_cmdline(window, outcome));
        }
        tracing::debug!(windows = enriched.len(), "session captured");
        Ok(SessionData::new(enriched))
    }
}
