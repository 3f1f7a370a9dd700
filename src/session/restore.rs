//! Session restore — close, relaunch, settle, pair, batch-place.
//!
//! # Pairing
//!
//! Addresses and pids do not survive a relaunch, so saved windows are
//! matched to fresh ones by class and position within that class: saved
//! window `i` of class `C` pairs with the `i`-th live window of class `C`
//! as listed by the compositor. This assumes applications of one class map
//! their windows in launch order. Saved windows with no live counterpart
//! at their index are left unplaced.
//!
//! # Batching
//!
//! All placement directives go out in one `--batch` call so the desktop
//! does not visibly shuffle through intermediate states.

use std::time::Duration;

use crate::gateway::{Gateway, GatewayError, directive};
use crate::launch::LaunchResolver;
use crate::process::Launcher;

use super::capture::{self, CaptureError};
use super::group::{ClassGroups, group_by_class};
use super::{SessionData, Window};

/// Default wait between relaunching and re-listing windows.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Restore error. Everything else is absorbed and logged.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("cannot query compositor: {0}")]
    Query(#[source] GatewayError),
    #[error("batched placement failed: {0}")]
    Batch(#[source] GatewayError),
}

/// Restore tuning.
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    pub settle_delay: Duration,
    /// Launch windows without a saved cmdline via this resolver instead of
    /// skipping them.
    pub fallback: Option<LaunchResolver>,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            fallback: None,
        }
    }
}

/// What a restore did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub closed: usize,
    pub close_failures: usize,
    pub launched: usize,
    pub launch_failures: usize,
    pub skipped_launches: usize,
    pub paired: usize,
    pub unpaired: usize,
}

/// A saved window matched with the live window that stands in for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing<'a> {
    pub saved: &'a Window,
    pub live: &'a Window,
}

/// Pair saved and live windows class by class, index by index.
///
/// Returns the pairs in class order, then saved order within a class, plus
/// the saved windows left without a counterpart.
pub fn pair_windows<'a>(
    saved: &ClassGroups<'a>,
    live: &ClassGroups<'a>,
) -> (Vec<Pairing<'a>>, Vec<&'a Window>) {
    let mut pairs = Vec::new();
    let mut unpaired = Vec::new();

    for (class, saved_windows) in saved {
        let live_windows = live.get(class).map(Vec::as_slice).unwrap_or_default();
        for (index, saved_window) in saved_windows.iter().enumerate() {
            match live_windows.get(index) {
                Some(live_window) => pairs.push(Pairing {
                    saved: *saved_window,
                    live: *live_window,
                }),
                None => unpaired.push(*saved_window),
            }
        }
    }
    (pairs, unpaired)
}

/// Placement directives for one pair: workspace, floating, move, resize.
pub fn placement_directives(pair: &Pairing<'_>) -> Vec<String> {
    let address = pair.live.address.as_str();
    let mut directives = Vec::with_capacity(4);
    if let Some(workspace) = pair.saved.workspace.target() {
        directives.push(directive::move_to_workspace(&workspace, address));
    }
    if pair.saved.floating {
        directives.push(directive::toggle_floating(address));
    }
    let [x, y] = pair.saved.at;
    let [width, height] = pair.saved.size;
    directives.push(directive::move_pixel(x, y, address));
    directives.push(directive::resize_pixel(width, height, address));
    directives
}

/// Drives a full restore against a gateway, process launcher and options.
pub struct Restorer<'a, G, L> {
    gateway: &'a G,
    launcher: &'a L,
    options: RestoreOptions,
}

impl<'a, G: Gateway, L: Launcher> Restorer<'a, G, L> {
    pub fn new(gateway: &'a G, launcher: &'a L, options: RestoreOptions) -> Self {
        Self {
            gateway,
            launcher,
            options,
        }
    }

    /// Replace the current desktop with `saved`.
    ///
    /// Runs to completion once started; windows closed before a fatal
    /// error stay closed.
    pub async fn restore(&self, saved: &SessionData) -> Result<RestoreReport, RestoreError> {
        let mut report = RestoreReport::default();
        if saved.is_empty() {
            tracing::info!("saved session is empty; nothing to restore");
            return Ok(report);
        }

        let survivor = self.survivor().await?;
        self.close_others(survivor.as_deref(), &mut report).await?;

        let saved_groups = group_by_class(saved.windows());
        self.relaunch(saved, &mut report);

        if !self.options.settle_delay.is_zero() {
            tracing::info!(delay = ?self.options.settle_delay, "waiting for windows to map");
            tokio::time::sleep(self.options.settle_delay).await;
        }

        let live = self.live_windows().await?;
        let live_groups = group_by_class(&live);
        let (pairs, unpaired) = pair_windows(&saved_groups, &live_groups);

        for window in &unpaired {
            tracing::warn!(
                class = %window.class,
                saved_address = %window.address,
                "no relaunched window to place"
            );
        }
        report.paired = pairs.len();
        report.unpaired = unpaired.len();

        let directives: Vec<String> = pairs.iter().flat_map(placement_directives).collect();
        if let Some(batch) = directive::batch(&directives) {
            tracing::debug!(directives = directives.len(), "dispatching placement batch");
            self.gateway
                .execute(&batch)
                .await
                .map_err(RestoreError::Batch)?;
        }

        tracing::info!(?report, "restore finished");
        Ok(report)
    }

    /// Address of the focused window, which issued the restore and stays
    /// open.
    async fn survivor(&self) -> Result<Option<String>, RestoreError> {
        match capture::active_address(self.gateway).await {
            Ok(address) => Ok(address),
            Err(CaptureError::Gateway(e)) => Err(RestoreError::Query(e)),
            Err(CaptureError::Malformed(e)) => {
                tracing::warn!(error = %e, "cannot parse active window; closing everything");
                Ok(None)
            }
        }
    }

    async fn live_windows(&self) -> Result<Vec<Window>, RestoreError> {
        match capture::list_windows(self.gateway).await {
            Ok(windows) => Ok(windows),
            Err(CaptureError::Gateway(e)) => Err(RestoreError::Query(e)),
            Err(CaptureError::Malformed(e)) => {
                tracing::warn!(error = %e, "cannot parse client list; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn close_others(
        &self,
        survivor: Option<&str>,
        report: &mut RestoreReport,
    ) -> Result<(), RestoreError> {
        for window in self.live_windows().await? {
            if survivor == Some(window.address.as_str()) {
                continue;
            }
            match self
                .gateway
                .execute(&directive::close_window(&window.address))
                .await
            {
                Ok(_) => report.closed += 1,
                Err(e) => {
                    tracing::warn!(address = %window.address, error = %e, "close failed");
                    report.close_failures += 1;
                }
            }
        }
        Ok(())
    }

    fn relaunch(&self, saved: &SessionData, report: &mut RestoreReport) {
        for window in saved.windows() {
            let command = if window.has_cmdline() {
                window.cmdline.clone()
            } else if let Some(resolver) = &self.options.fallback {
                let command = resolver.resolve(&window.class);
                tracing::info!(class = %window.class, command = %command, "resolved launch command");
                command
            } else {
                tracing::warn!(class = %window.class, "no launch command saved; skipping");
                report.skipped_launches += 1;
                continue;
            };

            match self.launcher.launch(&command) {
                Ok(()) => report.launched += 1,
                Err(e) => {
                    tracing::warn!(class = %window.class, error = %e, "launch failed");
                    report.launch_failures += 1;
                }
            }
        }
    }
}
