//! Session snapshots: capture, class grouping and restore.

pub mod capture;
pub mod group;
pub mod restore;
mod window;

pub use capture::{CaptureError, SnapshotReader};
pub use restore::{RestoreError, RestoreOptions, RestoreReport, Restorer};
pub use window::{SessionData, Window, Workspace};

#[cfg(test)]
pub(crate) mod testing;
