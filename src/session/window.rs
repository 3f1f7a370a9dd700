//! Window and snapshot records.
//!
//! Field names match `hyprctl clients -j`, so a live client list
//! deserializes straight into [`Window`] (unknown fields are ignored) and a
//! saved session file is the same JSON shape plus `cmdline`.

use serde::{Deserialize, Serialize};

/// Workspace a window sits on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

impl Workspace {
    /// How dispatchers and window rules address this workspace.
    ///
    /// Regular workspaces go by their absolute id. Special workspaces have
    /// negative ids, which Hyprland would read as relative offsets, so they
    /// go by name (`special:scratch`). `None` when neither is usable.
    pub fn target(&self) -> Option<String> {
        match self.id {
            Some(id) if id >= 0 => Some(id.to_string()),
            Some(_) if !self.name.is_empty() => Some(self.name.clone()),
            _ => None,
        }
    }
}

/// A live or saved window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Compositor handle (`0x...`). Unique per live window, meaningless
    /// after a relaunch.
    pub address: String,
    #[serde(default)]
    pub workspace: Workspace,
    /// Top-left corner in pixels.
    pub at: [i32; 2],
    /// Width and height in pixels.
    pub size: [i32; 2],
    /// Correlation key between saved and relaunched windows.
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub floating: bool,
    #[serde(default)]
    pub pid: i64,
    /// Launch command of the owning process; empty when it could not be
    /// recovered.
    #[serde(default)]
    pub cmdline: String,
}

impl Window {
    pub fn has_cmdline(&self) -> bool {
        !self.cmdline.trim().is_empty()
    }
}

/// Ordered, immutable capture of every window at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData {
    windows: Vec<Window>,
}

impl SessionData {
    pub fn new(windows: Vec<Window>) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl From<Vec<Window>> for SessionData {
    fn from(windows: Vec<Window>) -> Self {
        Self::new(windows)
    }
}
