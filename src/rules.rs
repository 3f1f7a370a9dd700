//! Static window rules — declarative alternative to an imperative restore.
//!
//! [`generate`] turns a saved session into `windowrulev2` lines that
//! Hyprland applies to any window of a class when it maps.
//! [`ensure_source_line`] keeps the main configuration sourcing the rules
//! file exactly once.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::session::SessionData;
use crate::store::{StoreError, write_atomic};

pub const HEADER: &str = "# Generated by hyprsession. Do not edit by hand.";

static SOURCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*source\s*=\s*(?P<path>.*?)\s*$").expect("source line pattern is valid")
});

fn class_match(class: &str) -> String {
    format!("class:^({})$", regex::escape(class))
}

/// Render placement rules for every saved window.
pub fn generate(saved: &SessionData) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for window in saved.windows() {
        let matcher = class_match(&window.class);
        let [x, y] = window.at;
        let [width, height] = window.size;
        out.push_str(&format!("windowrulev2 = move {x} {y}, {matcher}\n"));
        out.push_str(&format!("windowrulev2 = size {width} {height}, {matcher}\n"));
        if let Some(workspace) = window.workspace.target() {
            out.push_str(&format!(
                "windowrulev2 = workspace {workspace} silent, {matcher}\n"
            ));
        }
    }
    out
}

/// File a `source =` value points at, with any trailing comment dropped and
/// a leading `~/` expanded to the home directory.
fn sourced_path(value: &str) -> PathBuf {
    let value = value.split_once('#').map_or(value, |(path, _)| path).trim();
    match value.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(value), |home| home.join(rest)),
        None => PathBuf::from(value),
    }
}

/// Patch `config` so it sources `rules_path` exactly once.
///
/// Returns `None` when no change is needed.
pub fn ensure_source_line(config: &str, rules_path: &Path) -> Option<String> {
    let wanted = rules_path.to_string_lossy();
    let is_ours = |line: &str| {
        SOURCE_LINE
            .captures(line)
            .is_some_and(|caps| sourced_path(&caps["path"]) == rules_path)
    };

    let count = config.lines().filter(|l| is_ours(l)).count();
    match count {
        1 => None,
        0 => {
            let mut patched = config.to_string();
            if !patched.is_empty() && !patched.ends_with('\n') {
                patched.push('\n');
            }
            patched.push_str(&format!("source = {wanted}\n"));
            Some(patched)
        }
        _ => {
            let mut seen = false;
            let mut patched: Vec<&str> = Vec::new();
            for line in config.lines() {
                if is_ours(line) {
                    if seen {
                        continue;
                    }
                    seen = true;
                }
                patched.push(line);
            }
            let mut patched = patched.join("\n");
            if config.ends_with('\n') {
                patched.push('\n');
            }
            Some(patched)
        }
    }
}

/// Write the rules file and, when `patch_config` is set, make the
/// Hyprland configuration source it.
///
/// Returns whether the configuration file was changed.
pub async fn install(
    saved: &SessionData,
    rules_path: &Path,
    config_path: &Path,
    patch_config: bool,
) -> Result<bool, StoreError> {
    write_atomic(rules_path, generate(saved).as_bytes()).await?;
    tracing::info!(path = %rules_path.display(), rules = saved.len(), "rules written");

    if !patch_config {
        return Ok(false);
    }

    let current = match tokio::fs::read_to_string(config_path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %config_path.display(), "compositor config missing; creating it");
            String::new()
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: config_path.to_path_buf(),
                source,
            });
        }
    };

    match ensure_source_line(&current, rules_path) {
        Some(patched) => {
            write_atomic(config_path, patched.as_bytes()).await?;
            tracing::info!(path = %config_path.display(), "compositor config now sources rules");
            Ok(true)
        }
        None => Ok(false),
    }
}
