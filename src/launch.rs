//! Launch resolver — derive a launch command from a window class.
//!
//! Used when a saved window carries no recovered command line. Window
//! classes usually match the binary name once lower-cased; the override
//! table covers applications whose class differs from their executable.

use std::collections::HashMap;

/// Prefix placed in front of every resolved executable.
pub const DEFAULT_WRAPPER: &str = "/usr/bin/env";

/// Known class → executable mismatches.
const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("brave-browser", "brave"),
    ("code-url-handler", "code"),
    ("com.mitchellh.ghostty", "ghostty"),
    ("google-chrome", "google-chrome-stable"),
    ("jetbrains-idea", "idea"),
    ("jetbrains-pycharm", "pycharm"),
    ("libreoffice-writer", "libreoffice --writer"),
    ("libreoffice-calc", "libreoffice --calc"),
    ("org.gnome.nautilus", "nautilus"),
    ("org.gnome.texteditor", "gnome-text-editor"),
    ("org.kde.dolphin", "dolphin"),
    ("org.kde.konsole", "konsole"),
    ("org.pwmt.zathura", "zathura"),
    ("org.telegram.desktop", "telegram-desktop"),
    ("org.wezfurlong.wezterm", "wezterm"),
];

/// Maps window classes to launch invocations.
#[derive(Debug, Clone)]
pub struct LaunchResolver {
    wrapper: String,
    overrides: HashMap<String, String>,
}

impl Default for LaunchResolver {
    fn default() -> Self {
        Self::new(DEFAULT_WRAPPER)
    }
}

fn normalize(class: &str) -> String {
    class.trim().to_lowercase()
}

impl LaunchResolver {
    /// Resolver with the built-in override table and the given wrapper.
    pub fn new(wrapper: impl Into<String>) -> Self {
        let overrides = BUILTIN_OVERRIDES
            .iter()
            .map(|(class, exe)| ((*class).to_string(), (*exe).to_string()))
            .collect();
        Self {
            wrapper: wrapper.into(),
            overrides,
        }
    }

    /// Add or replace override entries. Keys are normalized like classes.
    pub fn with_overrides<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (class, exe) in extra {
            self.overrides.insert(normalize(class.as_ref()), exe.into());
        }
        self
    }

    /// Best-effort invocation for `class`. Never fails.
    pub fn resolve(&self, class: &str) -> String {
        let key = normalize(class);
        let executable = self.overrides.get(&key).map_or(key.as_str(), String::as_str);
        format!("{} {}", self.wrapper, executable).trim().to_string()
    }
}

/// Resolve with the default wrapper and built-in overrides.
pub fn resolve(class: &str) -> String {
    LaunchResolver::default().resolve(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_is_lowercased_and_trimmed() {
        assert_eq!(resolve("  Firefox "), "/usr/bin/env firefox");
    }

    #[test]
    fn override_table_wins() {
        assert_eq!(resolve("org.gnome.Nautilus"), "/usr/bin/env nautilus");
        assert_eq!(resolve("Google-chrome"), "/usr/bin/env google-chrome-stable");
    }

    #[test]
    fn custom_overrides_and_wrapper() {
        let resolver = LaunchResolver::new("uwsm app --")
            .with_overrides([("Obsidian", "obsidian --no-sandbox")]);
        assert_eq!(resolver.resolve("obsidian"), "uwsm app -- obsidian --no-sandbox");
        assert_eq!(resolver.resolve("kitty"), "uwsm app -- kitty");
    }

    #[test]
    fn custom_override_replaces_builtin() {
        let resolver = LaunchResolver::default().with_overrides([("google-chrome", "chromium")]);
        assert_eq!(resolver.resolve("google-chrome"), "/usr/bin/env chromium");
    }

    #[test]
    fn empty_class_degrades_to_wrapper() {
        assert_eq!(resolve("   "), "/usr/bin/env");
    }
}
