//! Hyprland command syntax.
//!
//! Every query and dispatch string hyprsession sends is built here.

/// Separator between directives inside a `--batch` body.
pub const SEPARATOR: &str = " ; ";

/// Query: all mapped client windows as a JSON array.
pub const CLIENTS: &str = "clients -j";

/// Query: the focused window as a JSON object (`{}` when none).
pub const ACTIVE_WINDOW: &str = "activewindow -j";

fn target(address: &str) -> String {
    format!("address:{address}")
}

/// Close the window at `address`.
pub fn close_window(address: &str) -> String {
    format!("dispatch closewindow {}", target(address))
}

/// Move to `workspace` without following the window, so focus stays where
/// it is.
///
/// `workspace` is an absolute id or a name such as `special:scratch`; see
/// [`Workspace::target`](crate::session::Workspace::target).
pub fn move_to_workspace(workspace: &str, address: &str) -> String {
    format!(
        "dispatch movetoworkspacesilent {workspace},{}",
        target(address)
    )
}

/// Flip the window between tiled and floating.
pub fn toggle_floating(address: &str) -> String {
    format!("dispatch togglefloating {}", target(address))
}

/// Move the window's top-left corner to an absolute pixel position.
pub fn move_pixel(x: i32, y: i32, address: &str) -> String {
    format!("dispatch movewindowpixel exact {x} {y},{}", target(address))
}

/// Resize the window to an exact pixel size.
pub fn resize_pixel(width: i32, height: i32, address: &str) -> String {
    format!(
        "dispatch resizewindowpixel exact {width} {height},{}",
        target(address)
    )
}

/// Join directives into one `--batch` command.
///
/// Returns `None` for an empty list: there is nothing to send.
pub fn batch(directives: &[String]) -> Option<String> {
    if directives.is_empty() {
        return None;
    }
    Some(format!("--batch {}", directives.join(SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_address_the_window() {
        assert_eq!(close_window("0x1a"), "dispatch closewindow address:0x1a");
        assert_eq!(
            move_to_workspace("3", "0x1a"),
            "dispatch movetoworkspacesilent 3,address:0x1a"
        );
        assert_eq!(
            toggle_floating("0x1a"),
            "dispatch togglefloating address:0x1a"
        );
        assert_eq!(
            move_pixel(10, -20, "0x1a"),
            "dispatch movewindowpixel exact 10 -20,address:0x1a"
        );
        assert_eq!(
            resize_pixel(800, 600, "0x1a"),
            "dispatch resizewindowpixel exact 800 600,address:0x1a"
        );
    }

    #[test]
    fn named_workspace_target() {
        assert_eq!(
            move_to_workspace("special:scratch", "0x1a"),
            "dispatch movetoworkspacesilent special:scratch,address:0x1a"
        );
    }

    #[test]
    fn batch_joins_with_separator() {
        let cmd = batch(&["dispatch a".to_string(), "dispatch b".to_string()]);
        assert_eq!(cmd.as_deref(), Some("--batch dispatch a ; dispatch b"));
    }

    #[test]
    fn empty_batch_is_none() {
        assert_eq!(batch(&[]), None);
    }
}
