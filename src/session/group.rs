//! Class grouping for saved/live window pairing.

use std::collections::BTreeMap;

use super::Window;

/// Class → windows of that class, in the order they were listed.
pub type ClassGroups<'a> = BTreeMap<&'a str, Vec<&'a Window>>;

/// Group windows by class, keeping their relative order within each class.
pub fn group_by_class(windows: &[Window]) -> ClassGroups<'_> {
    let mut groups = ClassGroups::new();
    for window in windows {
        groups.entry(window.class.as_str()).or_default().push(window);
    }
    groups
}
