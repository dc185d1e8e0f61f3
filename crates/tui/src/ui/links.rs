//! Route builders for the web companion.
//!
//! The TUI shows these paths in the info bar so a viewer can jump to the
//! same record in the browser app. Ids are interpolated verbatim; the
//! companion owns escaping.

use engine::{Group, GroupKind};

pub fn trip_path(id: &str) -> String {
    format!("/trips/{id}")
}

pub fn group_path(id: &str) -> String {
    format!("/groups/{id}")
}

/// Path for a container, picked by its kind.
pub fn path_for(group: &Group) -> String {
    match group.kind {
        GroupKind::Trip => trip_path(&group.id),
        GroupKind::Group => group_path(&group.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_interpolate_the_id() {
        assert_eq!(trip_path("abc123"), "/trips/abc123");
        assert_eq!(group_path("flatmates"), "/groups/flatmates");
    }

    #[test]
    fn ids_are_not_escaped_here() {
        assert_eq!(trip_path("a b/c"), "/trips/a b/c");
    }
}
