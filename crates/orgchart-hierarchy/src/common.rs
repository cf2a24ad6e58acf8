//! Shared helpers for hierarchy traversal
//!
//! Display-name formatting and the sibling ordering used by every report
//! bucket, plus the visited-set type threaded through traversals.

use rustc_hash::FxHashSet;

/// Set of employee ids already emitted by a single traversal call.
pub type VisitedSet<'a> = FxHashSet<&'a str>;

/// Display name: first and last name joined by a space, trimmed.
///
/// Either component may be empty, in which case no stray space remains.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name).trim().to_string()
}

/// Sort key for siblings: lower-cased display name, then id.
pub(crate) fn sibling_key(name: &str, id: &str) -> (String, String) {
    (name.to_lowercase(), id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_trims_missing_parts() {
        assert_eq!(display_name("Alice", "Root"), "Alice Root");
        assert_eq!(display_name("", "Root"), "Root");
        assert_eq!(display_name("Alice", ""), "Alice");
        assert_eq!(display_name("", ""), "");
    }

    #[test]
    fn test_sibling_key_ignores_case_then_uses_id() {
        assert!(sibling_key("bob", "E2") > sibling_key("Bob", "E1"));
        assert!(sibling_key("Bob", "E1") < sibling_key("bob", "E2"));
        assert!(sibling_key("alice", "Z9") < sibling_key("Bob", "A1"));
    }
}
