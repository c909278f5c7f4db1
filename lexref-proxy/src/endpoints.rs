//! Runtime-mutable endpoint table.

use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::debug;

use lexref_core::constants::DEFAULT_ENDPOINTS;

/// Logical endpoint name → path fragment under the base URL.
///
/// Concurrent reads and registrations are safe. Paths are stored verbatim;
/// no well-formedness check is made.
#[derive(Debug, Default)]
pub struct EndpointTable {
    paths: DashMap<String, String>,
}

impl EndpointTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            paths: DashMap::new(),
        }
    }

    /// Creates a table holding the built-in endpoints.
    pub fn with_defaults() -> Self {
        let table = Self::new();
        for (key, path) in DEFAULT_ENDPOINTS {
            table.paths.insert((*key).to_string(), (*path).to_string());
        }
        table
    }

    /// Inserts or overwrites an endpoint. Returns the previous path, if any.
    pub fn register(&self, key: impl Into<String>, path: impl Into<String>) -> Option<String> {
        let key = key.into();
        let path = path.into();
        debug!(key = %key, path = %path, "Registering endpoint");
        self.paths.insert(key, path)
    }

    /// Looks up the path registered for a key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.paths.get(key).map(|p| p.value().clone())
    }

    /// Point-in-time copy of the table, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.paths
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Returns the number of endpoints.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no endpoints are registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Returns true if the input starts with `<scheme>://`.
///
/// The scheme must begin with a letter and continue with letters, digits,
/// `+`, `-` or `.`.
pub fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_defaults_loaded() {
        let table = EndpointTable::with_defaults();
        assert_eq!(table.len(), DEFAULT_ENDPOINTS.len());
        for key in ["uu", "peraturan", "artikel-hukum"] {
            assert!(table.get(key).is_some(), "missing default endpoint {key}");
        }
    }

    #[test]
    fn test_register_and_overwrite() {
        let table = EndpointTable::new();
        assert_eq!(table.register("foo", "/bar"), None);
        assert_eq!(table.get("foo").as_deref(), Some("/bar"));

        assert_eq!(table.register("foo", "/baz").as_deref(), Some("/bar"));
        assert_eq!(table.get("foo").as_deref(), Some("/baz"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_register_keeps_path_verbatim() {
        let table = EndpointTable::new();
        table.register("odd", "no-leading-slash?x=1");
        assert_eq!(table.get("odd").as_deref(), Some("no-leading-slash?x=1"));
    }

    #[test]
    fn test_snapshot_is_sorted_copy() {
        let table = EndpointTable::with_defaults();
        let snapshot = table.snapshot();
        table.register("zzz", "/late");

        let keys: Vec<_> = snapshot.keys().cloned().collect();
        assert_eq!(keys, vec!["artikel-hukum", "peraturan", "uu"]);
        assert!(!snapshot.contains_key("zzz"));
    }

    #[test_case("https://api.npoint.io/abc", true ; "https")]
    #[test_case("http://localhost:8080/x", true ; "http with port")]
    #[test_case("svn+ssh://host/repo", true ; "compound scheme")]
    #[test_case("/abc", false ; "absolute path")]
    #[test_case("uu", false ; "bare key")]
    #[test_case("://missing", false ; "empty scheme")]
    #[test_case("1http://x", false ; "scheme starts with digit")]
    #[test_case("a b://x", false ; "space in scheme")]
    fn test_has_scheme(input: &str, expected: bool) {
        assert_eq!(has_scheme(input), expected);
    }

    proptest! {
        #[test]
        fn prop_registered_key_is_found(key in "[a-z][a-z0-9-]{0,15}", path in "/[a-zA-Z0-9]{1,20}") {
            let table = EndpointTable::with_defaults();
            table.register(key.clone(), path.clone());
            prop_assert_eq!(table.get(&key), Some(path));
        }
    }
}
