//! Path routing: the segment trie and the branch graph built on top of it.
//!
//! Routing works on normalized paths: surrounding whitespace trimmed, one
//! leading and all trailing `/` stripped, then split into segments on `/`.
//! At every trie level an exact literal child wins; the wildcard child (the
//! [`WILDCARD`] marker `<>`) is a fallback only, and a literal match is never
//! backtracked out of even if it dead-ends deeper in the tree. That is an
//! accepted design simplification, not a bug.

pub(crate) mod branch;
mod trie;

pub use trie::{RouteTrie, WILDCARD};

/// Normalize a path: trim whitespace, strip one leading and all trailing `/`.
pub(crate) fn normalize(path: &str) -> &str {
    let path = path.trim();
    let path = path.strip_prefix('/').unwrap_or(path);
    path.trim_end_matches('/')
}

/// Cut a request path down to its routable portion (no query, no fragment).
pub(crate) fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// Split a normalized path into its first segment and the exact remainder
/// after the separator.
pub(crate) fn split_first(path: &str) -> (&str, &str) {
    match path.find('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => (path, ""),
    }
}
