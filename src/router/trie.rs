//! Segment trie mapping paths to per-method route leaves.
//!
//! Each node holds literal children keyed by segment, at most one wildcard
//! child, and the handlers registered for "this exact path" keyed by method.
//! The wildcard-terminal flag distinguishes a wildcard that is itself
//! routable from one that only passes through to deeper routes.

use std::collections::HashMap;

use http::Method;
use tracing::{debug, warn};

use super::normalize;
use crate::chain::RouteFn;
use crate::error::{Error, Result};

/// Path segment placeholder matching any single literal segment.
pub const WILDCARD: &str = "<>";

#[derive(Default)]
struct TrieNode {
    children: HashMap<String, TrieNode>,
    wildcard: Option<Box<TrieNode>>,
    /// The wildcard child accepts terminal requests at this level (it was
    /// itself registered as a route's final segment, not just passed through).
    wildcard_terminal: bool,
    /// Registration order is preserved so 405 `Allow` lists are deterministic.
    handlers: Vec<(Method, RouteFn)>,
}

impl TrieNode {
    fn insert(&mut self, segments: &[&str], method: Method, handler: RouteFn) -> Result<()> {
        match segments.split_first() {
            None => self.register(method, handler),
            Some((&segment, rest)) if segment == WILDCARD => {
                let child = self.wildcard.get_or_insert_with(Box::default);
                if rest.is_empty() {
                    self.wildcard_terminal = true;
                    child.register(method, handler)
                } else {
                    child.insert(rest, method, handler)
                }
            }
            Some((&segment, rest)) => self
                .children
                .entry(segment.to_string())
                .or_default()
                .insert(rest, method, handler),
        }
    }

    fn register(&mut self, method: Method, handler: RouteFn) -> Result<()> {
        if self.handlers.iter().any(|(m, _)| *m == method) {
            return Err(Error::DuplicateRegistration {
                what: format!("a {method} handler already exists for this path"),
            });
        }
        self.handlers.push((method, handler));
        Ok(())
    }

    fn lookup(&self, method: &Method) -> Result<&RouteFn> {
        match self.handlers.iter().find(|(m, _)| m == method) {
            Some((_, handler)) => Ok(handler),
            None => Err(Error::MethodNotAllowed {
                allowed: self.handlers.iter().map(|(m, _)| m.clone()).collect(),
            }),
        }
    }
}

/// Hierarchical path-routing trie with literal and wildcard segments.
#[derive(Default)]
pub struct RouteTrie {
    root: TrieNode,
}

impl RouteTrie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `(path, method)`.
    ///
    /// Intermediate nodes are created lazily; the empty normalized path
    /// (`"/"`) registers on the root node itself. Registering the same
    /// `(path, method)` twice fails with `DuplicateRegistration`.
    pub fn add_path(&mut self, path: &str, method: Method, handler: RouteFn) -> Result<()> {
        let normalized = normalize(path);
        debug!(path = %normalized, method = %method, "registering route");
        if normalized.is_empty() {
            return self.root.register(method, handler);
        }
        let segments: Vec<&str> = normalized.split('/').collect();
        self.root.insert(&segments, method, handler)
    }

    /// Resolve `(path, method)` to the registered leaf.
    ///
    /// Descent prefers an exact literal child at every level and falls back
    /// to the wildcard child only when no literal matches; a wildcard may
    /// consume the final segment only where it was registered as terminal.
    /// There is no backtracking past a committed literal match.
    pub fn get_route(&self, path: &str, method: &Method) -> Result<&RouteFn> {
        let normalized = normalize(path);
        let mut node = &self.root;
        if !normalized.is_empty() {
            let segments: Vec<&str> = normalized.split('/').collect();
            for (index, segment) in segments.iter().enumerate() {
                let is_last = index + 1 == segments.len();
                if let Some(child) = node.children.get(*segment) {
                    node = child;
                } else if let Some(wildcard) = &node.wildcard {
                    if is_last && !node.wildcard_terminal {
                        warn!(path = %normalized, "wildcard at this level is pass-through only");
                        return Err(Error::RouteNotFound);
                    }
                    node = wildcard;
                } else {
                    warn!(path = %normalized, method = %method, "no route matched");
                    return Err(Error::RouteNotFound);
                }
            }
        }
        node.lookup(method)
    }

    /// Whether a top-level literal segment is registered (used for
    /// branch-name collision checks).
    pub(crate) fn has_root_literal(&self, segment: &str) -> bool {
        self.root.children.contains_key(segment)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::message::{Request, Response};

    // Handlers are told apart by the status text they stamp on the response.
    fn handler(tag: &'static str) -> RouteFn {
        Arc::new(move |_req: &mut Request| Ok(Response::new(200, tag)))
    }

    fn resolve(trie: &RouteTrie, path: &str, method: &Method) -> Result<String> {
        let route = trie.get_route(path, method)?;
        let mut req = Request::new(method.clone(), path.to_string());
        Ok(route(&mut req)?.status_text().to_string())
    }

    #[test]
    fn literal_routes_resolve() {
        let mut trie = RouteTrie::new();
        trie.add_path("/health", Method::GET, handler("health")).unwrap();
        trie.add_path("/users/list", Method::GET, handler("list")).unwrap();

        assert_eq!(resolve(&trie, "/health", &Method::GET).unwrap(), "health");
        assert_eq!(resolve(&trie, "/users/list", &Method::GET).unwrap(), "list");
        // normalization: trailing slashes and whitespace are ignored
        assert_eq!(resolve(&trie, " /health/ ", &Method::GET).unwrap(), "health");
    }

    #[test]
    fn root_path_registers_on_the_root_node() {
        let mut trie = RouteTrie::new();
        trie.add_path("/", Method::GET, handler("root")).unwrap();
        assert_eq!(resolve(&trie, "/", &Method::GET).unwrap(), "root");
        assert_eq!(resolve(&trie, "", &Method::GET).unwrap(), "root");
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut trie = RouteTrie::new();
        trie.add_path("/a/b", Method::GET, handler("one")).unwrap();
        assert!(matches!(
            trie.add_path("/a/b", Method::GET, handler("two")),
            Err(Error::DuplicateRegistration { .. })
        ));
        // the original registration survives
        assert_eq!(resolve(&trie, "/a/b", &Method::GET).unwrap(), "one");
    }

    #[test]
    fn unknown_method_yields_allowed_set() {
        let mut trie = RouteTrie::new();
        trie.add_path("/a/b", Method::GET, handler("get")).unwrap();

        match trie.get_route("/a/b", &Method::POST) {
            Err(Error::MethodNotAllowed { allowed }) => assert_eq!(allowed, vec![Method::GET]),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected MethodNotAllowed"),
        }
    }

    #[test]
    fn interior_node_has_empty_allowed_set() {
        let mut trie = RouteTrie::new();
        trie.add_path("/a/b", Method::GET, handler("get")).unwrap();

        match trie.get_route("/a", &Method::GET) {
            Err(Error::MethodNotAllowed { allowed }) => assert!(allowed.is_empty()),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected MethodNotAllowed"),
        }
    }

    #[test]
    fn unregistered_path_is_not_found() {
        let mut trie = RouteTrie::new();
        trie.add_path("/a/b", Method::GET, handler("get")).unwrap();
        assert!(matches!(
            trie.get_route("/x/y", &Method::GET),
            Err(Error::RouteNotFound)
        ));
    }

    #[test]
    fn wildcard_matches_exactly_one_segment() {
        let mut trie = RouteTrie::new();
        trie.add_path("/<>", Method::GET, handler("any")).unwrap();

        assert_eq!(resolve(&trie, "/anything", &Method::GET).unwrap(), "any");
        assert!(matches!(
            trie.get_route("/anything/more", &Method::GET),
            Err(Error::RouteNotFound)
        ));
    }

    #[test]
    fn routes_deeper_under_a_wildcard_subtree() {
        let mut trie = RouteTrie::new();
        trie.add_path("/users/<>/posts", Method::GET, handler("posts")).unwrap();

        assert_eq!(resolve(&trie, "/users/42/posts", &Method::GET).unwrap(), "posts");
        // the pass-through wildcard itself is not routable
        assert!(matches!(
            trie.get_route("/users/42", &Method::GET),
            Err(Error::RouteNotFound)
        ));
    }

    #[test]
    fn wildcard_registrations_share_one_subtree() {
        let mut trie = RouteTrie::new();
        trie.add_path("/<>/a", Method::GET, handler("a")).unwrap();
        trie.add_path("/<>/b", Method::GET, handler("b")).unwrap();

        assert_eq!(resolve(&trie, "/x/a", &Method::GET).unwrap(), "a");
        assert_eq!(resolve(&trie, "/y/b", &Method::GET).unwrap(), "b");
    }

    #[test]
    fn terminal_and_passthrough_wildcard_coexist() {
        let mut trie = RouteTrie::new();
        trie.add_path("/<>", Method::GET, handler("one")).unwrap();
        trie.add_path("/<>/deep", Method::GET, handler("deep")).unwrap();

        assert_eq!(resolve(&trie, "/x", &Method::GET).unwrap(), "one");
        assert_eq!(resolve(&trie, "/x/deep", &Method::GET).unwrap(), "deep");
    }

    #[test]
    fn literal_wins_over_wildcard_without_backtracking() {
        let mut trie = RouteTrie::new();
        trie.add_path("/static/file", Method::GET, handler("literal")).unwrap();
        trie.add_path("/<>/other", Method::GET, handler("wild")).unwrap();

        assert_eq!(resolve(&trie, "/static/file", &Method::GET).unwrap(), "literal");
        assert_eq!(resolve(&trie, "/dynamic/other", &Method::GET).unwrap(), "wild");
        // "static" commits to the literal subtree; the wildcard sibling is
        // never retried even though it would have matched
        assert!(matches!(
            trie.get_route("/static/other", &Method::GET),
            Err(Error::RouteNotFound)
        ));
    }
}
