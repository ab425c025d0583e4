//! Branch nodes: one route trie plus named sub-branch ingress chains.
//!
//! A branch consumes exactly one path segment per dispatch. If the segment
//! names a sub-branch, the request's path is rewritten to the exact remainder
//! (true prefix removal) and handed to that sub-branch's ingress chain;
//! otherwise the whole remaining path resolves against the local trie.

use std::collections::HashMap;

use http::Method;
use tracing::debug;

use super::{normalize, split_first, strip_query};
use crate::chain::{ChainLink, RouteFn};
use crate::error::{Error, Result};
use crate::message::{Request, Response};
use crate::router::RouteTrie;

/// The frozen routing state of one branch.
pub(crate) struct BranchNode {
    trie: RouteTrie,
    /// Sub-branch name → that branch's frozen ingress chain.
    branches: HashMap<String, ChainLink>,
}

impl BranchNode {
    pub(crate) fn new() -> Self {
        Self {
            trie: RouteTrie::new(),
            branches: HashMap::new(),
        }
    }

    /// Register a named sub-branch.
    ///
    /// The name must be a single non-empty segment and must not collide with
    /// an existing branch or with the leading literal segment of any
    /// already-registered route.
    pub(crate) fn add_branch(&mut self, name: &str, ingress: ChainLink) -> Result<()> {
        let name = normalize(name);
        if name.is_empty() || name.contains('/') {
            return Err(Error::InvalidBranchName {
                name: name.to_string(),
            });
        }
        if self.branches.contains_key(name) {
            return Err(Error::DuplicateRegistration {
                what: format!("a branch named '{name}' already exists at this level"),
            });
        }
        if self.trie.has_root_literal(name) {
            return Err(Error::AmbiguousRegistration {
                segment: name.to_string(),
            });
        }
        self.branches.insert(name.to_string(), ingress);
        Ok(())
    }

    /// Register a route on the local trie.
    ///
    /// The route's leading segment may not shadow an existing branch name.
    pub(crate) fn add_route(&mut self, path: &str, method: Method, handler: RouteFn) -> Result<()> {
        let (first, _) = split_first(normalize(path));
        if self.branches.contains_key(first) {
            return Err(Error::AmbiguousRegistration {
                segment: first.to_string(),
            });
        }
        self.trie.add_path(path, method, handler)
    }

    /// Consume one path segment: delegate to a sub-branch or resolve locally.
    pub(crate) fn dispatch(&self, request: &mut Request) -> Result<Response> {
        let path = normalize(strip_query(request.path())).to_string();
        let (first, remainder) = split_first(&path);

        if let Some(ingress) = self.branches.get(first) {
            debug!(branch = %first, remainder = %remainder, "delegating to sub-branch");
            let remainder = remainder.to_string();
            request.set_path(remainder);
            return ingress.handle(request);
        }

        let handler = self.trie.get_route(&path, request.method())?;
        handler(request)
    }
}
