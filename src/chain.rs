//! Handler-chain composition: the onion call/unwind model.
//!
//! Each middleware wraps a continuation over whatever sits next in the chain;
//! calls flow inward, responses (or errors) unwind outward through the same
//! layers in reverse. The chain is a single-owner linked structure assembled
//! back-to-front at freeze time (innermost node first, each node's successor
//! assigned exactly once) and is never rebound afterwards.

use std::sync::Arc;

use crate::error::Result;
use crate::message::{Request, Response};
use crate::router::branch::BranchNode;

/// A terminal route function: one exact `(path, method)` leaf.
pub type RouteFn = Arc<dyn Fn(&mut Request) -> Result<Response> + Send + Sync>;

/// A middleware function wrapping a [`Next`] continuation.
///
/// A middleware may run the continuation and pass its result along (possibly
/// rewritten), fabricate a response without running it at all, or run it and
/// recover from an `Err` it raised.
pub type MiddlewareFn = Arc<dyn Fn(&mut Request, Next<'_>) -> Result<Response> + Send + Sync>;

/// One frozen link of a handler chain.
///
/// A chain is zero or more `Middleware` links ending in a `Branch` delegate;
/// the root chain simply ends in the primary branch's own ingress chain, and
/// route leaves live inside the branch's trie rather than on the chain.
pub(crate) enum ChainLink {
    Middleware {
        func: MiddlewareFn,
        next: Box<ChainLink>,
    },
    Branch(BranchNode),
}

impl ChainLink {
    pub(crate) fn handle(&self, request: &mut Request) -> Result<Response> {
        match self {
            ChainLink::Middleware { func, next } => func(request, Next { link: next }),
            ChainLink::Branch(branch) => branch.dispatch(request),
        }
    }

    /// Fold a registration-ordered middleware list around a terminal link.
    ///
    /// Assembled innermost-first, so the first-registered middleware ends up
    /// outermost (registration order defines outer-to-inner call order).
    pub(crate) fn assemble(middlewares: Vec<MiddlewareFn>, terminal: ChainLink) -> ChainLink {
        middlewares
            .into_iter()
            .rev()
            .fold(terminal, |inner, func| ChainLink::Middleware {
                func,
                next: Box::new(inner),
            })
    }
}

/// The continuation handed to a middleware.
///
/// `run` consumes the continuation, so a middleware can invoke the rest of
/// the chain at most once; not running it at all short-circuits the dispatch.
pub struct Next<'a> {
    link: &'a ChainLink,
}

impl Next<'_> {
    /// Invoke the remainder of the chain.
    pub fn run(self, request: &mut Request) -> Result<Response> {
        self.link.handle(request)
    }
}
