//! Registration builders and the frozen dispatch engine.
//!
//! [`Branch`] and [`App`] are registration-phase builders: routes, named
//! sub-branches, and middlewares are declared on them, and
//! [`App::freeze`] consumes the whole graph into an immutable
//! [`DispatchEngine`]. Freezing by ownership is what makes the "no
//! structural mutation after the first request" precondition a compile-time
//! fact: the engine dispatches through `&self` and offers no registration
//! surface at all.

use std::sync::Arc;

use http::Method;
use tracing::{debug, info};

use crate::chain::{ChainLink, MiddlewareFn, Next};
use crate::error::Result;
use crate::message::{Request, Response};
use crate::middleware;
use crate::router::branch::BranchNode;

/// A routing sub-tree under construction: local routes, named sub-branches,
/// and the branch's own ingress middlewares.
pub struct Branch {
    middlewares: Vec<MiddlewareFn>,
    node: BranchNode,
}

impl Branch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
            node: BranchNode::new(),
        }
    }

    /// Register a terminal route function for `(path, method)`.
    ///
    /// Fails with `AmbiguousRegistration` if the path's leading segment
    /// shadows an existing branch name, and with `DuplicateRegistration` for
    /// a repeated `(path, method)` pair.
    pub fn route<F>(&mut self, path: &str, method: Method, func: F) -> Result<&mut Self>
    where
        F: Fn(&mut Request) -> Result<Response> + Send + Sync + 'static,
    {
        self.node.add_route(path, method, Arc::new(func))?;
        Ok(self)
    }

    /// Append a middleware to this branch's ingress chain.
    ///
    /// The first-registered middleware runs outermost; unwinding is strictly
    /// the reverse of the call order.
    pub fn middleware<F>(&mut self, func: F) -> &mut Self
    where
        F: Fn(&mut Request, Next<'_>) -> Result<Response> + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(func));
        self
    }

    /// Attach `branch` as the named sub-branch, freezing its ingress chain.
    ///
    /// Name validation and branch/route collision checks run here, in both
    /// directions, so registration order does not matter.
    pub fn mount(&mut self, name: &str, branch: Branch) -> Result<&mut Self> {
        self.node.add_branch(name, branch.freeze())?;
        Ok(self)
    }

    /// Assemble this branch's ingress chain: middlewares in registration
    /// order around the branch node, innermost link first.
    fn freeze(self) -> ChainLink {
        ChainLink::assemble(self.middlewares, ChainLink::Branch(self.node))
    }
}

impl Default for Branch {
    fn default() -> Self {
        Self::new()
    }
}

/// The application under registration: a root middleware chain wrapped
/// around the primary branch.
pub struct App {
    root_middlewares: Vec<MiddlewareFn>,
    primary: Branch,
}

impl App {
    /// An app with the default middlewares installed: [`middleware::recovery`]
    /// at the root position and [`middleware::error_translation`] at the
    /// primary branch entry. Both sit outermost in their chains, so
    /// middlewares registered afterwards still observe raw errors before
    /// translation.
    #[must_use]
    pub fn new() -> Self {
        let mut app = Self::bare();
        app.root_middleware(middleware::recovery());
        app.middleware(middleware::error_translation());
        app
    }

    /// An app with no middlewares at all; errors escape
    /// [`DispatchEngine::handle`] untranslated unless the consumer installs
    /// its own catch-all.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            root_middlewares: Vec::new(),
            primary: Branch::new(),
        }
    }

    /// Append a middleware to the root chain, outside every branch ingress.
    pub fn root_middleware<F>(&mut self, func: F) -> &mut Self
    where
        F: Fn(&mut Request, Next<'_>) -> Result<Response> + Send + Sync + 'static,
    {
        self.root_middlewares.push(Arc::new(func));
        self
    }

    /// Append a middleware to the primary branch's ingress chain.
    pub fn middleware<F>(&mut self, func: F) -> &mut Self
    where
        F: Fn(&mut Request, Next<'_>) -> Result<Response> + Send + Sync + 'static,
    {
        self.primary.middleware(func);
        self
    }

    /// Register a route on the primary branch.
    pub fn route<F>(&mut self, path: &str, method: Method, func: F) -> Result<&mut Self>
    where
        F: Fn(&mut Request) -> Result<Response> + Send + Sync + 'static,
    {
        self.primary.route(path, method, func)?;
        Ok(self)
    }

    /// Mount a sub-branch on the primary branch.
    pub fn mount(&mut self, name: &str, branch: Branch) -> Result<&mut Self> {
        self.primary.mount(name, branch)?;
        Ok(self)
    }

    /// Freeze the registration graph into an immutable [`DispatchEngine`].
    #[must_use]
    pub fn freeze(self) -> DispatchEngine {
        info!(
            root_middlewares = self.root_middlewares.len(),
            branch_middlewares = self.primary.middlewares.len(),
            "freezing dispatch engine"
        );
        let primary = self.primary.freeze();
        DispatchEngine {
            chain: ChainLink::assemble(self.root_middlewares, primary),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// The frozen entry point: one synchronous request-to-response transformation
/// per call, safe to share across threads.
pub struct DispatchEngine {
    chain: ChainLink,
}

impl DispatchEngine {
    /// Run `request` through the root chain, the primary branch ingress, and
    /// routing, and unwind the response back out.
    ///
    /// An error still escaping here means no installed middleware caught it;
    /// apps built via [`App::new`] always return `Ok`.
    pub fn handle(&self, request: &mut Request) -> Result<Response> {
        debug!(method = %request.method(), path = %request.path(), "dispatching request");
        self.chain.handle(request)
    }
}
