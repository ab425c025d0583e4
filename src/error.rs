//! Failure taxonomy shared by registration, routing, and the message codec.
//!
//! Expected failures (a path that does not resolve, a registration that
//! collides, malformed wire text) are plain enum variants that callers can
//! match on; only genuinely unexpected route/middleware failures travel as an
//! opaque [`anyhow::Error`] inside [`Error::Unhandled`].

use http::Method;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure the dispatch engine can surface.
///
/// Registration-time variants (`DuplicateRegistration`, `AmbiguousRegistration`,
/// `InvalidBranchName`) are returned from the registration call that caused
/// them and never reach serving time. Routing variants (`RouteNotFound`,
/// `MethodNotAllowed`) propagate outward through the middleware chain until a
/// middleware such as [`crate::middleware::error_translation`] translates them.
#[derive(Debug, Error)]
pub enum Error {
    /// No registered route resolves the requested path.
    #[error("the specified path does not exist")]
    RouteNotFound,

    /// The path resolves, but not for the requested method.
    ///
    /// `allowed` lists the methods registered at the resolved node, in
    /// registration order.
    #[error(
        "the resource was found but it does not support the specified method; \
         check the 'Allow' header for a list of supported methods"
    )]
    MethodNotAllowed { allowed: Vec<Method> },

    /// The header name is already registered under the other value discipline
    /// (single-value vs multi-value).
    #[error("header '{name}' already exists under the other value discipline")]
    HeaderKindConflict { name: String },

    /// A route, method handler, or branch was registered twice.
    #[error("duplicate registration: {what}")]
    DuplicateRegistration { what: String },

    /// A branch name and a route's leading segment claim the same slot.
    #[error("'{segment}' is claimed by both a branch and a route at the same level")]
    AmbiguousRegistration { segment: String },

    /// Branch names must be a single non-empty path segment.
    #[error("invalid branch name '{name}': expected a single non-empty path segment")]
    InvalidBranchName { name: String },

    /// Bodies are either absent or non-empty; an empty body is rejected.
    #[error("a message body must be at least one byte long")]
    BodyEmpty,

    /// Clearing a body that was never set.
    #[error("the message has no body to clear")]
    BodyAbsent,

    /// Wire text that does not parse as an HTTP/1.1-style message.
    #[error("malformed message: {reason}")]
    MalformedMessage { reason: String },

    /// An unexpected failure escaping a route function or middleware.
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}
