//! # chains
//!
//! An in-process HTTP request-dispatch engine: a request descriptor goes in,
//! travels through a composable chain of middlewares to a terminal route
//! function, and a response descriptor comes out. The crate performs no
//! network I/O: hosting runtimes adapt their native request/response types
//! onto [`Request`]/[`Response`] and call [`DispatchEngine::handle`] once per
//! accepted request.
//!
//! ## Architecture
//!
//! - **[`headers`]**: ordered header storage with single-/multi-value
//!   disciplines and wire serialization
//! - **[`message`]**: [`Request`]/[`Response`] value objects and the CRLF
//!   message codec
//! - **[`router`]**: the wildcard segment trie and branch graph (literal
//!   match first, `<>` wildcard fallback, no backtracking)
//! - **[`chain`]**: onion-model middleware composition over a single-owner
//!   frozen chain
//! - **[`middleware`]**: the default 404/405/500 translation and recovery
//!   middlewares
//! - **[`app`]**: [`App`]/[`Branch`] registration builders and the frozen
//!   [`DispatchEngine`]
//!
//! ## Quick start
//!
//! ```
//! use chains::{App, Branch, Method, Request, Response};
//!
//! # fn main() -> chains::Result<()> {
//! let mut app = App::new();
//! app.route("/health", Method::GET, |_req| {
//!     let mut resp = Response::new(200, "OK");
//!     resp.set_body("ok")?;
//!     Ok(resp)
//! })?;
//!
//! let mut pets = Branch::new();
//! pets.route("/<>", Method::GET, |req| {
//!     let mut resp = Response::new(200, "OK");
//!     resp.set_body(format!("pet {}", req.path()))?;
//!     Ok(resp)
//! })?;
//! app.mount("pets", pets)?;
//!
//! let engine = app.freeze();
//! let mut request = Request::new(Method::GET, "/pets/42");
//! let response = engine.handle(&mut request)?;
//! assert_eq!(response.status_code(), 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Dispatch is synchronous and single-threaded per request. The frozen
//! engine is `Send + Sync` and requires no locking under concurrent reads;
//! each request must get its own [`Request`] value. Registration happens
//! strictly before [`App::freeze`]; the engine exposes no mutation surface.

pub mod app;
pub mod chain;
pub mod error;
pub mod headers;
pub mod message;
pub mod middleware;
pub mod router;

pub use app::{App, Branch, DispatchEngine};
pub use chain::{MiddlewareFn, Next, RouteFn};
pub use error::{Error, Result};
pub use headers::Headers;
pub use http::Method;
pub use message::{Request, Response};
pub use router::{RouteTrie, WILDCARD};
