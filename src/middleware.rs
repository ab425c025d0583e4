//! Default middlewares installed by [`App::new`](crate::App::new).
//!
//! Both are ordinary middlewares with no privileged hook into the engine; a
//! consumer building from [`App::bare`](crate::App::bare) can install its own
//! translations through the same interface.

use http::Method;
use tracing::warn;

use crate::chain::Next;
use crate::error::{Error, Result};
use crate::message::{Request, Response};

/// Translate routing failures (and anything else escaping the inner chain)
/// into plain-text HTTP responses.
///
/// `RouteNotFound` becomes a 404, `MethodNotAllowed` a 405 whose `Allow`
/// header lists the allowed methods comma-space-joined, and every other
/// error a 500 with a diagnostic body. Installed at the primary branch entry
/// by `App::new`.
pub fn error_translation(
) -> impl Fn(&mut Request, Next<'_>) -> Result<Response> + Send + Sync + 'static {
    |request: &mut Request, next: Next<'_>| match next.run(request) {
        Ok(response) => Ok(response),
        Err(err) => match err {
            Error::RouteNotFound => {
                warn!(path = %request.path(), "no route matched, returning 404");
                plain_text(404, "NOT FOUND", &err.to_string())
            }
            Error::MethodNotAllowed { ref allowed } => {
                let allow = allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                warn!(path = %request.path(), allow = %allow, "method not allowed, returning 405");
                let mut response = plain_text(405, "METHOD NOT ALLOWED", &err.to_string())?;
                response.headers_mut().set_single("Allow", allow)?;
                Ok(response)
            }
            other => {
                warn!(error = %other, "request failed, returning 500");
                plain_text(
                    500,
                    "INTERNAL SERVER ERROR",
                    &format!("An unexpected error occurred: {other}\n"),
                )
            }
        },
    }
}

/// Catch-all for the outermost (root) position: any error still escaping the
/// chain becomes a 500 so the dispatch entry point never surfaces an `Err`.
pub fn recovery() -> impl Fn(&mut Request, Next<'_>) -> Result<Response> + Send + Sync + 'static {
    |request: &mut Request, next: Next<'_>| match next.run(request) {
        Ok(response) => Ok(response),
        Err(err) => {
            warn!(error = %err, "error escaped the middleware chain, returning 500");
            plain_text(
                500,
                "INTERNAL SERVER ERROR",
                &format!("An unexpected error occurred: {err}\n"),
            )
        }
    }
}

fn plain_text(code: u16, text: &str, body: &str) -> Result<Response> {
    let mut response = Response::new(code, text);
    response
        .headers_mut()
        .set_single("Content-Type", "text/plain")?
        .set_single("Content-Length", body.len().to_string())?;
    response.set_body(body)?;
    Ok(response)
}
