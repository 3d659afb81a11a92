//! Bearer Middleware
//!
//! Gate for protected routes. Runs before the handler and has no side
//! effects beyond attaching the verified [`Claims`] to the request.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use kernel::claims::Claims;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::error::AuthError;

/// Require a valid, unexpired bearer token.
///
/// On success the decoded [`Claims`] are available to handlers through
/// `Extension<Claims>`. Otherwise responds 401 with `X-Auth-Required: true`.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = {
        let token = extract_bearer_token(req.headers())?;
        tokens.verify(token)?
    };

    tracing::trace!(sub = %claims.sub, path = %req.uri().path(), "Bearer accepted");

    req.extensions_mut().insert::<Claims>(claims);
    Ok(next.run(req).await)
}
