//! Auth Router

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Put every route of `router` behind `require_bearer`.
///
/// Applied as a route layer, so unknown paths still 404 instead of 401.
/// `router` must already have at least one route; axum panics otherwise.
pub fn protect<S>(router: Router<S>, tokens: Arc<TokenIssuer>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(tokens, require_bearer))
}

/// Routes mounted at `/api/user`
pub fn user_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let protected = protect(
        Router::new()
            .route("/profile", get(handlers::profile))
            .route("/admin-auth", get(handlers::admin_auth::<R>)),
        state.tokens.clone(),
    );

    Router::new()
        .route(
            "/",
            get(handlers::user_root).post(handlers::register::<R>),
        )
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}

/// Routes mounted at `/api/admin-auth`
pub fn admin_auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let tokens = state.tokens.clone();
    protect(
        Router::new().route("/", get(handlers::admin_auth::<R>)),
        tokens,
    )
    .with_state(state)
}

/// The full gateway under `/api`.
///
/// `orders` is the order-management router; it is mounted at both
/// `/api/orders` and `/api/user/orders`, behind the bearer gate.
///
/// Panics if `orders` has no routes (axum refuses `route_layer` on an empty
/// router).
pub fn api_router<R>(state: AuthAppState<R>, orders: Router) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let orders = protect(orders, state.tokens.clone());

    // A nested "/" only answers "/api/user"; the slashed form is routed here
    let user_root = Router::new()
        .route(
            "/api/user/",
            get(handlers::user_root).post(handlers::register::<R>),
        )
        .with_state(state.clone());

    Router::new()
        .merge(user_root)
        .nest(
            "/api/user",
            user_router(state.clone()).nest("/orders", orders.clone()),
        )
        .nest("/api/admin-auth", admin_auth_router(state))
        .nest("/api/orders", orders)
}
