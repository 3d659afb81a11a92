//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail, ensure};
use auth::domain::repository::UserRepository;
use auth::{
    AuthAppState, AuthConfig, MAX_TOKEN_TTL, MemoryUserRepository, PgUserRepository, api_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use orders::{MemoryOrderRepository, OrdersConfig, orders_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,orders=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let auth_config = load_auth_config()?;
    let orders = orders_router(MemoryOrderRepository::new(), OrdersConfig::default());

    // Users live in Postgres when configured, in memory otherwise
    let api = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .context("connecting to DATABASE_URL")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            gateway(PgUserRepository::new(pool), auth_config, orders)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; accounts are kept in memory");
            gateway(MemoryUserRepository::new(), auth_config, orders)
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:4200,http://127.0.0.1:4200".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    let app = api.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be host:port")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn gateway<R>(repo: R, config: AuthConfig, orders: Router) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    api_router(AuthAppState::new(repo, config), orders)
}

/// Token settings from the environment.
///
/// Debug builds fall back to a random per-process secret; release builds
/// refuse to start without `JWT_SECRET`.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("JWT_SECRET") {
        Ok(secret_b64) => {
            let secret = platform::crypto::from_base64(secret_b64.trim())
                .context("JWT_SECRET must be base64")?;
            ensure!(
                secret.len() >= 32,
                "JWT_SECRET must decode to at least 32 bytes"
            );
            AuthConfig {
                token_secret: secret,
                ..AuthConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set; tokens will not survive a restart");
            AuthConfig::development()
        }
        Err(_) => bail!("JWT_SECRET must be set in production"),
    };

    if let Ok(ttl) = env::var("TOKEN_TTL_SECS") {
        let secs: u64 = ttl
            .trim()
            .parse()
            .context("TOKEN_TTL_SECS must be a whole number of seconds")?;
        let ttl = Duration::from_secs(secs);
        ensure!(secs > 0, "TOKEN_TTL_SECS must be positive");
        ensure!(
            ttl <= MAX_TOKEN_TTL,
            "TOKEN_TTL_SECS must be at most {}",
            MAX_TOKEN_TTL.as_secs()
        );
        config.token_ttl = ttl;
    }

    tracing::info!(
        token_ttl_secs = config.token_ttl_secs(),
        "Auth configuration loaded"
    );
    Ok(config)
}
