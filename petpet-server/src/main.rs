//! # Pet Your Pet Server
//!
//! REST backend serving the pet directory and identity endpoints.
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for persistent storage (or an in-memory backend for local
//!   development)
//! - Opaque bearer tokens, HMAC-hashed at rest, for sessions
//! - Argon2id with a server-side pepper for passwords

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use clap::Parser;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use petpet_server::{
    AppState, Config,
    auth::AuthCrypto,
    routes,
    store::{
        memory::{MemoryIdentityStore, MemoryPetStore},
        postgres::{self, PostgresIdentityStore, PostgresPetStore},
    },
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "petpet-server")]
#[command(about = "REST directory and identity service for Pet Your Pet")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "PETPET_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "PETPET_HOST")]
    host: Option<String>,

    /// Run against in-memory stores instead of PostgreSQL (state is lost on
    /// shutdown)
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Quieter defaults. Override via RUST_LOG.
                    "info,tower_http=warn,sqlx=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.server_port = port;
    }
    if let Some(host) = cli.host {
        config.server_host = host;
    }

    let crypto = AuthCrypto::new(
        &config.password_pepper,
        &config.token_hmac_key,
    )
    .context("failed to initialize auth crypto")?;

    let state = if cli.in_memory {
        info!("running with in-memory stores; data will not persist");
        AppState::new(
            Arc::new(MemoryPetStore::new()),
            Arc::new(MemoryIdentityStore::new()),
            crypto,
            config.clone(),
        )
    } else {
        let database_url = config
            .database_url
            .clone()
            .context("DATABASE_URL must be set (or pass --in-memory)")?;
        let pool = postgres::connect(&database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        AppState::new(
            Arc::new(PostgresPetStore::new(pool.clone())),
            Arc::new(PostgresIdentityStore::new(pool)),
            crypto,
            config.clone(),
        )
    };

    let app = routes::create_router(state.clone())
        .layer(build_cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .with_context(|| {
            format!(
                "invalid bind address {}:{}",
                config.server_host, config.server_port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build CORS layer from the configured allow-list.
fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {err}");
    }
    info!("shutdown signal received");
}
