use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use models::Seed;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::{ScopeMapping, TokenVerifier};
use service::{AccessGate, InMemorySchedulingStore};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Store, gate and verifier wired from config.
pub fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let seed = if cfg.seed.enabled {
        Seed::roster_for_today()?
    } else {
        Seed::empty()
    };
    info!(
        persons = seed.persons.len(),
        available_times = seed.available_times.len(),
        appointments = seed.appointments.len(),
        "seeding store"
    );
    let store = InMemorySchedulingStore::new(seed);
    let gate = Arc::new(AccessGate::new(store));

    let scopes = ScopeMapping::new(cfg.auth.read_scope.clone(), cfg.auth.write_scope.clone());
    let verifier = TokenVerifier::new(&cfg.auth.jwt_secret, scopes)
        .with_audience(cfg.auth.audience.clone())
        .with_issuer(cfg.auth.issuer.clone());

    Ok(ServerState { gate, verifier: Arc::new(verifier) })
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl_c");
        return;
    }
    info!(event = "shutdown_signal", "ctrl_c received, draining");
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg)?;
    let app = build_app(state);

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.server.bind_addr())))?;
    info!(%addr, "starting scheduler server");
    let listener = TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
