//! skillgate gateway binary.
//!
//! - Webhook endpoint: POST /v1/skill
//! - Pipeline: shallow envelope decode -> verify -> mux -> dispatch
//! - Ops: /healthz, /metrics

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use skillgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("skillgate.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "skillgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
