//! msgboard server
//!
//! A minimal message board with request metrics:
//! - `/`, `/add`, `/delete/:id` over a single messages table
//! - `/health` liveness, `/metrics` Prometheus text format
//! - one fresh database connection per request, gauge-tracked

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use msgboard_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "msgboard.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg);

    // Idempotent table creation. A dead database at boot is tolerated; the
    // server starts and requests answer 500 until it comes back.
    if let Err(e) = state.ensure_schema().await {
        tracing::warn!(error = %e, "schema init failed, continuing");
    }

    let app = router::build_router(state);

    tracing::info!(%listen, "msgboard-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
