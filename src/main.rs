use std::sync::Arc;

use chat_microservice::{config::Config, db::Database, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    init_tracing(&cfg);

    let db = Database::connect(&cfg.database_url, cfg.db_readers).await?;
    info!(database_url = %cfg.database_url, "database ready");

    let state = Arc::new(AppState::new(db.clone()));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_address).await?;
    info!(
        address = %cfg.bind_address,
        version = env!("CARGO_PKG_VERSION"),
        "chat service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("chat service stopped");
    Ok(())
}

fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| cfg.log_level.parse::<EnvFilter>())
        .unwrap_or_else(|e| {
            eprintln!("WARN: CHAT_LOG='{}' is not a valid filter ({e}); using 'info'", cfg.log_level);
            EnvFilter::new("info")
        });

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
