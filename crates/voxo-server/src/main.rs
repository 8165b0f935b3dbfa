mod config;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use voxo_api::auth::AppStateInner;
use voxo_api::routes;
use voxo_db::Database;
use voxo_db::models::NewUser;
use voxo_types::models::Role;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxo=debug,voxo_api=debug,voxo_db=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = Database::open(&config.db_path)?;
    if config.seed_demo {
        seed_demo_user(&db)?;
    }

    let state = AppStateInner::new(db, config.jwt_secret);

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Voxo server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Demo admin account for local setups, matching the provider's demo identity.
fn seed_demo_user(db: &Database) -> anyhow::Result<()> {
    let user = db.ensure_user(&NewUser {
        clerk_id: "user_demo123",
        username: "VoxoDemo",
        image_url: Some("https://github.com/shadcn.png"),
        role: Role::Admin,
    })?;
    if user.role != Role::Admin {
        warn!("Demo user {} already exists with role {}", user.username, user.role);
    }
    info!("Demo user {} ready ({})", user.username, user.id);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
