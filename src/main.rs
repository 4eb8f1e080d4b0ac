use std::net::SocketAddr;
use std::time::Duration;
use tokio::task;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use mistic_falls::{app, config::Config, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // JSON logs in production, human-readable otherwise
    let fmt_layer = if config.is_production() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(fmt_layer)
        .init();

    info!("Starting Mistic Falls API ({})", config.app.environment);

    // Create the shared application state
    let app_state = AppState::new(config.clone())?;

    // --- Start background tasks ---

    // Forget chat sessions whose widget was closed without saying goodbye
    let sessions = app_state.sessions.clone();
    let idle = Duration::from_secs(config.concierge.session_idle_minutes * 60);
    task::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(300)).await;
            sessions.remove_idle(idle);
        }
    });

    // --- Start the web server ---

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
