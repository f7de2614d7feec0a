use hiring_intake::config::{Config, DEFAULT_ADMIN_PASSWORD};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        smtp_host = %cfg.smtp_host,
        email_user = %cfg.email_user.as_deref().unwrap_or("<none>"),
        admin_username = %cfg.admin_username
    );
    if cfg.admin_password == DEFAULT_ADMIN_PASSWORD {
        warn!("ADMIN_PASSWORD not set; seeding the admin user with the built-in default");
    }

    // schema and seed failures abort startup
    let storage = hiring_intake::db::connect(&cfg.database_url).await?;
    hiring_intake::auth::seed_admin(&storage, &cfg.admin_username, &cfg.admin_password).await?;

    let notifier = hiring_intake::notify::from_config(&cfg)?;

    let state = hiring_intake::router::IntakeState::new(storage, notifier);
    let app = hiring_intake::router::intake_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("Server running on http://{}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Gracefully shutdown");
}
