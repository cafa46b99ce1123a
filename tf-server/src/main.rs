use tf_server::mailer::{HttpMailer, LogMailer, Mailer};
use tf_server::{AppState, build_router, config::Config, logger};

use tf_auth::{JwtValidator, TokenIssuer};

use std::error::Error;
use std::sync::Arc;

use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::from_env()?;

    // Initialize logger (before any other logging)
    logger::initialize(&config.log_level, config.log_colored)?;

    info!("Starting tf-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    info!("Connecting to database: {}", config.database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/tf-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    // Session token machinery shares one HS256 secret
    let token_issuer = Arc::new(TokenIssuer::new(config.jwt_secret.as_bytes()));
    let jwt_validator = Arc::new(JwtValidator::with_hs256(config.jwt_secret.as_bytes()));

    // Mail transport
    let mailer: Arc<dyn Mailer> = match (
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.sender_email.clone(),
    ) {
        (Some(api_url), Some(api_key), Some(sender)) => {
            info!("Mail: HTTP provider at {}", api_url);
            Arc::new(HttpMailer::new(api_url, api_key, sender))
        }
        _ => {
            warn!("Mail provider not configured, OTP codes will be logged");
            Arc::new(LogMailer)
        }
    };

    // Build application state
    let app_state = AppState {
        pool,
        token_issuer,
        jwt_validator,
        mailer,
        cors_origins: config.cors_origins()?,
        secure_cookies: config.secure_cookies,
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let listener = TcpListener::bind(&config.bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on Ctrl+C
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for SIGINT: {}", e);
            }
            info!("Received SIGINT (Ctrl+C), shutting down");
        })
        .await?;

    Ok(())
}
