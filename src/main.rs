mod model;
mod server;

use std::sync::Arc;
use tokio::sync::watch;

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    router,
    scheduler::reconciliation,
    service::{transaction::SolanaTransactionClient, verification::code::VerificationCodeService},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let codes = VerificationCodeService::new(config.verification_code_ttl);

    // Cache and HTTP client are taken before the client is moved into its task
    let (bot_ready, ready) = watch::channel(false);
    let bot_client = bot::start::init_bot(&config, db.clone(), codes.clone(), bot_ready).await?;
    let cache = bot_client.cache.clone();
    let http = bot_client.http.clone();
    let shard_manager = bot_client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let reconciler = Arc::new(startup::build_reconciler(
        &config,
        db.clone(),
        cache,
        http,
    )?);

    let scheduler =
        reconciliation::start_scheduler(reconciler.clone(), config.reconcile_interval, ready)
            .await?;

    let transactions = Arc::new(SolanaTransactionClient::with_timeout(config.balance_rpc_timeout)?);
    let app = router::router().with_state(AppState::new(db, reconciler, codes, transactions));
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Serving verification API on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");

    scheduler.shutdown().await?;
    shard_manager.shutdown_all().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
