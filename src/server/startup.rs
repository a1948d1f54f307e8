use sea_orm::DatabaseConnection;
use serenity::{cache::Cache, http::Http};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    data::store::DatabaseStore,
    error::AppError,
    service::{
        balance::SolanaBalanceOracle,
        discord::SerenityGuildGateway,
        reconciliation::{ReconcileSettings, Reconciler},
    },
};

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG` and defaults to `info` for every target.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before the bot, the
/// scheduler or the API touch it.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Wires the reconciler to the database, Solana RPC and the bot's cache and HTTP client.
///
/// # Returns
/// - `Ok(Reconciler)` - Reconciler ready for the scheduler and the wallet link flow
/// - `Err(AppError::ReqwestErr)` - Balance RPC client could not be built
pub fn build_reconciler(
    config: &Config,
    db: DatabaseConnection,
    cache: Arc<Cache>,
    http: Arc<Http>,
) -> Result<Reconciler, AppError> {
    let store = Arc::new(DatabaseStore::new(db));
    let oracle = SolanaBalanceOracle::with_timeout(config.balance_rpc_timeout)?;
    let guilds = SerenityGuildGateway::new(cache, http);

    Ok(Reconciler::new(
        store.clone(),
        store,
        Arc::new(oracle),
        Arc::new(guilds),
        ReconcileSettings {
            max_concurrent_tenants: config.max_concurrent_tenants,
            unknown_balance_policy: config.unknown_balance_policy,
        },
    ))
}
