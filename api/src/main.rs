use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ag_api::{config::load_config, create_app, AppState};
use ag_core::{AccountRepository, ExpiringStore};
use ag_infra::{
    DatabasePool, MemoryAccountRepository, MemoryExpiringStore, MySqlAccountRepository,
    RedisExpiringStore,
};
use ag_shared::config::{environment::LogFormat, CacheBackend, LoggingConfig};
use ag_shared::AppConfig;

const MEMORY_PURGE_PERIOD: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = load_config().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        "Starting AuditGate API server"
    );

    if !config.auth.jwt.has_secret() {
        warn!("JWT_SECRET is not set; every token request will fail with auth_secret_missing");
    }

    match config.cache.backend {
        CacheBackend::Redis => {
            let store = RedisExpiringStore::connect(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;
            with_accounts(config, Arc::new(store)).await
        }
        CacheBackend::Memory => {
            warn!("Using the in-process expiring store; quotas are per process");
            let store = MemoryExpiringStore::new();
            let purge = store.spawn_purge_task(MEMORY_PURGE_PERIOD);
            let result = with_accounts(config, Arc::new(store)).await;
            purge.abort();
            result
        }
    }
}

async fn with_accounts<S>(config: AppConfig, store: Arc<S>) -> anyhow::Result<()>
where
    S: ExpiringStore + 'static,
{
    if config.database.url.is_some() {
        let pool = DatabasePool::connect(&config.database)
            .await
            .context("Failed to connect to the account database")?;
        let accounts = MySqlAccountRepository::new(pool.get_pool().clone());
        serve(config, Arc::new(accounts), store).await
    } else {
        warn!("DATABASE_URL is not set; using an empty in-memory account store");
        serve(config, Arc::new(MemoryAccountRepository::new()), store).await
    }
}

async fn serve<A, S>(config: AppConfig, accounts: Arc<A>, store: Arc<S>) -> anyhow::Result<()>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let state = web::Data::new(AppState::new(&config, accounts, store));
    let bind_address = config.server.bind_address();

    info!(
        "Server will bind to: {} (namespace /{})",
        bind_address,
        state.namespace()
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Full => builder.init(),
    }
}
