//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts live in `accounts`; the rate-limit override is two nullable
//! columns on the same row. Keypairs live in `account_keypairs`, one row per
//! account, with `api_key` unique so lookups by key hit an index.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use ag_core::domain::entities::{Account, Capability, Keypair, RateOverride};
use ag_core::errors::DomainError;
use ag_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str =
    "id, login, password_hash, display_name, email, activation_key, capabilities";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name)
            .map_err(|e| DomainError::storage(format!("Failed to get {}: {}", name, e)))
    }

    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let capabilities: String = Self::column(row, "capabilities")?;

        Ok(Account {
            id: Self::column(row, "id")?,
            login: Self::column(row, "login")?,
            password_hash: Self::column(row, "password_hash")?,
            display_name: Self::column(row, "display_name")?,
            email: Self::column(row, "email")?,
            activation_key: Self::column(row, "activation_key")?,
            capabilities: parse_capabilities(&capabilities),
        })
    }

    fn row_to_keypair(row: &MySqlRow) -> Result<Keypair, DomainError> {
        Ok(Keypair {
            key: Self::column(row, "api_key")?,
            secret: Self::column(row, "api_secret")?,
            owner_account_id: Self::column(row, "account_id")?,
        })
    }

    async fn fetch_account(
        &self,
        filter: &str,
        bind: AccountFilter<'_>,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE {} = ? LIMIT 1",
            ACCOUNT_COLUMNS, filter
        );

        let query = sqlx::query(&query);
        let query = match bind {
            AccountFilter::Id(id) => query.bind(id),
            AccountFilter::Login(login) => query.bind(login),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}

enum AccountFilter<'a> {
    Id(i64),
    Login(&'a str),
}

fn query_failed(e: sqlx::Error) -> DomainError {
    tracing::error!("Account query failed: {}", e);
    DomainError::storage(format!("Database query failed: {}", e))
}

/// Comma separated capability names; unknown names are skipped
fn parse_capabilities(raw: &str) -> Vec<Capability> {
    raw.split(',')
        .map(str::trim)
        .filter_map(Capability::parse)
        .collect()
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        self.fetch_account("id", AccountFilter::Id(id)).await
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_account("login", AccountFilter::Login(login)).await
    }

    async fn find_keypair_by_key(&self, key: &str) -> Result<Option<Keypair>, DomainError> {
        let row = sqlx::query(
            "SELECT account_id, api_key, api_secret FROM account_keypairs WHERE api_key = ? LIMIT 1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_keypair).transpose()
    }

    async fn find_keypair(&self, account_id: i64) -> Result<Option<Keypair>, DomainError> {
        let row = sqlx::query(
            "SELECT account_id, api_key, api_secret FROM account_keypairs WHERE account_id = ? LIMIT 1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_keypair).transpose()
    }

    async fn save_keypair(&self, keypair: &Keypair) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO account_keypairs (account_id, api_key, api_secret, updated_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                api_key = VALUES(api_key),
                api_secret = VALUES(api_secret),
                updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(keypair.owner_account_id)
            .bind(&keypair.key)
            .bind(&keypair.secret)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save keypair: {}", e)))?;

        Ok(())
    }

    async fn find_rate_override(
        &self,
        account_id: i64,
    ) -> Result<Option<RateOverride>, DomainError> {
        let row = sqlx::query("SELECT rate_limit, rate_interval FROM accounts WHERE id = ? LIMIT 1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let rate_override = RateOverride {
            limit: Self::column::<Option<u32>>(&row, "rate_limit")?,
            interval: Self::column::<Option<u64>>(&row, "rate_interval")?,
        };

        Ok((!rate_override.is_empty()).then_some(rate_override))
    }

    async fn save_rate_override(
        &self,
        account_id: i64,
        rate_override: RateOverride,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE accounts SET rate_limit = ?, rate_interval = ? WHERE id = ?")
            .bind(rate_override.limit)
            .bind(rate_override.interval)
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to save rate override: {}", e)))?;

        if result.rows_affected() == 0 {
            tracing::debug!(account_id, "Rate override unchanged or account missing");
        }

        Ok(())
    }
}
