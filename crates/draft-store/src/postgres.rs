use async_trait::async_trait;
use sqlx::PgPool;

use crate::{CheckoutRepository, Result};
use common::CustomerId;

/// PostgreSQL-backed checkout draft repository.
///
/// One row per customer in the `checkout_drafts` table; `set` upserts
/// so the newest draft always wins. The payload column is TEXT so the
/// stored bytes round-trip exactly as written.
#[derive(Clone)]
pub struct PostgresCheckoutRepository {
    pool: PgPool,
}

impl PostgresCheckoutRepository {
    /// Creates a new PostgreSQL repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl CheckoutRepository for PostgresCheckoutRepository {
    async fn get(&self, customer_id: &CustomerId) -> Result<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM checkout_drafts WHERE customer_id = $1")
                .bind(customer_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    async fn set(&self, customer_id: &CustomerId, payload: String) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO checkout_drafts (customer_id, payload, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (customer_id)
            DO UPDATE SET payload = EXCLUDED.payload, updated_at = now()
            "#,
        )
        .bind(customer_id.as_str())
        .bind(&payload)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, customer_id: &CustomerId) -> Result<()> {
        sqlx::query("DELETE FROM checkout_drafts WHERE customer_id = $1")
            .bind(customer_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
