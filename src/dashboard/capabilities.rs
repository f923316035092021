//! Runtime schema introspection
//!
//! Deployments of the HR schema drift: older databases miss the
//! `created_at`/`updated_at` columns entirely. Whether a trend query is
//! safe to issue is decided here, once per aggregation, and the answer is
//! threaded into the queriers. A failed probe counts as "column absent":
//! absence only disables an optional series and must never fail the report.

use sqlx::PgPool;
use tracing::warn;

/// Which optional timestamp columns exist in the live schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaCapabilities {
    pub employees_created_at: bool,
    pub employees_updated_at: bool,
    pub leave_created_at: bool,
    pub travel_created_at: bool,
    pub tickets_created_at: bool,
    pub resumes_created_at: bool,
    pub visitors_created_at: bool,
}

impl SchemaCapabilities {
    pub async fn probe(pool: &PgPool) -> Self {
        let (
            employees_created_at,
            employees_updated_at,
            leave_created_at,
            travel_created_at,
            tickets_created_at,
            resumes_created_at,
            visitors_created_at,
        ) = tokio::join!(
            has_column(pool, "employees", "created_at"),
            has_column(pool, "employees", "updated_at"),
            has_column(pool, "leave_request", "created_at"),
            has_column(pool, "request", "created_at"),
            has_column(pool, "ticket_book", "created_at"),
            has_column(pool, "resume", "created_at"),
            has_column(pool, "plant_visitor", "created_at"),
        );

        Self {
            employees_created_at,
            employees_updated_at,
            leave_created_at,
            travel_created_at,
            tickets_created_at,
            resumes_created_at,
            visitors_created_at,
        }
    }
}

/// True when the live schema has the column. Catalog errors degrade to
/// false rather than propagating.
pub async fn has_column(pool: &PgPool, table: &str, column: &str) -> bool {
    let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM information_schema.columns
            WHERE table_schema = 'public'
              AND table_name = $1
              AND column_name = $2
        )
        "#,
    )
    .bind(table)
    .bind(column)
    .fetch_one(pool)
    .await;

    match result {
        Ok((exists,)) => exists,
        Err(err) => {
            warn!(table, column, error = %err, "schema probe failed, treating column as absent");
            false
        }
    }
}
