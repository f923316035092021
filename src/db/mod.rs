//! Database module

mod schema;

pub mod employees;
pub mod leave;
pub mod resumes;
pub mod tickets;
pub mod travel;
pub mod visitors;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};

use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        let statements = [
            schema::CREATE_EMPLOYEES,
            schema::CREATE_LEAVE_REQUEST,
            schema::CREATE_REQUEST,
            schema::CREATE_TICKET_BOOK,
            schema::CREATE_RESUME,
            schema::CREATE_PLANT_VISITOR,
            schema::CREATE_INDEX_EMPLOYEES_STATUS,
            schema::CREATE_INDEX_EMPLOYEES_CREATED,
            schema::CREATE_INDEX_LEAVE_CREATED,
            schema::CREATE_INDEX_REQUEST_CREATED,
            schema::CREATE_INDEX_TICKET_CREATED,
            schema::CREATE_INDEX_RESUME_CREATED,
            schema::CREATE_INDEX_VISITOR_CREATED,
        ];
        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}
