//! Plant visitor log store

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlantVisitor {
    pub id: i32,
    pub person_name: Option<String>,
    pub employee_code: Option<String>,
    pub reason_for_visit: Option<String>,
    pub no_of_person: Option<i32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub requester_name: Option<String>,
    pub approv_employee_code: Option<String>,
    pub approve_by_name: Option<String>,
    pub request_for: Option<String>,
    pub remarks: Option<String>,
    pub request_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantVisitorPayload {
    pub person_name: Option<String>,
    pub employee_code: Option<String>,
    pub reason_for_visit: Option<String>,
    pub no_of_person: Option<i32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub requester_name: Option<String>,
    pub approv_employee_code: Option<String>,
    pub approve_by_name: Option<String>,
    pub request_for: Option<String>,
    pub remarks: Option<String>,
    pub request_status: Option<String>,
}

impl Database {
    pub async fn list_plant_visitors(&self) -> Result<Vec<PlantVisitor>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM plant_visitor ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_plant_visitor(&self, id: i32) -> Result<Option<PlantVisitor>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM plant_visitor WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_plant_visitor(
        &self,
        data: &PlantVisitorPayload,
    ) -> Result<PlantVisitor, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO plant_visitor (
                person_name,
                employee_code,
                reason_for_visit,
                no_of_person,
                from_date,
                to_date,
                requester_name,
                approv_employee_code,
                approve_by_name,
                request_for,
                remarks,
                request_status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.person_name)
        .bind(&data.employee_code)
        .bind(&data.reason_for_visit)
        .bind(data.no_of_person)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(&data.requester_name)
        .bind(&data.approv_employee_code)
        .bind(&data.approve_by_name)
        .bind(&data.request_for)
        .bind(&data.remarks)
        .bind(&data.request_status)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_plant_visitor(
        &self,
        id: i32,
        data: &PlantVisitorPayload,
    ) -> Result<Option<PlantVisitor>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE plant_visitor
            SET
                person_name = COALESCE($1, person_name),
                employee_code = COALESCE($2, employee_code),
                reason_for_visit = COALESCE($3, reason_for_visit),
                no_of_person = COALESCE($4, no_of_person),
                from_date = COALESCE($5, from_date),
                to_date = COALESCE($6, to_date),
                requester_name = COALESCE($7, requester_name),
                approv_employee_code = COALESCE($8, approv_employee_code),
                approve_by_name = COALESCE($9, approve_by_name),
                request_for = COALESCE($10, request_for),
                remarks = COALESCE($11, remarks),
                request_status = COALESCE($12, request_status),
                updated_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&data.person_name)
        .bind(&data.employee_code)
        .bind(&data.reason_for_visit)
        .bind(data.no_of_person)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(&data.requester_name)
        .bind(&data.approv_employee_code)
        .bind(&data.approve_by_name)
        .bind(&data.request_for)
        .bind(&data.remarks)
        .bind(&data.request_status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_plant_visitor(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plant_visitor WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
