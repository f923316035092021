//! Travel request store
//!
//! Requests are numbered T-0001 style, issued inside the insert so the
//! sequence stays consistent under concurrent writers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TravelRequest {
    pub id: i32,
    pub request_no: Option<String>,
    pub employee_code: Option<String>,
    pub person_name: Option<String>,
    pub type_of_travel: Option<String>,
    pub reason_for_travel: Option<String>,
    pub no_of_person: Option<i32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub requester_name: Option<String>,
    pub requester_designation: Option<String>,
    pub requester_department: Option<String>,
    pub request_for: Option<String>,
    pub request_quantity: Option<i32>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub remarks: Option<String>,
    pub request_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TravelRequestPayload {
    pub employee_code: Option<String>,
    pub person_name: Option<String>,
    pub type_of_travel: Option<String>,
    pub reason_for_travel: Option<String>,
    pub no_of_person: Option<i32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub requester_name: Option<String>,
    pub requester_designation: Option<String>,
    pub requester_department: Option<String>,
    pub request_for: Option<String>,
    pub request_quantity: Option<i32>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub remarks: Option<String>,
    pub request_status: Option<String>,
}

impl TravelRequestPayload {
    /// Blank strings count as absent; a fresh request with no status opens
    /// as "Open".
    pub fn normalize(mut self) -> Self {
        for field in [
            &mut self.employee_code,
            &mut self.person_name,
            &mut self.type_of_travel,
            &mut self.reason_for_travel,
            &mut self.requester_name,
            &mut self.requester_designation,
            &mut self.requester_department,
            &mut self.request_for,
            &mut self.experience,
            &mut self.education,
            &mut self.remarks,
            &mut self.request_status,
        ] {
            if field.as_deref().is_some_and(|value| value.trim().is_empty()) {
                *field = None;
            }
        }
        if self.request_status.is_none() {
            self.request_status = Some("Open".to_string());
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err("from_date cannot be after to_date".to_string());
            }
        }
        if self.no_of_person.is_some_and(|n| n < 1) {
            return Err("no_of_person must be a positive number".to_string());
        }
        if self.request_quantity.is_some_and(|n| n < 1) {
            return Err("request_quantity must be a positive number".to_string());
        }
        Ok(())
    }
}

impl Database {
    pub async fn list_travel_requests(&self) -> Result<Vec<TravelRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM request ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_travel_request(&self, id: i32) -> Result<Option<TravelRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM request WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_travel_request(
        &self,
        data: &TravelRequestPayload,
    ) -> Result<TravelRequest, sqlx::Error> {
        sqlx::query_as(
            r#"
            WITH next_no AS (
                SELECT 'T-' || LPAD((COALESCE(MAX(id), 0) + 1)::text, 4, '0') AS request_no
                FROM request
            )
            INSERT INTO request (
                request_no,
                employee_code,
                person_name,
                type_of_travel,
                reason_for_travel,
                no_of_person,
                from_date,
                to_date,
                departure_date,
                requester_name,
                requester_designation,
                requester_department,
                request_for,
                request_quantity,
                experience,
                education,
                remarks,
                request_status
            )
            SELECT
                next_no.request_no,
                $1, $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16, $17
            FROM next_no
            RETURNING *
            "#,
        )
        .bind(&data.employee_code)
        .bind(&data.person_name)
        .bind(&data.type_of_travel)
        .bind(&data.reason_for_travel)
        .bind(data.no_of_person)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(data.departure_date)
        .bind(&data.requester_name)
        .bind(&data.requester_designation)
        .bind(&data.requester_department)
        .bind(&data.request_for)
        .bind(data.request_quantity)
        .bind(&data.experience)
        .bind(&data.education)
        .bind(&data.remarks)
        .bind(&data.request_status)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_travel_request(
        &self,
        id: i32,
        data: &TravelRequestPayload,
    ) -> Result<Option<TravelRequest>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE request
            SET
                employee_code = COALESCE($1, employee_code),
                person_name = COALESCE($2, person_name),
                type_of_travel = COALESCE($3, type_of_travel),
                reason_for_travel = COALESCE($4, reason_for_travel),
                no_of_person = COALESCE($5, no_of_person),
                from_date = COALESCE($6, from_date),
                to_date = COALESCE($7, to_date),
                departure_date = COALESCE($8, departure_date),
                requester_name = COALESCE($9, requester_name),
                requester_designation = COALESCE($10, requester_designation),
                requester_department = COALESCE($11, requester_department),
                request_for = COALESCE($12, request_for),
                request_quantity = COALESCE($13, request_quantity),
                experience = COALESCE($14, experience),
                education = COALESCE($15, education),
                remarks = COALESCE($16, remarks),
                request_status = COALESCE($17, request_status),
                updated_at = NOW()
            WHERE id = $18
            RETURNING *
            "#,
        )
        .bind(&data.employee_code)
        .bind(&data.person_name)
        .bind(&data.type_of_travel)
        .bind(&data.reason_for_travel)
        .bind(data.no_of_person)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(data.departure_date)
        .bind(&data.requester_name)
        .bind(&data.requester_designation)
        .bind(&data.requester_department)
        .bind(&data.request_for)
        .bind(data.request_quantity)
        .bind(&data.experience)
        .bind(&data.education)
        .bind(&data.remarks)
        .bind(&data.request_status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_travel_request(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM request WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_blanks_and_defaults_status() {
        let payload = TravelRequestPayload {
            employee_code: Some("  ".to_string()),
            person_name: Some("Sam Iyer".to_string()),
            request_status: Some("".to_string()),
            ..Default::default()
        };
        let normalized = payload.normalize();
        assert_eq!(normalized.employee_code, None);
        assert_eq!(normalized.person_name.as_deref(), Some("Sam Iyer"));
        assert_eq!(normalized.request_status.as_deref(), Some("Open"));
    }

    #[test]
    fn explicit_status_is_kept() {
        let payload = TravelRequestPayload {
            request_status: Some("Approved".to_string()),
            ..Default::default()
        };
        assert_eq!(
            payload.normalize().request_status.as_deref(),
            Some("Approved")
        );
    }

    #[test]
    fn validates_person_count() {
        let payload = TravelRequestPayload {
            no_of_person: Some(0),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }
}
