//! Leave request store

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRequest {
    pub id: i32,
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub request_status: Option<String>,
    pub approved_by: Option<String>,
    pub approved_by_status: Option<String>,
    pub hr_approval: Option<String>,
    pub approval_hr: Option<String>,
    pub mobilenumber: Option<String>,
    pub urgent_mobilenumber: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaveRequestPayload {
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub request_status: Option<String>,
    pub approved_by: Option<String>,
    pub approved_by_status: Option<String>,
    pub hr_approval: Option<String>,
    pub approval_hr: Option<String>,
    pub mobilenumber: Option<String>,
    pub urgent_mobilenumber: Option<String>,
}

impl LeaveRequestPayload {
    /// A leave window must be a valid, ordered date range.
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err("from_date cannot be after to_date".to_string());
            }
        }
        Ok(())
    }
}

impl Database {
    pub async fn list_leave_requests(&self) -> Result<Vec<LeaveRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM leave_request ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_leave_request(&self, id: i32) -> Result<Option<LeaveRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM leave_request WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_leave_requests_by_approval(
        &self,
        status: &str,
    ) -> Result<Vec<LeaveRequest>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM leave_request WHERE approved_by_status = $1 ORDER BY created_at ASC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create_leave_request(
        &self,
        data: &LeaveRequestPayload,
    ) -> Result<LeaveRequest, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO leave_request (
                employee_id,
                employee_name,
                designation,
                department,
                from_date,
                to_date,
                reason,
                request_status,
                approved_by,
                approved_by_status,
                hr_approval,
                approval_hr,
                mobilenumber,
                urgent_mobilenumber
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14)
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(&data.designation)
        .bind(&data.department)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(&data.reason)
        .bind(&data.request_status)
        .bind(&data.approved_by)
        .bind(&data.approved_by_status)
        .bind(&data.hr_approval)
        .bind(&data.approval_hr)
        .bind(&data.mobilenumber)
        .bind(&data.urgent_mobilenumber)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_leave_request(
        &self,
        id: i32,
        data: &LeaveRequestPayload,
    ) -> Result<Option<LeaveRequest>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE leave_request
            SET
                employee_id = COALESCE($1, employee_id),
                employee_name = COALESCE($2, employee_name),
                designation = COALESCE($3, designation),
                department = COALESCE($4, department),
                from_date = COALESCE($5, from_date),
                to_date = COALESCE($6, to_date),
                reason = COALESCE($7, reason),
                request_status = COALESCE($8, request_status),
                approved_by = COALESCE($9, approved_by),
                approved_by_status = COALESCE($10, approved_by_status),
                hr_approval = COALESCE($11, hr_approval),
                approval_hr = COALESCE($12, approval_hr),
                mobilenumber = COALESCE($13, mobilenumber),
                urgent_mobilenumber = COALESCE($14, urgent_mobilenumber),
                updated_at = NOW()
            WHERE id = $15
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(&data.employee_name)
        .bind(&data.designation)
        .bind(&data.department)
        .bind(data.from_date)
        .bind(data.to_date)
        .bind(&data.reason)
        .bind(&data.request_status)
        .bind(&data.approved_by)
        .bind(&data.approved_by_status)
        .bind(&data.hr_approval)
        .bind(&data.approval_hr)
        .bind(&data.mobilenumber)
        .bind(&data.urgent_mobilenumber)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_leave_request(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leave_request WHERE id = $1")
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
    fn rejects_inverted_date_range() {
        let payload = LeaveRequestPayload {
            employee_id: Some(7),
            employee_name: Some("Avery Lee".to_string()),
            designation: None,
            department: None,
            from_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            to_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            reason: None,
            request_status: None,
            approved_by: None,
            approved_by_status: None,
            hr_approval: None,
            approval_hr: None,
            mobilenumber: None,
            urgent_mobilenumber: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn open_ended_range_is_fine() {
        let payload = LeaveRequestPayload {
            employee_id: None,
            employee_name: None,
            designation: None,
            department: None,
            from_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            to_date: None,
            reason: None,
            request_status: None,
            approved_by: None,
            approved_by_status: None,
            hr_approval: None,
            approval_hr: None,
            mobilenumber: None,
            urgent_mobilenumber: None,
        };
        assert!(payload.validate().is_ok());
    }
}
