//! Ticket booking store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TicketBooking {
    pub id: i32,
    pub bill_number: Option<String>,
    pub travels_name: Option<String>,
    pub type_of_bill: Option<String>,
    pub charges: Option<f64>,
    pub per_ticket_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
    pub upload_bill_image: Option<String>,
    pub person_name: Option<String>,
    pub booked_name: Option<String>,
    pub request_employee_code: Option<String>,
    pub booked_employee_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketBookingPayload {
    pub bill_number: Option<String>,
    pub travels_name: Option<String>,
    pub type_of_bill: Option<String>,
    pub charges: Option<f64>,
    pub per_ticket_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
    pub upload_bill_image: Option<String>,
    pub person_name: Option<String>,
    pub booked_name: Option<String>,
    pub request_employee_code: Option<String>,
    pub booked_employee_code: Option<String>,
}

impl Database {
    pub async fn list_ticket_bookings(&self) -> Result<Vec<TicketBooking>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM ticket_book ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_ticket_booking(&self, id: i32) -> Result<Option<TicketBooking>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM ticket_book WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_ticket_booking(
        &self,
        data: &TicketBookingPayload,
    ) -> Result<TicketBooking, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO ticket_book (
                bill_number,
                travels_name,
                type_of_bill,
                charges,
                per_ticket_amount,
                total_amount,
                status,
                upload_bill_image,
                person_name,
                booked_name,
                request_employee_code,
                booked_employee_code
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.bill_number)
        .bind(&data.travels_name)
        .bind(&data.type_of_bill)
        .bind(data.charges)
        .bind(data.per_ticket_amount)
        .bind(data.total_amount)
        .bind(&data.status)
        .bind(&data.upload_bill_image)
        .bind(&data.person_name)
        .bind(&data.booked_name)
        .bind(&data.request_employee_code)
        .bind(&data.booked_employee_code)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_ticket_booking(
        &self,
        id: i32,
        data: &TicketBookingPayload,
    ) -> Result<Option<TicketBooking>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE ticket_book
            SET
                bill_number = COALESCE($1, bill_number),
                travels_name = COALESCE($2, travels_name),
                type_of_bill = COALESCE($3, type_of_bill),
                charges = COALESCE($4, charges),
                per_ticket_amount = COALESCE($5, per_ticket_amount),
                total_amount = COALESCE($6, total_amount),
                status = COALESCE($7, status),
                upload_bill_image = COALESCE($8, upload_bill_image),
                person_name = COALESCE($9, person_name),
                booked_name = COALESCE($10, booked_name),
                request_employee_code = COALESCE($11, request_employee_code),
                booked_employee_code = COALESCE($12, booked_employee_code),
                updated_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&data.bill_number)
        .bind(&data.travels_name)
        .bind(&data.type_of_bill)
        .bind(data.charges)
        .bind(data.per_ticket_amount)
        .bind(data.total_amount)
        .bind(&data.status)
        .bind(&data.upload_bill_image)
        .bind(&data.person_name)
        .bind(&data.booked_name)
        .bind(&data.request_employee_code)
        .bind(&data.booked_employee_code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_ticket_booking(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ticket_book WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
