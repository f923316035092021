//! Personnel store
//!
//! The `password` column never leaves this module except as a hash handed
//! to the login flow; `Employee` deliberately has no password field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i32,
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub page_access: Option<SqlJson<Vec<String>>>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub profile_img: Option<String>,
    pub document_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload. `password` is hashed before it reaches the store;
/// a blank password on update keeps the stored hash.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeePayload {
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub page_access: Option<Vec<String>>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
    pub profile_img: Option<String>,
    pub document_img: Option<String>,
}

/// Row used by the login flow only.
#[derive(Debug, sqlx::FromRow)]
pub struct EmployeeCredentials {
    pub id: i32,
    pub employee_code: String,
    pub employee_name: Option<String>,
    pub role: Option<String>,
    pub page_access: Option<SqlJson<Vec<String>>>,
    pub password: Option<String>,
}

const EMPLOYEE_COLUMNS: &str = "id, employee_code, employee_name, email, mobile_number, \
     page_access, department, designation, role, status, profile_img, document_img, \
     created_at, updated_at";

impl Database {
    pub async fn list_employees(&self) -> Result<Vec<Employee>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_employee(&self, id: i32) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn create_employee(
        &self,
        data: &EmployeePayload,
        password_hash: Option<String>,
    ) -> Result<Employee, sqlx::Error> {
        sqlx::query_as(&format!(
            r#"
            INSERT INTO employees (
                employee_code,
                employee_name,
                email,
                mobile_number,
                page_access,
                department,
                designation,
                role,
                status,
                password,
                profile_img,
                document_img
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&data.employee_code)
        .bind(&data.employee_name)
        .bind(&data.email)
        .bind(&data.mobile_number)
        .bind(data.page_access.clone().map(SqlJson))
        .bind(&data.department)
        .bind(&data.designation)
        .bind(&data.role)
        .bind(&data.status)
        .bind(password_hash)
        .bind(&data.profile_img)
        .bind(&data.document_img)
        .fetch_one(&self.pool)
        .await
    }

    /// Full update; a NULL password hash or image keeps the stored value.
    pub async fn update_employee(
        &self,
        id: i32,
        data: &EmployeePayload,
        password_hash: Option<String>,
    ) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as(&format!(
            r#"
            UPDATE employees
            SET
                employee_code = $1,
                employee_name = $2,
                email = $3,
                mobile_number = $4,
                page_access = $5,
                department = $6,
                designation = $7,
                role = $8,
                status = $9,
                password = COALESCE($10, password),
                profile_img = COALESCE($11, profile_img),
                document_img = COALESCE($12, document_img),
                updated_at = NOW()
            WHERE id = $13
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&data.employee_code)
        .bind(&data.employee_name)
        .bind(&data.email)
        .bind(&data.mobile_number)
        .bind(data.page_access.clone().map(SqlJson))
        .bind(&data.department)
        .bind(&data.designation)
        .bind(&data.role)
        .bind(&data.status)
        .bind(password_hash)
        .bind(&data.profile_img)
        .bind(&data.document_img)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_employee(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn employee_credentials(
        &self,
        employee_code: &str,
    ) -> Result<Option<EmployeeCredentials>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, employee_code, employee_name, role, page_access, password
            FROM employees
            WHERE employee_code = $1
            "#,
        )
        .bind(employee_code)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn distinct_departments(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT department FROM employees \
             WHERE department IS NOT NULL AND department != '' ORDER BY department",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(department,)| department).collect())
    }

    pub async fn distinct_designations(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT designation FROM employees \
             WHERE designation IS NOT NULL AND designation != '' ORDER BY designation",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(designation,)| designation).collect())
    }

    /// Employee codes whose status is currently "active", the universe for
    /// attendance reconciliation.
    pub async fn active_employee_codes(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT employee_code FROM employees \
             WHERE LOWER(status) = 'active' AND employee_code IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(code,)| code).collect())
    }
}
