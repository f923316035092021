//! Domain stat queriers
//!
//! One set of read-only aggregate queries per record store. Every snapshot
//! classifies rows through a single CASE expression, so the buckets are
//! mutually exclusive and always sum to the store's row count. Trend
//! queries are only issued by the aggregator when the schema probe confirms
//! the timestamp column; the queries themselves assume it exists.
//!
//! The classification patterns and the designation limit are operational
//! constants, bound or embedded as literals, never spliced from input.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;

/// Status text counting as attrition, matched case-insensitively.
pub const ATTRITION_PATTERN: &str = "resign|left|terminated|separate";

/// Ranked designation breakdown size.
const TOP_DESIGNATIONS: i64 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub total_employees: i64,
    pub active_employees: i64,
    pub resigned_employees: i64,
    pub left_this_month: i64,
}

/// One status bucket of a store snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignationCount {
    pub designation: String,
    pub employees: i64,
}

/// Raw month rows as (key "YYYY-MM", value); zero-filling against the
/// window happens in the aggregator merge.
pub type MonthRows = Vec<(String, i64)>;
pub type MonthAmountRows = Vec<(String, f64)>;

const EMPLOYEE_SUMMARY: &str = r#"
SELECT
    COUNT(*)::int8 AS total_employees,
    COUNT(*) FILTER (WHERE LOWER(status) = 'active')::int8 AS active_employees,
    COUNT(*) FILTER (
        WHERE status IS NOT NULL
          AND status ~* $1
    )::int8 AS resigned_employees,
    COUNT(*) FILTER (
        WHERE status IS NOT NULL
          AND status ~* $1
          AND updated_at >= date_trunc('month', CURRENT_DATE)
    )::int8 AS left_this_month
FROM employees
"#;

// Variant for schemas without updated_at: left-this-month is pinned to 0.
const EMPLOYEE_SUMMARY_NO_UPDATED_AT: &str = r#"
SELECT
    COUNT(*)::int8 AS total_employees,
    COUNT(*) FILTER (WHERE LOWER(status) = 'active')::int8 AS active_employees,
    COUNT(*) FILTER (
        WHERE status IS NOT NULL
          AND status ~* $1
    )::int8 AS resigned_employees,
    0::int8 AS left_this_month
FROM employees
"#;

const EMPLOYEE_STATUS_DISTRIBUTION: &str = r#"
SELECT
    COALESCE(NULLIF(TRIM(status), ''), 'Unknown') AS label,
    COUNT(*)::int8 AS value
FROM employees
GROUP BY 1
ORDER BY value DESC, label ASC
"#;

const DESIGNATION_COUNTS: &str = r#"
SELECT
    COALESCE(NULLIF(TRIM(designation), ''), 'Unassigned') AS designation,
    COUNT(*)::int8 AS employees
FROM employees
GROUP BY 1
ORDER BY employees DESC, designation ASC
LIMIT $1
"#;

const MONTHLY_HIRES: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', created_at), 'YYYY-MM') AS month,
    COUNT(*)::int8 AS hired
FROM employees
WHERE created_at IS NOT NULL
  AND created_at >= $1
GROUP BY 1
ORDER BY 1
"#;

const MONTHLY_ATTRITION: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', updated_at), 'YYYY-MM') AS month,
    COUNT(*)::int8 AS left_count
FROM employees
WHERE status IS NOT NULL
  AND status ~* $2
  AND updated_at IS NOT NULL
  AND updated_at >= $1
GROUP BY 1
ORDER BY 1
"#;

const LEAVE_STATUS_COUNTS: &str = r#"
SELECT
    CASE
        WHEN approved_by_status ~* 'approv' THEN 'Approved'
        WHEN approved_by_status ~* 'reject|denied|declin' THEN 'Rejected'
        ELSE 'Pending'
    END AS label,
    COUNT(*)::int8 AS value
FROM leave_request
GROUP BY 1
ORDER BY value DESC, label ASC
"#;

const TRAVEL_STATUS_COUNTS: &str = r#"
SELECT
    CASE
        WHEN request_status ~* 'approv' THEN 'Approved'
        WHEN request_status ~* 'reject|denied|declin' THEN 'Rejected'
        ELSE 'Pending'
    END AS label,
    COUNT(*)::int8 AS value
FROM request
GROUP BY 1
ORDER BY value DESC, label ASC
"#;

const TICKET_STATUS_COUNTS: &str = r#"
SELECT
    CASE
        WHEN status ~* 'book|confirm|done' THEN 'Booked'
        WHEN status ~* 'cancel' THEN 'Cancelled'
        ELSE 'Pending'
    END AS label,
    COUNT(*)::int8 AS value
FROM ticket_book
GROUP BY 1
ORDER BY value DESC, label ASC
"#;

// Pipeline stages in precedence order: the furthest stage a candidate has
// reached wins.
const CANDIDATE_STATUS_COUNTS: &str = r#"
SELECT
    CASE
        WHEN joined_status ~* 'join|yes' THEN 'Joined'
        WHEN candidate_status = 'Selected' THEN 'Selected'
        WHEN COALESCE(TRIM(interviewer_status), '') != '' THEN 'Interviewed'
        ELSE 'In Pipeline'
    END AS label,
    COUNT(*)::int8 AS value
FROM resume
GROUP BY 1
ORDER BY value DESC, label ASC
"#;

const VISITOR_STATUS_COUNTS: &str = r#"
SELECT
    CASE
        WHEN request_status ~* 'approv' THEN 'Approved'
        WHEN request_status ~* 'reject|denied|declin' THEN 'Rejected'
        ELSE 'Pending'
    END AS label,
    COUNT(*)::int8 AS value
FROM plant_visitor
GROUP BY 1
ORDER BY value DESC, label ASC
"#;

const MONTHLY_LEAVE_REQUESTS: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', created_at), 'YYYY-MM') AS month,
    COUNT(*)::int8 AS requests
FROM leave_request
WHERE created_at IS NOT NULL
  AND created_at >= $1
GROUP BY 1
ORDER BY 1
"#;

const MONTHLY_TRAVEL_REQUESTS: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', created_at), 'YYYY-MM') AS month,
    COUNT(*)::int8 AS requests
FROM request
WHERE created_at IS NOT NULL
  AND created_at >= $1
GROUP BY 1
ORDER BY 1
"#;

const MONTHLY_TICKET_SPEND: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', created_at), 'YYYY-MM') AS month,
    COALESCE(SUM(total_amount), 0)::float8 AS spend
FROM ticket_book
WHERE created_at IS NOT NULL
  AND created_at >= $1
GROUP BY 1
ORDER BY 1
"#;

const MONTHLY_RESUMES: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', created_at), 'YYYY-MM') AS month,
    COUNT(*)::int8 AS received
FROM resume
WHERE created_at IS NOT NULL
  AND created_at >= $1
GROUP BY 1
ORDER BY 1
"#;

const MONTHLY_VISITORS: &str = r#"
SELECT
    TO_CHAR(date_trunc('month', created_at), 'YYYY-MM') AS month,
    COUNT(*)::int8 AS visits
FROM plant_visitor
WHERE created_at IS NOT NULL
  AND created_at >= $1
GROUP BY 1
ORDER BY 1
"#;

impl Database {
    pub async fn employee_summary(
        &self,
        has_updated_at: bool,
    ) -> Result<EmployeeSummary, sqlx::Error> {
        let sql = if has_updated_at {
            EMPLOYEE_SUMMARY
        } else {
            EMPLOYEE_SUMMARY_NO_UPDATED_AT
        };
        let row: (i64, i64, i64, i64) = sqlx::query_as(sql)
            .bind(ATTRITION_PATTERN)
            .fetch_one(self.pool())
            .await?;
        Ok(EmployeeSummary {
            total_employees: row.0,
            active_employees: row.1,
            resigned_employees: row.2,
            left_this_month: row.3,
        })
    }

    pub async fn employee_status_distribution(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        self.status_counts(EMPLOYEE_STATUS_DISTRIBUTION).await
    }

    pub async fn designation_counts(&self) -> Result<Vec<DesignationCount>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(DESIGNATION_COUNTS)
            .bind(TOP_DESIGNATIONS)
            .fetch_all(self.pool())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(designation, employees)| DesignationCount {
                designation,
                employees,
            })
            .collect())
    }

    pub async fn monthly_hires(&self, window_start: NaiveDate) -> Result<MonthRows, sqlx::Error> {
        sqlx::query_as(MONTHLY_HIRES)
            .bind(window_start)
            .fetch_all(self.pool())
            .await
    }

    pub async fn monthly_attrition(
        &self,
        window_start: NaiveDate,
    ) -> Result<MonthRows, sqlx::Error> {
        sqlx::query_as(MONTHLY_ATTRITION)
            .bind(window_start)
            .bind(ATTRITION_PATTERN)
            .fetch_all(self.pool())
            .await
    }

    pub async fn leave_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        self.status_counts(LEAVE_STATUS_COUNTS).await
    }

    pub async fn travel_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        self.status_counts(TRAVEL_STATUS_COUNTS).await
    }

    pub async fn ticket_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        self.status_counts(TICKET_STATUS_COUNTS).await
    }

    pub async fn candidate_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        self.status_counts(CANDIDATE_STATUS_COUNTS).await
    }

    pub async fn visitor_status_counts(&self) -> Result<Vec<StatusCount>, sqlx::Error> {
        self.status_counts(VISITOR_STATUS_COUNTS).await
    }

    pub async fn monthly_leave_requests(
        &self,
        window_start: NaiveDate,
    ) -> Result<MonthRows, sqlx::Error> {
        self.month_rows(MONTHLY_LEAVE_REQUESTS, window_start).await
    }

    pub async fn monthly_travel_requests(
        &self,
        window_start: NaiveDate,
    ) -> Result<MonthRows, sqlx::Error> {
        self.month_rows(MONTHLY_TRAVEL_REQUESTS, window_start).await
    }

    pub async fn monthly_ticket_spend(
        &self,
        window_start: NaiveDate,
    ) -> Result<MonthAmountRows, sqlx::Error> {
        sqlx::query_as(MONTHLY_TICKET_SPEND)
            .bind(window_start)
            .fetch_all(self.pool())
            .await
    }

    pub async fn monthly_resumes(&self, window_start: NaiveDate) -> Result<MonthRows, sqlx::Error> {
        self.month_rows(MONTHLY_RESUMES, window_start).await
    }

    pub async fn monthly_visitors(
        &self,
        window_start: NaiveDate,
    ) -> Result<MonthRows, sqlx::Error> {
        self.month_rows(MONTHLY_VISITORS, window_start).await
    }

    async fn status_counts(&self, sql: &str) -> Result<Vec<StatusCount>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(sql).fetch_all(self.pool()).await?;
        Ok(rows
            .into_iter()
            .map(|(label, value)| StatusCount { label, value })
            .collect())
    }

    async fn month_rows(
        &self,
        sql: &str,
        window_start: NaiveDate,
    ) -> Result<MonthRows, sqlx::Error> {
        sqlx::query_as(sql)
            .bind(window_start)
            .fetch_all(self.pool())
            .await
    }
}
