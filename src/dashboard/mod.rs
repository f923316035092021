//! Dashboard aggregation
//!
//! The one entry point the HTTP layer consumes: a fresh snapshot per call,
//! merged from the six record stores and the device attendance feed. The
//! relational side is all-or-nothing; attendance is best-effort and can
//! only ever degrade to zeros.

pub mod attendance;
pub mod capabilities;
pub mod months;
pub mod queries;

use std::collections::HashMap;
use std::future::Future;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::db::Database;
use crate::error::ApiError;

use attendance::{AttendanceSummary, DeviceClient};
use capabilities::SchemaCapabilities;
use months::{month_window, window_start, MonthBucket, MONTH_WINDOW};
use queries::{DesignationCount, EmployeeSummary, MonthAmountRows, MonthRows, StatusCount};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlowPoint {
    pub month: String,
    pub hired: i64,
    pub left: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCountPoint {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpendPoint {
    pub month: String,
    pub amount: f64,
}

/// Snapshot plus trend for one record store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOverview {
    pub status_counts: Vec<StatusCount>,
    pub monthly: Vec<MonthlyCountPoint>,
}

/// Ticket bookings trend is money per month, not row counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketOverview {
    pub status_counts: Vec<StatusCount>,
    pub monthly_spend: Vec<MonthlySpendPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: EmployeeSummary,
    pub status_distribution: Vec<StatusCount>,
    pub monthly_hiring_vs_attrition: Vec<MonthlyFlowPoint>,
    pub designation_counts: Vec<DesignationCount>,
    pub leave_requests: StoreOverview,
    pub travel_requests: StoreOverview,
    pub ticket_bookings: TicketOverview,
    pub candidates: StoreOverview,
    pub plant_visitors: StoreOverview,
    pub attendance: AttendanceSummary,
}

pub async fn dashboard_report(
    db: &Database,
    devices: &DeviceClient,
) -> Result<DashboardReport, ApiError> {
    let caps = SchemaCapabilities::probe(db.pool()).await;
    let window = month_window(MONTH_WINDOW);
    let start = window_start(MONTH_WINDOW);

    let (
        summary,
        status_distribution,
        designation_counts,
        hires,
        attrition,
        leave_statuses,
        leave_months,
        travel_statuses,
        travel_months,
        ticket_statuses,
        ticket_spend,
        candidate_statuses,
        resume_months,
        visitor_statuses,
        visitor_months,
    ) = tokio::try_join!(
        db.employee_summary(caps.employees_updated_at),
        db.employee_status_distribution(),
        db.designation_counts(),
        when_present(caps.employees_created_at, db.monthly_hires(start)),
        when_present(caps.employees_updated_at, db.monthly_attrition(start)),
        db.leave_status_counts(),
        when_present(caps.leave_created_at, db.monthly_leave_requests(start)),
        db.travel_status_counts(),
        when_present(caps.travel_created_at, db.monthly_travel_requests(start)),
        db.ticket_status_counts(),
        when_present(caps.tickets_created_at, db.monthly_ticket_spend(start)),
        db.candidate_status_counts(),
        when_present(caps.resumes_created_at, db.monthly_resumes(start)),
        db.visitor_status_counts(),
        when_present(caps.visitors_created_at, db.monthly_visitors(start)),
    )
    .map_err(|err| ApiError::Internal(format!("Failed to fetch dashboard stats: {err}")))?;

    // Attendance is seeded by the active personnel universe; losing that
    // universe zeroes the attendance card but never the report.
    let today = Utc::now().date_naive();
    let attendance = match db.active_employee_codes().await {
        Ok(codes) => {
            let logs = devices.fetch_logs(today).await;
            attendance::reconcile(&codes, &logs, today)
        }
        Err(err) => {
            warn!(error = %err, "active employee lookup failed, reporting attendance as unavailable");
            AttendanceSummary::unavailable(today)
        }
    };

    Ok(DashboardReport {
        summary,
        status_distribution,
        monthly_hiring_vs_attrition: hiring_vs_attrition(&window, hires, attrition),
        designation_counts,
        leave_requests: StoreOverview {
            status_counts: leave_statuses,
            monthly: zero_filled_counts(&window, leave_months),
        },
        travel_requests: StoreOverview {
            status_counts: travel_statuses,
            monthly: zero_filled_counts(&window, travel_months),
        },
        ticket_bookings: TicketOverview {
            status_counts: ticket_statuses,
            monthly_spend: zero_filled_spend(&window, ticket_spend),
        },
        candidates: StoreOverview {
            status_counts: candidate_statuses,
            monthly: zero_filled_counts(&window, resume_months),
        },
        plant_visitors: StoreOverview {
            status_counts: visitor_statuses,
            monthly: zero_filled_counts(&window, visitor_months),
        },
        attendance,
    })
}

/// Issue the trend query only when the schema has the timestamp column;
/// otherwise report no rows without touching the store.
async fn when_present<T, F>(enabled: bool, query: F) -> Result<Vec<T>, sqlx::Error>
where
    F: Future<Output = Result<Vec<T>, sqlx::Error>>,
{
    if enabled {
        query.await
    } else {
        Ok(Vec::new())
    }
}

/// Merge raw month rows onto the window, keyed by "YYYY-MM"; buckets the
/// store has no rows for come out as 0.
fn zero_filled_counts(window: &[MonthBucket], rows: MonthRows) -> Vec<MonthlyCountPoint> {
    let by_key: HashMap<String, i64> = rows.into_iter().collect();
    window
        .iter()
        .map(|bucket| MonthlyCountPoint {
            month: bucket.label.clone(),
            count: by_key.get(&bucket.key).copied().unwrap_or(0),
        })
        .collect()
}

fn zero_filled_spend(window: &[MonthBucket], rows: MonthAmountRows) -> Vec<MonthlySpendPoint> {
    let by_key: HashMap<String, f64> = rows.into_iter().collect();
    window
        .iter()
        .map(|bucket| MonthlySpendPoint {
            month: bucket.label.clone(),
            amount: by_key.get(&bucket.key).copied().unwrap_or(0.0),
        })
        .collect()
}

fn hiring_vs_attrition(
    window: &[MonthBucket],
    hires: MonthRows,
    attrition: MonthRows,
) -> Vec<MonthlyFlowPoint> {
    let hired_by_key: HashMap<String, i64> = hires.into_iter().collect();
    let left_by_key: HashMap<String, i64> = attrition.into_iter().collect();
    window
        .iter()
        .map(|bucket| MonthlyFlowPoint {
            month: bucket.label.clone(),
            hired: hired_by_key.get(&bucket.key).copied().unwrap_or(0),
            left: left_by_key.get(&bucket.key).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Vec<MonthBucket> {
        ["2023-12", "2024-01", "2024-02"]
            .iter()
            .map(|key| MonthBucket {
                key: key.to_string(),
                label: key.to_string(),
            })
            .collect()
    }

    #[test]
    fn merge_zero_fills_missing_buckets() {
        let points = zero_filled_counts(&window(), vec![("2024-01".to_string(), 4)]);
        let counts: Vec<i64> = points.iter().map(|point| point.count).collect();
        assert_eq!(counts, [0, 4, 0]);
    }

    #[test]
    fn merge_of_empty_rows_still_covers_every_bucket() {
        let points = zero_filled_counts(&window(), Vec::new());
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|point| point.count == 0));
    }

    #[test]
    fn merge_is_keyed_not_ordered() {
        let shuffled = vec![
            ("2024-02".to_string(), 9),
            ("2023-12".to_string(), 1),
            ("2024-01".to_string(), 5),
        ];
        let points = zero_filled_counts(&window(), shuffled);
        let counts: Vec<i64> = points.iter().map(|point| point.count).collect();
        assert_eq!(counts, [1, 5, 9]);
    }

    #[test]
    fn rows_outside_the_window_are_dropped() {
        let points = zero_filled_counts(
            &window(),
            vec![("2022-06".to_string(), 7), ("2024-02".to_string(), 2)],
        );
        let counts: Vec<i64> = points.iter().map(|point| point.count).collect();
        assert_eq!(counts, [0, 0, 2]);
    }

    #[test]
    fn hiring_and_attrition_merge_independently() {
        let points = hiring_vs_attrition(
            &window(),
            vec![("2023-12".to_string(), 3)],
            vec![("2024-02".to_string(), 1)],
        );
        assert_eq!(points[0].hired, 3);
        assert_eq!(points[0].left, 0);
        assert_eq!(points[2].hired, 0);
        assert_eq!(points[2].left, 1);
    }

    #[test]
    fn spend_merge_defaults_to_zero_amounts() {
        let points = zero_filled_spend(&window(), vec![("2024-01".to_string(), 1250.5)]);
        assert_eq!(points[0].amount, 0.0);
        assert_eq!(points[1].amount, 1250.5);
    }
}
