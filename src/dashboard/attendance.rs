//! Attendance feed from biometric access-control devices
//!
//! Each configured device is asked for today's access logs over HTTP, in
//! parallel. A device that is down, slow, or talking garbage contributes an
//! empty log list; attendance is strictly best-effort and must never take
//! the dashboard down with it.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AttendanceConfig;

const DEVICE_LOG_PATH: &str = "/api/v2/attendance";

/// One access log line from a device. Lives only for the duration of a
/// single aggregation call.
#[derive(Debug, Clone)]
pub struct AttendanceLogEntry {
    pub employee_code: String,
    pub device_serial: String,
    pub logged_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: i64,
    pub absent: i64,
    pub total_active: i64,
    pub as_of_date: String,
}

impl AttendanceSummary {
    /// The zeroed summary reported when the active-employee universe
    /// cannot be established.
    pub fn unavailable(as_of: NaiveDate) -> Self {
        Self {
            present: 0,
            absent: 0,
            total_active: 0,
            as_of_date: as_of.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeviceLogResponse {
    #[serde(default)]
    logs: Vec<DeviceLogRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceLogRecord {
    #[serde(default)]
    employee_code: Option<String>,
    #[serde(default)]
    log_date: Option<String>,
}

/// HTTP client for the device gateway. Endpoints and the API key are
/// injected configuration so tests can point it at a fake gateway.
#[derive(Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    config: AttendanceConfig,
}

impl DeviceClient {
    pub fn new(config: AttendanceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn device_count(&self) -> usize {
        self.config.device_serials.len()
    }

    /// Fetch the given day's logs from every configured device in
    /// parallel. Per-device failures degrade to an empty list.
    pub async fn fetch_logs(&self, day: NaiveDate) -> Vec<AttendanceLogEntry> {
        let fetches = self.config.device_serials.iter().map(|serial| async move {
            match self.fetch_device_logs(serial, day).await {
                Ok(logs) => logs,
                Err(err) => {
                    warn!(serial = %serial, error = %err, "device log fetch failed");
                    Vec::new()
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    async fn fetch_device_logs(
        &self,
        serial: &str,
        day: NaiveDate,
    ) -> Result<Vec<AttendanceLogEntry>, reqwest::Error> {
        let date = day.format("%Y-%m-%d").to_string();
        let url = format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            DEVICE_LOG_PATH
        );

        let response = self
            .http
            .get(url)
            .query(&[
                ("apiKey", self.config.api_key.as_str()),
                ("serialNumber", serial),
                ("fromDate", date.as_str()),
                ("toDate", date.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: DeviceLogResponse = response.json().await?;
        Ok(body
            .logs
            .into_iter()
            .filter_map(|record| {
                record.employee_code.map(|employee_code| AttendanceLogEntry {
                    employee_code,
                    device_serial: serial.to_string(),
                    logged_at: record.log_date,
                })
            })
            .collect())
    }
}

/// Cross-reference device logs against the active personnel universe.
/// Identity-keyed, so duplicate punches and log ordering are irrelevant.
pub fn reconcile(
    active_codes: &[String],
    logs: &[AttendanceLogEntry],
    as_of: NaiveDate,
) -> AttendanceSummary {
    let active: HashSet<&str> = active_codes.iter().map(String::as_str).collect();
    let logged: HashSet<&str> = logs.iter().map(|entry| entry.employee_code.as_str()).collect();

    let total_active = active.len() as i64;
    let present = active.intersection(&logged).count() as i64;

    AttendanceSummary {
        present,
        absent: total_active - present,
        total_active,
        as_of_date: as_of.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn active(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|code| code.to_string()).collect()
    }

    fn entry(code: &str, serial: &str) -> AttendanceLogEntry {
        AttendanceLogEntry {
            employee_code: code.to_string(),
            device_serial: serial.to_string(),
            logged_at: None,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn client_for(endpoint: String, serials: &[&str]) -> DeviceClient {
        DeviceClient::new(AttendanceConfig {
            endpoint,
            api_key: "test-key".to_string(),
            device_serials: serials.iter().map(|s| s.to_string()).collect(),
            timeout_secs: 2,
        })
        .unwrap()
    }

    #[test]
    fn present_and_absent_partition_the_active_set() {
        let summary = reconcile(
            &active(&["E1", "E2", "E3"]),
            &[entry("E1", "A"), entry("E3", "A"), entry("E9", "B")],
            day(),
        );
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.total_active, 3);
        assert_eq!(summary.present + summary.absent, summary.total_active);
    }

    #[test]
    fn duplicate_punches_count_once() {
        let summary = reconcile(
            &active(&["E1", "E2"]),
            &[entry("E1", "A"), entry("E1", "B"), entry("E1", "A")],
            day(),
        );
        assert_eq!(summary.present, 1);
        assert_eq!(summary.absent, 1);
    }

    #[test]
    fn no_logs_means_everyone_absent() {
        let summary = reconcile(&active(&["E1", "E2"]), &[], day());
        assert_eq!(summary.present, 0);
        assert_eq!(summary.absent, 2);
        assert_eq!(summary.as_of_date, "2024-03-15");
    }

    #[tokio::test]
    async fn one_failing_device_does_not_block_the_rest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/attendance"))
            .and(query_param("serialNumber", "DEV-A"))
            .and(query_param("fromDate", "2024-03-15"))
            .and(query_param("toDate", "2024-03-15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "logs": [
                    { "employeeCode": "E1", "logDate": "2024-03-15 08:58:02" },
                    { "employeeCode": "E2", "logDate": "2024-03-15 09:12:44" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/attendance"))
            .and(query_param("serialNumber", "DEV-B"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(server.uri(), &["DEV-A", "DEV-B"]);
        let logs = client.fetch_logs(day()).await;
        let summary = reconcile(&active(&["E1", "E2", "E3"]), &logs, day());

        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
    }

    #[tokio::test]
    async fn all_devices_failing_yields_zero_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(server.uri(), &["DEV-A", "DEV-B"]);
        let logs = client.fetch_logs(day()).await;
        assert!(logs.is_empty());

        let summary = reconcile(&active(&["E1", "E2", "E3"]), &logs, day());
        assert_eq!(summary.present, 0);
        assert_eq!(summary.absent, 3);
    }

    #[tokio::test]
    async fn malformed_device_payload_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(server.uri(), &["DEV-A"]);
        assert!(client.fetch_logs(day()).await.is_empty());
    }

    #[tokio::test]
    async fn entries_without_employee_codes_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/attendance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "logs": [
                    { "employeeCode": "E1" },
                    { "logDate": "2024-03-15 10:00:00" }
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(server.uri(), &["DEV-A"]);
        let logs = client.fetch_logs(day()).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].employee_code, "E1");
        assert_eq!(logs[0].device_serial, "DEV-A");
    }
}
