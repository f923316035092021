//! Calendar month buckets for trend series
//!
//! Buckets are calendar months, not 30-day offsets, so the December to
//! January rollover lands on exact month boundaries.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

/// Number of months covered by every trend series.
pub const MONTH_WINDOW: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// "YYYY-MM", the key trend rows are merged on
    pub key: String,
    /// Human-readable label, e.g. "Oct 2023"
    pub label: String,
}

/// The `n` calendar months ending at the current month, oldest first.
pub fn month_window(n: u32) -> Vec<MonthBucket> {
    month_window_from(Utc::now().date_naive(), n)
}

/// First day of the oldest month in the current window, used as the lower
/// bound for trend queries.
pub fn window_start(n: u32) -> NaiveDate {
    window_start_from(Utc::now().date_naive(), n)
}

fn month_window_from(today: NaiveDate, n: u32) -> Vec<MonthBucket> {
    (0..n)
        .rev()
        .map(|back| {
            let first = first_of_shifted_month(today, back);
            MonthBucket {
                key: first.format("%Y-%m").to_string(),
                label: first.format("%b %Y").to_string(),
            }
        })
        .collect()
}

fn window_start_from(today: NaiveDate, n: u32) -> NaiveDate {
    first_of_shifted_month(today, n.saturating_sub(1))
}

fn first_of_shifted_month(today: NaiveDate, months_back: u32) -> NaiveDate {
    let total = today.year() * 12 + today.month0() as i32 - months_back as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    // First day of a valid (year, month) always exists
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn window_is_ordered_and_ends_at_current_month() {
        let window = month_window_from(date(2024, 3, 15), MONTH_WINDOW);
        let keys: Vec<&str> = window.iter().map(|bucket| bucket.key.as_str()).collect();
        assert_eq!(
            keys,
            ["2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03"]
        );
        for pair in window.windows(2) {
            assert!(pair[0].key < pair[1].key);
        }
    }

    #[test]
    fn labels_carry_month_and_year() {
        let window = month_window_from(date(2024, 3, 1), 2);
        assert_eq!(window[0].label, "Feb 2024");
        assert_eq!(window[1].label, "Mar 2024");
    }

    #[test]
    fn year_rollover_is_exact() {
        let window = month_window_from(date(2024, 1, 31), 3);
        let keys: Vec<&str> = window.iter().map(|bucket| bucket.key.as_str()).collect();
        assert_eq!(keys, ["2023-11", "2023-12", "2024-01"]);
    }

    #[test]
    fn window_length_matches_request() {
        for n in [1, 6, 12, 24] {
            assert_eq!(month_window_from(date(2024, 6, 30), n).len(), n as usize);
        }
    }

    #[test]
    fn window_start_is_first_day_of_oldest_bucket() {
        assert_eq!(
            window_start_from(date(2024, 3, 15), MONTH_WINDOW),
            date(2023, 10, 1)
        );
        assert_eq!(window_start_from(date(2024, 1, 1), 1), date(2024, 1, 1));
    }
}
