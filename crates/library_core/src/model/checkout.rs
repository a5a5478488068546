//! Checkout record and overdue projection.
//!
//! # Invariants
//! - `due_date` is a naive local timestamp, persisted as ISO-8601 text
//!   (`2024-01-01T00:00:00`).
//! - Overdue means `due_date < as_of`, strictly.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An active loan of one book to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRecord {
    /// Not checked against the user directory.
    pub user_id: String,
    /// Not checked against the book catalog.
    pub isbn: String,
    pub due_date: NaiveDateTime,
}

impl CheckoutRecord {
    pub fn new(
        user_id: impl Into<String>,
        isbn: impl Into<String>,
        due_date: NaiveDateTime,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            isbn: isbn.into(),
            due_date,
        }
    }

    pub fn is_overdue(&self, as_of: NaiveDateTime) -> bool {
        self.due_date < as_of
    }

    /// Whole days elapsed past the due date, floored; negative when not yet due.
    pub fn days_overdue(&self, as_of: NaiveDateTime) -> i64 {
        let elapsed = as_of - self.due_date;
        let days = elapsed.num_days();
        // num_days truncates toward zero; floor partial negative days.
        if elapsed < chrono::Duration::days(days) {
            days - 1
        } else {
            days
        }
    }
}

impl Display for CheckoutRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ISBN: {}, User ID: {}, Due Date: {}",
            self.isbn,
            self.user_id,
            self.due_date.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}

/// Overdue record paired with its whole-day lateness at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueEntry {
    pub record: CheckoutRecord,
    pub days_overdue: i64,
}

impl Display for OverdueEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ISBN: {}, User ID: {}, Overdue by: {} days",
            self.record.isbn, self.record.user_id, self.days_overdue
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CheckoutRecord;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn overdue_is_strictly_after_due_date() {
        let record = CheckoutRecord::new("u1", "111", at(1, 0));
        assert!(!record.is_overdue(at(1, 0)));
        assert!(record.is_overdue(at(1, 1)));
    }

    #[test]
    fn days_overdue_floors_partial_days() {
        let record = CheckoutRecord::new("u1", "111", at(1, 0));
        assert_eq!(record.days_overdue(at(1, 23)), 0);
        assert_eq!(record.days_overdue(at(5, 0)), 4);
        assert_eq!(record.days_overdue(at(5, 12)), 4);
    }

    #[test]
    fn days_overdue_is_negative_before_due_date() {
        let record = CheckoutRecord::new("u1", "111", at(5, 0));
        assert_eq!(record.days_overdue(at(4, 12)), -1);
        assert_eq!(record.days_overdue(at(3, 0)), -2);
    }

    #[test]
    fn due_date_serializes_as_iso_text() {
        let record = CheckoutRecord::new("u1", "111", at(1, 0));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["due_date"], "2024-01-01T00:00:00");
    }

    #[test]
    fn due_date_accepts_fractional_seconds() {
        let record: CheckoutRecord = serde_json::from_str(
            r#"{"user_id":"u1","isbn":"111","due_date":"2024-01-15T10:30:00.123456"}"#,
        )
        .unwrap();
        assert_eq!(record.due_date.date(), at(15, 0).date());
    }
}
