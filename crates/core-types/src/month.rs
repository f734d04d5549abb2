use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical calendar month, stored as a flat month count (`year * 12 +
/// month0`).
///
/// The valuation ledger is an arena addressed by offsets between
/// `MonthIndex` values, which keeps month arithmetic exact and makes the
/// "no two entries share a month" invariant structural instead of relying on
/// string date keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MonthIndex(i32);

impl MonthIndex {
    /// The month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.year() * 12 + date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.0.div_euclid(12)
    }

    /// Calendar month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.0.rem_euclid(12) as u32 + 1
    }

    /// The canonical month-end date used as this month's ledger key.
    pub fn month_end(&self) -> NaiveDate {
        let (year, month) = (self.year(), self.month());
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        // The first day of the following month always exists, and so does its
        // predecessor.
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .expect("month arithmetic stays within chrono's date range")
    }

    /// Signed number of months from `other` to `self`.
    pub fn offset_from(&self, other: MonthIndex) -> i32 {
        self.0 - other.0
    }

    /// The month `months` after (or before, if negative) this one.
    pub fn plus(&self, months: i32) -> Self {
        Self(self.0 + months)
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Parses an event date as supplied by the document store.
///
/// Upstream records carry dates as `YYYY-MM-DD` strings; anything else is an
/// [`CoreError::InvalidDate`] so the aggregator can skip and report the record.
pub fn parse_event_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_end_handles_year_boundary() {
        let dec = MonthIndex::from_date(NaiveDate::from_ymd_opt(2023, 12, 5).unwrap());
        assert_eq!(dec.month_end(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let feb = MonthIndex::from_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.month_end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn offsets_round_trip_across_years() {
        let a = MonthIndex::from_date(NaiveDate::from_ymd_opt(2022, 11, 30).unwrap());
        let b = MonthIndex::from_date(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(b.offset_from(a), 3);
        assert_eq!(a.plus(3), b);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_event_date("2023-01-15").is_ok());
        let err = parse_event_date("15/01/2023").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDate {
                value: "15/01/2023".to_string()
            }
        );
    }
}
