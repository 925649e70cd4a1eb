//! Date helpers for the feed query window.
//!
//! The feed accepts `YYYY-MM-D`: the month is zero-padded, the day is not.

use chrono::{Datelike, Days, Local, NaiveDate};

pub fn format_query_date(date: NaiveDate) -> String {
    format!("{}-{:02}-{}", date.year(), date.month(), date.day())
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// `n` calendar days before `date`, saturating at the earliest representable day.
pub fn days_before(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(n)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn today() -> String {
    format_query_date(local_today())
}

pub fn days_ago(n: u32) -> String {
    format_query_date(days_before(local_today(), n))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        Self {
            start: days_before(end, days),
            end,
        }
    }

    pub fn ending_today(days: u32) -> Self {
        Self::ending_at(local_today(), days)
    }

    pub fn start_param(&self) -> String {
        format_query_date(self.start)
    }

    pub fn end_param(&self) -> String {
        format_query_date(self.end)
    }
}
