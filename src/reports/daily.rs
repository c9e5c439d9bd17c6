//! Daily activity buckets
//!
//! Groups one student's attendance, grades and payments by local calendar
//! day. Both the profile history (newest first) and the monthly report
//! (chronological) are built from this grouping.
//!
//! A timestamp's day is its date in the aggregator's time zone, never a UTC
//! truncation: `2024-03-05T22:30:00Z` belongs to March 6th in UTC+2.
//! Entries whose date cannot be read are left out.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::{GradeRecord, MonthFilter, PaymentRecord, RecordDate, Student};

use super::summary::Summary;

/// Order of the produced buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOrder {
    /// Oldest day first
    Ascending,
    /// Newest day first
    Descending,
}

/// Everything that happened on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub attendance: bool,
    pub grades: Vec<GradeRecord>,
    pub payments: Vec<PaymentRecord>,
}

impl DailyBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            attendance: false,
            grades: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// `YYYY-MM-DD`
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Builds day buckets and summaries in a given time zone
#[derive(Debug, Clone)]
pub struct ReportAggregator<Tz: TimeZone = Local> {
    tz: Tz,
}

impl ReportAggregator<Local> {
    /// Aggregator for the system time zone
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl Default for ReportAggregator<Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl<Tz: TimeZone> ReportAggregator<Tz> {
    /// Aggregator that reads grade and payment timestamps in `tz`
    ///
    /// Attendance is already a set of calendar days when the document loads,
    /// so attendance entries keep their day whatever zone is given here.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Group a student's in-window events by day
    ///
    /// Days with no events are never produced, so a student with no history
    /// or a month with no activity yields an empty list.
    pub fn build_daily_buckets(
        &self,
        student: &Student,
        filter: MonthFilter,
        order: BucketOrder,
    ) -> Vec<DailyBucket> {
        let mut days: BTreeMap<NaiveDate, DailyBucket> = BTreeMap::new();

        for day in student.attendance.iter().filter(|d| filter.matches(*d)) {
            days.entry(day)
                .or_insert_with(|| DailyBucket::new(day))
                .attendance = true;
        }

        for grade in &student.grades {
            if let Some(day) = self.day_of(&grade.date, filter) {
                days.entry(day)
                    .or_insert_with(|| DailyBucket::new(day))
                    .grades
                    .push(grade.clone());
            }
        }

        for payment in &student.payments {
            if let Some(day) = self.day_of(&payment.date, filter) {
                days.entry(day)
                    .or_insert_with(|| DailyBucket::new(day))
                    .payments
                    .push(payment.clone());
            }
        }

        let buckets = days.into_values();
        match order {
            BucketOrder::Ascending => buckets.collect(),
            BucketOrder::Descending => buckets.rev().collect(),
        }
    }

    /// Totals over one student's in-window events
    pub fn summarize(&self, student: &Student, filter: MonthFilter) -> Summary {
        let mut summary = Summary {
            attendance_days: student.attendance.iter().filter(|d| filter.matches(*d)).count(),
            ..Summary::default()
        };

        for grade in &student.grades {
            if self.day_of(&grade.date, filter).is_some() {
                summary.grade_count += 1;
                summary.score_total += grade.score.value();
                summary.max_total += grade.max.value();
            }
        }

        for payment in &student.payments {
            if self.day_of(&payment.date, filter).is_some() {
                summary.payment_count += 1;
                summary.payments_total += payment.amount();
            }
        }

        summary
    }

    /// Combined totals over several students
    pub fn summarize_all<'a, I>(&self, students: I, filter: MonthFilter) -> Summary
    where
        I: IntoIterator<Item = &'a Student>,
    {
        students
            .into_iter()
            .map(|s| self.summarize(s, filter))
            .sum()
    }

    fn day_of(&self, date: &RecordDate, filter: MonthFilter) -> Option<NaiveDate> {
        date.day_in(&self.tz).filter(|d| filter.matches(*d))
    }
}
