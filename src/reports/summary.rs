//! Month summaries
//!
//! Totals over a student's in-window events. Score aggregates keep the raw
//! numerator and denominator so summaries of several students combine
//! before the division.

use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::models::Money;

/// Attendance, grade and payment totals for a window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    /// Distinct days attended
    pub attendance_days: usize,
    pub grade_count: usize,
    /// Sum of scores
    pub score_total: f64,
    /// Sum of maxima
    pub max_total: f64,
    pub payment_count: usize,
    pub payments_total: Money,
}

impl Summary {
    /// Σscore / Σmax as a rounded percentage, 0 when nothing was graded
    pub fn average_percent(&self) -> u32 {
        if self.max_total > 0.0 {
            (self.score_total / self.max_total * 100.0).round().max(0.0) as u32
        } else {
            0
        }
    }

    /// Check whether anything happened in the window
    pub fn is_empty(&self) -> bool {
        self.attendance_days == 0 && self.grade_count == 0 && self.payment_count == 0
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.attendance_days += other.attendance_days;
        self.grade_count += other.grade_count;
        self.score_total += other.score_total;
        self.max_total += other.max_total;
        self.payment_count += other.payment_count;
        self.payments_total += other.payments_total;
    }
}

impl Add for Summary {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl std::iter::Sum for Summary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
