//! Storage usage of the student document against the store's quota

use serde::Serialize;

use crate::error::RosterResult;
use crate::models::Student;

/// How much of the quota the roster occupies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StorageUsage {
    /// Size of the compact JSON document, in KB
    pub used_kb: f64,
    pub limit_kb: u64,
}

impl StorageUsage {
    /// Measure the compact serialized size of `students`
    pub fn measure(students: &[Student], limit_kb: u64) -> RosterResult<Self> {
        let bytes = serde_json::to_vec(students)?.len();
        Ok(Self {
            used_kb: bytes as f64 / 1024.0,
            limit_kb,
        })
    }

    /// Percentage of the quota used, capped at 100
    pub fn percent_used(&self) -> f64 {
        if self.limit_kb == 0 {
            return 100.0;
        }
        (self.used_kb / self.limit_kb as f64 * 100.0).min(100.0)
    }

    /// Remaining space in MB (negative once over quota)
    pub fn free_mb(&self) -> f64 {
        (self.limit_kb as f64 - self.used_kb) / 1024.0
    }
}
