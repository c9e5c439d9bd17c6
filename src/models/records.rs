//! Grade and payment records
//!
//! Both are append-only events attached to a student and stamped with the
//! day they were recorded for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::numeric::NumericField;
use super::record_date::RecordDate;

/// Kind of graded assessment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GradeKind {
    /// Short in-class quiz
    Quiz,
    /// End-of-month exam
    Monthly,
    /// Any other label found in stored data
    Other(String),
}

impl GradeKind {
    pub fn code(&self) -> &str {
        match self {
            GradeKind::Quiz => "quiz",
            GradeKind::Monthly => "monthly",
            GradeKind::Other(s) => s,
        }
    }
}

impl From<String> for GradeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "quiz" => GradeKind::Quiz,
            "monthly" => GradeKind::Monthly,
            _ => GradeKind::Other(s),
        }
    }
}

impl From<GradeKind> for String {
    fn from(kind: GradeKind) -> Self {
        kind.code().to_string()
    }
}

impl FromStr for GradeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiz" => Ok(GradeKind::Quiz),
            "monthly" | "exam" => Ok(GradeKind::Monthly),
            other => Err(format!("Unknown grade type '{}'. Use quiz or monthly", other)),
        }
    }
}

impl fmt::Display for GradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeKind::Quiz => f.write_str("Quiz"),
            GradeKind::Monthly => f.write_str("Monthly exam"),
            GradeKind::Other(s) => f.write_str(s),
        }
    }
}

/// A graded assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(rename = "type")]
    pub kind: GradeKind,

    #[serde(default)]
    pub score: NumericField,

    #[serde(default)]
    pub max: NumericField,

    #[serde(default)]
    pub date: RecordDate,
}

impl GradeRecord {
    pub fn new(kind: GradeKind, score: f64, max: f64, date: RecordDate) -> Self {
        Self {
            kind,
            score: score.into(),
            max: max.into(),
            date,
        }
    }

    /// score / max as a fraction, 0 when max is 0
    pub fn ratio(&self) -> f64 {
        let max = self.max.value();
        if max > 0.0 {
            self.score.value() / max
        } else {
            0.0
        }
    }

    /// Rounded percentage
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round().max(0.0) as u32
    }
}

/// A fee payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub amount: NumericField,

    #[serde(default)]
    pub note: String,

    #[serde(default)]
    pub date: RecordDate,
}

impl PaymentRecord {
    pub fn new(amount: Money, note: impl Into<String>, date: RecordDate) -> Self {
        Self {
            amount: NumericField::Number(amount.minor() as f64 / 100.0),
            note: note.into(),
            date,
        }
    }

    /// The amount paid; non-numeric stored values count as zero
    pub fn amount(&self) -> Money {
        self.amount.money()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_from_document() {
        let grade: GradeRecord = serde_json::from_str(
            r#"{"type":"quiz","score":"8","max":"10","date":"2024-03-05T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(grade.kind, GradeKind::Quiz);
        assert_eq!(grade.percent(), 80);
    }

    #[test]
    fn test_unknown_grade_kind_is_kept() {
        let grade: GradeRecord =
            serde_json::from_str(r#"{"type":"oral","score":5,"max":5,"date":"2024-03-05"}"#).unwrap();
        assert_eq!(grade.kind, GradeKind::Other("oral".into()));
        let json = serde_json::to_value(&grade).unwrap();
        assert_eq!(json["type"], "oral");
    }

    #[test]
    fn test_zero_max_is_zero_percent() {
        let grade = GradeRecord::new(GradeKind::Monthly, 5.0, 0.0, RecordDate::from("2024-03-05"));
        assert_eq!(grade.ratio(), 0.0);
        assert_eq!(grade.percent(), 0);
    }

    #[test]
    fn test_payment_amount_coercion() {
        let payment: PaymentRecord =
            serde_json::from_str(r#"{"amount":"abc","note":"","date":"2024-03-05"}"#).unwrap();
        assert!(payment.amount().is_zero());

        let payment = PaymentRecord::new(Money::from_major(150), "March", RecordDate::from("2024-03-05"));
        assert_eq!(payment.amount(), Money::from_major(150));
    }

    #[test]
    fn test_grade_kind_parse() {
        assert_eq!("Quiz".parse::<GradeKind>().unwrap(), GradeKind::Quiz);
        assert_eq!("monthly".parse::<GradeKind>().unwrap(), GradeKind::Monthly);
        assert!("oral".parse::<GradeKind>().is_err());
    }
}
