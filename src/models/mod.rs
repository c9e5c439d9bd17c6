//! Core data models for roster
//!
//! This module contains the data structures of the student document: the
//! student record itself and the attendance, grade and payment events
//! attached to it, plus the small value types they are built from.

pub mod attendance;
pub mod code;
pub mod money;
pub mod month;
pub mod numeric;
pub mod record_date;
pub mod records;
pub mod stage;
pub mod student;

pub use attendance::AttendanceDays;
pub use code::{CodeError, StudentCode, CODE_ATTEMPTS};
pub use money::{Money, MoneyParseError};
pub use month::{month_name, MonthFilter};
pub use numeric::NumericField;
pub use record_date::{resolve_local, RecordDate};
pub use records::{GradeKind, GradeRecord, PaymentRecord};
pub use stage::Stage;
pub use student::{now_timestamp, Student};
