//! Educational stage of a student

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The grade level a student belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Prep1,
    Prep2,
    Prep3,
    Sec1,
    Sec2,
    Sec3,
}

impl Stage {
    /// All stages in school order
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Prep1,
            Stage::Prep2,
            Stage::Prep3,
            Stage::Sec1,
            Stage::Sec2,
            Stage::Sec3,
        ]
    }

    /// The stored code ("prep1", "Sec1", ...)
    pub fn code(&self) -> &'static str {
        match self {
            Stage::Prep1 => "prep1",
            Stage::Prep2 => "prep2",
            Stage::Prep3 => "prep3",
            Stage::Sec1 => "Sec1",
            Stage::Sec2 => "Sec2",
            Stage::Sec3 => "Sec3",
        }
    }

    /// Display label ("Prep1", "Sec1", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Prep1 => "Prep1",
            Stage::Prep2 => "Prep2",
            Stage::Prep3 => "Prep3",
            Stage::Sec1 => "Sec1",
            Stage::Sec2 => "Sec2",
            Stage::Sec3 => "Sec3",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Stage::all()
            .iter()
            .copied()
            .find(|stage| stage.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown stage '{}'. Use one of: prep1, prep2, prep3, Sec1, Sec2, Sec3", s))
    }
}

/// Serde adapter for `Option<Stage>` stored as a string where "" means no stage
pub mod optional {
    use super::*;

    pub fn serialize<S: Serializer>(stage: &Option<Stage>, serializer: S) -> Result<S::Ok, S::Error> {
        stage.map(|s| s.code()).unwrap_or("").serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Stage>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| match s.trim() {
            "" => None,
            other => match other.parse() {
                Ok(stage) => Some(stage),
                Err(_) => {
                    tracing::warn!(stage = other, "ignoring unknown stage");
                    None
                }
            },
        }))
    }
}
