use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred value kind for a dataset column.
///
/// Labels are stable and descriptive; they are the values of the
/// `tipos_detectados` map in the serialized results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectedType {
    Integer,
    Float,
    Text,
    Boolean,
    Date,
    Datetime,
    Time,
    Null,
    Other,
}

impl DetectedType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Time => "time",
            Self::Null => "null",
            Self::Other => "other",
        }
    }

    /// Parse a label produced by [`DetectedType::as_str`]. Unknown labels map
    /// to `Other` so older payloads keep parsing.
    pub fn from_label(label: &str) -> Self {
        match label {
            "integer" => Self::Integer,
            "float" => Self::Float,
            "text" => Self::Text,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "time" => Self::Time,
            "null" => Self::Null,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for ty in [
            DetectedType::Integer,
            DetectedType::Float,
            DetectedType::Text,
            DetectedType::Boolean,
            DetectedType::Date,
            DetectedType::Datetime,
            DetectedType::Time,
            DetectedType::Null,
            DetectedType::Other,
        ] {
            assert_eq!(DetectedType::from_label(ty.as_str()), ty);
        }
    }

    #[test]
    fn unknown_label_maps_to_other() {
        assert_eq!(DetectedType::from_label("decimal128"), DetectedType::Other);
    }
}
