use std::fmt;

use thiserror::Error;

/// The category of knowledge-base entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Material,
    Failure,
    Calibration,
    Preset,
    Pattern,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Material => "material",
            EntryKind::Failure => "troubleshooting entry",
            EntryKind::Calibration => "calibration procedure",
            EntryKind::Preset => "settings preset",
            EntryKind::Pattern => "diagnosis pattern",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Unknown {kind}: {name:?}")]
    NotFound { kind: EntryKind, name: String },

    #[error("Duplicate {kind}: {name:?}")]
    DuplicateKey { kind: EntryKind, name: String },

    #[error("Invalid {kind} {name:?}: {reason}")]
    Invalid {
        kind: EntryKind,
        name: String,
        reason: String,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl KnowledgeError {
    pub(crate) fn not_found(kind: EntryKind, name: &str) -> Self {
        KnowledgeError::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(kind: EntryKind, name: &str, reason: impl Into<String>) -> Self {
        KnowledgeError::Invalid {
            kind,
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for a lookup miss, as opposed to a problem with the data itself.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KnowledgeError::NotFound { .. })
    }
}

impl From<KnowledgeError> for String {
    fn from(err: KnowledgeError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_kind_and_key() {
        let err = KnowledgeError::not_found(EntryKind::Failure, "elephant foot");
        assert_eq!(
            err.to_string(),
            "Unknown troubleshooting entry: \"elephant foot\""
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_is_not_a_lookup_miss() {
        let err = KnowledgeError::invalid(EntryKind::Material, "PLA", "bad range");
        assert!(!err.is_not_found());
        let message: String = err.into();
        assert!(message.contains("PLA"));
        assert!(message.contains("bad range"));
    }
}
