//! Type definitions for the symptom keyword matcher.

use serde::{Deserialize, Serialize};

/// Root of `diagnosis_patterns.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PatternsConfig {
    pub patterns: Vec<DiagnosisPattern>,
}

/// A failure category recognised by keywords in free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosisPattern {
    /// Category name (e.g., "layer separation")
    pub category: String,
    /// Lowercase substrings that indicate this category
    pub keywords: Vec<String>,
    /// Short explanation and fix shown to the user
    pub diagnosis: String,
    /// Troubleshooting entry with the full write-up, if there is one
    #[serde(default)]
    pub related_failure: Option<String>,
}

/// The outcome of a successful match, borrowed from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnosis<'a> {
    /// Category of the matching pattern
    pub category: &'a str,
    /// The pattern's diagnosis text
    pub diagnosis: &'a str,
    /// First keyword of the pattern found in the input
    pub keyword: &'a str,
    /// Linked troubleshooting entry name
    pub related_failure: Option<&'a str>,
}

impl<'a> Diagnosis<'a> {
    pub(crate) fn new(pattern: &'a DiagnosisPattern, keyword: &'a str) -> Self {
        Self {
            category: &pattern.category,
            diagnosis: &pattern.diagnosis,
            keyword,
            related_failure: pattern.related_failure.as_deref(),
        }
    }
}
