//! Keyword matching over the diagnosis table.
//!
//! Matching is a plain substring test against the lowercased input.
//! Patterns are tried in declaration order and the first hit wins, which
//! is the only tie-break between categories.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{EntryKind, KnowledgeError};

use super::types::{Diagnosis, DiagnosisPattern, PatternsConfig};

/// Ordered set of diagnosis patterns.
#[derive(Debug, Clone)]
pub struct DiagnosisTable {
    patterns: Vec<DiagnosisPattern>,
}

impl DiagnosisTable {
    /// Parse and validate pattern TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, KnowledgeError> {
        let config: PatternsConfig = toml::from_str(content)?;
        let table = Self {
            patterns: config.patterns,
        };
        table.validate()?;
        info!("Loaded {} diagnosis patterns", table.patterns.len());
        Ok(table)
    }

    /// Diagnose free text.
    ///
    /// Returns the first pattern (in declaration order) with a keyword
    /// occurring in the lowercased input, or `None` when nothing matches.
    /// Empty and whitespace-only input never matches.
    pub fn diagnose(&self, text: &str) -> Option<Diagnosis<'_>> {
        if text.trim().is_empty() {
            return None;
        }
        let haystack = text.to_lowercase();
        let found = self
            .patterns
            .iter()
            .find_map(|p| first_keyword(p, &haystack).map(|k| Diagnosis::new(p, k)));

        match &found {
            Some(d) => debug!("Matched {:?} on keyword {:?}", d.category, d.keyword),
            None => debug!("No diagnosis pattern matched"),
        }
        found
    }

    /// Every matching pattern, in declaration order.
    ///
    /// The first element, if any, is what [`DiagnosisTable::diagnose`] returns.
    pub fn diagnose_all(&self, text: &str) -> Vec<Diagnosis<'_>> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let haystack = text.to_lowercase();
        self.patterns
            .iter()
            .filter_map(|p| first_keyword(p, &haystack).map(|k| Diagnosis::new(p, k)))
            .collect()
    }

    pub fn pattern(&self, category: &str) -> Result<&DiagnosisPattern, KnowledgeError> {
        self.patterns
            .iter()
            .find(|p| p.category == category)
            .ok_or_else(|| KnowledgeError::not_found(EntryKind::Pattern, category))
    }

    pub fn patterns(&self) -> &[DiagnosisPattern] {
        &self.patterns
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.category.as_str()).collect()
    }

    fn validate(&self) -> Result<(), KnowledgeError> {
        let mut seen = HashSet::new();
        for p in &self.patterns {
            if !seen.insert(p.category.as_str()) {
                return Err(KnowledgeError::DuplicateKey {
                    kind: EntryKind::Pattern,
                    name: p.category.clone(),
                });
            }
            if p.keywords.is_empty() {
                return Err(KnowledgeError::invalid(
                    EntryKind::Pattern,
                    &p.category,
                    "keywords must not be empty",
                ));
            }

            let mut keywords = HashSet::new();
            for k in &p.keywords {
                // An empty keyword would match every input.
                if k.trim().is_empty() {
                    return Err(KnowledgeError::invalid(
                        EntryKind::Pattern,
                        &p.category,
                        "keywords must not be blank",
                    ));
                }
                if k.to_lowercase() != *k {
                    return Err(KnowledgeError::invalid(
                        EntryKind::Pattern,
                        &p.category,
                        format!("keyword {:?} must be lowercase", k),
                    ));
                }
                if !keywords.insert(k.as_str()) {
                    return Err(KnowledgeError::invalid(
                        EntryKind::Pattern,
                        &p.category,
                        format!("keyword {:?} listed twice", k),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn first_keyword<'a>(pattern: &'a DiagnosisPattern, haystack: &str) -> Option<&'a str> {
    pattern
        .keywords
        .iter()
        .map(String::as_str)
        .find(|k| haystack.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PATTERNS: &str = r#"
        [[patterns]]
        category = "stringing"
        keywords = ["string", "web"]
        diagnosis = "Retraction issues"

        [[patterns]]
        category = "warping"
        keywords = ["curl", "lift"]
        diagnosis = "Thermal stress"
    "#;

    fn table() -> DiagnosisTable {
        DiagnosisTable::from_toml_str(TWO_PATTERNS).unwrap()
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let t = table();
        let d = t.diagnose("Corners CURL upward").map(|d| d.category);
        assert_eq!(d, Some("warping"));
    }

    #[test]
    fn test_match_is_substring() {
        let t = table();
        let d = t.diagnose("cobwebs everywhere").unwrap();
        assert_eq!(d.category, "stringing");
        assert_eq!(d.keyword, "web");
    }

    #[test]
    fn test_first_declared_pattern_wins() {
        let t = table();
        let d = t.diagnose("edges curl and there is stringing").unwrap();
        assert_eq!(d.category, "stringing");
    }

    #[test]
    fn test_reported_keyword_follows_keyword_order() {
        let t = table();
        let d = t.diagnose("web of string").unwrap();
        assert_eq!(d.keyword, "string");
    }

    #[test]
    fn test_blank_input_never_matches() {
        let t = table();
        assert!(t.diagnose("").is_none());
        assert!(t.diagnose("   \t\n").is_none());
        assert!(t.diagnose_all("").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(table().diagnose("looks perfect").is_none());
    }

    #[test]
    fn test_diagnose_all_in_declaration_order() {
        let t = table();
        let all: Vec<_> = t
            .diagnose_all("lifting corners and strings")
            .into_iter()
            .map(|d| d.category)
            .collect();
        assert_eq!(all, vec!["stringing", "warping"]);
    }

    #[test]
    fn test_pattern_lookup() {
        let t = table();
        assert_eq!(t.pattern("warping").unwrap().diagnosis, "Thermal stress");
        assert!(t.pattern("Warping").unwrap_err().is_not_found());
    }

    #[test]
    fn test_uppercase_keyword_rejected() {
        let content = TWO_PATTERNS.replace(r#""curl""#, r#""Curl""#);
        let err = DiagnosisTable::from_toml_str(&content).unwrap_err();
        assert!(matches!(
            err,
            KnowledgeError::Invalid { kind: EntryKind::Pattern, ref name, .. } if name == "warping"
        ));
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let content = TWO_PATTERNS.replace(r#""curl""#, r#""  ""#);
        let err = DiagnosisTable::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let content = TWO_PATTERNS.replace(r#"["curl", "lift"]"#, "[]");
        assert!(DiagnosisTable::from_toml_str(&content).is_err());
    }

    #[test]
    fn test_repeated_keyword_rejected() {
        let content = TWO_PATTERNS.replace(r#"["curl", "lift"]"#, r#"["curl", "curl"]"#);
        let err = DiagnosisTable::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let content = TWO_PATTERNS.replace(r#"category = "warping""#, r#"category = "stringing""#);
        let err = DiagnosisTable::from_toml_str(&content).unwrap_err();
        assert!(matches!(
            err,
            KnowledgeError::DuplicateKey { kind: EntryKind::Pattern, .. }
        ));
    }
}
