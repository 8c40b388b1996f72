//! Diagnosis pattern loading.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use tracing::warn;

use super::matcher::DiagnosisTable;
use super::types::Diagnosis;

/// Patterns embedded at compile time from `config/diagnosis_patterns.toml`.
const DEFAULT_PATTERNS: &str = include_str!("../../config/diagnosis_patterns.toml");

static DIAGNOSIS_TABLE: LazyLock<DiagnosisTable> = LazyLock::new(default_diagnosis_table);

/// The process-wide diagnosis table.
pub fn diagnosis_table() -> &'static DiagnosisTable {
    &DIAGNOSIS_TABLE
}

/// Diagnose free text against the process-wide table.
///
/// # Example
/// ```ignore
/// let d = diagnose("there are thin plastic strings between my parts").unwrap();
/// assert_eq!(d.category, "stringing");
/// ```
pub fn diagnose(text: &str) -> Option<Diagnosis<'static>> {
    diagnosis_table().diagnose(text)
}

/// Parse the embedded patterns into a fresh table.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a bug in the shipped data).
pub fn default_diagnosis_table() -> DiagnosisTable {
    DiagnosisTable::from_toml_str(DEFAULT_PATTERNS)
        .expect("embedded diagnosis_patterns.toml must be valid")
}

/// Load diagnosis patterns from a TOML file.
///
/// # Arguments
/// * `path` - Path to a TOML file of `[[patterns]]` entries
///
/// # Returns
/// * `Ok(DiagnosisTable)` - Patterns in file order, ready to match
/// * `Err` - If the file cannot be read, the TOML is invalid, or a keyword
///   is blank, repeated or not lowercase
///
/// # Example
/// ```ignore
/// let table = load_diagnosis_table(Path::new("/path/to/patterns.toml"))?;
/// let d = table.diagnose("zits along the seam");
/// ```
pub fn load_diagnosis_table(path: &Path) -> Result<DiagnosisTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read diagnosis patterns {}", path.display()))?;
    DiagnosisTable::from_toml_str(&content)
        .inspect_err(|e| warn!("Rejected diagnosis patterns {}: {}", path.display(), e))
        .with_context(|| format!("Invalid diagnosis patterns {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_table_has_four_categories() {
        let table = default_diagnosis_table();
        assert_eq!(
            table.categories(),
            vec!["layer separation", "stringing", "warping", "under extrusion"]
        );
    }

    #[test]
    fn test_gap_resolves_to_first_declared_category() {
        // "gap" is listed under both layer separation and under extrusion.
        let d = diagnose("small gap between walls").unwrap();
        assert_eq!(d.category, "layer separation");
    }

    #[test]
    fn test_load_custom_patterns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[[patterns]]
category = "blobs"
keywords = ["blob", "zit"]
diagnosis = "Coasting or wipe settings""#
        )
        .unwrap();

        let table = load_diagnosis_table(file.path()).unwrap();
        assert_eq!(table.diagnose("Zits on the seam").unwrap().category, "blobs");
    }

    #[test]
    fn test_load_rejects_uppercase_keyword() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[[patterns]]
category = "blobs"
keywords = ["Blob"]
diagnosis = "Coasting or wipe settings""#
        )
        .unwrap();

        let err = load_diagnosis_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid diagnosis patterns"));
    }
}
