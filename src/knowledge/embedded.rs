//! Knowledge-base loading.
//!
//! - `default_knowledge_base()` parses the data compiled into the binary
//! - `load_knowledge_base(path)` parses a custom file with the same checks
//! - `knowledge_base()` hands out the process-wide instance

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use tracing::warn;

use super::store::KnowledgeBase;

/// Knowledge data embedded at compile time from `config/knowledge_base.toml`.
const DEFAULT_KNOWLEDGE_BASE: &str = include_str!("../../config/knowledge_base.toml");

static KNOWLEDGE_BASE: LazyLock<KnowledgeBase> = LazyLock::new(default_knowledge_base);

/// The process-wide knowledge base, parsed on first access and never mutated.
pub fn knowledge_base() -> &'static KnowledgeBase {
    &KNOWLEDGE_BASE
}

/// Parse the embedded knowledge base into a fresh value.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a bug in the shipped data).
pub fn default_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::from_toml_str(DEFAULT_KNOWLEDGE_BASE)
        .expect("embedded knowledge_base.toml must be valid")
}

/// Load a knowledge base from a TOML file.
///
/// # Arguments
/// * `path` - Path to a TOML file laid out like `config/knowledge_base.toml`
///
/// # Returns
/// * `Ok(KnowledgeBase)` - Parsed and validated knowledge base
/// * `Err` - If the file cannot be read, the TOML is invalid, or an entry
///   breaks a data invariant (the `KnowledgeError` stays downcastable)
///
/// # Example
/// ```ignore
/// let kb = load_knowledge_base(Path::new("/path/to/knowledge_base.toml"))?;
/// let pla = kb.material("PLA")?;
/// ```
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read knowledge base {}", path.display()))?;
    KnowledgeBase::from_toml_str(&content)
        .inspect_err(|e| warn!("Rejected knowledge base {}: {}", path.display(), e))
        .with_context(|| format!("Invalid knowledge base {}", path.display()))
}
