//! Hand-curated FDM 3D printing reference data with a symptom keyword
//! matcher.
//!
//! Two independent, read-only tables are exposed:
//!
//! - [`knowledge_base()`]: materials, troubleshooting entries, calibration
//!   procedures and settings presets
//! - [`diagnosis_table()`]: keyword patterns that map a free-text symptom
//!   description to a short diagnosis, used through [`diagnose`]
//!
//! Both are parsed from TOML compiled into the binary on first access and
//! are never mutated afterwards, so `&'static` references can be shared
//! across threads freely.

pub mod diagnosis;
mod error;
pub mod knowledge;

pub use diagnosis::{diagnose, diagnosis_table, Diagnosis, DiagnosisPattern, DiagnosisTable};
pub use error::{EntryKind, KnowledgeError};
pub use knowledge::{
    knowledge_base, CalibrationProcedure, FailureEntry, KnowledgeBase, MaterialProfile,
    SettingsPreset, TempRange,
};

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// For host binaries and tests; the library never installs one on its own.
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
