//! Symptom keyword matching for user-reported print defects.
//!
//! Free text (a chat message, a photo caption) is lowercased and scanned
//! for each pattern's keywords in turn. The first pattern with a hit
//! supplies the diagnosis. The table is loaded from embedded TOML once
//! per process.
//!
//! # Example
//!
//! ```ignore
//! use printkb::{diagnose, knowledge_base};
//!
//! if let Some(d) = diagnose("Corners curl up off the bed") {
//!     println!("{}: {}", d.category, d.diagnosis);
//!     if let Some(entry) = knowledge_base().failure_for(&d)? {
//!         for step in &entry.solutions {
//!             println!("  - {}", step);
//!         }
//!     }
//! }
//! ```

mod embedded;
mod matcher;
mod types;

pub use embedded::{default_diagnosis_table, diagnose, diagnosis_table, load_diagnosis_table};
pub use matcher::DiagnosisTable;
pub use types::{Diagnosis, DiagnosisPattern};
