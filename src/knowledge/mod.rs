//! Reference data for FDM printing: materials, common failures,
//! calibration procedures and slicer presets.
//!
//! The data is compiled in from `config/knowledge_base.toml` and parsed
//! once. Lookups are exact and case-sensitive; a missing key is reported
//! as [`KnowledgeError::NotFound`](crate::KnowledgeError::NotFound).
//!
//! # Example
//!
//! ```ignore
//! use printkb::knowledge_base;
//!
//! let kb = knowledge_base();
//! let petg = kb.material("PETG")?;
//! println!("PETG nozzle: {}-{}C", petg.nozzle_temp.min(), petg.nozzle_temp.max());
//!
//! for name in kb.failure_names() {
//!     println!("{}", name);
//! }
//! ```

mod embedded;
mod store;
mod types;

pub use embedded::{default_knowledge_base, knowledge_base, load_knowledge_base};
pub use store::KnowledgeBase;
pub use types::*;
