//! Control-strip diagnostic engine
//!
//! Pure and synchronous: deviations, two-tier tolerance classification and
//! rule matching against a static fault catalog. No I/O happens here.

pub mod deviation;
pub mod diagnosis;
mod error;
pub mod input;
pub mod knowledge_base;
pub mod matchers;
pub mod problem;
pub mod tolerance;
pub mod types;

pub use deviation::{calculate_deviations, Deviations};
pub use diagnosis::{diagnose, BwDiagnosis, C41Diagnosis, Diagnosis, Diagnostician};
pub use error::DiagnosticError;
pub use knowledge_base::{fault_ids, knowledge_base, Catalog, FaultRecord, KnowledgeBase};
pub use problem::Problem;
pub use tolerance::{ToleranceBand, ToleranceTable};
pub use types::{
    BwReading, Channel, Channels, ColorReading, ProcessType, Severity, Status, Strip, ToleranceLevel,
};
