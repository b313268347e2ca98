//! # Film Process Control Common Library
//!
//! Shared code for the film process control service including:
//! - Control-strip diagnostic engine (deviations, tolerances, fault matching)
//! - Static chemistry knowledge base (C-41 and B&W fault catalogs)
//! - Configuration loading
//! - Reading log storage (SQLite, behind the `sqlx` feature)
//! - Timestamp and period utilities

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod time;

pub use diagnostics::{
    diagnose, knowledge_base, Diagnosis, DiagnosticError, Diagnostician, ProcessType, Severity,
    ToleranceTable,
};
pub use error::{Error, Result};
