//! HTTP API handlers for fpc-server

pub mod diagnose;
pub mod faults;
pub mod health;
pub mod readings;

pub use diagnose::{diagnose, DiagnoseRequest};
pub use faults::{get_fault, list_faults};
pub use health::{health_routes, root_status};
pub use readings::{log_reading, recent_readings, LogReadingRequest};
