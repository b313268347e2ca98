//! Problems reported on a diagnosis

use serde::Serialize;

use super::knowledge_base::FaultRecord;
use super::types::Severity;

/// Name carried by the fallback problem; also the log summary for a clean strip
pub const WITHIN_LIMITS: &str = "Process within limits";

/// A selected fault (or synthetic finding) tagged with a severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub severity: Severity,
    /// Catalog id; absent for synthetic findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u16>,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<&'static str>,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_ref: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Problem {
    pub fn from_fault(fault: &FaultRecord, severity: Severity) -> Self {
        Self {
            severity,
            id: Some(fault.id),
            name: fault.name,
            signature: fault.signature,
            cause: Some(fault.cause),
            action: fault.action,
            manual_ref: Some(fault.manual_ref),
            details: None,
        }
    }

    /// Fallback when no rule fired
    pub fn within_limits() -> Self {
        Self {
            severity: Severity::Ok,
            id: None,
            name: WITHIN_LIMITS,
            signature: None,
            cause: None,
            action: "Continue normal operation",
            manual_ref: None,
            details: None,
        }
    }

    /// Generic temperature/time/dilution finding, no single catalog entry
    pub fn developer_underactive() -> Self {
        Self {
            severity: Severity::Action,
            id: None,
            name: "Developer Underactive",
            signature: None,
            cause: Some("Temperature too low, time too short, or developer diluted"),
            action: "Check developer temperature (aim 37.8°C). Check time (aim 3:15). Check specific gravity. If diluted, may need to replace tank solution.",
            manual_ref: Some("Charts 1-3, 11, 17"),
            details: None,
        }
    }

    /// Generic temperature/time/concentration finding, no single catalog entry
    pub fn developer_overactive() -> Self {
        Self {
            severity: Severity::Action,
            id: None,
            name: "Developer Overactive",
            signature: None,
            cause: Some("Temperature too high, time too long, or developer over-concentrated"),
            action: "Check developer temperature (aim 37.8°C). Check time (aim 3:15). If over-concentrated from evaporation, add water (max 5% of tank volume).",
            manual_ref: Some("Charts 1-2, 11, 18"),
            details: None,
        }
    }

    pub fn spread_exceeded(spread: i32, limit: i32) -> Self {
        Self {
            severity: Severity::Warning,
            id: None,
            name: "Color Balance Spread Exceeded",
            signature: None,
            cause: None,
            action: "Check for contamination or mix errors. See diagnostic charts E.",
            manual_ref: None,
            details: Some(format!("Spread of {} exceeds limit of {}", spread, limit)),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }
}

/// Human-readable one-line summary, as written to the reading log
pub fn summarize(problems: &[Problem]) -> String {
    if problems.iter().all(Problem::is_ok) {
        return WITHIN_LIMITS.to_string();
    }
    problems
        .iter()
        .filter(|p| !p.is_ok())
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join("; ")
}
