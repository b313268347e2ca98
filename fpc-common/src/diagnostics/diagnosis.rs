//! Diagnosis orchestrator
//!
//! C-41 problems are appended in a fixed order: retained silver, developer,
//! fixer, colour spread. Callers (and the log summary) rely on that order.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::deviation::{bw_deviations, c41_deviations, retained_silver_deviation, Deviations};
use super::error::DiagnosticError;
use super::input::{parse_bw, parse_color};
use super::knowledge_base::{knowledge_base, KnowledgeBase};
use super::matchers::{bw, developer, drift, fixer, silver, spread};
use super::problem::{summarize, Problem};
use super::tolerance::ToleranceTable;
use super::types::{BwDeviations, BwReading, C41Deviations, ColorReading, ProcessType, RetainedSilver, Status};

static STANDARD_TOLERANCES: Lazy<ToleranceTable> = Lazy::new(ToleranceTable::default);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct C41Diagnosis {
    pub process: ProcessType,
    pub deviations: C41Deviations,
    pub status: Status,
    pub problems: Vec<Problem>,
    pub dmaxb_yb: RetainedSilver,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BwDiagnosis {
    pub process: ProcessType,
    pub deviations: BwDeviations,
    pub status: Status,
    /// Raw HD-LD of the reading itself
    pub hdld: i32,
    pub problems: Vec<Problem>,
}

/// Result of one diagnostic call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diagnosis {
    C41(C41Diagnosis),
    Bw(BwDiagnosis),
}

impl Diagnosis {
    pub fn process(&self) -> ProcessType {
        match self {
            Diagnosis::C41(_) => ProcessType::C41,
            Diagnosis::Bw(_) => ProcessType::Bw,
        }
    }

    pub fn status(&self) -> &Status {
        match self {
            Diagnosis::C41(d) => &d.status,
            Diagnosis::Bw(d) => &d.status,
        }
    }

    /// Never empty
    pub fn problems(&self) -> &[Problem] {
        match self {
            Diagnosis::C41(d) => &d.problems,
            Diagnosis::Bw(d) => &d.problems,
        }
    }

    pub fn deviations(&self) -> Deviations {
        match self {
            Diagnosis::C41(d) => Deviations::C41(d.deviations),
            Diagnosis::Bw(d) => Deviations::Bw(d.deviations),
        }
    }

    /// One-line problems summary for the reading log
    pub fn summary(&self) -> String {
        summarize(self.problems())
    }
}

/// Binds a knowledge base to a tolerance table; cheap to construct per call.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostician<'a> {
    kb: &'a KnowledgeBase,
    tolerances: &'a ToleranceTable,
}

impl Diagnostician<'static> {
    /// Built-in catalog with the default tolerance bands
    pub fn standard() -> Self {
        Self::new(knowledge_base(), &STANDARD_TOLERANCES)
    }
}

impl<'a> Diagnostician<'a> {
    pub fn new(kb: &'a KnowledgeBase, tolerances: &'a ToleranceTable) -> Self {
        Self { kb, tolerances }
    }

    pub fn tolerances(&self) -> &ToleranceTable {
        self.tolerances
    }

    pub fn diagnose_c41(&self, reading: &ColorReading, reference: &ColorReading) -> C41Diagnosis {
        let tolerances = &self.tolerances.c41;
        let deviations = c41_deviations(reading, reference);
        let status = self.tolerances.classify_c41(&deviations);
        let silver_deviation = retained_silver_deviation(reading, reference);

        let mut problems = Vec::new();
        if let Some(silver_deviation) = silver_deviation {
            problems.extend(silver::evaluate(&deviations, silver_deviation, &tolerances.dmaxb_yb, self.kb));
        }
        problems.extend(developer::evaluate(&deviations, self.kb));
        problems.extend(fixer::evaluate(&deviations, self.kb));
        problems.extend(spread::evaluate(&deviations, tolerances.spread));
        if problems.is_empty() {
            problems.push(Problem::within_limits());
        }

        debug!(
            overall = status.overall.as_str(),
            problems = problems.len(),
            "C-41 strip diagnosed"
        );

        C41Diagnosis {
            process: ProcessType::C41,
            deviations,
            status,
            problems,
            dmaxb_yb: RetainedSilver {
                value: silver_deviation,
                limit: tolerances.dmaxb_yb.control,
            },
        }
    }

    /// `history` holds earlier strips, oldest first, read against the same reference.
    pub fn diagnose_bw(&self, reading: &BwReading, reference: &BwReading, history: &[BwReading]) -> BwDiagnosis {
        let tolerances = &self.tolerances.bw;
        let deviations = bw_deviations(reading, reference);
        let status = self.tolerances.classify_bw(&deviations);

        let mut problems = Vec::new();
        problems.extend(bw::evaluate(&deviations, tolerances, self.kb));
        if !history.is_empty() {
            let series: Vec<BwDeviations> = history
                .iter()
                .map(|earlier| bw_deviations(earlier, reference))
                .chain(std::iter::once(deviations))
                .collect();
            problems.extend(drift::evaluate(&series, tolerances, self.kb));
        }
        if problems.is_empty() {
            problems.push(Problem::within_limits());
        }

        debug!(
            overall = status.overall.as_str(),
            problems = problems.len(),
            "B&W strip diagnosed"
        );

        BwDiagnosis {
            process: ProcessType::Bw,
            deviations,
            status,
            hdld: reading.hdld(),
            problems,
        }
    }

    /// Validate loosely-typed input, then dispatch on `process`.
    pub fn diagnose(&self, process: &str, reading: &Value, reference: &Value) -> Result<Diagnosis, DiagnosticError> {
        self.diagnose_with_history(process, reading, reference, &[])
    }

    pub fn diagnose_with_history(
        &self,
        process: &str,
        reading: &Value,
        reference: &Value,
        history: &[Value],
    ) -> Result<Diagnosis, DiagnosticError> {
        match process.parse::<ProcessType>()? {
            ProcessType::C41 => {
                if !history.is_empty() {
                    return Err(DiagnosticError::validation(
                        "history",
                        "reading history is only used for bw",
                    ));
                }
                let reading = parse_color(reading, "reading")?;
                let reference = parse_color(reference, "reference")?;
                if reference.yellow_b.is_some() && reading.yellow_b.is_none() {
                    return Err(DiagnosticError::validation(
                        "reading.yellow_b",
                        "required when the reference carries yellow_b",
                    ));
                }
                Ok(Diagnosis::C41(self.diagnose_c41(&reading, &reference)))
            }
            ProcessType::Bw => {
                let reading = parse_bw(reading, "reading")?;
                let reference = parse_bw(reference, "reference")?;
                let history = history
                    .iter()
                    .enumerate()
                    .map(|(i, value)| parse_bw(value, &format!("history[{}]", i)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Diagnosis::Bw(self.diagnose_bw(&reading, &reference, &history)))
            }
        }
    }
}

/// Diagnose with the built-in catalog and default tolerances.
pub fn diagnose(process: &str, reading: &Value, reference: &Value) -> Result<Diagnosis, DiagnosticError> {
    Diagnostician::standard().diagnose(process, reading, reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::types::{Channels, Severity, ToleranceLevel};

    fn reference() -> ColorReading {
        ColorReading {
            dmax: Channels::new(163, 245, 275),
            hd: Channels::new(172, 310, 336),
            ld: Channels::new(39, 94, 103),
            dmin: Channels::new(28, 74, 96),
            yellow_b: None,
        }
    }

    #[test]
    fn test_clean_c41_strip() {
        let diagnosis = Diagnostician::standard().diagnose_c41(&reference(), &reference());
        assert_eq!(diagnosis.status.overall, ToleranceLevel::Ok);
        assert_eq!(diagnosis.problems, vec![Problem::within_limits()]);
        assert_eq!(diagnosis.dmaxb_yb, RetainedSilver { value: Some(0), limit: 12 });
    }

    #[test]
    fn test_c41_problem_order() {
        let mut reading = reference();
        reading.dmax = reading.dmax.map(|d| d - 10);
        reading.hd = reading.hd.map(|d| d - 10);
        reading.ld = reading.ld.map(|d| d - 5);
        reading.hd.r -= 12;
        reading.yellow_b = Some(reference().dmin.b - 25);

        let diagnosis = Diagnostician::standard().diagnose_c41(&reading, &reference());
        assert_eq!(diagnosis.dmaxb_yb.value, Some(15));

        let names: Vec<_> = diagnosis.problems.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "Bleach Too Dilute",
                "Developer Underactive",
                "Developer Mix Error - Part A Low",
                "Color Balance Spread Exceeded",
            ]
        );
        assert_eq!(diagnosis.problems[0].severity, Severity::Control);
        assert_eq!(diagnosis.problems[3].severity, Severity::Warning);
    }

    #[test]
    fn test_one_sided_yellow_b_rejected() {
        let reading = serde_json::to_value(reference()).unwrap();
        let mut with_yellow = reference();
        with_yellow.yellow_b = Some(110);
        let reference = serde_json::to_value(with_yellow).unwrap();

        let err = Diagnostician::standard().diagnose("c41", &reading, &reference).unwrap_err();
        assert!(matches!(err, DiagnosticError::Validation { ref field, .. } if field == "reading.yellow_b"));
    }

    #[test]
    fn test_one_sided_yellow_b_skips_silver_check() {
        let mut with_yellow = reference();
        with_yellow.yellow_b = Some(110);

        // Identical patches; only the reference knows its yellow density
        let diagnosis = Diagnostician::standard().diagnose_c41(&reference(), &with_yellow);
        assert_eq!(diagnosis.dmaxb_yb.value, None);
        assert_eq!(diagnosis.problems, vec![Problem::within_limits()]);
    }

    #[test]
    fn test_history_rejected_for_c41() {
        let reading = serde_json::to_value(reference()).unwrap();
        let err = Diagnostician::standard()
            .diagnose_with_history("c41", &reading, &reading, &[reading.clone()])
            .unwrap_err();
        assert!(matches!(err, DiagnosticError::Validation { ref field, .. } if field == "history"));
    }

    #[test]
    fn test_bw_history_parse_error_names_index() {
        let strip = serde_json::json!({"dmax": 170, "hd": 146, "ld": 50, "dmin": 30});
        let broken = serde_json::json!({"dmax": 170, "hd": 146, "ld": 50});
        let err = Diagnostician::standard()
            .diagnose_with_history("bw", &strip, &strip, &[strip.clone(), broken])
            .unwrap_err();
        assert!(matches!(err, DiagnosticError::Validation { ref field, .. } if field == "history[1].dmin"));
    }

    #[test]
    fn test_custom_tolerances_flow_through() {
        let mut table = ToleranceTable::default();
        table.bw.hdld.action = 2;
        let diagnostician = Diagnostician::new(knowledge_base(), &table);

        let reference = BwReading { dmax: 170, hd: 146, ld: 50, dmin: 30 };
        let reading = BwReading { hd: 143, ..reference };
        let diagnosis = diagnostician.diagnose_bw(&reading, &reference, &[]);
        assert_eq!(diagnosis.status.overall, ToleranceLevel::Action);
        assert_eq!(diagnosis.problems[0].id, Some(103));
    }
}
