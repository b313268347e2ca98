//! Fixer dilution and pH checks

use crate::diagnostics::knowledge_base::{fault_ids, KnowledgeBase};
use crate::diagnostics::problem::Problem;
use crate::diagnostics::types::{C41Deviations, Severity};

pub fn evaluate(deviations: &C41Deviations, kb: &KnowledgeBase) -> Vec<Problem> {
    let dmin = deviations.dmin;
    let hdld = deviations.hdld;
    let mut problems = Vec::new();

    if dmin.r > 5 && dmin.g > 5 && dmin.b.abs() < 3 {
        problems.extend(kb.problem(fault_ids::FIXER_TOO_DILUTE, Severity::Action));
    }
    if hdld.r < -8 && hdld.g.abs() < 4 && hdld.b.abs() < 4 {
        problems.extend(kb.problem(fault_ids::FIXER_PH_TOO_LOW, Severity::Action));
    }

    problems
}
