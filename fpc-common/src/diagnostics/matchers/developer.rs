//! Developer activity and mix-error checks
//!
//! The four checks are independent: a strip that is both underactive and
//! shows a Part A imbalance reports both.

use tracing::debug;

use crate::diagnostics::knowledge_base::{fault_ids, KnowledgeBase};
use crate::diagnostics::problem::Problem;
use crate::diagnostics::types::{C41Deviations, Channels, Severity};

const ACTIVITY_DMAX_HD: f64 = 8.0;
const ACTIVITY_LD: f64 = 4.0;
/// |avg D-min| below this means fog is unaffected
const DMIN_STABLE: f64 = 3.0;
/// HD-LD shift on one channel that signals a mix error
const MIX_SHIFT: i32 = 10;
/// HD-LD shift the other channels must stay under
const MIX_QUIET: i32 = 6;

/// Channel-averaged view used by the activity checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub dmax: f64,
    pub hd: f64,
    pub ld: f64,
    pub dmin: f64,
}

impl From<&C41Deviations> for Averages {
    fn from(dev: &C41Deviations) -> Self {
        Self {
            dmax: dev.dmax.average(),
            hd: dev.hd.average(),
            ld: dev.ld.average(),
            dmin: dev.dmin.average(),
        }
    }
}

pub fn evaluate(deviations: &C41Deviations, kb: &KnowledgeBase) -> Vec<Problem> {
    let avg = Averages::from(deviations);
    let hdld = deviations.hdld;
    let mut problems = Vec::new();

    problems.extend(underactive(&avg, kb));
    problems.extend(overactive(&avg, &deviations.dmin, kb));
    problems.extend(part_a(&hdld, kb));
    problems.extend(part_c(&hdld, kb));

    if !problems.is_empty() {
        debug!(?avg, count = problems.len(), "Developer checks fired");
    }
    problems
}

fn underactive(avg: &Averages, kb: &KnowledgeBase) -> Option<Problem> {
    if !(avg.dmax < -ACTIVITY_DMAX_HD && avg.hd < -ACTIVITY_DMAX_HD && avg.ld < -ACTIVITY_LD) {
        return None;
    }

    if avg.dmin.abs() < DMIN_STABLE {
        Some(Problem::developer_underactive())
    } else if avg.dmin < -DMIN_STABLE {
        kb.problem(fault_ids::DEVELOPER_UNDERREPLENISHED, Severity::Action)
    } else {
        None
    }
}

fn overactive(avg: &Averages, dmin: &Channels, kb: &KnowledgeBase) -> Option<Problem> {
    if !(avg.dmax > ACTIVITY_DMAX_HD && avg.hd > ACTIVITY_DMAX_HD && avg.ld > ACTIVITY_LD) {
        return None;
    }

    if avg.dmin.abs() < DMIN_STABLE {
        Some(Problem::developer_overactive())
    } else if avg.dmin > DMIN_STABLE {
        // chemical fog: a red-led D-min rise means fixer, anything else bleach
        let id = if dmin.r > dmin.g && dmin.r > dmin.b {
            fault_ids::FIXER_CONTAMINATION
        } else {
            fault_ids::BLEACH_CONTAMINATION
        };
        kb.problem(id, Severity::Control)
    } else {
        None
    }
}

fn part_a(hdld: &Channels, kb: &KnowledgeBase) -> Option<Problem> {
    if hdld.r.abs() > MIX_SHIFT && hdld.g.abs() < MIX_QUIET && hdld.b.abs() < MIX_QUIET {
        let id = if hdld.r > 0 {
            fault_ids::PART_A_HIGH
        } else {
            fault_ids::PART_A_LOW
        };
        return kb.problem(id, Severity::Action);
    }
    None
}

fn part_c(hdld: &Channels, kb: &KnowledgeBase) -> Option<Problem> {
    if hdld.b.abs() > MIX_SHIFT && hdld.r.abs() < MIX_QUIET {
        let id = if hdld.b < 0 {
            fault_ids::PART_C_LOW
        } else {
            fault_ids::PART_C_HIGH
        };
        return kb.problem(id, Severity::Action);
    }
    None
}
