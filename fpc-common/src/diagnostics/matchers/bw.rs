//! B&W fault chain: first matching rule wins

use tracing::debug;

use crate::diagnostics::knowledge_base::{fault_ids, KnowledgeBase};
use crate::diagnostics::problem::Problem;
use crate::diagnostics::tolerance::BwTolerances;
use crate::diagnostics::types::{BwDeviations, Severity};

/// D-min rise that, with high LD, means chemical fog
const FOG_DMIN: i32 = 3;

pub fn evaluate(deviations: &BwDeviations, tolerances: &BwTolerances, kb: &KnowledgeBase) -> Option<Problem> {
    let (id, severity) = select(deviations, tolerances)?;
    debug!(?deviations, fault = id, "B&W rule matched");
    kb.problem(id, severity)
}

fn select(dev: &BwDeviations, tolerances: &BwTolerances) -> Option<(u16, Severity)> {
    let ld_limit = tolerances.ld.action;
    let hdld_limit = tolerances.hdld.action;
    let ld_steady = dev.ld.abs() <= ld_limit;

    if dev.ld < -ld_limit && dev.hdld < -hdld_limit {
        Some((fault_ids::BW_UNDERACTIVE, Severity::Action))
    } else if dev.ld > ld_limit && dev.hdld > hdld_limit {
        Some((fault_ids::BW_OVERACTIVE, Severity::Action))
    } else if ld_steady && dev.hdld < -hdld_limit {
        Some((fault_ids::BW_CONTRAST_LOW, Severity::Action))
    } else if ld_steady && dev.hdld > hdld_limit {
        Some((fault_ids::BW_CONTRAST_HIGH, Severity::Action))
    } else if dev.dmin > FOG_DMIN && dev.ld > ld_limit {
        Some((fault_ids::BW_CONTAMINATION, Severity::Control))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::knowledge_base::knowledge_base;

    fn matched(ld: i32, hdld: i32, dmin: i32) -> Option<u16> {
        evaluate(&BwDeviations { ld, hdld, dmin }, &BwTolerances::default(), knowledge_base())
            .and_then(|p| p.id)
    }

    #[test]
    fn test_each_rule() {
        assert_eq!(matched(-7, -7, 0), Some(101));
        assert_eq!(matched(7, 7, 0), Some(102));
        assert_eq!(matched(0, -8, 0), Some(103));
        assert_eq!(matched(-6, 7, 0), Some(104));
        assert_eq!(matched(8, 0, 4), Some(105));
    }

    #[test]
    fn test_boundary_six_does_not_fire() {
        assert_eq!(matched(6, 6, 0), None);
        assert_eq!(matched(-6, -6, 0), None);
        assert_eq!(matched(0, 6, 6), None);
        assert_eq!(matched(6, 0, 4), None);
    }

    #[test]
    fn test_overactive_takes_precedence_over_contamination() {
        assert_eq!(matched(8, 8, 10), Some(102));
    }

    #[test]
    fn test_ld_alone_out_is_unmatched() {
        assert_eq!(matched(-9, 0, 0), None);
        assert_eq!(matched(9, 0, 3), None);
    }

    #[test]
    fn test_contamination_is_control() {
        let problem = evaluate(
            &BwDeviations { ld: 7, hdld: 2, dmin: 5 },
            &BwTolerances::default(),
            knowledge_base(),
        )
        .unwrap();
        assert_eq!(problem.severity, Severity::Control);
        assert_eq!(problem.name, "Developer Contamination");
    }

    #[test]
    fn test_exclusive_over_grid() {
        let tolerances = BwTolerances::default();
        for ld in -12..=12 {
            for hdld in -12..=12 {
                for dmin in [-5, 0, 3, 4, 8] {
                    let dev = BwDeviations { ld, hdld, dmin };
                    let rules = [
                        ld < -6 && hdld < -6,
                        ld > 6 && hdld > 6,
                        ld.abs() <= 6 && hdld < -6,
                        ld.abs() <= 6 && hdld > 6,
                        dmin > 3 && ld > 6,
                    ];
                    let first = rules.iter().position(|&r| r);
                    let expected = first.map(|i| [101, 102, 103, 104, 105][i]);
                    assert_eq!(select(&dev, &tolerances).map(|(id, _)| id), expected);
                }
            }
        }
    }
}
