//! Gradual downward drift across consecutive B&W strips

use tracing::debug;

use crate::diagnostics::knowledge_base::{fault_ids, KnowledgeBase};
use crate::diagnostics::problem::Problem;
use crate::diagnostics::tolerance::BwTolerances;
use crate::diagnostics::types::{BwDeviations, Severity};

/// `series` is oldest first and ends with the current strip.
pub fn evaluate(series: &[BwDeviations], tolerances: &BwTolerances, kb: &KnowledgeBase) -> Option<Problem> {
    if series.len() < tolerances.drift_min_readings {
        return None;
    }

    let ld: Vec<i32> = series.iter().map(|d| d.ld).collect();
    let hdld: Vec<i32> = series.iter().map(|d| d.hdld).collect();

    let drifting = declining(&ld, tolerances.drift_min_decline)
        || declining(&hdld, tolerances.drift_min_decline);
    if !drifting {
        return None;
    }

    debug!(readings = series.len(), "Gradual drift detected");
    kb.problem(fault_ids::BW_GRADUAL_DRIFT, Severity::Action)
}

/// Never rises step to step, and falls by more than `min_decline` overall.
fn declining(values: &[i32], min_decline: i32) -> bool {
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return false;
    };
    values.windows(2).all(|w| w[1] <= w[0]) && first - last > min_decline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::knowledge_base::knowledge_base;

    fn series(points: &[(i32, i32)]) -> Vec<BwDeviations> {
        points
            .iter()
            .map(|&(ld, hdld)| BwDeviations { ld, hdld, dmin: 0 })
            .collect()
    }

    fn fires(points: &[(i32, i32)]) -> bool {
        evaluate(&series(points), &BwTolerances::default(), knowledge_base()).is_some()
    }

    #[test]
    fn test_declining_helper() {
        assert!(declining(&[3, 1, -2], 4));
        assert!(!declining(&[3, 1, -1], 4));
        assert!(!declining(&[3, 4, -5], 4));
        assert!(!declining(&[], 4));
    }

    #[test]
    fn test_too_few_readings() {
        assert!(!fires(&[(5, 0), (-5, 0)]));
    }

    #[test]
    fn test_steady_decline_in_ld() {
        assert!(fires(&[(2, 0), (0, 1), (-3, 0)]));
    }

    #[test]
    fn test_steady_decline_in_hdld() {
        let problem = evaluate(
            &series(&[(0, 1), (1, -1), (0, -2), (0, -4)]),
            &BwTolerances::default(),
            knowledge_base(),
        )
        .unwrap();
        assert_eq!(problem.id, Some(106));
        assert_eq!(problem.severity, Severity::Action);
    }

    #[test]
    fn test_rebound_breaks_drift() {
        assert!(!fires(&[(3, 0), (-3, 0), (-1, 0), (-4, 0)]));
    }

    #[test]
    fn test_flat_series_is_not_drift() {
        assert!(!fires(&[(-8, -8), (-8, -8), (-8, -8)]));
    }
}
