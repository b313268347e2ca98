//! Retained-silver evaluator

use tracing::debug;

use crate::diagnostics::knowledge_base::{fault_ids, KnowledgeBase};
use crate::diagnostics::problem::Problem;
use crate::diagnostics::tolerance::ToleranceBand;
use crate::diagnostics::types::{C41Deviations, Severity};

/// Magnitude of red/blue HD-LD loss that points at leuco-cyan dye
const LEUCO_CYAN_HDLD: i32 = -5;
/// Blue D-min rise that points at bleach underreplenishment
const BLUE_DMIN_RISE: i32 = 3;

/// Pick exactly one bleach fault when retained silver exceeds the action limit.
pub fn evaluate(
    deviations: &C41Deviations,
    silver_deviation: i32,
    band: &ToleranceBand,
    kb: &KnowledgeBase,
) -> Option<Problem> {
    if silver_deviation <= band.action {
        return None;
    }

    let id = if deviations.hdld.r < LEUCO_CYAN_HDLD && deviations.hdld.b < LEUCO_CYAN_HDLD {
        fault_ids::BLEACH_POOR_AERATION
    } else if deviations.dmin.b > BLUE_DMIN_RISE {
        fault_ids::BLEACH_UNDERREPLENISHED
    } else {
        fault_ids::BLEACH_TOO_DILUTE
    };

    debug!(silver_deviation, fault = id, "Retained silver flagged");
    kb.problem(id, Severity::Control)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::knowledge_base::knowledge_base;
    use crate::diagnostics::types::Channels;

    const BAND: ToleranceBand = ToleranceBand::new(10, 12);

    fn selected(deviations: &C41Deviations, silver: i32) -> Option<u16> {
        evaluate(deviations, silver, &BAND, knowledge_base()).and_then(|p| p.id)
    }

    #[test]
    fn test_below_action_limit_is_silent() {
        assert_eq!(selected(&C41Deviations::default(), 10), None);
        assert_eq!(selected(&C41Deviations::default(), -40), None);
    }

    #[test]
    fn test_poor_aeration_branch() {
        let dev = C41Deviations {
            hdld: Channels::new(-8, 0, -8),
            dmin: Channels::new(0, 0, 6),
            ..Default::default()
        };
        // aeration wins even though blue D-min also rose
        assert_eq!(selected(&dev, 15), Some(24));
    }

    #[test]
    fn test_underreplenished_branch() {
        let dev = C41Deviations {
            hdld: Channels::new(-8, 0, -2),
            dmin: Channels::new(0, 0, 4),
            ..Default::default()
        };
        assert_eq!(selected(&dev, 11), Some(23));
    }

    #[test]
    fn test_too_dilute_is_default() {
        let dev = C41Deviations {
            dmin: Channels::new(0, 0, 3),
            ..Default::default()
        };
        let problem = evaluate(&dev, 11, &BAND, knowledge_base()).unwrap();
        assert_eq!(problem.id, Some(22));
        assert_eq!(problem.severity, Severity::Control);
    }
}
