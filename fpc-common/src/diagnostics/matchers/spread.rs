//! Colour-balance spread across the HD-LD channels

use crate::diagnostics::problem::Problem;
use crate::diagnostics::types::C41Deviations;

pub fn spread(deviations: &C41Deviations) -> i32 {
    deviations.hdld.max() - deviations.hdld.min()
}

pub fn evaluate(deviations: &C41Deviations, limit: i32) -> Option<Problem> {
    let spread = spread(deviations);
    (spread > limit).then(|| Problem::spread_exceeded(spread, limit))
}
