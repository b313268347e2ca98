//! Reading minus reference, patch by patch

use serde::Serialize;

use super::error::DiagnosticError;
use super::types::{BwDeviations, BwReading, C41Deviations, ColorReading, Strip};

/// Deviation record of either process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Deviations {
    C41(C41Deviations),
    Bw(BwDeviations),
}

/// Dispatch on the strip shape; both sides must belong to the same process.
pub fn calculate_deviations(reading: &Strip, reference: &Strip) -> Result<Deviations, DiagnosticError> {
    match (reading, reference) {
        (Strip::C41(reading), Strip::C41(reference)) => Ok(Deviations::C41(c41_deviations(reading, reference))),
        (Strip::Bw(reading), Strip::Bw(reference)) => Ok(Deviations::Bw(bw_deviations(reading, reference))),
        _ => Err(DiagnosticError::validation(
            "reference",
            format!("shape does not match a {} reading", reading.process()),
        )),
    }
}

pub fn c41_deviations(reading: &ColorReading, reference: &ColorReading) -> C41Deviations {
    C41Deviations {
        dmax: reading.dmax - reference.dmax,
        hd: reading.hd - reference.hd,
        ld: reading.ld - reference.ld,
        dmin: reading.dmin - reference.dmin,
        hdld: reading.hdld() - reference.hdld(),
    }
}

pub fn bw_deviations(reading: &BwReading, reference: &BwReading) -> BwDeviations {
    BwDeviations {
        ld: reading.ld - reference.ld,
        hdld: reading.hdld() - reference.hdld(),
        dmin: reading.dmin - reference.dmin,
    }
}

/// Change in (blue D-max − yellow reference) relative to the reference strip
///
/// The reference falls back to its blue D-min when it has no `yellow_b`. A
/// reading only falls back when the reference does too; a reading without
/// `yellow_b` against a reference with one cannot be compared.
pub fn retained_silver_deviation(reading: &ColorReading, reference: &ColorReading) -> Option<i32> {
    let reading_value = match reference.yellow_b {
        Some(_) => reading.measured_dmaxb_yb()?,
        None => reading.dmaxb_yb(),
    };
    Some(reading_value - reference.dmaxb_yb())
}
