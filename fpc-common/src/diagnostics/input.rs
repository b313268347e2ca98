//! Shape validation for JSON readings
//!
//! Readings arrive as loosely-typed JSON from the web form. Every patch and
//! channel is checked here so a missing field is reported by name instead of
//! leaking into the deviation arithmetic.

use serde_json::Value;

use super::error::DiagnosticError;
use super::types::{BwReading, Channels, ColorReading, ProcessType, Strip};

const PATCHES: [&str; 4] = ["dmax", "hd", "ld", "dmin"];

/// Largest density magnitude accepted, ×100 (a density of 100.00)
pub const MAX_DENSITY: i32 = 10_000;

/// Validate `value` against the shape of `process`.
///
/// `side` prefixes field names in errors (`reading`, `reference`, `history[2]`).
pub fn parse_strip(process: ProcessType, value: &Value, side: &str) -> Result<Strip, DiagnosticError> {
    match process {
        ProcessType::C41 => parse_color(value, side).map(Strip::C41),
        ProcessType::Bw => parse_bw(value, side).map(Strip::Bw),
    }
}

/// Validate a C-41 reading: four `{r,g,b}` patches plus optional `yellow_b`.
pub fn parse_color(value: &Value, side: &str) -> Result<ColorReading, DiagnosticError> {
    let object = expect_object(value, side)?;
    let mut patches = [Channels::default(); 4];

    for (slot, patch) in patches.iter_mut().zip(PATCHES) {
        let path = format!("{}.{}", side, patch);
        let patch_value = object
            .get(patch)
            .ok_or_else(|| DiagnosticError::validation(&path, "missing patch"))?;
        let channels = expect_object(patch_value, &path)?;
        *slot = Channels::new(
            channel_density(channels, &path, "r")?,
            channel_density(channels, &path, "g")?,
            channel_density(channels, &path, "b")?,
        );
    }

    let yellow_b = match object.get("yellow_b") {
        None | Some(Value::Null) => None,
        Some(v) => Some(density(v, &format!("{}.yellow_b", side))?),
    };

    let [dmax, hd, ld, dmin] = patches;
    Ok(ColorReading {
        dmax,
        hd,
        ld,
        dmin,
        yellow_b,
    })
}

/// Validate a B&W reading: four scalar patches.
pub fn parse_bw(value: &Value, side: &str) -> Result<BwReading, DiagnosticError> {
    let object = expect_object(value, side)?;
    let mut patches = [0i32; 4];

    for (slot, patch) in patches.iter_mut().zip(PATCHES) {
        let path = format!("{}.{}", side, patch);
        let patch_value = object
            .get(patch)
            .ok_or_else(|| DiagnosticError::validation(&path, "missing patch"))?;
        *slot = density(patch_value, &path)?;
    }

    let [dmax, hd, ld, dmin] = patches;
    Ok(BwReading { dmax, hd, ld, dmin })
}

fn expect_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a serde_json::Map<String, Value>, DiagnosticError> {
    value
        .as_object()
        .ok_or_else(|| DiagnosticError::validation(path, "expected an object"))
}

fn channel_density(
    channels: &serde_json::Map<String, Value>,
    patch_path: &str,
    channel: &str,
) -> Result<i32, DiagnosticError> {
    let path = format!("{}.{}", patch_path, channel);
    let value = channels
        .get(channel)
        .ok_or_else(|| DiagnosticError::validation(&path, "missing channel"))?;
    density(value, &path)
}

/// Accept integers, and floats that carry a whole ×100 density (`163.0`).
///
/// Magnitudes above [`MAX_DENSITY`] are rejected so deviation arithmetic
/// cannot overflow.
fn density(value: &Value, path: &str) -> Result<i32, DiagnosticError> {
    let out_of_range = || DiagnosticError::validation(path, "density out of range");

    if let Some(n) = value.as_i64() {
        if n.unsigned_abs() > u64::from(MAX_DENSITY.unsigned_abs()) {
            return Err(out_of_range());
        }
        return i32::try_from(n).map_err(|_| out_of_range());
    }
    if value.is_u64() {
        return Err(out_of_range());
    }

    match value.as_f64() {
        Some(f) if f.abs() > f64::from(MAX_DENSITY) => Err(out_of_range()),
        Some(f) if f.fract() == 0.0 => Ok(f as i32),
        Some(_) => Err(DiagnosticError::validation(
            path,
            "expected a whole-number density on the ×100 scale",
        )),
        None => Err(DiagnosticError::validation(path, "expected a numeric density")),
    }
}
