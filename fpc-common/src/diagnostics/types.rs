//! Control-strip data model
//!
//! All densities are integers on the ×100 scale used by the densitometer
//! log sheets (a printed density of 1.63 is stored as `163`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DiagnosticError;

/// Photographic process a control strip belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessType {
    /// Colour negative process (Kodak Z-131)
    C41,
    /// Black-and-white process (Ilford FPC)
    Bw,
}

impl ProcessType {
    /// Tag used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessType::C41 => "c41",
            ProcessType::Bw => "bw",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessType {
    type Err = DiagnosticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c41" => Ok(ProcessType::C41),
            "bw" => Ok(ProcessType::Bw),
            other => Err(DiagnosticError::UnsupportedProcess(other.to_string())),
        }
    }
}

/// Colour channel of a densitometer reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::R => "r",
            Channel::G => "g",
            Channel::B => "b",
        }
    }
}

/// Measured or derived quantity on a control strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Dmax,
    Hd,
    Ld,
    Dmin,
    /// HD minus LD contrast indicator
    Hdld,
    /// Blue D-max minus the silver-free yellow reference (retained silver)
    DmaxbYb,
    /// Behaviour across several consecutive strips
    Trend,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Dmax => "dmax",
            Quantity::Hd => "hd",
            Quantity::Ld => "ld",
            Quantity::Dmin => "dmin",
            Quantity::Hdld => "hdld",
            Quantity::DmaxbYb => "dmaxb_yb",
            Quantity::Trend => "trend",
        }
    }
}

/// Red/green/blue densities of one patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channels {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Channels {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    pub fn get(&self, channel: Channel) -> i32 {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
        }
    }

    /// Mean of the three channels (not rounded)
    pub fn average(&self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    pub fn max(&self) -> i32 {
        self.r.max(self.g).max(self.b)
    }

    pub fn min(&self) -> i32 {
        self.r.min(self.g).min(self.b)
    }

    pub fn is_zero(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Apply `f` to each channel
    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

impl Sub for Channels {
    type Output = Channels;

    fn sub(self, rhs: Channels) -> Channels {
        Channels::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

/// One C-41 control strip (or its reference values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorReading {
    pub dmax: Channels,
    pub hd: Channels,
    pub ld: Channels,
    pub dmin: Channels,
    /// Silver-free yellow density used for the retained-silver check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yellow_b: Option<i32>,
}

impl ColorReading {
    /// Per-channel HD-LD contrast of this strip
    pub fn hdld(&self) -> Channels {
        self.hd - self.ld
    }

    /// Blue D-max minus the yellow reference, falling back to blue D-min
    pub fn dmaxb_yb(&self) -> i32 {
        self.dmax.b - self.yellow_b.unwrap_or(self.dmin.b)
    }

    /// Blue D-max minus the measured yellow reference, if one was read
    pub fn measured_dmaxb_yb(&self) -> Option<i32> {
        self.yellow_b.map(|yellow_b| self.dmax.b - yellow_b)
    }
}

/// One black-and-white control strip (or its reference values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BwReading {
    pub dmax: i32,
    pub hd: i32,
    pub ld: i32,
    pub dmin: i32,
}

impl BwReading {
    pub fn hdld(&self) -> i32 {
        self.hd - self.ld
    }
}

/// A validated control strip of either process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Strip {
    C41(ColorReading),
    Bw(BwReading),
}

impl Strip {
    pub fn process(&self) -> ProcessType {
        match self {
            Strip::C41(_) => ProcessType::C41,
            Strip::Bw(_) => ProcessType::Bw,
        }
    }

    /// Raw HD-LD of the strip itself, as written to the log sheet
    pub fn raw_hdld(&self) -> serde_json::Value {
        match self {
            Strip::C41(reading) => serde_json::json!(reading.hdld()),
            Strip::Bw(reading) => serde_json::json!(reading.hdld()),
        }
    }
}

/// Deviation of a C-41 strip from its reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct C41Deviations {
    pub dmax: Channels,
    pub hd: Channels,
    pub ld: Channels,
    pub dmin: Channels,
    pub hdld: Channels,
}

impl C41Deviations {
    pub fn patch(&self, quantity: Quantity) -> Option<Channels> {
        match quantity {
            Quantity::Dmax => Some(self.dmax),
            Quantity::Hd => Some(self.hd),
            Quantity::Ld => Some(self.ld),
            Quantity::Dmin => Some(self.dmin),
            Quantity::Hdld => Some(self.hdld),
            Quantity::DmaxbYb | Quantity::Trend => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        [self.dmax, self.hd, self.ld, self.dmin, self.hdld]
            .iter()
            .all(Channels::is_zero)
    }
}

/// Deviation of a B&W strip from its reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BwDeviations {
    pub ld: i32,
    pub hdld: i32,
    pub dmin: i32,
}

/// Result of comparing one deviation against a tolerance band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceLevel {
    Ok,
    Action,
    Control,
}

impl ToleranceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToleranceLevel::Ok => "ok",
            ToleranceLevel::Action => "action",
            ToleranceLevel::Control => "control",
        }
    }
}

/// One itemized tolerance breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub patch: Quantity,
    pub channel: Channel,
    pub value: i32,
    pub level: ToleranceLevel,
}

/// Overall tolerance verdict for a strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub overall: ToleranceLevel,
    pub details: Vec<Violation>,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            overall: ToleranceLevel::Ok,
            details: Vec::new(),
        }
    }
}

/// Severity attached to a reported problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Action,
    Control,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Action => "action",
            Severity::Control => "control",
        }
    }
}

/// Retained-silver summary carried on every C-41 diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetainedSilver {
    /// Deviation of (D-max blue − yellow reference) from the reference strip;
    /// `None` when the reference carries `yellow_b` and the reading does not
    pub value: Option<i32>,
    /// Control limit the value is judged against
    pub limit: i32,
}
