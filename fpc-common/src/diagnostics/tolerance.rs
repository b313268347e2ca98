//! Tolerance bands and the two-tier classifier
//!
//! Values are in ×100 density units. C-41 limits follow Kodak Z-131, B&W
//! limits follow the Ilford FPC manual.

use serde::{Deserialize, Serialize};

use super::types::{BwDeviations, C41Deviations, Channel, Quantity, Status, ToleranceLevel, Violation};

/// Action/control thresholds for one quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub action: i32,
    pub control: i32,
}

impl ToleranceBand {
    pub const fn new(action: i32, control: i32) -> Self {
        Self { action, control }
    }

    /// Classify `|value|` against the band (strict `>`).
    pub fn level(&self, value: i32) -> ToleranceLevel {
        let magnitude = value.abs();
        if magnitude > self.control {
            ToleranceLevel::Control
        } else if magnitude > self.action {
            ToleranceLevel::Action
        } else {
            ToleranceLevel::Ok
        }
    }

    /// Classify a one-sided quantity; only positive excursions count.
    pub fn level_positive(&self, value: i32) -> ToleranceLevel {
        if value > self.control {
            ToleranceLevel::Control
        } else if value > self.action {
            ToleranceLevel::Action
        } else {
            ToleranceLevel::Ok
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.action < 0 || self.control < 0 {
            return Err(format!("{}: thresholds must be non-negative", name));
        }
        if self.action > self.control {
            return Err(format!(
                "{}: action threshold {} exceeds control threshold {}",
                name, self.action, self.control
            ));
        }
        Ok(())
    }
}

/// C-41 tolerance bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct C41Tolerances {
    pub dmin: ToleranceBand,
    pub ld: ToleranceBand,
    pub hdld: ToleranceBand,
    /// Retained silver; one-sided positive
    pub dmaxb_yb: ToleranceBand,
    /// Maximum allowed HD-LD colour-balance spread
    pub spread: i32,
}

impl Default for C41Tolerances {
    fn default() -> Self {
        Self {
            dmin: ToleranceBand::new(3, 5),
            ld: ToleranceBand::new(6, 8),
            hdld: ToleranceBand::new(7, 9),
            dmaxb_yb: ToleranceBand::new(10, 12),
            spread: 9,
        }
    }
}

impl C41Tolerances {
    fn band(&self, quantity: Quantity) -> Option<ToleranceBand> {
        match quantity {
            Quantity::Dmin => Some(self.dmin),
            Quantity::Ld => Some(self.ld),
            Quantity::Hdld => Some(self.hdld),
            Quantity::DmaxbYb => Some(self.dmaxb_yb),
            _ => None,
        }
    }
}

/// B&W tolerance bands and drift-detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BwTolerances {
    pub ld: ToleranceBand,
    pub hdld: ToleranceBand,
    /// Fewest strips (history plus current) the drift rule will look at
    pub drift_min_readings: usize,
    /// Net decline, first strip to last, that counts as drift
    pub drift_min_decline: i32,
}

impl Default for BwTolerances {
    fn default() -> Self {
        Self {
            ld: ToleranceBand::new(6, 10),
            hdld: ToleranceBand::new(6, 10),
            drift_min_readings: 3,
            drift_min_decline: 4,
        }
    }
}

/// Complete tolerance configuration, built once and shared by reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceTable {
    pub c41: C41Tolerances,
    pub bw: BwTolerances,
}

impl ToleranceTable {
    /// Check every band is ordered `0 ≤ action ≤ control`.
    pub fn validate(&self) -> Result<(), String> {
        self.c41.dmin.validate("c41.dmin")?;
        self.c41.ld.validate("c41.ld")?;
        self.c41.hdld.validate("c41.hdld")?;
        self.c41.dmaxb_yb.validate("c41.dmaxb_yb")?;
        self.bw.ld.validate("bw.ld")?;
        self.bw.hdld.validate("bw.hdld")?;
        if self.c41.spread < 0 {
            return Err("c41.spread: limit must be non-negative".to_string());
        }
        if self.bw.drift_min_readings < 2 {
            return Err("bw.drift_min_readings: at least two strips are needed".to_string());
        }
        Ok(())
    }

    /// Sweep D-min and LD per channel, then HD-LD per channel.
    ///
    /// Every breach is itemized; the overall verdict only ever escalates.
    pub fn classify_c41(&self, deviations: &C41Deviations) -> Status {
        let mut status = Status::ok();

        for quantity in [Quantity::Dmin, Quantity::Ld, Quantity::Hdld] {
            let (Some(band), Some(values)) = (self.c41.band(quantity), deviations.patch(quantity))
            else {
                continue;
            };

            for channel in Channel::ALL {
                let value = values.get(channel);
                let level = band.level(value);
                if level == ToleranceLevel::Ok {
                    continue;
                }
                status.overall = status.overall.max(level);
                status.details.push(Violation {
                    patch: quantity,
                    channel,
                    value,
                    level,
                });
            }
        }

        status
    }

    /// Combined LD / HD-LD verdict; B&W carries no itemized details.
    pub fn classify_bw(&self, deviations: &BwDeviations) -> Status {
        let overall = self.bw.ld.level(deviations.ld).max(self.bw.hdld.level(deviations.hdld));
        Status {
            overall,
            details: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::types::Channels;

    #[test]
    fn test_band_strict_thresholds() {
        let band = ToleranceBand::new(6, 8);
        assert_eq!(band.level(6), ToleranceLevel::Ok);
        assert_eq!(band.level(7), ToleranceLevel::Action);
        assert_eq!(band.level(-8), ToleranceLevel::Action);
        assert_eq!(band.level(-9), ToleranceLevel::Control);
    }

    #[test]
    fn test_one_sided_band_ignores_negative() {
        let band = ToleranceBand::new(10, 12);
        assert_eq!(band.level_positive(-30), ToleranceLevel::Ok);
        assert_eq!(band.level_positive(11), ToleranceLevel::Action);
        assert_eq!(band.level_positive(13), ToleranceLevel::Control);
    }

    #[test]
    fn test_default_thresholds() {
        let table = ToleranceTable::default();
        assert_eq!(table.c41.dmin, ToleranceBand::new(3, 5));
        assert_eq!(table.c41.ld, ToleranceBand::new(6, 8));
        assert_eq!(table.c41.hdld, ToleranceBand::new(7, 9));
        assert_eq!(table.c41.dmaxb_yb, ToleranceBand::new(10, 12));
        assert_eq!(table.c41.spread, 9);
        assert_eq!(table.bw.ld, ToleranceBand::new(6, 10));
        assert_eq!(table.bw.hdld, ToleranceBand::new(6, 10));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let mut table = ToleranceTable::default();
        table.c41.ld = ToleranceBand::new(9, 8);
        let err = table.validate().unwrap_err();
        assert!(err.contains("c41.ld"));
    }

    #[test]
    fn test_c41_within_tolerance() {
        let status = ToleranceTable::default().classify_c41(&C41Deviations::default());
        assert_eq!(status.overall, ToleranceLevel::Ok);
        assert!(status.details.is_empty());
    }

    #[test]
    fn test_c41_control_not_downgraded_by_later_action() {
        let deviations = C41Deviations {
            dmin: Channels::new(6, 0, 0),
            ld: Channels::new(0, 7, 0),
            hdld: Channels::new(0, 0, -8),
            ..Default::default()
        };

        let status = ToleranceTable::default().classify_c41(&deviations);
        assert_eq!(status.overall, ToleranceLevel::Control);
        assert_eq!(status.details.len(), 3);
        assert_eq!(status.details[0].patch, Quantity::Dmin);
        assert_eq!(status.details[0].level, ToleranceLevel::Control);
        assert_eq!(status.details[1].patch, Quantity::Ld);
        assert_eq!(status.details[1].channel, Channel::G);
        assert_eq!(status.details[1].level, ToleranceLevel::Action);
        assert_eq!(status.details[2].patch, Quantity::Hdld);
        assert_eq!(status.details[2].value, -8);
        assert_eq!(status.details[2].level, ToleranceLevel::Action);
    }

    #[test]
    fn test_c41_dmax_and_hd_not_classified() {
        let deviations = C41Deviations {
            dmax: Channels::new(40, 40, 40),
            hd: Channels::new(-40, -40, -40),
            ..Default::default()
        };
        let status = ToleranceTable::default().classify_c41(&deviations);
        assert_eq!(status.overall, ToleranceLevel::Ok);
    }

    #[test]
    fn test_bw_classification() {
        let table = ToleranceTable::default();
        let classify = |ld, hdld| table.classify_bw(&BwDeviations { ld, hdld, dmin: 0 }).overall;

        assert_eq!(classify(0, 0), ToleranceLevel::Ok);
        assert_eq!(classify(6, -6), ToleranceLevel::Ok);
        assert_eq!(classify(0, -8), ToleranceLevel::Action);
        assert_eq!(classify(-7, 0), ToleranceLevel::Action);
        assert_eq!(classify(11, 0), ToleranceLevel::Control);
        assert_eq!(classify(-3, 10), ToleranceLevel::Action);
        assert_eq!(classify(-3, -11), ToleranceLevel::Control);
    }

    #[test]
    fn test_partial_toml_override_keeps_defaults() {
        let table: ToleranceTable = toml::from_str(
            r#"
            [c41]
            spread = 12

            [bw.ld]
            action = 5
            control = 9
            "#,
        )
        .unwrap();

        assert_eq!(table.c41.spread, 12);
        assert_eq!(table.c41.ld, ToleranceBand::new(6, 8));
        assert_eq!(table.bw.ld, ToleranceBand::new(5, 9));
        assert_eq!(table.bw.hdld, ToleranceBand::new(6, 10));
    }
}
