//! Static fault catalog
//!
//! C-41 entries transcribe the diagnostic charts of Kodak Z-131 (Charts 1-22),
//! B&W entries the Ilford FPC fault finder. Records are plain data; matchers
//! select them by id and attach a severity, nothing else varies per fault.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::problem::Problem;
use super::types::{ProcessType, Quantity, Severity};

/// Expected direction of a quantity in a fault signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    VeryLow,
    Low,
    SlightLow,
    Normal,
    SlightHigh,
    High,
    VeryHigh,
    GradualDecline,
}

/// How a signature constrains the channels of one quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Same direction on all three channels
    Uniform(Trend),
    PerChannel { r: Trend, g: Trend, b: Trend },
    /// Only the blue channel is constrained
    Blue(Trend),
    /// Scalar quantity (B&W patches, retained silver, trend)
    Scalar(Trend),
}

/// One term of a fault's declared pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternTerm {
    pub quantity: Quantity,
    pub expect: Expectation,
}

const fn all(quantity: Quantity, trend: Trend) -> PatternTerm {
    PatternTerm {
        quantity,
        expect: Expectation::Uniform(trend),
    }
}

const fn rgb(quantity: Quantity, r: Trend, g: Trend, b: Trend) -> PatternTerm {
    PatternTerm {
        quantity,
        expect: Expectation::PerChannel { r, g, b },
    }
}

const fn blue(quantity: Quantity, trend: Trend) -> PatternTerm {
    PatternTerm {
        quantity,
        expect: Expectation::Blue(trend),
    }
}

const fn scalar(quantity: Quantity, trend: Trend) -> PatternTerm {
    PatternTerm {
        quantity,
        expect: Expectation::Scalar(trend),
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaultRecord {
    pub id: u16,
    pub process: ProcessType,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<&'static str>,
    pub pattern: &'static [PatternTerm],
    pub cause: &'static str,
    pub action: &'static str,
    pub manual_ref: &'static str,
}

/// Catalog ids referenced by the matchers
pub mod fault_ids {
    pub const DEVELOPER_UNDERREPLENISHED: u16 = 7;
    pub const PART_A_LOW: u16 = 9;
    pub const PART_A_HIGH: u16 = 10;
    pub const PART_C_LOW: u16 = 13;
    pub const PART_C_HIGH: u16 = 14;
    pub const BLEACH_CONTAMINATION: u16 = 20;
    pub const FIXER_CONTAMINATION: u16 = 21;
    pub const BLEACH_TOO_DILUTE: u16 = 22;
    pub const BLEACH_UNDERREPLENISHED: u16 = 23;
    pub const BLEACH_POOR_AERATION: u16 = 24;
    pub const FIXER_TOO_DILUTE: u16 = 26;
    pub const FIXER_PH_TOO_LOW: u16 = 27;

    pub const BW_UNDERACTIVE: u16 = 101;
    pub const BW_OVERACTIVE: u16 = 102;
    pub const BW_CONTRAST_LOW: u16 = 103;
    pub const BW_CONTRAST_HIGH: u16 = 104;
    pub const BW_CONTAMINATION: u16 = 105;
    pub const BW_GRADUAL_DRIFT: u16 = 106;
}

use Quantity::{Dmax, DmaxbYb, Dmin, Hd, Hdld, Ld};
use Trend::{GradualDecline, High, Low, Normal, SlightHigh, SlightLow, VeryHigh, VeryLow};

static C41_FAULTS: [FaultRecord; 27] = [
    FaultRecord {
        id: 1,
        process: ProcessType::C41,
        name: "Developer Temperature Too Low",
        signature: Some("all_low_uniform"),
        pattern: &[all(Dmax, Low), all(Hd, Low), all(Ld, Low), all(Dmin, Normal)],
        cause: "Developer temperature below 37.8°C (100°F)",
        action: "Check developer temperature with accurate thermometer. Verify temperature control unit is functioning. Adjust to 37.8°C ±0.15°C.",
        manual_ref: "Chart 1, Page 5-29",
    },
    FaultRecord {
        id: 2,
        process: ProcessType::C41,
        name: "Developer Temperature Too High",
        signature: Some("all_high_uniform"),
        pattern: &[all(Dmax, High), all(Hd, High), all(Ld, High), all(Dmin, Normal)],
        cause: "Developer temperature above 37.8°C (100°F)",
        action: "Check developer temperature with accurate thermometer. Check for intermittent electrical or tempered-water-flow problems. Adjust to 37.8°C ±0.15°C.",
        manual_ref: "Chart 1, Page 5-29",
    },
    FaultRecord {
        id: 3,
        process: ProcessType::C41,
        name: "Developer Time Too Short",
        signature: Some("all_low_uniform"),
        pattern: &[all(Dmax, Low), all(Hd, Low), all(Ld, Low), all(Dmin, Normal)],
        cause: "Developer time below 3 minutes 15 seconds",
        action: "Use stopwatch to measure actual developer time. Check for electrical-load variations and motor-temperature differences. Verify transport is functioning properly. Aim: 3:15.",
        manual_ref: "Chart 2, Page 5-30",
    },
    FaultRecord {
        id: 4,
        process: ProcessType::C41,
        name: "Developer Time Too Long",
        signature: Some("all_high_uniform"),
        pattern: &[all(Dmax, High), all(Hd, High), all(Ld, High), all(Dmin, Normal)],
        cause: "Developer time exceeds 3 minutes 15 seconds",
        action: "Measure developer time with stopwatch. Check rack threading. Adjust time to aim (3:15). Allow recommended drain time as part of developer time.",
        manual_ref: "Chart 2, Page 5-30",
    },
    FaultRecord {
        id: 5,
        process: ProcessType::C41,
        name: "Developer Agitation Too Low",
        signature: Some("hd_affected_more"),
        pattern: &[all(Dmax, Low), all(Hd, Low), all(Ld, SlightLow), all(Dmin, Normal)],
        cause: "Insufficient agitation in developer - not removing by-products effectively",
        action: "For dip & dunk: Check nitrogen burst cycle (2-sec burst, 8-sec rest). Verify bubbles are ~4mm diameter. Check recirculation system for kinked lines or plugged sparger. Solution rise should be ~1.5cm during burst.",
        manual_ref: "Chart 3, Page 5-31",
    },
    FaultRecord {
        id: 6,
        process: ProcessType::C41,
        name: "Developer Agitation Too High",
        signature: Some("hd_affected_more_high"),
        pattern: &[all(Dmax, High), all(Hd, High), all(Ld, SlightHigh), all(Dmin, Normal)],
        cause: "Excessive agitation causing oxidation and foaming",
        action: "Reduce agitation. For burst agitation, verify 10-second cycle (2-sec burst, 8-sec rest). Check that solution rise is not exceeding 1.5cm. Excessive agitation causes oxidation.",
        manual_ref: "Chart 3, Page 5-31",
    },
    FaultRecord {
        id: 7,
        process: ProcessType::C41,
        name: "Developer Underreplenished",
        signature: Some("all_low_including_dmin"),
        pattern: &[all(Dmax, Low), all(Hd, Low), all(Ld, Low), all(Dmin, Low)],
        cause: "Developer replenishment rate too low",
        action: "Check replenishment rate setting and pump operation. Add 25mL properly mixed developer replenisher per litre of tank solution. Turn on recirculation for 15 minutes before running control strip.",
        manual_ref: "Charts 4-5, Pages 5-32/33",
    },
    FaultRecord {
        id: 8,
        process: ProcessType::C41,
        name: "Developer Overreplenished",
        signature: Some("all_high_including_dmin"),
        pattern: &[all(Dmax, High), all(Hd, High), all(Ld, High), all(Dmin, High)],
        cause: "Developer replenishment rate too high",
        action: "Check replenishment rate. Add solution of 1 part Developer Starter to 4 parts water at 25mL per litre of tank solution. Recirculate 15 minutes before testing.",
        manual_ref: "Charts 4-5, Pages 5-32/33",
    },
    FaultRecord {
        id: 9,
        process: ProcessType::C41,
        name: "Developer Mix Error - Part A Low",
        signature: Some("red_hdld_most_affected_low"),
        pattern: &[rgb(Hdld, Low, SlightLow, Low), all(Ld, Normal)],
        cause: "Not enough Part A used in developer mix",
        action: "Check mixing procedures. Unless you know the exact amount omitted, replace developer solution. Part A primarily affects red HD densities.",
        manual_ref: "Chart 6, Page 5-34",
    },
    FaultRecord {
        id: 10,
        process: ProcessType::C41,
        name: "Developer Mix Error - Part A High",
        signature: Some("red_hdld_high_blue_low"),
        pattern: &[rgb(Hdld, High, SlightHigh, Low), all(Ld, Normal)],
        cause: "Too much Part A used in developer mix",
        action: "Check mixing procedures. Unless you know the exact amount, replace developer solution. Excess Part A increases red HD dramatically, decreases blue.",
        manual_ref: "Chart 6, Page 5-34",
    },
    FaultRecord {
        id: 11,
        process: ProcessType::C41,
        name: "Developer Mix Error - Part B Low",
        signature: Some("all_high_hdld_most"),
        pattern: &[all(Dmax, High), all(Hdld, High), all(Ld, High)],
        cause: "Not enough Part B used - developer too active",
        action: "Check mixing procedures. Part B is a restrainer. Replace developer solution as correction is difficult without chemical analysis.",
        manual_ref: "Chart 7, Page 5-35",
    },
    FaultRecord {
        id: 12,
        process: ProcessType::C41,
        name: "Developer Mix Error - Part B High",
        signature: Some("all_low_hdld_most"),
        pattern: &[all(Dmax, Low), all(Hdld, Low), all(Ld, Low)],
        cause: "Too much Part B used - developer restrained",
        action: "Check mixing procedures. Excess Part B reduces activity. Replace developer solution.",
        manual_ref: "Chart 7, Page 5-35",
    },
    FaultRecord {
        id: 13,
        process: ProcessType::C41,
        name: "Developer Mix Error - Part C Low",
        signature: Some("blue_hdld_most_affected_low"),
        pattern: &[rgb(Hdld, Low, Low, VeryLow), all(Ld, Low)],
        cause: "Not enough Part C used in developer mix",
        action: "Check mixing procedures. Part C primarily affects blue densities. Replace developer solution.",
        manual_ref: "Chart 8, Page 5-36",
    },
    FaultRecord {
        id: 14,
        process: ProcessType::C41,
        name: "Developer Mix Error - Part C High",
        signature: Some("green_blue_high_red_normal"),
        pattern: &[rgb(Hdld, Normal, High, High), rgb(Ld, Normal, High, High)],
        cause: "Too much Part C used in developer mix",
        action: "Check mixing procedures. Excess Part C increases green and blue densities. Replace developer solution.",
        manual_ref: "Chart 8, Page 5-36",
    },
    FaultRecord {
        id: 15,
        process: ProcessType::C41,
        name: "Developer Starter - Too Little",
        signature: Some("all_high_fresh_tank"),
        pattern: &[all(Dmax, High), all(Hd, High), all(Ld, High), all(Dmin, SlightHigh)],
        cause: "Fresh developer tank has too little starter - too active",
        action: "Add developer starter in 11mL/L increments. Recirculate 15 minutes before testing. Starter reduces fresh developer activity to match seasoned solution.",
        manual_ref: "Charts 9-10, Pages 5-37/38",
    },
    FaultRecord {
        id: 16,
        process: ProcessType::C41,
        name: "Developer Starter - Too Much",
        signature: Some("all_low_fresh_tank"),
        pattern: &[all(Dmax, Low), all(Hd, Low), all(Ld, Low), all(Dmin, SlightLow)],
        cause: "Fresh developer tank has too much starter - restrained",
        action: "Add 39mL developer replenisher + 13mL water per litre of tank solution. Recirculate 15 minutes before testing.",
        manual_ref: "Charts 9-10, Pages 5-37/38",
    },
    FaultRecord {
        id: 17,
        process: ProcessType::C41,
        name: "Developer Too Dilute",
        signature: Some("all_low_dmin_normal"),
        pattern: &[all(Dmax, Low), all(Hd, Low), all(Ld, Low), all(Dmin, Normal)],
        cause: "Developer tank solution diluted - too much water in mix or excessive evaporation top-off",
        action: "Check specific gravity with hydrometer. If diluted, replace tank solution. For evaporation: top off with water daily at start-up, not during processing.",
        manual_ref: "Chart 11, Page 5-39",
    },
    FaultRecord {
        id: 18,
        process: ProcessType::C41,
        name: "Developer Too Concentrated",
        signature: Some("all_high_dmin_normal"),
        pattern: &[all(Dmax, High), all(Hd, High), all(Ld, High), all(Dmin, Normal)],
        cause: "Developer over-concentrated from evaporation or insufficient water in mix",
        action: "Check specific gravity. Add water (max 5% of tank volume) if over-concentrated. Top off daily at start-up. Use floating lids on replenisher tanks.",
        manual_ref: "Chart 11, Page 5-39",
    },
    FaultRecord {
        id: 19,
        process: ProcessType::C41,
        name: "Developer Oxidation",
        signature: Some("gradual_decline_all"),
        pattern: &[all(Dmax, Low), all(Hdld, Low), all(Ld, Low), all(Dmin, Normal)],
        cause: "Aerial oxidation of developer from air leaks, low utilization, or excessive agitation",
        action: "Use floating lids on all developer replenisher tanks. Check recirculation line for leaks allowing air in. Ensure at least one tank turnover every 4 weeks. Check for excessive burst agitation.",
        manual_ref: "Chart 12, Page 5-40",
    },
    FaultRecord {
        id: 20,
        process: ProcessType::C41,
        name: "Developer Contaminated with Bleach",
        signature: Some("dmin_ld_high_hdld_low"),
        pattern: &[all(Dmin, High), all(Ld, High), all(Hdld, Low)],
        cause: "Bleach contamination causing chemical fogging",
        action: "STOP PROCESSING. Very small amounts cause major issues. Check for bleach splashing into developer, contaminated leader cards. Dump developer, rinse tank thoroughly, mix fresh solution.",
        manual_ref: "Chart 13, Page 5-41",
    },
    FaultRecord {
        id: 21,
        process: ProcessType::C41,
        name: "Developer Contaminated with Fixer",
        signature: Some("all_high_dmin_red_highest"),
        pattern: &[
            all(Dmax, High),
            all(Hd, High),
            all(Ld, High),
            rgb(Dmin, High, VeryHigh, High),
            all(Hdld, High),
        ],
        cause: "Fixer contamination causing chemical fogging - noticeable increase in red D-min",
        action: "STOP PROCESSING. Check for mixing equipment not properly cleaned, contaminated leader cards. Dump developer, rinse tank thoroughly, mix fresh solution.",
        manual_ref: "Chart 14, Page 5-42",
    },
    FaultRecord {
        id: 22,
        process: ProcessType::C41,
        name: "Bleach Too Dilute",
        signature: Some("retained_silver_high"),
        pattern: &[scalar(DmaxbYb, High), rgb(Hdld, Normal, Normal, SlightLow)],
        cause: "Bleach diluted by developer carryover or mix error - causing retained silver",
        action: "Check squeegees for developer carryover. Add Bleach Regenerator Concentrate (30mL) + Starter (15mL) per litre. Rebleach and refix affected film.",
        manual_ref: "Chart 15, Page 5-43",
    },
    FaultRecord {
        id: 23,
        process: ProcessType::C41,
        name: "Bleach Underreplenished",
        signature: Some("retained_silver_blue_dmin_up"),
        pattern: &[
            scalar(DmaxbYb, High),
            rgb(Hdld, Normal, Normal, SlightLow),
            blue(Dmin, SlightHigh),
        ],
        cause: "Bleach replenishment rate too low - not compensating for developer carryover",
        action: "Check replenishment rate and pump settings. Check developer exit squeegees. Add Bleach Parts A and B per litre of tank solution. Rebleach affected film.",
        manual_ref: "Charts 16-17, Pages 5-44/45",
    },
    FaultRecord {
        id: 24,
        process: ProcessType::C41,
        name: "Bleach Poor Aeration",
        signature: Some("retained_silver_leuco_cyan"),
        pattern: &[scalar(DmaxbYb, High), rgb(Hdld, Low, Normal, Low)],
        cause: "Inadequate bleach aeration - causing retained silver and leuco-cyan dye",
        action: "Check air bubbling in bleach tank. Verify air supply is adequate, tubing clear, distributor not clogged. Rebleach affected film in known good bleach, then complete remaining steps.",
        manual_ref: "Charts 18-19, Pages 5-46/47",
    },
    FaultRecord {
        id: 25,
        process: ProcessType::C41,
        name: "Bleach Stain",
        signature: Some("green_magenta_stain"),
        pattern: &[rgb(Dmin, Normal, High, Normal), rgb(Ld, Normal, High, Normal)],
        cause: "Developer by-product in bleach causing magenta stain - usually from underaeration",
        action: "Correct aeration problem. May need to dump part or all of bleach tank. Activated carbon filter in recirculation may help if staining is minimal.",
        manual_ref: "Chart 20, Page 5-48",
    },
    FaultRecord {
        id: 26,
        process: ProcessType::C41,
        name: "Fixer Too Dilute",
        signature: Some("red_green_dmin_ld_high"),
        pattern: &[rgb(Dmin, High, High, Normal), rgb(Ld, High, High, Normal)],
        cause: "Fixer diluted - retained silver halide and sensitizer dye. May appear milky in D-min areas.",
        action: "Check for excessive wash carryover, underreplenishment, or fixer sulfurization. Refix and rewash affected film. Replace fixer if sulfurized.",
        manual_ref: "Chart 21, Page 5-49",
    },
    FaultRecord {
        id: 27,
        process: ProcessType::C41,
        name: "Fixer pH Too Low",
        signature: Some("leuco_cyan_red_low"),
        pattern: &[rgb(Hdld, Low, Normal, Normal), rgb(Ld, Low, Normal, Normal)],
        cause: "Fixer pH too low causing leuco-cyan dye - often from malfunctioning electrolytic silver recovery",
        action: "Check silver recovery unit operation. Replace fixer with fresh solution. Reprocess affected film starting from bleach step. Adjust pH to 6.5 ±0.5 for closed-loop systems.",
        manual_ref: "Chart 22, Page 5-50",
    },
];

static BW_FAULTS: [FaultRecord; 6] = [
    FaultRecord {
        id: 101,
        process: ProcessType::Bw,
        name: "Developer Underactive",
        signature: None,
        pattern: &[scalar(Ld, Low), scalar(Hdld, Low)],
        cause: "Developer activity too low - possible causes: temperature low, time short, dilution, exhaustion, underreplenishment",
        action: "Check temperature (aim depends on developer). Check time. Check replenishment rate. If using replenisher system, add fresh developer or replenisher. Check specific gravity and pH.",
        manual_ref: "Ilford FPC Fault Finder",
    },
    FaultRecord {
        id: 102,
        process: ProcessType::Bw,
        name: "Developer Overactive",
        signature: None,
        pattern: &[scalar(Ld, High), scalar(Hdld, High)],
        cause: "Developer activity too high - possible causes: temperature high, time long, over-concentrated, over-replenishment",
        action: "Check temperature. Check time. If fresh chemistry, ensure correct starter amount used. Check replenishment rate. Remove some developer and replace with water if over-concentrated.",
        manual_ref: "Ilford FPC Fault Finder",
    },
    FaultRecord {
        id: 103,
        process: ProcessType::Bw,
        name: "Contrast Too Low",
        signature: None,
        pattern: &[scalar(Ld, Normal), scalar(Hdld, Low)],
        cause: "HD-LD low indicates low contrast - possible developer exhaustion, underreplenishment, or temperature/time issue",
        action: "Check developer activity. Increase development time slightly if process otherwise stable. Check replenishment. May need fresh developer if exhausted.",
        manual_ref: "Ilford FPC Fault Finder",
    },
    FaultRecord {
        id: 104,
        process: ProcessType::Bw,
        name: "Contrast Too High",
        signature: None,
        pattern: &[scalar(Ld, Normal), scalar(Hdld, High)],
        cause: "HD-LD high indicates high contrast - possible over-development or developer issue",
        action: "Reduce development time slightly. Check for over-concentration from evaporation. Check temperature is not too high.",
        manual_ref: "Ilford FPC Fault Finder",
    },
    FaultRecord {
        id: 105,
        process: ProcessType::Bw,
        name: "Developer Contamination",
        signature: None,
        pattern: &[scalar(Dmin, High), scalar(Ld, High)],
        cause: "Chemical fogging - likely fixer or stop bath contamination in developer",
        action: "STOP PROCESSING. Check for contamination sources. Dump developer, clean tank thoroughly, mix fresh solution. Clean all racks and hangers.",
        manual_ref: "Ilford FPC Fault Finder",
    },
    FaultRecord {
        id: 106,
        process: ProcessType::Bw,
        name: "Gradual Drift Down",
        signature: None,
        pattern: &[scalar(Quantity::Trend, GradualDecline)],
        cause: "Gradual decline in LD and/or HD-LD over multiple readings - developer becoming exhausted or underreplenished",
        action: "Check replenishment rate. Top up with fresh developer. If using replenisher, check concentration and rate. May need partial tank dump and fresh solution.",
        manual_ref: "Ilford FPC Fault Finder",
    },
];

/// Read-only, id-indexed view over both catalogs
#[derive(Debug)]
pub struct KnowledgeBase {
    index: HashMap<u16, &'static FaultRecord>,
}

/// Serializable dump of the catalogs for display
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalog {
    pub c41: &'static [FaultRecord],
    pub bw: &'static [FaultRecord],
}

static KNOWLEDGE_BASE: Lazy<KnowledgeBase> = Lazy::new(KnowledgeBase::build);

/// Process-wide knowledge base, built on first use
pub fn knowledge_base() -> &'static KnowledgeBase {
    &KNOWLEDGE_BASE
}

impl KnowledgeBase {
    fn build() -> Self {
        let index = C41_FAULTS
            .iter()
            .chain(BW_FAULTS.iter())
            .map(|fault| (fault.id, fault))
            .collect();
        Self { index }
    }

    pub fn get(&self, id: u16) -> Option<&'static FaultRecord> {
        self.index.get(&id).copied()
    }

    /// All records of one process, in catalog order
    pub fn faults(&self, process: ProcessType) -> &'static [FaultRecord] {
        match process {
            ProcessType::C41 => &C41_FAULTS,
            ProcessType::Bw => &BW_FAULTS,
        }
    }

    /// Select a record for the problem list, tagged with `severity`
    pub fn problem(&self, id: u16, severity: Severity) -> Option<Problem> {
        self.get(id).map(|fault| Problem::from_fault(fault, severity))
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            c41: &C41_FAULTS,
            bw: &BW_FAULTS,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
