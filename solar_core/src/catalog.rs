//! # Equipment Catalog & Lookup Tables
//!
//! Static data the sizing engine reads: module and inverter catalogs, the
//! standard inverter size ladder, the conductor/breaker table, the seasonal
//! generation curve and the flat per-module constants.
//!
//! Everything here is immutable. The only runtime structure is a label
//! index over the inverter catalog, built once on first use.
//!
//! ## Conductor Table
//!
//! | Design current | Cable     | Breaker |
//! |----------------|-----------|---------|
//! | ≤ 21 A         | 2.5 mm²   | 20 A    |
//! | ≤ 28 A         | 4.0 mm²   | 25 A    |
//! | ≤ 36 A         | 6.0 mm²   | 32 A    |
//! | ≤ 50 A         | 10.0 mm²  | 50 A    |
//! | ≤ 68 A         | 16.0 mm²  | 63 A    |
//! | ≤ 89 A         | 25.0 mm²  | 80 A    |
//! | ≤ 111 A        | 35.0 mm²  | 100 A   |
//! | ≤ 145 A        | 50.0 mm²  | 125 A   |
//! | ≤ 190 A        | 70.0 mm²  | 160 A   |
//! | above          | 95.0 mm² +| 200 A + |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::SolarError;

// ============================================================================
// Sizing Constants
// ============================================================================

/// Fraction of nameplate energy that reaches the meter (inverter, wiring, heat)
pub const SYSTEM_EFFICIENCY: f64 = 0.80;

/// Days per month used when converting a bill into daily consumption
pub const DAYS_PER_MONTH_BILLING: f64 = 30.0;

/// Average days per month used by the monthly production forecast
pub const DAYS_PER_MONTH_FORECAST: f64 = 30.4;

/// Longest series string for a 1000 V inverter with ~50 V Voc modules
pub const SAFE_MAX_STRING_LENGTH: u32 = 19;

/// String-count search gives up past this many strings
pub const MAX_STRING_COUNT: u32 = 50;

/// Roof area taken by one module, in m²
pub const MODULE_AREA_M2: f64 = 2.1;

/// Mass of one module including its share of mounting, in kg
pub const MODULE_WEIGHT_KG: f64 = 23.0;

/// Metres of DC solar cable budgeted per module
pub const SOLAR_CABLE_M_PER_MODULE: u32 = 10;

/// Annual tariff inflation applied to the savings projection
pub const INFLATION_RATE: f64 = 0.06;

/// Length of the savings projection, in years
pub const PROJECTION_YEARS: u32 = 25;

// ============================================================================
// Module Catalog
// ============================================================================

/// Module wattage used when an input carries none
pub const DEFAULT_MODULE_POWER_W: u32 = 575;

/// A photovoltaic module offered in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleOption {
    pub label: &'static str,
    pub power_w: u32,
}

/// Modules available for selection
pub static MODULE_OPTIONS: [ModuleOption; 7] = [
    ModuleOption { label: "450W Monocristalino", power_w: 450 },
    ModuleOption { label: "550W Monocristalino", power_w: 550 },
    ModuleOption { label: "575W Monocristalino (Padrão)", power_w: 575 },
    ModuleOption { label: "600W Monocristalino", power_w: 600 },
    ModuleOption { label: "660W Monocristalino", power_w: 660 },
    ModuleOption { label: "700W N-Type (Alta Potência)", power_w: 700 },
    ModuleOption { label: "715W Bifacial", power_w: 715 },
];

/// Find a module by its wattage
pub fn module_by_power(power_w: u32) -> Option<&'static ModuleOption> {
    MODULE_OPTIONS.iter().find(|m| m.power_w == power_w)
}

// ============================================================================
// Inverter Catalog
// ============================================================================

/// Sentinel selection meaning "let the sizer pick the inverter"
pub const AUTOMATIC_INVERTER_LABEL: &str = "Automático (Sugerido pelo Sistema)";

/// An inverter offered for manual selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InverterModel {
    pub label: &'static str,
    pub rated_kw: f64,
    pub three_phase: bool,
}

const fn inverter(label: &'static str, rated_kw: f64, three_phase: bool) -> InverterModel {
    InverterModel { label, rated_kw, three_phase }
}

/// Inverters available for manual selection, smallest first
pub static INVERTER_CATALOG: [InverterModel; 21] = [
    inverter("Microinversor 600W (2 MPPT)", 0.6, false),
    inverter("Microinversor 1.2kW (4 MPPT)", 1.2, false),
    inverter("Microinversor 1.6kW (4 MPPT)", 1.6, false),
    inverter("Microinversor 2.0kW (4 MPPT)", 2.0, false),
    inverter("Inversor 3kW (Mono 220V)", 3.0, false),
    inverter("Inversor 4kW (Mono 220V)", 4.0, false),
    inverter("Inversor 5kW (Mono 220V)", 5.0, false),
    inverter("Inversor 6kW (Mono 220V)", 6.0, false),
    inverter("Inversor 8kW (Mono/Bifásico 220V)", 8.0, false),
    inverter("Inversor 10kW (Trifásico 380V)", 10.0, true),
    inverter("Inversor 12kW (Trifásico 380V)", 12.0, true),
    inverter("Inversor 15kW (Trifásico 380V)", 15.0, true),
    inverter("Inversor 20kW (Trifásico 380V)", 20.0, true),
    inverter("Inversor 25kW (Trifásico 380V)", 25.0, true),
    inverter("Inversor 30kW (Trifásico 380V)", 30.0, true),
    inverter("Inversor 33kW (Trifásico 380V)", 33.0, true),
    inverter("Inversor 40kW (Trifásico 380V)", 40.0, true),
    inverter("Inversor 50kW (Trifásico 380V)", 50.0, true),
    inverter("Inversor 60kW (Trifásico 380V)", 60.0, true),
    inverter("Inversor 75kW (Trifásico 380V)", 75.0, true),
    inverter("Inversor 100kW (Trifásico 380V)", 100.0, true),
];

static INVERTERS_BY_LABEL: Lazy<HashMap<&'static str, &'static InverterModel>> =
    Lazy::new(|| INVERTER_CATALOG.iter().map(|inv| (inv.label, inv)).collect());

/// Look up a catalog inverter by its exact label
pub fn inverter_by_label(label: &str) -> Option<&'static InverterModel> {
    INVERTERS_BY_LABEL.get(label).copied()
}

/// Labels offered to the user, sentinel first
pub fn inverter_labels() -> Vec<&'static str> {
    std::iter::once(AUTOMATIC_INVERTER_LABEL)
        .chain(INVERTER_CATALOG.iter().map(|inv| inv.label))
        .collect()
}

// ============================================================================
// Automatic Inverter Ladder
// ============================================================================

/// Standard inverter sizes walked by automatic selection, in kW
pub const STANDARD_INVERTER_SIZES_KW: [f64; 24] = [
    1.0, 1.5, 2.0, 2.5, 3.0, 3.6, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 15.0, 20.0, 25.0,
    30.0, 33.0, 40.0, 50.0, 60.0, 75.0, 100.0,
];

/// Highest accepted DC/AC ratio when picking from the ladder
pub const MAX_DC_AC_RATIO: f64 = 1.45;

/// Ladder sizes at or above this are three-phase
pub const THREE_PHASE_MIN_KW: f64 = 8.0;

// ============================================================================
// Electrical Constants
// ============================================================================

/// Line voltage for single/bi-phase connections
pub const SINGLE_PHASE_VOLTAGE: f64 = 220.0;

/// Line voltage for three-phase connections
pub const THREE_PHASE_VOLTAGE: f64 = 380.0;

/// Multiplier from nominal to design current
pub const DESIGN_CURRENT_FACTOR: f64 = 1.25;

/// One row of the conductor table: the largest design current it covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConductorRating {
    pub max_design_current_a: f64,
    pub cable_gauge: &'static str,
    pub breaker_rating: &'static str,
}

const fn conductor(max_design_current_a: f64, cable_gauge: &'static str, breaker_rating: &'static str) -> ConductorRating {
    ConductorRating { max_design_current_a, cable_gauge, breaker_rating }
}

/// Conductor rows in ascending current order; scanned first-match
pub static CONDUCTOR_TABLE: [ConductorRating; 9] = [
    conductor(21.0, "2.5mm²", "20A"),
    conductor(28.0, "4.0mm²", "25A"),
    conductor(36.0, "6.0mm²", "32A"),
    conductor(50.0, "10.0mm²", "50A"),
    conductor(68.0, "16.0mm²", "63A"),
    conductor(89.0, "25.0mm²", "80A"),
    conductor(111.0, "35.0mm²", "100A"),
    conductor(145.0, "50.0mm²", "125A"),
    conductor(190.0, "70.0mm²", "160A"),
];

/// Used when the design current exceeds every table row
pub static OVERSIZED_CONDUCTOR: ConductorRating = conductor(f64::INFINITY, "95.0mm² +", "200A +");

/// First conductor row whose bound covers `design_current_a`
pub fn conductor_for_current(design_current_a: f64) -> &'static ConductorRating {
    CONDUCTOR_TABLE
        .iter()
        .find(|row| design_current_a <= row.max_design_current_a)
        .unwrap_or(&OVERSIZED_CONDUCTOR)
}

// ============================================================================
// Seasonal Curve
// ============================================================================

/// Month labels, January first
pub const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Relative irradiance per month, January first
pub const SEASONAL_FACTORS: [f64; 12] = [1.0, 0.9, 0.8, 0.8, 0.9, 1.0, 1.1, 1.2, 1.1, 1.0, 1.0, 1.0];

// ============================================================================
// Roof Types
// ============================================================================

/// Roof (or ground) the array is mounted on. Drives mounting kit text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoofType {
    /// Clay tile roof
    #[default]
    #[serde(rename = "Cerâmico")]
    Ceramic,
    /// Corrugated fibre-cement sheets
    #[serde(rename = "Fibrocimento")]
    FiberCement,
    /// Metal sheet roof
    #[serde(rename = "Metálico")]
    Metal,
    /// Flat concrete slab
    #[serde(rename = "Laje")]
    Slab,
    /// Ground mount
    #[serde(rename = "Solo")]
    Ground,
}

impl RoofType {
    /// All roof types for UI selection
    pub const ALL: [RoofType; 5] = [
        RoofType::Ceramic,
        RoofType::FiberCement,
        RoofType::Metal,
        RoofType::Slab,
        RoofType::Ground,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RoofType::Ceramic => "Cerâmico",
            RoofType::FiberCement => "Fibrocimento",
            RoofType::Metal => "Metálico",
            RoofType::Slab => "Laje",
            RoofType::Ground => "Solo",
        }
    }

    /// Mounting kit listed in the materials checklist
    pub fn mounting_kit(&self) -> &'static str {
        match self {
            RoofType::Ceramic => "Kit Gancho (Telha Colonial)",
            RoofType::FiberCement => "Kit Parafuso Prisioneiro",
            RoofType::Metal => "Kit Mini-Trilho / Metálico",
            RoofType::Slab => "Estrutura de Triângulo (Laje)",
            RoofType::Ground => "Estrutura Solo (Cerâmico/Concreto)",
        }
    }
}

impl fmt::Display for RoofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RoofType {
    type Err = SolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoofType::ALL
            .iter()
            .copied()
            .find(|roof| roof.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SolarError::unknown_catalog_entry("roof type", wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductor_table_is_ascending() {
        for pair in CONDUCTOR_TABLE.windows(2) {
            assert!(pair[0].max_design_current_a < pair[1].max_design_current_a);
        }
    }

    #[test]
    fn test_conductor_boundaries() {
        let at = conductor_for_current(21.0);
        assert_eq!(at.cable_gauge, "2.5mm²");
        assert_eq!(at.breaker_rating, "20A");

        let above = conductor_for_current(21.01);
        assert_eq!(above.cable_gauge, "4.0mm²");
        assert_eq!(above.breaker_rating, "25A");

        assert_eq!(conductor_for_current(190.0).breaker_rating, "160A");
        assert_eq!(conductor_for_current(190.5).cable_gauge, "95.0mm² +");
        assert_eq!(conductor_for_current(0.0).cable_gauge, "2.5mm²");
    }

    #[test]
    fn test_ladder_is_ascending() {
        for pair in STANDARD_INVERTER_SIZES_KW.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_inverter_lookup() {
        let inv = inverter_by_label("Inversor 10kW (Trifásico 380V)").unwrap();
        assert_eq!(inv.rated_kw, 10.0);
        assert!(inv.three_phase);

        let mono = inverter_by_label("Inversor 8kW (Mono/Bifásico 220V)").unwrap();
        assert!(!mono.three_phase);

        assert!(inverter_by_label(AUTOMATIC_INVERTER_LABEL).is_none());
        assert_eq!(inverter_labels().len(), INVERTER_CATALOG.len() + 1);
        assert_eq!(inverter_labels()[0], AUTOMATIC_INVERTER_LABEL);
    }

    #[test]
    fn test_module_lookup() {
        assert_eq!(module_by_power(DEFAULT_MODULE_POWER_W).unwrap().label, "575W Monocristalino (Padrão)");
        assert!(module_by_power(123).is_none());
    }

    #[test]
    fn test_roof_type_parsing_and_serialization() {
        assert_eq!("Laje".parse::<RoofType>().unwrap(), RoofType::Slab);
        assert_eq!("solo".parse::<RoofType>().unwrap(), RoofType::Ground);
        assert!("Palha".parse::<RoofType>().is_err());

        let json = serde_json::to_string(&RoofType::FiberCement).unwrap();
        assert_eq!(json, "\"Fibrocimento\"");
        let roundtrip: RoofType = serde_json::from_str("\"Metálico\"").unwrap();
        assert_eq!(roundtrip, RoofType::Metal);
    }

    #[test]
    fn test_seasonal_curve_shape() {
        assert_eq!(SEASONAL_FACTORS.len(), MONTH_LABELS.len());
        let sum: f64 = SEASONAL_FACTORS.iter().sum();
        assert!((sum - 11.8).abs() < 1e-9);
    }
}
