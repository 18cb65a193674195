//! # AC Conductor & Breaker Sizing
//!
//! Sizes the inverter's AC output circuit from its rated power.
//!
//! ```text
//! single/bi-phase:  I = P / 220
//! three-phase:      I = P / (380 × √3)
//! design current:   Id = I × 1.25
//! ```
//!
//! The design current is matched against the conductor table in
//! [`crate::catalog`] with a first-match ascending scan.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    conductor_for_current, DESIGN_CURRENT_FACTOR, SINGLE_PHASE_VOLTAGE, THREE_PHASE_VOLTAGE,
};
use crate::units::{Amperes, Kilowatts, Volts, Watts};

/// AC output circuit of an inverter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcCircuit {
    /// Nominal output current (A)
    pub nominal_current: Amperes,

    /// Nominal current × 1.25 (A)
    pub design_current: Amperes,

    /// Conductor cross-section, e.g. "6.0mm²"
    pub cable_gauge: String,

    /// Breaker rating, e.g. "32A"
    pub breaker_rating: String,
}

/// Nominal output current of an inverter.
pub fn nominal_current(power: Kilowatts, three_phase: bool) -> Amperes {
    let watts: Watts = power.into();
    if three_phase {
        watts / Volts(THREE_PHASE_VOLTAGE * 3f64.sqrt())
    } else {
        watts / Volts(SINGLE_PHASE_VOLTAGE)
    }
}

/// Size cable and breaker for an inverter's output.
pub fn size_ac_circuit(power: Kilowatts, three_phase: bool) -> AcCircuit {
    let nominal = nominal_current(power, three_phase);
    let design = nominal * DESIGN_CURRENT_FACTOR;
    let row = conductor_for_current(design.value());

    AcCircuit {
        nominal_current: nominal,
        design_current: design,
        cable_gauge: row.cable_gauge.to_string(),
        breaker_rating: row.breaker_rating.to_string(),
    }
}
