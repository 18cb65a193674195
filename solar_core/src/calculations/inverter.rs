//! # Inverter Selection
//!
//! Resolves the inverter for an array, either from the user's manual pick
//! or by walking the standard size ladder.
//!
//! ## Automatic Selection
//!
//! The first ladder size with `array_kw / size ≤ 1.45` wins. Arrays larger
//! than 145 % of the biggest inverter get the biggest inverter anyway.
//! Sizes of 8 kW and up are three-phase.
//!
//! ## Manual Selection
//!
//! Catalog labels resolve to their structured record. A label from outside
//! the catalog (an older saved project, a hand-edited file) is read for a
//! `<n>kW` or `<n>W` rating and a "Trifásico" marker. A pick that yields no
//! positive rating falls back to automatic selection without complaint.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::inverter::{select_inverter, InverterSource};
//! use solar_core::catalog::AUTOMATIC_INVERTER_LABEL;
//!
//! let inv = select_inverter(10.0, AUTOMATIC_INVERTER_LABEL);
//! assert_eq!(inv.rated_kw, 7.0);
//! assert!(!inv.three_phase);
//! assert_eq!(inv.source, InverterSource::Automatic);
//! assert_eq!(inv.label, "Inversor 7kW (Mono/Bifásico 220V)");
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{
    inverter_by_label, MAX_DC_AC_RATIO, STANDARD_INVERTER_SIZES_KW,
    THREE_PHASE_MIN_KW,
};

/// How the inverter was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InverterSource {
    /// Picked from the size ladder
    Automatic,
    /// Taken from the user's selection
    Manual,
}

/// The inverter a system will be built around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInverter {
    /// Commercial label shown on the proposal and checklist
    pub label: String,

    /// AC rating in kW
    pub rated_kw: f64,

    /// Three-phase 380 V output (otherwise single/bi-phase 220 V)
    pub three_phase: bool,

    pub source: InverterSource,
}

/// DC/AC loading classification. Advisory only; sizing never rejects a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverloadBand {
    /// Below 105 %: inverter underutilized
    Low,
    /// 105 % to 130 %
    Ideal,
    /// Above 130 %: clipping risk
    High,
}

impl OverloadBand {
    /// Classify a DC/AC ratio given in percent
    pub fn classify(overload_percent: f64) -> Self {
        if overload_percent < 105.0 {
            OverloadBand::Low
        } else if overload_percent <= 130.0 {
            OverloadBand::Ideal
        } else {
            OverloadBand::High
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            OverloadBand::Low => "Baixo (subutilizado)",
            OverloadBand::Ideal => "Ideal",
            OverloadBand::High => "Alto (risco de clipping)",
        }
    }
}

/// Resolve the inverter for an array of `total_power_kw`.
pub fn select_inverter(total_power_kw: f64, selection: &str) -> ResolvedInverter {
    if let Some(manual) = manual_inverter(selection) {
        return manual;
    }
    automatic_inverter(total_power_kw)
}

/// The user's pick, if it names an inverter with a positive rating.
fn manual_inverter(selection: &str) -> Option<ResolvedInverter> {
    let selection = selection.trim();
    if selection.is_empty()
        || selection.contains("Automático")
        || selection.eq_ignore_ascii_case("automatic")
    {
        return None;
    }

    let (rated_kw, three_phase) = match inverter_by_label(selection) {
        Some(model) => (model.rated_kw, model.three_phase),
        None => parse_inverter_label(selection),
    };

    if rated_kw > 0.0 {
        Some(ResolvedInverter {
            label: selection.to_string(),
            rated_kw,
            three_phase,
            source: InverterSource::Manual,
        })
    } else {
        tracing::debug!(selection, "manual inverter has no rating, sizing automatically");
        None
    }
}

/// Walk the standard ladder for the first size within the DC/AC limit.
pub fn automatic_inverter(total_power_kw: f64) -> ResolvedInverter {
    let largest = STANDARD_INVERTER_SIZES_KW[STANDARD_INVERTER_SIZES_KW.len() - 1];
    let rated_kw = STANDARD_INVERTER_SIZES_KW
        .iter()
        .copied()
        .find(|size| total_power_kw / size <= MAX_DC_AC_RATIO)
        .unwrap_or_else(|| {
            tracing::debug!(total_power_kw, "array exceeds the inverter ladder, using {largest} kW");
            largest
        });

    let three_phase = rated_kw >= THREE_PHASE_MIN_KW;
    ResolvedInverter {
        label: automatic_label(rated_kw, three_phase),
        rated_kw,
        three_phase,
        source: InverterSource::Automatic,
    }
}

fn automatic_label(rated_kw: f64, three_phase: bool) -> String {
    let connection = if three_phase {
        "Trifásico 380V"
    } else {
        "Mono/Bifásico 220V"
    };
    format!("Inversor {}kW ({})", rated_kw, connection)
}

/// Read `(rated_kw, three_phase)` out of a free-form inverter label.
///
/// A number followed by "kW" takes precedence over one followed by "W";
/// no match gives 0 kW.
pub fn parse_inverter_label(label: &str) -> (f64, bool) {
    let three_phase = label.to_lowercase().contains("trifásico");
    let rated_kw = rating_before_unit(label, "kw", true)
        .or_else(|| rating_before_unit(label, "w", false).map(|w| w / 1000.0))
        .unwrap_or(0.0);
    (rated_kw, three_phase)
}

/// First number immediately followed by `unit` (case-insensitive).
fn rating_before_unit(label: &str, unit: &str, allow_decimal: bool) -> Option<f64> {
    let lower = label.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }

        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if allow_decimal
            && end + 1 < bytes.len()
            && bytes[end] == b'.'
            && bytes[end + 1].is_ascii_digit()
        {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }

        if lower[end..].starts_with(unit) {
            return lower[start..end].parse().ok();
        }
        start = end;
    }
    None
}

/// Suggested inverter range text: array / 1.5 up to array / 1.15.
pub fn inverter_range(total_power_kw: f64) -> String {
    format!(
        "{:.1}kW - {:.1}kW",
        total_power_kw / 1.5,
        total_power_kw / 1.15
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AUTOMATIC_INVERTER_LABEL;

    #[test]
    fn test_ladder_boundary_at_ten_kw() {
        // 10 / 6 = 1.67, 10 / 7 = 1.43
        let inv = automatic_inverter(10.0);
        assert_eq!(inv.rated_kw, 7.0);
        assert!(!inv.three_phase);
    }

    #[test]
    fn test_ratio_exactly_at_limit_is_accepted() {
        // 2.9 / 2 = 1.45
        let inv = automatic_inverter(2.9);
        assert_eq!(inv.rated_kw, 2.0);
    }

    #[test]
    fn test_three_phase_threshold() {
        // 11.5 / 8 = 1.4375
        let inv = automatic_inverter(11.5);
        assert_eq!(inv.rated_kw, 8.0);
        assert!(inv.three_phase);
        assert_eq!(inv.label, "Inversor 8kW (Trifásico 380V)");
    }

    #[test]
    fn test_oversized_array_takes_largest() {
        let inv = automatic_inverter(500.0);
        assert_eq!(inv.rated_kw, 100.0);
        assert!(inv.three_phase);
    }

    #[test]
    fn test_fractional_label() {
        let inv = automatic_inverter(2.0);
        assert_eq!(inv.rated_kw, 1.5);
        assert_eq!(inv.label, "Inversor 1.5kW (Mono/Bifásico 220V)");
    }

    #[test]
    fn test_empty_array_gets_smallest() {
        assert_eq!(automatic_inverter(0.0).rated_kw, 1.0);
    }

    #[test]
    fn test_manual_catalog_selection() {
        let inv = select_inverter(4.6, "Inversor 15kW (Trifásico 380V)");
        assert_eq!(inv.rated_kw, 15.0);
        assert!(inv.three_phase);
        assert_eq!(inv.source, InverterSource::Manual);
        assert_eq!(inv.label, "Inversor 15kW (Trifásico 380V)");
    }

    #[test]
    fn test_manual_microinverter_in_watts() {
        let inv = select_inverter(0.6, "Microinversor 600W (2 MPPT)");
        assert!((inv.rated_kw - 0.6).abs() < 1e-12);
        assert!(!inv.three_phase);
    }

    #[test]
    fn test_manual_label_outside_catalog_is_parsed() {
        let inv = select_inverter(5.0, "Inversor Growatt 7.5kW Trifásico");
        assert_eq!(inv.rated_kw, 7.5);
        assert!(inv.three_phase);
        assert_eq!(inv.source, InverterSource::Manual);
    }

    #[test]
    fn test_unparseable_manual_falls_back() {
        let inv = select_inverter(10.0, "Inversor genérico");
        assert_eq!(inv.source, InverterSource::Automatic);
        assert_eq!(inv.rated_kw, 7.0);

        let inv = select_inverter(10.0, "Inversor 0kW");
        assert_eq!(inv.source, InverterSource::Automatic);

        let inv = select_inverter(10.0, "");
        assert_eq!(inv.source, InverterSource::Automatic);
    }

    #[test]
    fn test_sentinel_is_automatic() {
        // 4.6 / 3 = 1.53, 4.6 / 3.6 = 1.28
        let inv = select_inverter(4.6, AUTOMATIC_INVERTER_LABEL);
        assert_eq!(inv.source, InverterSource::Automatic);
        assert_eq!(inv.rated_kw, 3.6);

        let inv = select_inverter(4.6, "Automatic");
        assert_eq!(inv.source, InverterSource::Automatic);
    }

    #[test]
    fn test_parse_inverter_label() {
        assert_eq!(parse_inverter_label("Inversor 1.2kW (4 MPPT)"), (1.2, false));
        assert_eq!(parse_inverter_label("Inversor 20KW TRIFÁSICO"), (20.0, true));
        assert_eq!(parse_inverter_label("Micro 800W"), (0.8, false));
        assert_eq!(parse_inverter_label("sem potência"), (0.0, false));
    }

    #[test]
    fn test_overload_bands() {
        assert_eq!(OverloadBand::classify(0.0), OverloadBand::Low);
        assert_eq!(OverloadBand::classify(104.9), OverloadBand::Low);
        assert_eq!(OverloadBand::classify(105.0), OverloadBand::Ideal);
        assert_eq!(OverloadBand::classify(130.0), OverloadBand::Ideal);
        assert_eq!(OverloadBand::classify(130.1), OverloadBand::High);
    }

    #[test]
    fn test_inverter_range_text() {
        assert_eq!(inverter_range(6.0), "4.0kW - 5.2kW");
        assert_eq!(inverter_range(0.0), "0.0kW - 0.0kW");
    }
}
