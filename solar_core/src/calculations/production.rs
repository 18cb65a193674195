//! # Production Forecast
//!
//! Monthly energy estimate from array size, site peak sun hours and a fixed
//! seasonal curve.
//!
//! ```text
//! generation[m] = round(kWp × hsp × factor[m] × 30.4)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::production::forecast_production;
//!
//! let months = forecast_production(4.6, 5.8);
//! assert_eq!(months[0].month, "JAN");
//! assert_eq!(months[0].generation_kwh, 811);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{DAYS_PER_MONTH_FORECAST, MONTH_LABELS, SEASONAL_FACTORS};
use crate::units::Kilowatts;

/// Peak sun hours north of this latitude (degrees, negative = south)
pub const HSP_LATITUDE_SPLIT: f64 = -12.0;

/// One month of forecast generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyProduction {
    /// Month label ("JAN" … "DEZ")
    pub month: String,

    /// Energy generated in the month (kWh)
    pub generation_kwh: u32,
}

/// Forecast the twelve months of generation, January first.
pub fn forecast_production(total_power_kw: f64, hsp: f64) -> [MonthlyProduction; 12] {
    let daily = Kilowatts(total_power_kw).over_hours(hsp);
    std::array::from_fn(|i| MonthlyProduction {
        month: MONTH_LABELS[i].to_string(),
        generation_kwh: round_kwh(daily.0 * SEASONAL_FACTORS[i] * DAYS_PER_MONTH_FORECAST),
    })
}

/// Energy figures rounded to whole kWh; negatives and NaN clamp to 0.
pub(crate) fn round_kwh(kwh: f64) -> u32 {
    if kwh.is_nan() || kwh <= 0.0 {
        return 0;
    }
    kwh.round().min(u32::MAX as f64) as u32
}

/// Totals shown next to the monthly chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionSummary {
    /// Sum of the twelve months (kWh)
    pub yearly_kwh: u32,

    /// yearly / 12, rounded (kWh)
    pub monthly_avg_kwh: u32,

    /// yearly / 365, rounded (kWh)
    pub daily_avg_kwh: u32,
}

impl ProductionSummary {
    /// Summarize a forecast series.
    pub fn from_series(series: &[MonthlyProduction]) -> Self {
        let yearly: u64 = series.iter().map(|m| m.generation_kwh as u64).sum();
        let yearly = yearly as f64;
        ProductionSummary {
            yearly_kwh: round_kwh(yearly),
            monthly_avg_kwh: round_kwh(yearly / 12.0),
            daily_avg_kwh: round_kwh(yearly / 365.0),
        }
    }
}

/// Peak sun hours assumed for a site from its latitude.
///
/// Sites north of 12° S get 6.0 h, everything further south 5.8 h.
pub fn hsp_for_latitude(latitude: f64) -> f64 {
    if latitude > HSP_LATITUDE_SPLIT {
        6.0
    } else {
        5.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_forecast() {
        // 8 × 575 W = 4.6 kWp at 5.8 h
        let months = forecast_production(4.6, 5.8);
        let kwh: Vec<u32> = months.iter().map(|m| m.generation_kwh).collect();
        assert_eq!(kwh, vec![811, 730, 649, 649, 730, 811, 892, 973, 892, 811, 811, 811]);
    }

    #[test]
    fn test_calendar_order() {
        let months = forecast_production(1.0, 5.0);
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, MONTH_LABELS.to_vec());
        // August peaks, March/April trough
        assert_eq!(months[7].generation_kwh, 182);
        assert_eq!(months[2].generation_kwh, 122);
    }

    #[test]
    fn test_empty_array_generates_nothing() {
        let months = forecast_production(0.0, 5.8);
        assert!(months.iter().all(|m| m.generation_kwh == 0));
        let summary = ProductionSummary::from_series(&months);
        assert_eq!(summary.yearly_kwh, 0);
    }

    #[test]
    fn test_summary() {
        let months = forecast_production(4.6, 5.8);
        let summary = ProductionSummary::from_series(&months);
        assert_eq!(summary.yearly_kwh, 9570);
        assert_eq!(summary.monthly_avg_kwh, 798);
        assert_eq!(summary.daily_avg_kwh, 26);
    }

    #[test]
    fn test_round_kwh_clamps() {
        assert_eq!(round_kwh(-3.0), 0);
        assert_eq!(round_kwh(f64::NAN), 0);
        assert_eq!(round_kwh(2.5), 3);
    }

    #[test]
    fn test_hsp_for_latitude() {
        assert_eq!(hsp_for_latitude(-3.7), 6.0);
        assert_eq!(hsp_for_latitude(-12.0), 5.8);
        assert_eq!(hsp_for_latitude(-23.5), 5.8);
    }
}
