//! # Module Count Estimator
//!
//! Turns a monthly electricity bill into the number of modules needed to
//! offset it.
//!
//! ```text
//! monthly_kwh = bill / tariff
//! daily_kwh   = monthly_kwh / 30
//! kwp         = daily_kwh / (hsp × 0.80)
//! modules     = ceil(kwp × 1000 / module_w)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::modules::estimate_module_count;
//!
//! // R$ 650 bill at R$ 0.95/kWh, 5.8 h of sun, 575 W modules
//! assert_eq!(estimate_module_count(650.0, 0.95, 5.8, 575), 9);
//! assert_eq!(estimate_module_count(0.0, 0.95, 5.8, 575), 0);
//! ```

use crate::catalog::{DAYS_PER_MONTH_BILLING, SYSTEM_EFFICIENCY};
use crate::units::{Kilowatts, Watts};

/// Array capacity needed to cover `daily_kwh` at the given sun hours.
pub fn required_capacity(daily_kwh: f64, hsp: f64) -> Kilowatts {
    Kilowatts(daily_kwh / (hsp * SYSTEM_EFFICIENCY))
}

/// Estimate how many modules cover the consumption implied by a bill.
///
/// Returns 0 for a non-positive bill or tariff, and likewise for
/// non-positive sun hours or module power, which would otherwise divide
/// by zero.
pub fn estimate_module_count(bill: f64, tariff: f64, hsp: f64, module_power_w: u32) -> u32 {
    if !(bill > 0.0 && tariff > 0.0 && hsp > 0.0) || module_power_w == 0 {
        return 0;
    }

    let monthly_kwh = bill / tariff;
    let daily_kwh = monthly_kwh / DAYS_PER_MONTH_BILLING;
    let required: Watts = required_capacity(daily_kwh, hsp).into();

    let modules = (required.0 / module_power_w as f64).ceil();
    if !modules.is_finite() || modules > u32::MAX as f64 {
        tracing::debug!(bill, tariff, hsp, "module estimate out of range");
        return 0;
    }
    modules as u32
}
