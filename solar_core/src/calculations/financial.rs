//! # Financial Projection
//!
//! Payback time and a 25-year savings projection for an investment that
//! saves a fixed amount per month.
//!
//! The monthly savings figure is opaque here: callers may pass the current
//! bill or the forecast generation valued at the tariff (see
//! [`crate::settings::SavingsBasis`]).
//!
//! ```text
//! annual    = monthly × 12
//! total_25y = Σ_{i=0}^{24} annual × 1.06^i
//! ```
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::financial::{compute_payback, project_financials};
//!
//! assert_eq!(compute_payback(18000.0, 600.0), "30.0 meses");
//! assert_eq!(compute_payback(18000.0, 0.0), "---");
//!
//! let projection = project_financials(18000.0, 600.0);
//! assert_eq!(projection.annual_savings, 7200.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{INFLATION_RATE, PROJECTION_YEARS};

/// Shown when payback cannot be computed
pub const PAYBACK_UNDEFINED: &str = "---";

/// Savings over the projection horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialProjection {
    /// Savings per month (currency)
    pub monthly_savings: f64,

    /// monthly × 12
    pub annual_savings: f64,

    /// Annual savings compounded at 6 %/year over 25 years
    pub total_savings_25_years: f64,

    /// Total savings minus the investment
    pub net_savings_25_years: f64,
}

/// Months until savings repay the investment, if savings are positive.
pub fn payback_months(investment: f64, monthly_savings: f64) -> Option<f64> {
    if monthly_savings > 0.0 {
        Some(investment / monthly_savings)
    } else {
        None
    }
}

/// Payback formatted for display, e.g. "30.0 meses", or "---".
pub fn compute_payback(investment: f64, monthly_savings: f64) -> String {
    match payback_months(investment, monthly_savings) {
        Some(months) => format!("{:.1} meses", (months * 10.0).round() / 10.0),
        None => PAYBACK_UNDEFINED.to_string(),
    }
}

/// Project savings over 25 years with 6 % annual tariff inflation.
pub fn project_financials(investment: f64, monthly_savings: f64) -> FinancialProjection {
    let annual_savings = monthly_savings * 12.0;

    let mut total = 0.0;
    let mut current = annual_savings;
    for _ in 0..PROJECTION_YEARS {
        total += current;
        current *= 1.0 + INFLATION_RATE;
    }

    FinancialProjection {
        monthly_savings,
        annual_savings,
        total_savings_25_years: total,
        net_savings_25_years: total - investment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payback_formatting() {
        assert_eq!(compute_payback(18000.0, 600.0), "30.0 meses");
        assert_eq!(compute_payback(18000.0, 650.0), "27.7 meses");
        assert_eq!(compute_payback(0.0, 650.0), "0.0 meses");
    }

    #[test]
    fn test_payback_half_rounds_up() {
        // 125 / 100 = 1.25 months
        assert_eq!(compute_payback(125.0, 100.0), "1.3 meses");
        assert_eq!(compute_payback(2025.0, 100.0), "20.3 meses");
    }

    #[test]
    fn test_payback_sentinel() {
        assert_eq!(compute_payback(18000.0, 0.0), "---");
        assert_eq!(compute_payback(18000.0, -10.0), "---");
        assert!(payback_months(18000.0, 0.0).is_none());
    }

    #[test]
    fn test_projection_matches_geometric_sum() {
        let projection = project_financials(18000.0, 600.0);
        assert_eq!(projection.monthly_savings, 600.0);
        assert_eq!(projection.annual_savings, 7200.0);

        // 7200 × (1.06^25 − 1) / 0.06
        let closed_form = 7200.0 * (1.06f64.powi(25) - 1.0) / 0.06;
        assert!((projection.total_savings_25_years - closed_form).abs() < 1e-6);
        assert!((projection.total_savings_25_years - 395_024.0).abs() < 1.0);
        assert!((projection.net_savings_25_years - (closed_form - 18000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_savings() {
        let projection = project_financials(18000.0, 0.0);
        assert_eq!(projection.total_savings_25_years, 0.0);
        assert_eq!(projection.net_savings_25_years, -18000.0);
    }
}
