//! # Commercial Figures
//!
//! Sale price, margin and payment split for a proposal, plus the
//! consumption estimate quoted to the client.
//!
//! Price and margin are two views of the same number: editing the kit cost
//! or the margin reprices the sale, editing the sale price recomputes the
//! margin.

use serde::{Deserialize, Serialize};

/// Sale price for a kit cost at a margin, rounded to whole currency.
pub fn price_from_cost(kit_cost: f64, margin_pct: f64) -> f64 {
    (kit_cost * (1.0 + margin_pct / 100.0)).round()
}

/// Margin implied by a sale price, to one decimal. `None` without a cost.
pub fn margin_from_price(price: f64, kit_cost: f64) -> Option<f64> {
    if kit_cost > 0.0 {
        let margin = (price / kit_cost - 1.0) * 100.0;
        Some((margin * 10.0).round() / 10.0)
    } else {
        None
    }
}

/// Monthly consumption implied by the bill, in whole kWh.
pub fn estimated_consumption_kwh(bill: f64, tariff: f64) -> u32 {
    if tariff > 0.0 {
        super::production::round_kwh(bill / tariff)
    } else {
        0
    }
}

/// How the investment is paid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub investment: f64,
    pub down_payment: f64,
    /// Down payment as a whole percentage of the investment
    pub down_payment_pct: f64,
    /// Left to pay after the down payment
    pub remaining: f64,
}

impl PaymentSplit {
    /// Split an investment. Without an explicit down payment,
    /// `default_fraction` of the investment is used.
    pub fn new(investment: f64, down_payment: Option<f64>, default_fraction: f64) -> Self {
        let down_payment = down_payment.unwrap_or(investment * default_fraction);
        let down_payment_pct = if investment > 0.0 {
            (down_payment / investment * 100.0).round()
        } else {
            0.0
        };

        PaymentSplit {
            investment,
            down_payment,
            down_payment_pct,
            remaining: investment - down_payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_cost() {
        assert_eq!(price_from_cost(12000.0, 50.0), 18000.0);
        assert_eq!(price_from_cost(10333.0, 33.3), 13774.0);
        assert_eq!(price_from_cost(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_margin_from_price() {
        assert_eq!(margin_from_price(18000.0, 12000.0), Some(50.0));
        assert_eq!(margin_from_price(15000.0, 12000.0), Some(25.0));
        assert_eq!(margin_from_price(13000.0, 12000.0), Some(8.3));
        assert_eq!(margin_from_price(18000.0, 0.0), None);
    }

    #[test]
    fn test_consumption() {
        assert_eq!(estimated_consumption_kwh(650.0, 0.95), 684);
        assert_eq!(estimated_consumption_kwh(650.0, 0.0), 0);
    }

    #[test]
    fn test_default_down_payment() {
        let split = PaymentSplit::new(18000.0, None, 0.30);
        assert!((split.down_payment - 5400.0).abs() < 1e-9);
        assert_eq!(split.down_payment_pct, 30.0);
        assert!((split.remaining - 12600.0).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_down_payment() {
        let split = PaymentSplit::new(20000.0, Some(5000.0), 0.30);
        assert_eq!(split.down_payment_pct, 25.0);
        assert_eq!(split.remaining, 15000.0);
    }

    #[test]
    fn test_zero_investment() {
        let split = PaymentSplit::new(0.0, Some(1000.0), 0.30);
        assert_eq!(split.down_payment_pct, 0.0);
        assert_eq!(split.remaining, -1000.0);
    }
}
