//! # System Report
//!
//! Runs the whole engine for one [`SystemInput`]: specs, forecast, payback,
//! savings projection, payment split and checklist.
//!
//! Callers re-run [`evaluate`] after every input change, passing the
//! checklist from the previous report so user observations carry over.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::SystemInput;
//! use solar_core::report::evaluate;
//! use solar_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::default();
//! let input = SystemInput::default();
//!
//! let report = evaluate(&input, &[], &settings);
//! assert_eq!(report.production.len(), 12);
//! assert_eq!(report.checklist.len(), 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::checklist::{build_checklist, ChecklistItem};
use crate::calculations::commercial::{estimated_consumption_kwh, PaymentSplit};
use crate::calculations::financial::{compute_payback, project_financials, FinancialProjection};
use crate::calculations::production::{forecast_production, MonthlyProduction, ProductionSummary};
use crate::calculations::system::{size_system, SystemInput, TechnicalSpecs};
use crate::settings::{EngineSettings, SavingsBasis};

/// Everything a proposal shows, derived from one input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemReport {
    pub specs: TechnicalSpecs,

    /// Twelve months, January first
    pub production: Vec<MonthlyProduction>,

    pub production_summary: ProductionSummary,

    /// Monthly figure used as savings for payback and projection
    pub monthly_savings: f64,

    /// e.g. "27.7 meses", or "---"
    pub payback: String,

    pub financials: FinancialProjection,

    pub payment: PaymentSplit,

    /// Consumption implied by the bill (kWh/month)
    pub estimated_consumption_kwh: u32,

    pub checklist: Vec<ChecklistItem>,
}

/// Monthly savings under the configured basis.
pub fn monthly_savings(
    input: &SystemInput,
    summary: &ProductionSummary,
    basis: SavingsBasis,
) -> f64 {
    match basis {
        SavingsBasis::Bill => input.bill_amount,
        SavingsBasis::Generation => summary.monthly_avg_kwh as f64 * input.energy_tariff,
    }
}

/// Run the full engine for `input`.
pub fn evaluate(
    input: &SystemInput,
    previous_checklist: &[ChecklistItem],
    settings: &EngineSettings,
) -> SystemReport {
    let specs = size_system(input);

    let production = forecast_production(specs.total_power_kw, input.hsp).to_vec();
    let production_summary = ProductionSummary::from_series(&production);

    let savings = monthly_savings(input, &production_summary, settings.savings_basis);
    let payback = compute_payback(input.investment_amount, savings);
    let financials = project_financials(input.investment_amount, savings);

    let payment = PaymentSplit::new(
        input.investment_amount,
        input.down_payment,
        settings.down_payment_fraction,
    );

    let checklist = build_checklist(
        input.module_count,
        &specs.cable_gauge,
        &specs.breaker_rating,
        input.roof_type,
        &specs.suggested_inverter,
        previous_checklist,
    );

    SystemReport {
        production,
        production_summary,
        monthly_savings: savings,
        payback,
        financials,
        payment,
        estimated_consumption_kwh: estimated_consumption_kwh(input.bill_amount, input.energy_tariff),
        checklist,
        specs,
    }
}
