//! # System Sizing
//!
//! The technical specification of an installation: array power, inverter,
//! AC circuit, footprint, string layout and generation totals.
//!
//! [`SystemInput`] is owned by the caller. Its `with_*` setters return a new
//! record and apply the same follow-up edits the proposal form does (a new
//! bill re-estimates the module count, a new kit cost reprices the sale).
//! After any change the caller simply calls [`size_system`] again.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::system::{size_system, SystemInput};
//!
//! let input = SystemInput::default().with_bill(650.0);
//! assert_eq!(input.module_count, 9);
//!
//! let specs = size_system(&input);
//! assert!((specs.total_power_kw - 5.175).abs() < 1e-9);
//! assert_eq!(specs.inverter_power_kw, 3.6);
//! ```

use serde::{Deserialize, Serialize};

use super::commercial::{margin_from_price, price_from_cost};
use super::electrical::size_ac_circuit;
use super::inverter::{inverter_range, select_inverter, InverterSource, OverloadBand};
use super::modules::estimate_module_count;
use super::production::{hsp_for_latitude, round_kwh};
use super::strings::{describe_strings, suggest_string_size};
use crate::catalog::{
    RoofType, AUTOMATIC_INVERTER_LABEL, DAYS_PER_MONTH_BILLING, DEFAULT_MODULE_POWER_W,
    MODULE_AREA_M2, MODULE_WEIGHT_KG, SEASONAL_FACTORS,
};
use crate::errors::{SolarError, SolarResult};
use crate::settings::EngineSettings;
use crate::units::{Kilowatts, Watts};

/// Everything the user enters for a proposal.
///
/// ## JSON Example
///
/// ```json
/// {
///   "module_count": 8,
///   "module_power_w": 575,
///   "modules_per_string": 8,
///   "bill_amount": 650.0,
///   "energy_tariff": 0.95,
///   "hsp": 5.8,
///   "selected_inverter": "Automático (Sugerido pelo Sistema)",
///   "investment_amount": 18000.0,
///   "down_payment": 5400.0,
///   "kit_cost": 12000.0,
///   "profit_margin_pct": 50.0,
///   "roof_type": "Cerâmico",
///   "latitude": null,
///   "longitude": null,
///   "address": ""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInput {
    /// Number of modules in the array
    pub module_count: u32,

    /// Wattage per module (from the module catalog)
    pub module_power_w: u32,

    /// Modules wired in series per string (0 when absent from stored JSON)
    #[serde(default)]
    pub modules_per_string: u32,

    /// Current monthly electricity bill (currency)
    pub bill_amount: f64,

    /// Energy price (currency per kWh)
    pub energy_tariff: f64,

    /// Peak sun hours at the site
    pub hsp: f64,

    /// Inverter label, or the "Automático" sentinel
    pub selected_inverter: String,

    /// Final sale price (currency)
    pub investment_amount: f64,

    /// Agreed down payment; `None` means the default share of the investment
    pub down_payment: Option<f64>,

    /// Supplier cost of the kit (currency)
    #[serde(default = "legacy_kit_cost")]
    pub kit_cost: f64,

    /// Margin applied over the kit cost (%)
    pub profit_margin_pct: f64,

    pub roof_type: RoofType,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
}

/// Kit cost assumed for stored proposals that predate the field
pub const LEGACY_KIT_COST: f64 = 10000.0;

fn legacy_kit_cost() -> f64 {
    LEGACY_KIT_COST
}

impl Default for SystemInput {
    fn default() -> Self {
        SystemInput::from_settings(&EngineSettings::default())
    }
}

impl SystemInput {
    /// A fresh proposal seeded from session settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let investment_amount = 18000.0;
        SystemInput {
            module_count: 8,
            module_power_w: settings.default_module_power_w,
            modules_per_string: 8,
            bill_amount: 650.0,
            energy_tariff: settings.default_tariff,
            hsp: settings.default_hsp,
            selected_inverter: AUTOMATIC_INVERTER_LABEL.to_string(),
            investment_amount,
            down_payment: Some(investment_amount * settings.down_payment_fraction),
            kit_cost: 12000.0,
            profit_margin_pct: 50.0,
            roof_type: RoofType::default(),
            latitude: None,
            longitude: None,
            address: String::new(),
        }
    }

    /// Module wattage, falling back to the catalog default for 0.
    pub fn effective_module_power_w(&self) -> u32 {
        if self.module_power_w > 0 {
            self.module_power_w
        } else {
            DEFAULT_MODULE_POWER_W
        }
    }

    /// String size clamped to the module count.
    pub fn effective_modules_per_string(&self) -> u32 {
        if self.module_count > 0 {
            self.modules_per_string.min(self.module_count)
        } else {
            self.modules_per_string
        }
    }

    /// New bill. A positive estimate also resets module count and strings.
    pub fn with_bill(mut self, bill: f64) -> Self {
        self.bill_amount = bill;
        if bill > 0.0 {
            let modules = estimate_module_count(
                bill,
                self.energy_tariff,
                self.hsp,
                self.effective_module_power_w(),
            );
            if modules > 0 {
                self.module_count = modules;
                self.modules_per_string = suggest_string_size(modules);
            }
        }
        self
    }

    /// New module count; the string size is re-suggested for it.
    pub fn with_module_count(mut self, module_count: u32) -> Self {
        self.module_count = module_count;
        self.modules_per_string = suggest_string_size(module_count);
        self
    }

    /// Stored records without a string size wire the whole array as one.
    pub fn backfill_string_size(&mut self) {
        if self.modules_per_string == 0 {
            self.modules_per_string = self.module_count;
        }
    }

    /// New kit cost; the sale price follows at the current margin.
    pub fn with_kit_cost(mut self, kit_cost: f64) -> Self {
        self.kit_cost = kit_cost;
        self.investment_amount = price_from_cost(kit_cost, self.profit_margin_pct);
        self
    }

    /// New margin; the sale price follows from the kit cost.
    pub fn with_margin(mut self, margin_pct: f64) -> Self {
        self.profit_margin_pct = margin_pct;
        self.investment_amount = price_from_cost(self.kit_cost, margin_pct);
        self
    }

    /// New sale price; the margin follows when the kit cost is known.
    pub fn with_investment(mut self, investment: f64) -> Self {
        self.investment_amount = investment;
        if let Some(margin) = margin_from_price(investment, self.kit_cost) {
            self.profit_margin_pct = margin;
        }
        self
    }

    /// Site coordinates; peak sun hours follow the latitude.
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.hsp = hsp_for_latitude(latitude);
        self
    }

    /// Check entries a form should flag. Sizing itself accepts anything.
    pub fn validate(&self) -> SolarResult<()> {
        if !(self.bill_amount >= 0.0) {
            return Err(SolarError::invalid_input(
                "bill_amount",
                self.bill_amount.to_string(),
                "Bill cannot be negative",
            ));
        }
        if !(self.energy_tariff > 0.0) {
            return Err(SolarError::invalid_input(
                "energy_tariff",
                self.energy_tariff.to_string(),
                "Tariff must be positive",
            ));
        }
        if !(self.hsp > 0.0) {
            return Err(SolarError::invalid_input(
                "hsp",
                self.hsp.to_string(),
                "Peak sun hours must be positive",
            ));
        }
        if !(self.investment_amount >= 0.0) {
            return Err(SolarError::invalid_input(
                "investment_amount",
                self.investment_amount.to_string(),
                "Investment cannot be negative",
            ));
        }
        if self.module_count > 0 && self.modules_per_string > self.module_count {
            return Err(SolarError::invalid_input(
                "modules_per_string",
                self.modules_per_string.to_string(),
                format!("String size exceeds the {} modules in the array", self.module_count),
            ));
        }
        if self.selected_inverter.trim().is_empty() {
            return Err(SolarError::missing_field("selected_inverter"));
        }
        Ok(())
    }
}

/// Derived technical specification. Recomputed from [`SystemInput`], never
/// edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSpecs {
    /// Array DC power (kWp)
    pub total_power_kw: f64,

    /// Inverter AC rating (kW)
    pub inverter_power_kw: f64,

    pub is_three_phase: bool,

    /// Inverter label for proposal and checklist
    pub suggested_inverter: String,

    pub inverter_source: InverterSource,

    /// Suggested inverter range, e.g. "3.1kW - 4.0kW"
    pub inverter_range: String,

    /// DC/AC ratio in percent (0 without an inverter)
    pub overload_percent: f64,

    /// Overload formatted as "NN%"
    pub overload: String,

    pub overload_band: OverloadBand,

    /// Inverter nominal output current (A, one decimal)
    pub nominal_current_a: f64,

    pub cable_gauge: String,
    pub breaker_rating: String,

    /// Roof area (m², one decimal)
    pub area_required_m2: f64,

    /// Array weight (kg)
    pub total_weight_kg: f64,

    /// String layout, e.g. "2 Strings de 8 módulos"
    pub string_config_text: String,

    pub generation_daily_avg_kwh: u32,
    pub generation_monthly_avg_kwh: u32,
    pub generation_yearly_kwh: u32,
}

/// Size the installation described by `input`.
///
/// Pure and total: identical inputs give identical specs, and degenerate
/// inputs (no modules, zero sun hours) give zeros rather than errors.
pub fn size_system(input: &SystemInput) -> TechnicalSpecs {
    let module_power = Watts(input.effective_module_power_w() as f64);
    let total_power: Kilowatts = (module_power * input.module_count as f64).into();
    let total_power_kw = total_power.value();

    let inverter = select_inverter(total_power_kw, &input.selected_inverter);
    let overload_percent = if inverter.rated_kw > 0.0 {
        total_power_kw / inverter.rated_kw * 100.0
    } else {
        0.0
    };

    let circuit = size_ac_circuit(Kilowatts(inverter.rated_kw), inverter.three_phase);

    let modules = input.module_count as f64;
    let area_required_m2 = round_to_tenth(modules * MODULE_AREA_M2);
    let total_weight_kg = modules * MODULE_WEIGHT_KG;

    let string_config_text =
        describe_strings(input.module_count, input.effective_modules_per_string());

    // Yearly totals use the 30-day billing month, not the forecast's 30.4
    let daily = total_power.over_hours(input.hsp);
    let yearly: f64 = SEASONAL_FACTORS
        .iter()
        .map(|factor| daily.value() * factor * DAYS_PER_MONTH_BILLING)
        .sum();

    tracing::debug!(
        total_power_kw,
        inverter_kw = inverter.rated_kw,
        overload_percent,
        "sized system"
    );

    TechnicalSpecs {
        total_power_kw,
        inverter_power_kw: inverter.rated_kw,
        is_three_phase: inverter.three_phase,
        suggested_inverter: inverter.label,
        inverter_source: inverter.source,
        inverter_range: inverter_range(total_power_kw),
        overload_percent,
        overload: format!("{:.0}%", overload_percent.round()),
        overload_band: OverloadBand::classify(overload_percent),
        nominal_current_a: round_to_tenth(circuit.nominal_current.value()),
        cable_gauge: circuit.cable_gauge,
        breaker_rating: circuit.breaker_rating,
        area_required_m2,
        total_weight_kg,
        string_config_text,
        generation_daily_avg_kwh: round_kwh(yearly / 365.0),
        generation_monthly_avg_kwh: round_kwh(yearly / 12.0),
        generation_yearly_kwh: round_kwh(yearly),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
