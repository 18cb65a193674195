//! # Sizing Calculations
//!
//! Every calculation here is a pure function of its arguments: no I/O, no
//! shared state, and no `Result`. Degenerate inputs produce zeros or the
//! "---" sentinel instead of errors.
//!
//! ## Available Calculations
//!
//! - [`modules`] - Bill to module count
//! - [`strings`] - Series string size and layout text
//! - [`inverter`] - Manual or ladder-based inverter selection
//! - [`electrical`] - AC current, cable gauge and breaker
//! - [`system`] - Full technical specification of an installation
//! - [`production`] - Monthly generation forecast
//! - [`financial`] - Payback and 25-year savings
//! - [`commercial`] - Price, margin and payment split
//! - [`checklist`] - Materials checklist with merge-by-id regeneration

pub mod checklist;
pub mod commercial;
pub mod electrical;
pub mod financial;
pub mod inverter;
pub mod modules;
pub mod production;
pub mod strings;
pub mod system;

// Re-export commonly used types
pub use checklist::{build_checklist, ChecklistItem, Quantity};
pub use financial::{compute_payback, project_financials, FinancialProjection};
pub use inverter::{InverterSource, OverloadBand, ResolvedInverter};
pub use modules::estimate_module_count;
pub use production::{forecast_production, MonthlyProduction, ProductionSummary};
pub use strings::suggest_string_size;
pub use system::{size_system, SystemInput, TechnicalSpecs};
