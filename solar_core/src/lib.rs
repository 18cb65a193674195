//! # solar_core - PV Sizing and Forecasting Engine
//!
//! `solar_core` sizes grid-tied photovoltaic installations for residential
//! and small commercial proposals. From an electricity bill and a handful of
//! equipment choices it derives the array, the inverter, the AC circuit,
//! a monthly generation forecast, payback and a materials checklist.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Sizing is a pure function of the input record
//! - **Total**: Degenerate inputs yield zeros or "---", never a panic
//! - **JSON-First**: Inputs, reports and projects all serialize
//! - **Rich Errors**: Structured error types for the fallible surroundings
//!
//! ## Quick Start
//!
//! ```rust
//! use solar_core::{evaluate, EngineSettings, SystemInput};
//!
//! let settings = EngineSettings::default();
//! let input = SystemInput::from_settings(&settings).with_bill(650.0);
//!
//! let report = evaluate(&input, &[], &settings);
//! assert_eq!(input.module_count, 9);
//! assert_eq!(report.specs.suggested_inverter, "Inversor 3.6kW (Mono/Bifásico 220V)");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Sizing, forecast, finance and checklist
//! - [`report`] - One-call pipeline over all calculations
//! - [`catalog`] - Equipment catalogs and lookup tables
//! - [`settings`] - Session defaults and proposal text
//! - [`project`] - Saved proposal container
//! - [`file_io`] - Atomic saves and file locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{SystemInput, TechnicalSpecs};
pub use errors::{SolarError, SolarResult};
pub use file_io::{delete_project, list_projects, load_project, save_project, FileLock};
pub use project::{Project, ProjectMetadata};
pub use report::{evaluate, SystemReport};
pub use settings::EngineSettings;
