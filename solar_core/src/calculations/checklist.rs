//! # Materials Checklist
//!
//! Bill of materials for the installation, regenerated whenever the
//! technical specs change.
//!
//! Items are identified by a stable `id`. Regeneration always refreshes
//! `label` and `quantity` from the latest specs but keeps any observation
//! the user typed for an id that is still present. Observations the
//! generator itself wrote (the mounting kit, the inverter note) are
//! regenerated so a roof change shows the right kit.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::checklist::{build_checklist, update_observation};
//! use solar_core::catalog::RoofType;
//!
//! let mut items = build_checklist(8, "2.5mm²", "20A", RoofType::Ceramic, "Inversor 4kW", &[]);
//! update_observation(&mut items, "1", "Entrega dia 12");
//!
//! let items = build_checklist(10, "2.5mm²", "20A", RoofType::Ceramic, "Inversor 5kW", &items);
//! assert_eq!(items[0].observation, "Entrega dia 12");
//! assert_eq!(items[1].label, "Inversor 5kW");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{RoofType, SOLAR_CABLE_M_PER_MODULE};

/// Default note on the inverter line
pub const INVERTER_NOTE: &str = "Verificar modelo e fabricante na proposta";

/// Quantity column: a count or a free-form amount ("1 Kit", "6.0mm²")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Count(u32),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Count(n) => write!(f, "{}", n),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Quantity::Count(n)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Quantity::Text(s.to_string())
    }
}

/// One line of the materials checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable identity across regenerations
    pub id: String,
    pub label: String,
    pub quantity: Quantity,
    /// Free-form note; user edits survive regeneration
    pub observation: String,
}

impl ChecklistItem {
    fn new(id: &str, label: impl Into<String>, quantity: impl Into<Quantity>, observation: &str) -> Self {
        ChecklistItem {
            id: id.to_string(),
            label: label.into(),
            quantity: quantity.into(),
            observation: observation.to_string(),
        }
    }
}

/// Fresh checklist for the given specs, in display order.
pub fn default_checklist(
    module_count: u32,
    cable_gauge: &str,
    breaker_rating: &str,
    roof_type: RoofType,
    inverter_label: &str,
) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("1", "Painéis Solares", module_count, ""),
        ChecklistItem::new("8", inverter_label, "1 un", INVERTER_NOTE),
        ChecklistItem::new(
            "2",
            "Cabo Solar (m)",
            module_count.saturating_mul(SOLAR_CABLE_M_PER_MODULE),
            "",
        ),
        ChecklistItem::new("3", "Cabo CA", cable_gauge, ""),
        ChecklistItem::new("4", "Disjuntor CA", breaker_rating, ""),
        ChecklistItem::new("5", "Estrutura Fixação", "1 Kit", roof_type.mounting_kit()),
        ChecklistItem::new("6", "String Box", "1 un", ""),
        ChecklistItem::new("7", "Conectores MC4", "1 Kit", ""),
    ]
}

/// Regenerate the checklist, carrying over non-empty observations by id.
pub fn build_checklist(
    module_count: u32,
    cable_gauge: &str,
    breaker_rating: &str,
    roof_type: RoofType,
    inverter_label: &str,
    previous: &[ChecklistItem],
) -> Vec<ChecklistItem> {
    let fresh = default_checklist(module_count, cable_gauge, breaker_rating, roof_type, inverter_label);
    merge_observations(fresh, previous)
}

/// True for observation text the generator writes on its own.
fn is_generated_observation(observation: &str) -> bool {
    observation == INVERTER_NOTE || RoofType::ALL.iter().any(|roof| roof.mounting_kit() == observation)
}

/// Copy user observations from `previous` onto matching ids in `fresh`.
pub fn merge_observations(fresh: Vec<ChecklistItem>, previous: &[ChecklistItem]) -> Vec<ChecklistItem> {
    let by_id: HashMap<&str, &ChecklistItem> =
        previous.iter().map(|item| (item.id.as_str(), item)).collect();

    fresh
        .into_iter()
        .map(|mut item| {
            if let Some(old) = by_id.get(item.id.as_str()) {
                if !old.observation.is_empty() && !is_generated_observation(&old.observation) {
                    tracing::trace!(id = %item.id, "keeping checklist observation");
                    item.observation = old.observation.clone();
                }
            }
            item
        })
        .collect()
}

/// Set the observation of item `id`. Returns false if no such item.
pub fn update_observation(items: &mut [ChecklistItem], id: &str, observation: impl Into<String>) -> bool {
    match items.iter_mut().find(|item| item.id == id) {
        Some(item) => {
            item.observation = observation.into();
            true
        }
        None => false,
    }
}

/// Rename item `id`. The next regeneration restores the computed label.
pub fn update_label(items: &mut [ChecklistItem], id: &str, label: impl Into<String>) -> bool {
    match items.iter_mut().find(|item| item.id == id) {
        Some(item) => {
            item.label = label.into();
            true
        }
        None => false,
    }
}
