//! # Project Data Structures
//!
//! A `Project` is one saved proposal: who it is for, the commercial text
//! printed on it, the system input and the edited materials checklist.
//! Projects serialize to `.spf` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, id, client, timestamps)
//! ├── settings: ProposalSettings (company, seller, terms)
//! ├── input: SystemInput (everything the engine needs)
//! └── checklist: Vec<ChecklistItem> (with user observations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use solar_core::project::Project;
//!
//! let project = Project::new("Maria Souza", "(11) 98888-0000");
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Maria Souza"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::calculations::checklist::ChecklistItem;
use crate::calculations::system::SystemInput;
use crate::report::{evaluate, SystemReport};
use crate::settings::{EngineSettings, ProposalSettings};

/// Current schema version for .spf files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container that gets serialized to `.spf` files.
///
/// Every section except `meta` falls back to defaults when missing, so
/// files written before a field existed still open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    /// Text printed on the proposal
    #[serde(default)]
    pub settings: ProposalSettings,

    #[serde(default, deserialize_with = "deserialize_input")]
    pub input: SystemInput,

    /// Last generated checklist, including user edits
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Project {
    /// Create a new project with default input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solar_core::project::Project;
    ///
    /// let project = Project::new("João Lima", "");
    /// assert_eq!(project.meta.client_name, "João Lima");
    /// assert!(project.checklist.is_empty());
    /// ```
    pub fn new(client_name: impl Into<String>, client_phone: impl Into<String>) -> Self {
        Self::with_settings(client_name, client_phone, &EngineSettings::default())
    }

    /// Create a new project seeded from engine settings.
    pub fn with_settings(
        client_name: impl Into<String>,
        client_phone: impl Into<String>,
        settings: &EngineSettings,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                client_name: client_name.into(),
                client_phone: client_phone.into(),
                created: now,
                modified: now,
            },
            settings: settings.proposal.clone(),
            input: SystemInput::from_settings(settings),
            checklist: Vec::new(),
        }
    }

    /// Replace the input, keeping the stored checklist for the next refresh.
    pub fn set_input(&mut self, input: SystemInput) {
        self.input = input;
        self.touch();
    }

    /// Re-run the engine and store the regenerated checklist.
    pub fn refresh(&mut self, settings: &EngineSettings) -> SystemReport {
        let report = evaluate(&self.input, &self.checklist, settings);
        self.checklist = report.checklist.clone();
        self.touch();
        report
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Stored input with legacy gaps filled in.
fn deserialize_input<'de, D>(deserializer: D) -> Result<SystemInput, D::Error>
where
    D: Deserializer<'de>,
{
    let mut input = SystemInput::deserialize(deserializer)?;
    input.backfill_string_size();
    Ok(input)
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub id: Uuid,

    pub client_name: String,

    #[serde(default)]
    pub client_phone: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}
