//! # Engine Settings
//!
//! Defaults and caller policy for a sizing session: the values a new
//! proposal starts from, which monthly figure counts as "savings", and the
//! commercial text printed on proposals.
//!
//! Settings are plain JSON. Missing fields take their defaults, so a file
//! holding only `{"default_tariff": 1.02}` is valid.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::settings::{EngineSettings, SavingsBasis};
//!
//! let settings: EngineSettings =
//!     serde_json::from_str(r#"{"savings_basis": "Generation"}"#).unwrap();
//! assert_eq!(settings.savings_basis, SavingsBasis::Generation);
//! assert_eq!(settings.default_tariff, 0.95);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_MODULE_POWER_W;
use crate::errors::{SolarError, SolarResult};

/// Which monthly amount the financial projection treats as savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SavingsBasis {
    /// The client's current monthly bill
    #[default]
    Bill,
    /// Forecast monthly generation valued at the energy tariff
    Generation,
}

/// Session-wide defaults and policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Energy tariff for new proposals (currency per kWh)
    pub default_tariff: f64,

    /// Peak sun hours when the site has not been located
    pub default_hsp: f64,

    /// Module wattage for new proposals
    pub default_module_power_w: u32,

    /// Share of the investment suggested as down payment (0.0 - 1.0)
    pub down_payment_fraction: f64,

    /// Savings figure fed to payback and projection
    pub savings_basis: SavingsBasis,

    /// Commercial text for proposals
    pub proposal: ProposalSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_tariff: 0.95,
            default_hsp: 5.8,
            default_module_power_w: DEFAULT_MODULE_POWER_W,
            down_payment_fraction: 0.30,
            savings_basis: SavingsBasis::Bill,
            proposal: ProposalSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> SolarResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SolarError::file_error("read settings", path.display().to_string(), e.to_string())
        })?;

        let settings: EngineSettings = serde_json::from_str(&contents).map_err(|e| {
            SolarError::serialization(format!("Invalid settings in {}: {}", path.display(), e))
        })?;

        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> SolarResult<()> {
        if self.default_tariff <= 0.0 {
            return Err(SolarError::invalid_input(
                "default_tariff",
                self.default_tariff.to_string(),
                "Tariff must be positive",
            ));
        }
        if self.default_hsp <= 0.0 {
            return Err(SolarError::invalid_input(
                "default_hsp",
                self.default_hsp.to_string(),
                "Peak sun hours must be positive",
            ));
        }
        if self.default_module_power_w == 0 {
            return Err(SolarError::invalid_input(
                "default_module_power_w",
                "0",
                "Module power must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.down_payment_fraction) {
            return Err(SolarError::invalid_input(
                "down_payment_fraction",
                self.down_payment_fraction.to_string(),
                "Down payment fraction must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Commercial text printed on a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalSettings {
    pub company_name: String,
    pub seller_name: String,
    pub contact_info: String,
    pub warranty_text: String,
    pub payment_terms: String,
    /// Days the quoted price stays valid
    pub validity_days: u32,
}

impl Default for ProposalSettings {
    fn default() -> Self {
        ProposalSettings {
            company_name: String::new(),
            seller_name: String::new(),
            contact_info: String::new(),
            warranty_text: "25 Anos de Eficiência Linear (80%) nos Módulos.\n\
                10 Anos de Garantia contra defeitos de fabricação nos inversores.\n\
                1 Ano de garantia na instalação elétrica e montagem."
                .to_string(),
            payment_terms: "Entrada de 30% e restante na entrega dos equipamentos.\n\
                Financiamento bancário em até 60x."
                .to_string(),
            validity_days: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.default_tariff, 0.95);
        assert_eq!(settings.default_hsp, 5.8);
        assert_eq!(settings.default_module_power_w, 575);
        assert_eq!(settings.savings_basis, SavingsBasis::Bill);
        assert_eq!(settings.proposal.validity_days, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"default_tariff": 1.1, "proposal": {"company_name": "Sol Norte"}}"#).unwrap();
        assert_eq!(settings.default_tariff, 1.1);
        assert_eq!(settings.default_hsp, 5.8);
        assert_eq!(settings.proposal.company_name, "Sol Norte");
        assert_eq!(settings.proposal.validity_days, 5);
    }

    #[test]
    fn test_validation_rejects_bad_fraction() {
        let settings = EngineSettings {
            down_payment_fraction: 1.5,
            ..EngineSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"savings_basis": "Generation", "default_hsp": 6.0}"#).unwrap();

        let settings = EngineSettings::load(&path).unwrap();
        assert_eq!(settings.savings_basis, SavingsBasis::Generation);
        assert_eq!(settings.default_hsp, 6.0);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = EngineSettings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let missing = EngineSettings::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");
    }
}
