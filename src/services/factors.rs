use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Emission coefficients in kg CO2 per unit. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFactors {
    /// Per km travelled, by mode.
    pub transport: HashMap<String, f64>,
    /// Daily baseline, by household energy level.
    pub energy: HashMap<String, f64>,
    /// Per hour of AC or fan use.
    pub ac_fan: f64,
    /// Per hour of washing machine use.
    pub washing_machine: f64,
    /// Per serving, by food kind.
    pub diet: HashMap<String, f64>,
}

fn table(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            transport: table(&[("car", 0.192), ("bike", 0.021), ("public", 0.089), ("walk", 0.0)]),
            energy: table(&[("low", 1.5), ("medium", 3.5), ("high", 6.0)]),
            ac_fan: 0.5,
            washing_machine: 0.5,
            diet: table(&[
                ("redMeat", 6.61),
                ("whiteMeat", 1.87),
                ("dairy", 1.39),
                ("plant", 0.46),
            ]),
        }
    }
}

impl EmissionFactors {
    pub fn transport(&self, mode: &str) -> Option<f64> {
        self.transport.get(mode).copied()
    }

    pub fn energy_level(&self, level: &str) -> Option<f64> {
        self.energy.get(level).copied()
    }

    pub fn food(&self, kind: &str) -> Option<f64> {
        self.diet.get(kind).copied()
    }

    /// Loads a table from a JSON file with the same shape as the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Invalid {
            key: "EMISSION_FACTORS_PATH",
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let factors: EmissionFactors = serde_json::from_str(raw).map_err(|e| ConfigError::Invalid {
            key: "EMISSION_FACTORS_PATH",
            reason: e.to_string(),
        })?;
        factors.check()?;
        Ok(factors)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let scalars: [(&str, f64); 2] = [("acFan", self.ac_fan), ("washingMachine", self.washing_machine)];
        let entries = self
            .transport
            .iter()
            .chain(self.energy.iter())
            .chain(self.diet.iter())
            .map(|(k, v)| (k.as_str(), *v))
            .chain(scalars);

        for (name, value) in entries {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    key: "EMISSION_FACTORS_PATH",
                    reason: format!("factor '{}' must be a non-negative number, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_known_subtype() {
        let factors = EmissionFactors::default();
        for mode in ["car", "bike", "public", "walk"] {
            assert!(factors.transport(mode).is_some(), "{mode}");
        }
        for level in ["low", "medium", "high"] {
            assert!(factors.energy_level(level).is_some(), "{level}");
        }
        for kind in ["redMeat", "whiteMeat", "dairy", "plant"] {
            assert!(factors.food(kind).is_some(), "{kind}");
        }
    }

    #[test]
    fn json_override_is_loaded() {
        let raw = r#"{
            "transport": {"car": 0.2},
            "energy": {"low": 1.0},
            "acFan": 0.4,
            "washingMachine": 0.3,
            "diet": {"plant": 0.5}
        }"#;
        let factors = EmissionFactors::from_json(raw).unwrap();
        assert_eq!(factors.transport("car"), Some(0.2));
        assert_eq!(factors.transport("bike"), None);
        assert_eq!(factors.ac_fan, 0.4);
    }

    #[test]
    fn negative_factor_is_rejected() {
        let raw = r#"{
            "transport": {"car": -0.2},
            "energy": {},
            "acFan": 0.4,
            "washingMachine": 0.3,
            "diet": {}
        }"#;
        assert!(EmissionFactors::from_json(raw).is_err());
    }
}
