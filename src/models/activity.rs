use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw activity a user logs for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ActivityRecord {
    #[serde(default)]
    #[validate]
    pub travel: Travel,
    #[serde(default)]
    #[validate]
    pub energy: Energy,
    #[serde(default)]
    pub diet: Diet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Travel {
    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance: f64,
}

fn default_mode() -> String {
    "car".to_string()
}

impl Default for Travel {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            distance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Energy {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "AC hours cannot be negative"))]
    pub ac_hours: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Washing machine hours cannot be negative"))]
    pub washing_machine: f64,

    // Descriptive only, echoed back to the dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

fn default_level() -> String {
    "low".to_string()
}

impl Default for Energy {
    fn default() -> Self {
        Self {
            level: default_level(),
            ac_hours: 0.0,
            washing_machine: 0.0,
            location: None,
            season: None,
        }
    }
}

/// Food counts for a single meal slot, keyed by food kind (`redMeat`, `plant`, ...).
pub type Meal = BTreeMap<String, u32>;

/// Meals eaten across the four slots of a day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diet {
    #[serde(default)]
    pub morning: Meal,
    #[serde(default)]
    pub afternoon: Meal,
    #[serde(default)]
    pub evening: Meal,
    #[serde(default)]
    pub night: Meal,
}

impl Diet {
    pub fn slots(&self) -> [(&'static str, &Meal); 4] {
        [
            ("morning", &self.morning),
            ("afternoon", &self.afternoon),
            ("evening", &self.evening),
            ("night", &self.night),
        ]
    }
}

/// Per-day emissions breakdown in kg CO2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub travel: f64,
    pub energy: f64,
    pub diet: f64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let record: ActivityRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.travel.mode, "car");
        assert_eq!(record.energy.level, "low");
        assert!(record.diet.morning.is_empty());
    }

    #[test]
    fn energy_uses_camel_case_keys() {
        let energy: Energy =
            serde_json::from_str(r#"{"level":"high","acHours":1.5,"washingMachine":2,"season":"winter"}"#)
                .unwrap();
        assert_eq!(energy.ac_hours, 1.5);
        assert_eq!(energy.washing_machine, 2.0);
        assert_eq!(energy.season.as_deref(), Some("winter"));
    }

    #[test]
    fn unknown_diet_slot_is_rejected() {
        let result: Result<Diet, _> = serde_json::from_str(r#"{"brunch":{"plant":1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn negative_distance_fails_validation() {
        let record = ActivityRecord {
            travel: Travel {
                mode: "car".to_string(),
                distance: -1.0,
            },
            ..Default::default()
        };
        assert!(record.validate().is_err());
    }
}
