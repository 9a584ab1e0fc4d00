use thiserror::Error;

use crate::models::activity::{ActivityRecord, Diet, EmissionResult, Energy, Travel};
use crate::services::factors::EmissionFactors;

#[derive(Debug, Error, PartialEq)]
pub enum EmissionError {
    #[error("Unknown food kind '{kind}' in {slot} meal")]
    UnknownFoodKind { slot: &'static str, kind: String },
    #[error("Quantities are too large: {part} emissions overflow")]
    Overflow { part: &'static str },
}

fn finite(part: &'static str, value: f64) -> Result<f64, EmissionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EmissionError::Overflow { part })
    }
}

/// Unknown modes contribute nothing.
pub fn travel_emissions(travel: &Travel, factors: &EmissionFactors) -> f64 {
    travel.distance * factors.transport(&travel.mode).unwrap_or(0.0)
}

/// Unknown levels drop the baseline but keep the appliance terms.
pub fn energy_emissions(energy: &Energy, factors: &EmissionFactors) -> f64 {
    let base = factors.energy_level(&energy.level).unwrap_or(0.0);
    base + energy.ac_hours * factors.ac_fan + energy.washing_machine * factors.washing_machine
}

/// Unlike travel and energy, diet has no fallback factor, so an unknown food kind is an error.
pub fn diet_emissions(diet: &Diet, factors: &EmissionFactors) -> Result<f64, EmissionError> {
    let mut total = 0.0;
    for (slot, meal) in diet.slots() {
        for (kind, count) in meal {
            let factor = factors
                .food(kind)
                .ok_or_else(|| EmissionError::UnknownFoodKind {
                    slot,
                    kind: kind.clone(),
                })?;
            total += f64::from(*count) * factor;
        }
    }
    Ok(total)
}

pub fn calculate(record: &ActivityRecord, factors: &EmissionFactors) -> Result<EmissionResult, EmissionError> {
    let travel = finite("travel", travel_emissions(&record.travel, factors))?;
    let energy = finite("energy", energy_emissions(&record.energy, factors))?;
    let diet = finite("diet", diet_emissions(&record.diet, factors)?)?;
    let total = finite("total", travel + energy + diet)?;

    Ok(EmissionResult {
        travel,
        energy,
        diet,
        total,
    })
}
