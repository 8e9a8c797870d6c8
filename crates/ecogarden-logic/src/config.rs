//! Tunable game parameters.
//!
//! `GameConfig::default()` is the standard game. Every field is optional
//! when deserializing, so a config file only needs the values it changes:
//!
//! ```
//! use ecogarden_logic::config::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "starting_budget": 800 }"#).unwrap();
//! assert_eq!(config.starting_budget, 800);
//! assert_eq!(config.weekly_allowance, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_budget: u32,
    /// Added to the budget at the start of every week after the first.
    pub weekly_allowance: u32,
    pub starting_eco_score: u32,
    pub starting_garden_health: u32,
    pub starting_happiness: u32,
    /// Allocation proposed on the first budget screen.
    pub starting_allocation: Allocation,
    /// Per-bucket allocation proposed after each week advance.
    pub weekly_reset_amount: u32,
    /// Chance that each empty plot is sown when planting.
    pub plant_chance: f64,
    /// Chance of a random event when the budget is committed.
    pub event_chance: f64,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_budget: 500,
            weekly_allowance: 100,
            starting_eco_score: 50,
            starting_garden_health: 70,
            starting_happiness: 60,
            starting_allocation: Allocation {
                seeds: 100,
                tools: 75,
                water: 100,
                marketing: 50,
                eco: 75,
            },
            weekly_reset_amount: 50,
            plant_chance: 0.7,
            event_chance: 0.3,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Problems that would make the config unplayable. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.plant_chance) {
            errors.push(format!("plant_chance {} outside 0..=1", self.plant_chance));
        }
        if !(0.0..=1.0).contains(&self.event_chance) {
            errors.push(format!("event_chance {} outside 0..=1", self.event_chance));
        }
        for (name, value) in [
            ("starting_eco_score", self.starting_eco_score),
            ("starting_garden_health", self.starting_garden_health),
            ("starting_happiness", self.starting_happiness),
        ] {
            if value > 100 {
                errors.push(format!("{} {} exceeds 100", name, value));
            }
        }
        errors
    }
}
