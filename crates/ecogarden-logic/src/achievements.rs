//! Threshold achievements, each unlocked at most once per game.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::achievements;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Achievement {
    EcoMaster,
    VeteranFarmer,
    Profitable,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::EcoMaster,
        Achievement::VeteranFarmer,
        Achievement::Profitable,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Achievement::EcoMaster => "eco-master",
            Achievement::VeteranFarmer => "veteran-farmer",
            Achievement::Profitable => "profitable",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Achievement::EcoMaster => "Eco Master",
            Achievement::VeteranFarmer => "Veteran Farmer",
            Achievement::Profitable => "Profitable",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::EcoMaster => "Reach 90+ environmental score",
            Achievement::VeteranFarmer => "Survive 10+ weeks",
            Achievement::Profitable => "Accumulate $1000+ budget",
        }
    }

    pub fn is_met(self, state: &GameState) -> bool {
        match self {
            Achievement::EcoMaster => state.eco_score.value() >= achievements::ECO_MASTER_SCORE,
            Achievement::VeteranFarmer => state.week >= achievements::VETERAN_WEEKS,
            Achievement::Profitable => state.budget >= achievements::PROFITABLE_BUDGET,
        }
    }
}

/// Record every newly met achievement in `achieved` and return them.
///
/// Already-recorded achievements are skipped, so repeated calls on a
/// qualifying state return an empty list after the first.
pub fn unlock_new(state: &GameState, achieved: &mut BTreeSet<Achievement>) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| a.is_met(state) && achieved.insert(*a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::gauge::Gauge;

    #[test]
    fn test_fresh_game_has_none() {
        let state = GameState::new(&GameConfig::default());
        let mut achieved = BTreeSet::new();
        assert!(unlock_new(&state, &mut achieved).is_empty());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let mut state = GameState::new(&GameConfig::default());
        state.eco_score = Gauge::new(90);
        state.week = 10;
        state.budget = 1000;
        let mut achieved = BTreeSet::new();
        assert_eq!(unlock_new(&state, &mut achieved), Achievement::ALL.to_vec());
    }

    #[test]
    fn test_just_below_thresholds_unlocks_nothing() {
        let mut state = GameState::new(&GameConfig::default());
        state.eco_score = Gauge::new(achievements::ECO_MASTER_SCORE - 1);
        state.week = achievements::VETERAN_WEEKS - 1;
        state.budget = achievements::PROFITABLE_BUDGET - 1;
        let mut achieved = BTreeSet::new();
        assert!(unlock_new(&state, &mut achieved).is_empty());
        assert!(achieved.is_empty());
    }

    #[test]
    fn test_each_fires_once() {
        let mut state = GameState::new(&GameConfig::default());
        state.budget = 5000;
        let mut achieved = BTreeSet::new();
        assert_eq!(unlock_new(&state, &mut achieved), vec![Achievement::Profitable]);
        for _ in 0..5 {
            assert!(unlock_new(&state, &mut achieved).is_empty());
        }
        state.week = 12;
        assert_eq!(unlock_new(&state, &mut achieved), vec![Achievement::VeteranFarmer]);
        assert_eq!(achieved.len(), 2);
    }

    #[test]
    fn test_ids_unique() {
        let ids: BTreeSet<_> = Achievement::ALL.iter().map(|a| a.id()).collect();
        assert_eq!(ids.len(), Achievement::ALL.len());
    }
}
