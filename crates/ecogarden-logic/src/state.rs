//! The complete game state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::achievements::Achievement;
use crate::allocation::Allocation;
use crate::config::GameConfig;
use crate::constants::PLOT_COUNT;
use crate::events::{RandomEvent, WeeklyModifiers};
use crate::garden::Plot;
use crate::gauge::Gauge;
use crate::market::HarvestedItem;
use crate::phase::Phase;

/// Everything needed to continue a game. Cloned by each transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub week: u32,
    pub budget: u32,
    pub eco_score: Gauge,
    pub garden_health: Gauge,
    pub community_happiness: Gauge,
    /// Cumulative sales since the game began.
    pub total_revenue: u64,
    /// Cumulative committed allocations since the game began.
    pub total_expenses: u64,
    pub plots: [Plot; PLOT_COUNT],
    /// Proposed allocation during Budget, committed allocation afterwards.
    pub allocation: Allocation,
    pub phase: Phase,
    pub achievements: BTreeSet<Achievement>,
    /// Event rolled this week and not yet confirmed.
    pub pending_event: Option<RandomEvent>,
    pub modifiers: WeeklyModifiers,
    /// Crops picked on entering the market, cleared once sold.
    pub harvest: Vec<HarvestedItem>,
}

impl GameState {
    /// A fresh game on the welcome screen.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            week: 1,
            budget: config.starting_budget,
            eco_score: Gauge::new(config.starting_eco_score),
            garden_health: Gauge::new(config.starting_garden_health),
            community_happiness: Gauge::new(config.starting_happiness),
            total_revenue: 0,
            total_expenses: 0,
            plots: [Plot::default(); PLOT_COUNT],
            allocation: config.starting_allocation,
            phase: Phase::Welcome,
            achievements: BTreeSet::new(),
            pending_event: None,
            modifiers: WeeklyModifiers::default(),
            harvest: Vec::new(),
        }
    }

    /// Revenue minus expenses over the whole game.
    pub fn profit(&self) -> i64 {
        self.total_revenue as i64 - self.total_expenses as i64
    }

    pub fn planted_count(&self) -> usize {
        self.plots.iter().filter(|p| !p.is_empty()).count()
    }

    pub fn has_achieved(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let state = GameState::default();
        assert_eq!(state.week, 1);
        assert_eq!(state.budget, 500);
        assert_eq!(state.eco_score.value(), 50);
        assert_eq!(state.garden_health.value(), 70);
        assert_eq!(state.community_happiness.value(), 60);
        assert_eq!(state.phase, Phase::Welcome);
        assert_eq!(state.planted_count(), 0);
        assert!(state.plots.iter().all(|p| p.health == Gauge::FULL));
    }

    #[test]
    fn test_profit_can_go_negative() {
        let mut state = GameState::default();
        state.total_expenses = 400;
        state.total_revenue = 150;
        assert_eq!(state.profit(), -250);
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let state = GameState::default();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
