//! Stateful wrapper around the pure transitions in [`crate::game`].
//!
//! A `GameSession` owns the current state, the config and a seeded RNG.
//! Each command runs the matching transition and commits the new state
//! only when it succeeds, so a rejected command leaves the session as it
//! was.
//!
//! ```
//! use ecogarden_logic::config::GameConfig;
//! use ecogarden_logic::session::GameSession;
//!
//! let mut session = GameSession::new(GameConfig { seed: Some(7), ..Default::default() });
//! session.skip_tutorial().unwrap();
//! let allocation = session.config().starting_allocation;
//! session.apply_allocation(allocation).unwrap();
//! assert_eq!(session.state().budget, 100);
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::allocation::{Allocation, AllocationPreview};
use crate::config::GameConfig;
use crate::error::CommandError;
use crate::events::RandomEvent;
use crate::game::{self, HarvestResult, PlantResult, RevenueResult, Transition, WaterResult};
use crate::garden::{PlotInfo, SoilReport};
use crate::state::GameState;

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    config: GameConfig,
    rng: StdRng,
    seed: u64,
}

impl GameSession {
    /// Start a session on the welcome screen. Without a configured seed one
    /// is drawn from entropy and kept so the game can be replayed.
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            state: GameState::new(&config),
            rng: StdRng::seed_from_u64(seed),
            config,
            seed,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn commit<T>(&mut self, command: &str, result: Transition<T>) -> Result<T, CommandError> {
        match result {
            Ok((next, output)) => {
                if next.phase != self.state.phase {
                    log::info!(
                        "week {}: {}: {:?} -> {:?}",
                        next.week,
                        command,
                        self.state.phase,
                        next.phase
                    );
                }
                self.state = next;
                Ok(output)
            }
            Err(e) => {
                log::warn!("week {}: {} rejected: {}", self.state.week, command, e);
                Err(e)
            }
        }
    }

    fn commit_state(
        &mut self,
        command: &str,
        result: Result<GameState, CommandError>,
    ) -> Result<(), CommandError> {
        self.commit(command, result.map(|s| (s, ())))
    }

    pub fn start_tutorial(&mut self) -> Result<(), CommandError> {
        let result = game::start_tutorial(&self.state);
        self.commit_state("start_tutorial", result)
    }

    pub fn next_tutorial_step(&mut self) -> Result<(), CommandError> {
        let result = game::next_tutorial_step(&self.state);
        self.commit_state("next_tutorial_step", result)
    }

    pub fn previous_tutorial_step(&mut self) -> Result<(), CommandError> {
        let result = game::previous_tutorial_step(&self.state);
        self.commit_state("previous_tutorial_step", result)
    }

    pub fn skip_tutorial(&mut self) -> Result<(), CommandError> {
        let result = game::skip_tutorial(&self.state);
        self.commit_state("skip_tutorial", result)
    }

    pub fn preview_allocation(&self, allocation: &Allocation) -> AllocationPreview {
        game::preview_allocation(&self.state, allocation)
    }

    /// Commit the allocation. Returns the newly rolled event, if any.
    pub fn apply_allocation(
        &mut self,
        allocation: Allocation,
    ) -> Result<Option<RandomEvent>, CommandError> {
        let result = game::apply_allocation(&self.state, allocation, &self.config, &mut self.rng);
        self.commit_state("apply_allocation", result)?;
        if let Some(event) = self.state.pending_event {
            log::info!("week {}: event \"{}\"", self.state.week, event.title());
        }
        Ok(self.state.pending_event)
    }

    pub fn confirm_event(&mut self) -> Result<RandomEvent, CommandError> {
        let result = game::confirm_event(&self.state);
        self.commit("confirm_event", result)
    }

    pub fn plant(&mut self) -> Result<PlantResult, CommandError> {
        let result = game::plant(&self.state, &self.config, &mut self.rng);
        self.commit("plant", result)
    }

    pub fn water(&mut self) -> Result<WaterResult, CommandError> {
        let result = game::water(&self.state);
        self.commit("water", result)
    }

    pub fn eco_upgrade(&mut self) -> Result<(), CommandError> {
        let result = game::eco_upgrade(&self.state);
        self.commit_state("eco_upgrade", result)
    }

    pub fn check_soil(&self) -> Result<SoilReport, CommandError> {
        game::check_soil(&self.state)
    }

    pub fn inspect_plot(&self, index: usize) -> Result<PlotInfo, CommandError> {
        game::inspect_plot(&self.state, index)
    }

    pub fn harvest_and_price(&mut self) -> Result<HarvestResult, CommandError> {
        let result = game::harvest_and_price(&self.state, &mut self.rng);
        self.commit("harvest_and_price", result)
    }

    pub fn sell(&mut self) -> Result<RevenueResult, CommandError> {
        let result = game::sell(&self.state, &mut self.rng);
        let outcome = self.commit("sell", result)?;
        for achievement in &outcome.summary.new_achievements {
            log::info!(
                "week {}: achievement unlocked: {}",
                self.state.week,
                achievement.title()
            );
        }
        Ok(outcome)
    }

    pub fn advance_week(&mut self) -> Result<(), CommandError> {
        let result = game::advance_week(&self.state, &self.config);
        self.commit_state("advance_week", result)
    }

    /// Back to the welcome screen. The RNG stream continues.
    pub fn restart(&mut self) {
        log::info!("restarting game at week {}", self.state.week);
        self.state = game::restart(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WeeklyModifiers;
    use crate::phase::Phase;

    fn seeded(seed: u64) -> GameSession {
        GameSession::new(GameConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_rejected_command_keeps_state() {
        let mut session = seeded(1);
        session.skip_tutorial().unwrap();
        let before = session.state().clone();
        assert!(session.apply_allocation(Allocation::uniform(200)).is_err());
        assert_eq!(session.state(), &before);
        assert!(session.sell().is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_seed_is_recorded() {
        assert_eq!(seeded(99).seed(), 99);
    }

    #[test]
    fn test_restart_drops_pending_event_and_modifiers() {
        let config = GameConfig {
            event_chance: 1.0,
            ..Default::default()
        };
        let mut mid_event = 0;
        let mut with_modifier = 0;
        for seed in 0..40 {
            let mut session = GameSession::new(GameConfig {
                seed: Some(seed),
                ..config.clone()
            });
            session.skip_tutorial().unwrap();
            let allocation = session.config().starting_allocation;
            assert!(session.apply_allocation(allocation).unwrap().is_some());
            if seed % 2 == 0 {
                mid_event += 1;
            } else {
                session.confirm_event().unwrap();
                if session.state().modifiers == WeeklyModifiers::default() {
                    continue;
                }
                with_modifier += 1;
            }
            assert_eq!(session.state().phase, Phase::Garden);

            session.restart();
            let state = session.state();
            assert_eq!(state, &GameState::new(session.config()));
            assert_eq!(state.pending_event, None);
            assert_eq!(state.modifiers, WeeklyModifiers::default());
        }
        assert!(mid_event > 0);
        assert!(with_modifier > 0);
    }

    #[test]
    fn test_restart_returns_to_welcome() {
        let mut session = seeded(2);
        session.skip_tutorial().unwrap();
        session.restart();
        assert_eq!(session.state().phase, Phase::Welcome);
        assert_eq!(session.state().budget, 500);
    }
}
