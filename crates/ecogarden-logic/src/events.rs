//! Random weekly events.
//!
//! An event may be rolled when the week's budget is committed. It then sits
//! in [`GameState::pending_event`] until the player confirms it, at which
//! point its effect is applied and gauges are re-clamped.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// What an event does once confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventEffect {
    /// Additive change to the garden health gauge.
    GardenHealth(i32),
    /// Additive change to the budget, floored at zero.
    Budget(i32),
    /// Multiplier (percent) on this week's sale total.
    MarketBonus { percent: u32 },
    /// Multiplier (percent) on watering growth for the rest of the week.
    GrowthRate { percent: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomEvent {
    BeneficialInsects,
    RainShower,
    PestAlert,
    MarketDayBonus,
    SoilDepletion,
}

impl RandomEvent {
    pub const ALL: [RandomEvent; 5] = [
        RandomEvent::BeneficialInsects,
        RandomEvent::RainShower,
        RandomEvent::PestAlert,
        RandomEvent::MarketDayBonus,
        RandomEvent::SoilDepletion,
    ];

    pub fn title(self) -> &'static str {
        match self {
            RandomEvent::BeneficialInsects => "Beneficial Insects",
            RandomEvent::RainShower => "Rain Shower",
            RandomEvent::PestAlert => "Pest Alert",
            RandomEvent::MarketDayBonus => "Market Day Bonus",
            RandomEvent::SoilDepletion => "Soil Depletion",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RandomEvent::BeneficialInsects => "Ladybugs arrived! Garden health +10",
            RandomEvent::RainShower => "Natural watering saved $20",
            RandomEvent::PestAlert => "Aphids detected. Garden health -15",
            RandomEvent::MarketDayBonus => "High demand! Next harvest +25% value",
            RandomEvent::SoilDepletion => "Crops growing slower. Need more compost.",
        }
    }

    pub fn effect(self) -> EventEffect {
        match self {
            RandomEvent::BeneficialInsects => EventEffect::GardenHealth(10),
            RandomEvent::RainShower => EventEffect::Budget(20),
            RandomEvent::PestAlert => EventEffect::GardenHealth(-15),
            RandomEvent::MarketDayBonus => EventEffect::MarketBonus { percent: 125 },
            RandomEvent::SoilDepletion => EventEffect::GrowthRate { percent: 80 },
        }
    }
}

/// One-week multipliers left behind by confirmed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyModifiers {
    /// Consumed by the next sale.
    pub market_bonus_percent: Option<u32>,
    pub growth_rate_percent: Option<u32>,
}

impl WeeklyModifiers {
    /// Scale a watering growth gain by the active growth rate.
    pub fn scaled_growth(&self, gain: u32) -> u32 {
        match self.growth_rate_percent {
            Some(percent) => (f64::from(gain) * f64::from(percent) / 100.0).round() as u32,
            None => gain,
        }
    }

    pub fn market_multiplier(&self) -> Option<f64> {
        self.market_bonus_percent.map(|p| f64::from(p) / 100.0)
    }
}

/// Roll for this week's event: `chance` to fire, then uniform over the catalog.
pub fn roll_event(chance: f64, rng: &mut impl Rng) -> Option<RandomEvent> {
    if !rng.gen_bool(chance.clamp(0.0, 1.0)) {
        return None;
    }
    Some(RandomEvent::ALL[rng.gen_range(0..RandomEvent::ALL.len())])
}

/// Apply an event's effect in place.
pub fn apply_event(state: &mut GameState, event: RandomEvent) {
    match event.effect() {
        EventEffect::GardenHealth(delta) => state.garden_health.adjust(delta),
        EventEffect::Budget(delta) => {
            let budget = i64::from(state.budget) + i64::from(delta);
            state.budget = budget.clamp(0, i64::from(u32::MAX)) as u32;
        }
        EventEffect::MarketBonus { percent } => {
            state.modifiers.market_bonus_percent = Some(percent);
        }
        EventEffect::GrowthRate { percent } => {
            state.modifiers.growth_rate_percent = Some(percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::gauge::Gauge;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_respects_extremes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert!(roll_event(0.0, &mut rng).is_none());
            assert!(roll_event(1.0, &mut rng).is_some());
        }
    }

    #[test]
    fn test_roll_eventually_hits_every_event() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            if let Some(e) = roll_event(1.0, &mut rng) {
                seen.insert(e);
            }
        }
        assert_eq!(seen.len(), RandomEvent::ALL.len());
    }

    #[test]
    fn test_pest_alert_clamps_at_zero() {
        let mut state = GameState::new(&GameConfig::default());
        state.garden_health = Gauge::new(5);
        apply_event(&mut state, RandomEvent::PestAlert);
        assert_eq!(state.garden_health, Gauge::ZERO);
    }

    #[test]
    fn test_insects_clamp_at_full() {
        let mut state = GameState::new(&GameConfig::default());
        state.garden_health = Gauge::new(95);
        apply_event(&mut state, RandomEvent::BeneficialInsects);
        assert_eq!(state.garden_health, Gauge::FULL);
    }

    #[test]
    fn test_rain_adds_budget() {
        let mut state = GameState::new(&GameConfig::default());
        let before = state.budget;
        apply_event(&mut state, RandomEvent::RainShower);
        assert_eq!(state.budget, before + 20);
    }

    #[test]
    fn test_modifier_events_set_weekly_modifiers() {
        let mut state = GameState::new(&GameConfig::default());
        apply_event(&mut state, RandomEvent::MarketDayBonus);
        apply_event(&mut state, RandomEvent::SoilDepletion);
        assert_eq!(state.modifiers.market_multiplier(), Some(1.25));
        assert_eq!(state.modifiers.scaled_growth(20), 16);
    }

    #[test]
    fn test_scaled_growth_without_modifier() {
        assert_eq!(WeeklyModifiers::default().scaled_growth(20), 20);
    }
}
