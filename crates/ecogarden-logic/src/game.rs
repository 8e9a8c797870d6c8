//! Weekly state transitions.
//!
//! Every command is a pure function from the current [`GameState`] to a new
//! one. The input is never modified; on rejection the caller still holds
//! the untouched state. Randomness comes in through an injected [`Rng`] so
//! a seeded generator replays a game exactly.
//!
//! # Weekly Loop
//!
//! | Phase | Commands | Leaves via |
//! |-------|----------|------------|
//! | `Budget` | [`preview_allocation`] | [`apply_allocation`] |
//! | `Garden` | [`plant`], [`water`], [`eco_upgrade`], [`check_soil`], [`confirm_event`] | [`harvest_and_price`] |
//! | `Market` | — | [`sell`] |
//! | `Summary` | — | [`advance_week`] |
//!
//! [`restart`] and [`inspect_plot`] are available in any phase.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::achievements::{self, Achievement};
use crate::allocation::{Allocation, AllocationPreview, Bucket};
use crate::config::GameConfig;
use crate::constants::{community, eco_upgrade as eco, thresholds, watering, FINANCIAL_TIPS};
use crate::crops::CropType;
use crate::error::CommandError;
use crate::events::{self, RandomEvent, WeeklyModifiers};
use crate::garden::{self, PlotInfo, SoilReport};
use crate::market::{self, HarvestedItem, MarketPrice, RevenueBreakdown};
use crate::phase::Phase;
use crate::state::GameState;

/// New state plus whatever the command reports back.
pub type Transition<T> = Result<(GameState, T), CommandError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantResult {
    /// `(plot index, crop)` for each plot sown this time.
    pub sown: Vec<(usize, CropType)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterResult {
    pub plots_watered: usize,
    /// Growth added to each watered plot after weekly modifiers.
    pub growth_gain: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestResult {
    pub items: Vec<HarvestedItem>,
    /// Demand factor for this market visit, in `[0.8, 1.2]`.
    pub demand: f64,
    pub prices: Vec<MarketPrice>,
}

/// End-of-week report shown on the summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week: u32,
    /// Cumulative revenue.
    pub income: u64,
    /// Cumulative expenses.
    pub expenses: u64,
    pub profit: i64,
    pub eco_score: u32,
    pub garden_health: u32,
    pub community_happiness: u32,
    pub tip: String,
    pub new_achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueResult {
    pub revenue: RevenueBreakdown,
    pub summary: WeeklySummary,
}

fn require_phase(
    state: &GameState,
    expected: Phase,
    command: &'static str,
) -> Result<(), CommandError> {
    if state.phase != expected {
        return Err(CommandError::WrongPhase {
            command,
            phase: state.phase,
        });
    }
    Ok(())
}

/// Garden commands share a phase check and are blocked by an unconfirmed event.
fn require_garden(state: &GameState, command: &'static str) -> Result<(), CommandError> {
    require_phase(state, Phase::Garden, command)?;
    if state.pending_event.is_some() {
        return Err(CommandError::EventPending);
    }
    Ok(())
}

// ── Pre-game ───────────────────────────────────────────────────────────

pub fn start_tutorial(state: &GameState) -> Result<GameState, CommandError> {
    require_phase(state, Phase::Welcome, "start the tutorial")?;
    let mut next = state.clone();
    next.phase = Phase::Tutorial { step: 0 };
    Ok(next)
}

/// Advance one tutorial page; the last page starts the first week.
pub fn next_tutorial_step(state: &GameState) -> Result<GameState, CommandError> {
    let phase = state.phase.next_tutorial().ok_or(CommandError::WrongPhase {
        command: "advance the tutorial",
        phase: state.phase,
    })?;
    let mut next = state.clone();
    next.phase = phase;
    Ok(next)
}

pub fn previous_tutorial_step(state: &GameState) -> Result<GameState, CommandError> {
    let phase = state.phase.previous_tutorial().ok_or(CommandError::WrongPhase {
        command: "go back in the tutorial",
        phase: state.phase,
    })?;
    let mut next = state.clone();
    next.phase = phase;
    Ok(next)
}

/// Jump from the welcome screen or any tutorial page straight to budgeting.
pub fn skip_tutorial(state: &GameState) -> Result<GameState, CommandError> {
    if !matches!(state.phase, Phase::Welcome | Phase::Tutorial { .. }) {
        return Err(CommandError::WrongPhase {
            command: "skip the tutorial",
            phase: state.phase,
        });
    }
    let mut next = state.clone();
    next.phase = Phase::Budget;
    Ok(next)
}

// ── Budget ─────────────────────────────────────────────────────────────

pub fn preview_allocation(state: &GameState, allocation: &Allocation) -> AllocationPreview {
    allocation.preview(state.budget)
}

/// Commit the week's allocation and move to the garden.
///
/// Deducts the total from the budget, books it as an expense, and rolls for
/// a random event which stays pending until [`confirm_event`].
pub fn apply_allocation(
    state: &GameState,
    allocation: Allocation,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Result<GameState, CommandError> {
    require_phase(state, Phase::Budget, "commit a budget")?;
    let total = allocation.validate(state.budget)?;

    let mut next = state.clone();
    next.budget -= total;
    next.total_expenses += u64::from(total);
    next.allocation = allocation;
    next.phase = Phase::Garden;
    next.pending_event = events::roll_event(config.event_chance, rng);
    if let Some(event) = next.pending_event {
        log::debug!("week {}: rolled event {:?}", next.week, event);
    }
    Ok(next)
}

// ── Garden ─────────────────────────────────────────────────────────────

/// Apply the pending random event.
pub fn confirm_event(state: &GameState) -> Transition<RandomEvent> {
    let event = state.pending_event.ok_or(CommandError::NoPendingEvent)?;
    let mut next = state.clone();
    events::apply_event(&mut next, event);
    next.pending_event = None;
    Ok((next, event))
}

pub fn plant(
    state: &GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Transition<PlantResult> {
    require_garden(state, "plant")?;
    state
        .allocation
        .require(Bucket::Seeds, thresholds::SEEDS_TO_PLANT)?;
    if garden::empty_plot_count(&state.plots) == 0 {
        return Err(CommandError::NoEmptyPlots);
    }

    let mut next = state.clone();
    let sown = garden::sow_empty_plots(&mut next.plots, config.plant_chance, rng);
    Ok((next, PlantResult { sown }))
}

pub fn water(state: &GameState) -> Transition<WaterResult> {
    require_garden(state, "water")?;
    state
        .allocation
        .require(Bucket::Water, thresholds::WATER_TO_WATER)?;

    let mut next = state.clone();
    let growth_gain = next.modifiers.scaled_growth(watering::GROWTH_GAIN);
    let plots_watered =
        garden::water_planted(&mut next.plots, growth_gain, watering::PLOT_HEALTH_GAIN);
    next.garden_health.adjust(watering::GARDEN_HEALTH_GAIN);
    Ok((
        next,
        WaterResult {
            plots_watered,
            growth_gain,
        },
    ))
}

pub fn eco_upgrade(state: &GameState) -> Result<GameState, CommandError> {
    require_garden(state, "install an eco-upgrade")?;
    state
        .allocation
        .require(Bucket::Eco, thresholds::ECO_TO_UPGRADE)?;

    let mut next = state.clone();
    next.eco_score.adjust(eco::ECO_SCORE_GAIN);
    next.garden_health.adjust(eco::GARDEN_HEALTH_GAIN);
    garden::boost_health(&mut next.plots, eco::PLOT_HEALTH_GAIN);
    Ok(next)
}

pub fn check_soil(state: &GameState) -> Result<SoilReport, CommandError> {
    require_garden(state, "check the soil")?;
    Ok(garden::soil_report(&state.plots))
}

pub fn inspect_plot(state: &GameState, index: usize) -> Result<PlotInfo, CommandError> {
    garden::inspect(&state.plots, index)
}

// ── Market ─────────────────────────────────────────────────────────────

/// Pick every ripe crop, grade it, reset its plot, and price the market.
pub fn harvest_and_price(state: &GameState, rng: &mut impl Rng) -> Transition<HarvestResult> {
    require_garden(state, "go to market")?;

    let mut next = state.clone();
    let mut items = Vec::new();
    for (plot_index, plot) in next.plots.iter_mut().enumerate() {
        if !plot.is_harvestable() {
            continue;
        }
        let Some(crop) = plot.crop else { continue };
        items.push(HarvestedItem {
            crop,
            quality: market::crop_quality(plot, &state.allocation, state.eco_score),
            plot_index,
        });
        plot.clear();
    }

    let demand = market::roll_demand(rng);
    let prices = market::price_list(demand);
    next.harvest = items.clone();
    next.phase = Phase::Market;
    Ok((
        next,
        HarvestResult {
            items,
            demand,
            prices,
        },
    ))
}

/// Sell the harvest, close the week and produce its summary.
pub fn sell(state: &GameState, rng: &mut impl Rng) -> Transition<RevenueResult> {
    require_phase(state, Phase::Market, "sell")?;

    let mut next = state.clone();
    let revenue = market::compute_revenue(
        &next.harvest,
        &next.allocation,
        next.modifiers.market_multiplier(),
    );
    next.budget = next.budget.saturating_add(revenue.total);
    next.total_revenue += u64::from(revenue.total);
    next.harvest.clear();
    next.modifiers.market_bonus_percent = None;

    let summary = close_week(&mut next, rng);
    next.phase = Phase::Summary;
    Ok((next, RevenueResult { revenue, summary }))
}

/// Community reaction, tip and achievements for the week.
fn close_week(state: &mut GameState, rng: &mut impl Rng) -> WeeklySummary {
    let eco_score = state.eco_score.value();
    if eco_score > community::HAPPY_ECO {
        state.community_happiness.adjust(community::HAPPY_GAIN);
    } else if eco_score < community::UNHAPPY_ECO {
        state.community_happiness.adjust(community::UNHAPPY_LOSS);
    }

    let mut achieved = std::mem::take(&mut state.achievements);
    let new_achievements = achievements::unlock_new(state, &mut achieved);
    state.achievements = achieved;

    let tip = FINANCIAL_TIPS[rng.gen_range(0..FINANCIAL_TIPS.len())];

    WeeklySummary {
        week: state.week,
        income: state.total_revenue,
        expenses: state.total_expenses,
        profit: state.profit(),
        eco_score,
        garden_health: state.garden_health.value(),
        community_happiness: state.community_happiness.value(),
        tip: tip.to_string(),
        new_achievements,
    }
}

// ── Next week ──────────────────────────────────────────────────────────

/// Start the next week: allowance in, allocation back to the reset amount.
pub fn advance_week(state: &GameState, config: &GameConfig) -> Result<GameState, CommandError> {
    require_phase(state, Phase::Summary, "advance the week")?;

    let mut next = state.clone();
    next.week += 1;
    next.budget = next.budget.saturating_add(config.weekly_allowance);
    next.allocation = Allocation::uniform(config.weekly_reset_amount);
    next.modifiers = WeeklyModifiers::default();
    next.phase = Phase::Budget;
    Ok(next)
}

/// Throw the game away and return to the welcome screen.
pub fn restart(config: &GameConfig) -> GameState {
    GameState::new(config)
}
