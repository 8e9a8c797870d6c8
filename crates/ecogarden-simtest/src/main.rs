//! EcoGarden Headless Simulation Harness
//!
//! Validates the game rules and plays seeded campaigns with a scripted
//! player. Runs entirely in-process: no rendering, no input.
//!
//! Usage:
//!   cargo run -p ecogarden-simtest
//!   cargo run -p ecogarden-simtest -- --verbose --campaigns 50 --weeks 20
//!   cargo run -p ecogarden-simtest -- --config tuning.json --json

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use ecogarden_logic::achievements::Achievement;
use ecogarden_logic::allocation::{Allocation, Bucket};
use ecogarden_logic::config::GameConfig;
use ecogarden_logic::constants::planting;
use ecogarden_logic::crops::CropType;
use ecogarden_logic::error::CommandError;
use ecogarden_logic::events::RandomEvent;
use ecogarden_logic::garden::Plot;
use ecogarden_logic::gauge::Gauge;
use ecogarden_logic::market::{self, HarvestedItem};
use ecogarden_logic::phase::{Phase, TUTORIAL_STEPS};
use ecogarden_logic::session::GameSession;
use ecogarden_logic::state::GameState;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ecogarden-simtest")]
#[command(about = "Headless rule and campaign validation for EcoGarden", long_about = None)]
struct Args {
    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Number of seeded campaigns to play
    #[arg(short, long, default_value = "25")]
    campaigns: u64,

    /// Weeks per campaign
    #[arg(short, long, default_value = "15")]
    weeks: u32,

    /// First campaign seed; campaign n uses seed + n
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// JSON file overriding GameConfig fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dump campaign reports as JSON to stdout
    #[arg(long)]
    json: bool,
}

// ── Config loading ─────────────────────────────────────────────────────

#[derive(Debug)]
enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(Vec<String>),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(problems) => write!(f, "Invalid config: {}", problems.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

fn load_config(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<GameConfig>(&text)?
        }
        None => GameConfig::default(),
    };
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(ConfigError::Invalid(problems));
    }
    Ok(config)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    if !args.json {
        println!("=== EcoGarden Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Static catalogs
    results.extend(validate_catalogs(args.json));

    // 2. Harvest & pricing formulas
    results.extend(validate_formulas(args.json));

    // 3. Command validation
    results.extend(validate_commands(&config, args.json));

    // 4. Seeded campaigns
    let reports: Vec<CampaignReport> = (0..args.campaigns)
        .map(|n| play_campaign(&config, args.seed.wrapping_add(n), args.weeks))
        .collect();
    results.extend(validate_campaigns(&reports, args.json));

    // 5. Determinism
    results.extend(validate_determinism(&config, args.seed, args.weeks, args.json));

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("failed to serialize reports: {}", e),
        }
    }

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            eprintln!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    eprintln!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn section(title: &str, quiet: bool) {
    if !quiet {
        println!("--- {} ---", title);
    }
}

// ── 1. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs(quiet: bool) -> Vec<TestResult> {
    section("Catalogs", quiet);
    let mut results = Vec::new();

    let values: Vec<u32> = CropType::ALL.iter().map(|c| c.base_value()).collect();
    results.push(TestResult {
        name: "crops_positive_values".into(),
        passed: values.iter().all(|&v| v > 0),
        detail: format!("crop values {:?}", values),
    });

    results.push(TestResult {
        name: "events_catalog_size".into(),
        passed: RandomEvent::ALL.len() == 5,
        detail: format!(
            "{} events: {}",
            RandomEvent::ALL.len(),
            RandomEvent::ALL
                .iter()
                .map(|e| e.title())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    });

    results.push(TestResult {
        name: "tutorial_pages".into(),
        passed: TUTORIAL_STEPS.len() == 5 && TUTORIAL_STEPS.iter().all(|t| !t.is_empty()),
        detail: format!("{} tutorial pages", TUTORIAL_STEPS.len()),
    });

    results
}

// ── 2. Formulas ─────────────────────────────────────────────────────────

fn validate_formulas(quiet: bool) -> Vec<TestResult> {
    section("Harvest & Pricing", quiet);
    let mut results = Vec::new();

    // Perfect item with heavy marketing
    let marketing = Allocation::uniform(0).with(Bucket::Marketing, 76);
    for crop in CropType::ALL {
        let item = HarvestedItem {
            crop,
            quality: 100,
            plot_index: 0,
        };
        let revenue = market::compute_revenue(&[item], &marketing, None);
        let expected_item = (f64::from(crop.base_value()) * 1.2).round() as u32;
        let expected_bonus = (f64::from(expected_item) * 0.2).round() as u32;
        results.push(TestResult {
            name: format!("revenue_perfect_{}", crop.name().to_lowercase()),
            passed: revenue.item_revenue == expected_item
                && revenue.total == expected_item + expected_bonus,
            detail: format!(
                "{} q100 +marketing → {} + {} bonus",
                crop.name(),
                revenue.item_revenue,
                revenue.quality_bonus
            ),
        });
    }

    // Quality cap
    let pampered = Plot {
        crop: Some(CropType::Herbs),
        growth: Gauge::FULL,
        watered: true,
        health: Gauge::FULL,
    };
    let q = market::crop_quality(&pampered, &Allocation::uniform(100), Gauge::FULL);
    results.push(TestResult {
        name: "quality_capped".into(),
        passed: q == 100,
        detail: format!("every bonus on full health → quality {}", q),
    });

    // Price list spans the demand range
    let low = market::price_list(0.8);
    let high = market::price_list(1.2);
    let ordered = low.iter().zip(high.iter()).all(|(l, h)| l.price <= h.price);
    results.push(TestResult {
        name: "prices_follow_demand".into(),
        passed: ordered,
        detail: "every crop costs at least as much at 1.2 demand as at 0.8".into(),
    });

    results
}

// ── 3. Commands ─────────────────────────────────────────────────────────

fn validate_commands(config: &GameConfig, quiet: bool) -> Vec<TestResult> {
    section("Commands", quiet);
    let mut results = Vec::new();

    let mut session = GameSession::new(GameConfig {
        seed: Some(0),
        event_chance: 0.0,
        ..config.clone()
    });

    let early_sell = session.sell();
    results.push(TestResult {
        name: "sell_rejected_on_welcome".into(),
        passed: matches!(early_sell, Err(CommandError::WrongPhase { .. })),
        detail: format!("{:?}", early_sell.err()),
    });

    let _ = session.skip_tutorial();
    let budget = session.state().budget;
    let over = Allocation::uniform(budget / 5 + 1);
    let rejected = session.apply_allocation(over);
    results.push(TestResult {
        name: "over_budget_rejected".into(),
        passed: matches!(rejected, Err(CommandError::OverBudget { .. }))
            && session.state().budget == budget
            && session.state().phase == Phase::Budget,
        detail: format!("${} allocated of ${}", over.total(), budget),
    });

    let stingy = Allocation::uniform(10);
    let _ = session.apply_allocation(stingy);
    let before = session.state().clone();
    let plant = session.plant();
    let water = session.water();
    let upgrade = session.eco_upgrade();
    results.push(TestResult {
        name: "thresholds_enforced".into(),
        passed: plant.is_err() && water.is_err() && upgrade.is_err() && session.state() == &before,
        detail: "$10 per bucket blocks plant, water and eco-upgrade".into(),
    });

    results
}

// ── 4. Campaigns ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WeekLog {
    week: u32,
    allocated: u64,
    event: Option<RandomEvent>,
    harvested: usize,
    revenue: u32,
    budget_after: u32,
}

#[derive(Debug, Serialize)]
struct CampaignReport {
    seed: u64,
    weeks: Vec<WeekLog>,
    achievement_unlocks: BTreeMap<Achievement, u32>,
    rain_showers: u32,
    /// First invariant violation seen, if any.
    violation: Option<String>,
    final_state: GameState,
}

/// Scripted player: keep a small reserve and split the rest by fixed shares.
fn choose_allocation(state: &GameState) -> Allocation {
    let spend = state.budget.saturating_sub(50).min(450);
    Allocation {
        seeds: spend * 20 / 100,
        tools: spend * 15 / 100,
        water: spend * 25 / 100,
        marketing: spend * 20 / 100,
        eco: spend * 20 / 100,
    }
}

fn check_invariants(state: &GameState, config: &GameConfig, rain_showers: u32) -> Option<String> {
    for (i, plot) in state.plots.iter().enumerate() {
        if plot.is_empty() && (plot.growth != Gauge::ZERO || plot.watered) {
            return Some(format!("empty plot {} still has growth or water", i));
        }
        if !plot.is_empty() && plot.growth.value() < planting::INITIAL_GROWTH {
            return Some(format!(
                "plot {} planted below starting growth: {}",
                i,
                plot.growth.value()
            ));
        }
    }

    // Budget = start + allowances + rain + revenue - expenses
    let expected = i64::from(config.starting_budget)
        + i64::from(config.weekly_allowance) * i64::from(state.week - 1)
        + 20 * i64::from(rain_showers)
        + state.profit();
    if i64::from(state.budget) != expected {
        return Some(format!(
            "budget {} does not match ledger {}",
            state.budget, expected
        ));
    }
    None
}

fn play_campaign(config: &GameConfig, seed: u64, weeks: u32) -> CampaignReport {
    let mut session = GameSession::new(GameConfig {
        seed: Some(seed),
        ..config.clone()
    });
    let mut report = CampaignReport {
        seed,
        weeks: Vec::new(),
        achievement_unlocks: BTreeMap::new(),
        rain_showers: 0,
        violation: None,
        final_state: session.state().clone(),
    };

    if let Err(e) = session.skip_tutorial() {
        report.violation = Some(e.to_string());
        return report;
    }

    for _ in 0..weeks {
        match play_week(&mut session, &mut report) {
            Ok(log) => report.weeks.push(log),
            Err(e) => {
                report.violation = Some(format!("week {}: {}", session.state().week, e));
                break;
            }
        }
        if let Some(v) = check_invariants(session.state(), config, report.rain_showers) {
            report.violation = Some(v);
            break;
        }
    }

    report.final_state = session.state().clone();
    report
}

fn play_week(
    session: &mut GameSession,
    report: &mut CampaignReport,
) -> Result<WeekLog, CommandError> {
    let week = session.state().week;
    let allocation = choose_allocation(session.state());
    let event = session.apply_allocation(allocation)?;
    if event.is_some() {
        let confirmed = session.confirm_event()?;
        if confirmed == RandomEvent::RainShower {
            report.rain_showers += 1;
        }
    }

    // Below-threshold buckets are expected rejections for a poor player.
    match session.plant() {
        Ok(_) | Err(CommandError::NoEmptyPlots) | Err(CommandError::InsufficientBudget { .. }) => {}
        Err(e) => return Err(e),
    }
    for _ in 0..2 {
        match session.water() {
            Ok(_) | Err(CommandError::InsufficientBudget { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    if session.state().eco_score.value() < 90 {
        match session.eco_upgrade() {
            Ok(()) | Err(CommandError::InsufficientBudget { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    let soil = session.check_soil()?;
    if !soil.is_healthy() {
        log::debug!(
            "week {}: {} plots need attention",
            week,
            soil.plots_needing_attention
        );
    }

    let harvest = session.harvest_and_price()?;
    let sale = session.sell()?;
    for a in &sale.summary.new_achievements {
        *report.achievement_unlocks.entry(*a).or_default() += 1;
    }
    session.advance_week()?;

    Ok(WeekLog {
        week,
        allocated: allocation.total(),
        event,
        harvested: harvest.items.len(),
        revenue: sale.revenue.total,
        budget_after: session.state().budget,
    })
}

fn validate_campaigns(reports: &[CampaignReport], quiet: bool) -> Vec<TestResult> {
    section("Campaigns", quiet);
    let mut results = Vec::new();

    let violations: Vec<_> = reports
        .iter()
        .filter_map(|r| r.violation.as_ref().map(|v| format!("seed {}: {}", r.seed, v)))
        .collect();
    results.push(TestResult {
        name: "campaign_invariants".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            format!("{} campaigns, gauges and ledger consistent", reports.len())
        } else {
            violations.join("; ")
        },
    });

    let repeats: Vec<_> = reports
        .iter()
        .flat_map(|r| r.achievement_unlocks.iter().map(move |(a, n)| (r.seed, a, n)))
        .filter(|(_, _, n)| **n > 1)
        .map(|(seed, a, n)| format!("seed {}: {} x{}", seed, a.title(), n))
        .collect();
    results.push(TestResult {
        name: "achievements_fire_once".into(),
        passed: repeats.is_empty(),
        detail: if repeats.is_empty() {
            "no achievement unlocked twice".into()
        } else {
            repeats.join("; ")
        },
    });

    let harvested: usize = reports
        .iter()
        .flat_map(|r| r.weeks.iter())
        .map(|w| w.harvested)
        .sum();
    results.push(TestResult {
        name: "campaigns_harvest_something".into(),
        passed: reports.is_empty() || harvested > 0,
        detail: format!("{} crops harvested across all campaigns", harvested),
    });

    if !quiet {
        for r in reports {
            println!(
                "  seed {:>4}: week {:>3}  budget ${:>5}  eco {}  health {}  happiness {}",
                r.seed,
                r.final_state.week,
                r.final_state.budget,
                r.final_state.eco_score,
                r.final_state.garden_health,
                r.final_state.community_happiness
            );
        }
    }

    results
}

// ── 5. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(
    config: &GameConfig,
    seed: u64,
    weeks: u32,
    quiet: bool,
) -> Vec<TestResult> {
    section("Determinism", quiet);
    let first = play_campaign(config, seed, weeks);
    let second = play_campaign(config, seed, weeks);
    vec![TestResult {
        name: "same_seed_same_campaign".into(),
        passed: first.final_state == second.final_state,
        detail: format!(
            "seed {} replayed for {} weeks → budget ${} both times",
            seed, weeks, first.final_state.budget
        ),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_file(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data")
            .join(name)
    }

    #[test]
    fn test_load_default_config() {
        let config = load_config(None).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_hard_mode() {
        let config = load_config(Some(&data_file("hard_mode.json"))).unwrap();
        assert_eq!(config.starting_budget, 350);
        assert_eq!(config.weekly_reset_amount, 50);
        assert!(config.starting_allocation.validate(config.starting_budget).is_ok());
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let err = load_config(Some(&data_file("no_such_file.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_allocation_strategy_stays_in_budget() {
        let mut state = GameState::default();
        for budget in [0, 49, 50, 120, 500, 5000] {
            state.budget = budget;
            assert!(choose_allocation(&state).validate(budget).is_ok());
        }
    }

    #[test]
    fn test_invariants_flag_broken_plots() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert_eq!(check_invariants(&state, &config, 0), None);

        let mut wet = state.clone();
        wet.plots[2].watered = true;
        assert!(check_invariants(&wet, &config, 0).is_some());

        let mut stunted = state.clone();
        stunted.plots[0].crop = Some(CropType::Lettuce);
        stunted.plots[0].growth = Gauge::new(planting::INITIAL_GROWTH - 1);
        assert!(check_invariants(&stunted, &config, 0).is_some());

        let mut leaked = state;
        leaked.budget += 1;
        assert!(check_invariants(&leaked, &config, 0).is_some());
    }

    #[test]
    fn test_short_campaign_is_clean() {
        let report = play_campaign(&GameConfig::default(), 11, 6);
        assert_eq!(report.violation, None);
        assert_eq!(report.weeks.len(), 6);
        assert_eq!(report.final_state.week, 7);
    }
}
