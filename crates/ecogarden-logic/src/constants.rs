//! Fixed game constants: thresholds, formula coefficients, garden size.
//!
//! Tunable starting values (budget, allowance, probabilities) live in
//! [`crate::config::GameConfig`]; the numbers here define the rules.

/// Number of growing slots in the garden.
pub const PLOT_COUNT: usize = 6;

/// Upper bound of every percentage gauge.
pub const GAUGE_MAX: u32 = 100;

pub mod thresholds {
    /// Minimum seed allocation required to plant.
    pub const SEEDS_TO_PLANT: u32 = 20;
    /// Minimum water allocation required to water.
    pub const WATER_TO_WATER: u32 = 30;
    /// Minimum eco allocation required for an eco-upgrade.
    pub const ECO_TO_UPGRADE: u32 = 50;
    /// Plot growth at or above which a crop is harvestable.
    pub const HARVEST_GROWTH: u32 = 80;
    /// Plots below this health are reported by the soil check.
    pub const HEALTHY_SOIL: u32 = 70;
}

pub mod planting {
    /// Growth a freshly planted crop starts at.
    pub const INITIAL_GROWTH: u32 = 25;
    /// Health a freshly planted crop starts at.
    pub const INITIAL_HEALTH: u32 = 100;
}

pub mod watering {
    pub const GROWTH_GAIN: u32 = 20;
    pub const PLOT_HEALTH_GAIN: u32 = 5;
    pub const GARDEN_HEALTH_GAIN: i32 = 10;
}

pub mod eco_upgrade {
    pub const ECO_SCORE_GAIN: i32 = 15;
    pub const GARDEN_HEALTH_GAIN: i32 = 10;
    pub const PLOT_HEALTH_GAIN: u32 = 20;
}

pub mod quality {
    pub const WATERED_BONUS: u32 = 10;
    pub const TOOLS_BONUS: u32 = 5;
    pub const ECO_BONUS: u32 = 10;
    /// Tools allocation must exceed this for the tools bonus.
    pub const TOOLS_THRESHOLD: u32 = 50;
    /// Eco score must exceed this for the eco bonus.
    pub const ECO_THRESHOLD: u32 = 70;
}

pub mod market {
    /// Marketing allocation must exceed this for the marketing multiplier.
    pub const MARKETING_THRESHOLD: u32 = 75;
    pub const MARKETING_MULTIPLIER: f64 = 1.2;
    /// Items above this quality earn the premium bonus.
    pub const PREMIUM_QUALITY: u32 = 90;
    pub const PREMIUM_BONUS_RATE: f64 = 0.2;
    pub const DEMAND_MIN: f64 = 0.8;
    pub const DEMAND_MAX: f64 = 1.2;
}

pub mod community {
    /// Eco score above which the community grows happier each week.
    pub const HAPPY_ECO: u32 = 80;
    pub const HAPPY_GAIN: i32 = 10;
    /// Eco score below which the community grows unhappier each week.
    pub const UNHAPPY_ECO: u32 = 30;
    pub const UNHAPPY_LOSS: i32 = -5;
}

pub mod achievements {
    /// Eco score for "Eco Master".
    pub const ECO_MASTER_SCORE: u32 = 90;
    /// Week number for "Veteran Farmer".
    pub const VETERAN_WEEKS: u32 = 10;
    /// Budget on hand for "Profitable".
    pub const PROFITABLE_BUDGET: u32 = 1000;
}

/// Weekly financial tips shown on the summary screen.
pub const FINANCIAL_TIPS: [&str; 5] = [
    "Invest more in eco-upgrades for better long-term profits!",
    "Higher quality crops sell for premium prices at market.",
    "Marketing investment helps increase your selling price.",
    "Regular watering significantly improves crop quality.",
    "Balanced budget allocation leads to sustainable growth.",
];
