//! Harvest quality, market prices and sale revenue. All pure functions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;
use crate::constants::{market, quality};
use crate::crops::CropType;
use crate::garden::Plot;
use crate::gauge::Gauge;

/// One harvested crop awaiting sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestedItem {
    pub crop: CropType,
    pub quality: u32,
    pub plot_index: usize,
}

impl HarvestedItem {
    pub fn base_value(&self) -> u32 {
        self.crop.base_value()
    }
}

/// Displayed market price for one crop this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub crop: CropType,
    pub price: u32,
}

/// Crop quality: plot health plus care bonuses, capped at 100.
pub fn crop_quality(plot: &Plot, allocation: &Allocation, eco_score: Gauge) -> u32 {
    let mut q = plot.health.value();
    if plot.watered {
        q += quality::WATERED_BONUS;
    }
    if allocation.tools > quality::TOOLS_THRESHOLD {
        q += quality::TOOLS_BONUS;
    }
    if eco_score.value() > quality::ECO_THRESHOLD {
        q += quality::ECO_BONUS;
    }
    q.min(100)
}

/// Draw this week's market demand factor in `[0.8, 1.2]`.
pub fn roll_demand(rng: &mut impl Rng) -> f64 {
    rng.gen_range(market::DEMAND_MIN..=market::DEMAND_MAX)
}

/// Price every catalog crop at the given demand.
pub fn price_list(demand: f64) -> Vec<MarketPrice> {
    CropType::ALL
        .iter()
        .map(|&crop| MarketPrice {
            crop,
            price: (f64::from(crop.base_value()) * demand).round() as u32,
        })
        .collect()
}

pub fn marketing_multiplier(allocation: &Allocation) -> f64 {
    if allocation.marketing > market::MARKETING_THRESHOLD {
        market::MARKETING_MULTIPLIER
    } else {
        1.0
    }
}

/// Revenue for a single item before the premium bonus.
pub fn item_revenue(item: &HarvestedItem, marketing: f64) -> u32 {
    let base = f64::from(item.base_value()) * (f64::from(item.quality) / 100.0);
    (base * marketing).round() as u32
}

/// Totals for one sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    /// Sum of per-item revenue.
    pub item_revenue: u32,
    /// Premium bonus earned by items above the quality cutoff.
    pub quality_bonus: u32,
    /// Extra revenue from an active market-day multiplier.
    pub event_bonus: u32,
    pub total: u32,
}

/// Price a harvest for sale.
///
/// Each item earns `round(base × quality/100 × marketing)`; items above 90
/// quality add `round(revenue × 0.2)` to the bonus, which joins the total
/// once. A `market_bonus` multiplier then scales the whole total.
pub fn compute_revenue(
    items: &[HarvestedItem],
    allocation: &Allocation,
    market_bonus: Option<f64>,
) -> RevenueBreakdown {
    let marketing = marketing_multiplier(allocation);
    let mut item_total = 0u32;
    let mut quality_bonus = 0u32;
    for item in items {
        let revenue = item_revenue(item, marketing);
        item_total += revenue;
        if item.quality > market::PREMIUM_QUALITY {
            quality_bonus += (f64::from(revenue) * market::PREMIUM_BONUS_RATE).round() as u32;
        }
    }
    let subtotal = item_total + quality_bonus;
    let total = match market_bonus {
        Some(multiplier) => (f64::from(subtotal) * multiplier).round() as u32,
        None => subtotal,
    };
    RevenueBreakdown {
        item_revenue: item_total,
        quality_bonus,
        event_bonus: total.saturating_sub(subtotal),
        total,
    }
}
