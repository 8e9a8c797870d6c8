//! Plot-level garden operations: planting, watering, health boosts,
//! soil checks and harvest readiness.
//!
//! These work on plot slices and leave budget gating and phase checks to
//! [`crate::game`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{planting, thresholds};
use crate::crops::CropType;
use crate::error::CommandError;
use crate::gauge::Gauge;

/// One growing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    pub crop: Option<CropType>,
    pub growth: Gauge,
    pub watered: bool,
    pub health: Gauge,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            crop: None,
            growth: Gauge::ZERO,
            watered: false,
            health: Gauge::FULL,
        }
    }
}

impl Plot {
    pub fn is_empty(&self) -> bool {
        self.crop.is_none()
    }

    pub fn is_harvestable(&self) -> bool {
        self.crop.is_some() && self.growth.value() >= thresholds::HARVEST_GROWTH
    }

    /// Clear the crop after harvest. Health carries over to the next planting.
    pub fn clear(&mut self) {
        self.crop = None;
        self.growth = Gauge::ZERO;
        self.watered = false;
    }
}

/// Read-only view of a single plot for the inspect command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotInfo {
    pub index: usize,
    pub crop: Option<CropType>,
    pub growth: Gauge,
    pub health: Gauge,
    pub watered: bool,
    pub harvestable: bool,
}

/// Result of the soil check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilReport {
    /// Plots with health below the healthy-soil threshold.
    pub plots_needing_attention: usize,
}

impl SoilReport {
    pub fn is_healthy(&self) -> bool {
        self.plots_needing_attention == 0
    }
}

pub fn empty_plot_count(plots: &[Plot]) -> usize {
    plots.iter().filter(|p| p.is_empty()).count()
}

/// Sow each empty plot with probability `chance`, picking a crop uniformly.
///
/// Occupied plots are never touched. Returns `(plot index, crop)` for every
/// plot that was sown; may be empty if every roll failed.
pub fn sow_empty_plots(
    plots: &mut [Plot],
    chance: f64,
    rng: &mut impl Rng,
) -> Vec<(usize, CropType)> {
    let chance = chance.clamp(0.0, 1.0);
    let mut sown = Vec::new();
    for (index, plot) in plots.iter_mut().enumerate() {
        if !plot.is_empty() || !rng.gen_bool(chance) {
            continue;
        }
        let crop = CropType::ALL[rng.gen_range(0..CropType::ALL.len())];
        plot.crop = Some(crop);
        plot.growth = Gauge::new(planting::INITIAL_GROWTH);
        plot.health = Gauge::new(planting::INITIAL_HEALTH);
        sown.push((index, crop));
    }
    sown
}

/// Water every planted plot. Returns how many plots were watered.
pub fn water_planted(plots: &mut [Plot], growth_gain: u32, health_gain: u32) -> usize {
    let mut watered = 0;
    for plot in plots.iter_mut().filter(|p| !p.is_empty()) {
        plot.watered = true;
        plot.growth.raise(growth_gain);
        plot.health.raise(health_gain);
        watered += 1;
    }
    watered
}

/// Raise health on every plot, planted or not.
pub fn boost_health(plots: &mut [Plot], amount: u32) {
    for plot in plots.iter_mut() {
        plot.health.raise(amount);
    }
}

pub fn soil_report(plots: &[Plot]) -> SoilReport {
    SoilReport {
        plots_needing_attention: plots
            .iter()
            .filter(|p| p.health.value() < thresholds::HEALTHY_SOIL)
            .count(),
    }
}

pub fn inspect(plots: &[Plot], index: usize) -> Result<PlotInfo, CommandError> {
    let plot = plots.get(index).ok_or(CommandError::NoSuchPlot(index))?;
    Ok(PlotInfo {
        index,
        crop: plot.crop,
        growth: plot.growth,
        health: plot.health,
        watered: plot.watered,
        harvestable: plot.is_harvestable(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn planted(crop: CropType, growth: u32, health: u32) -> Plot {
        Plot {
            crop: Some(crop),
            growth: Gauge::new(growth),
            watered: false,
            health: Gauge::new(health),
        }
    }

    #[test]
    fn test_sow_only_empty_plots() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let original = planted(CropType::Peppers, 60, 40);
            let mut plots = [Plot::default(); 6];
            plots[1] = original;
            plots[4] = original;

            let sown = sow_empty_plots(&mut plots, 0.7, &mut rng);

            assert_eq!(plots[1], original);
            assert_eq!(plots[4], original);
            for (index, crop) in &sown {
                assert!(*index != 1 && *index != 4);
                assert_eq!(plots[*index].crop, Some(*crop));
                assert_eq!(plots[*index].growth.value(), 25);
                assert_eq!(plots[*index].health.value(), 100);
            }
        }
    }

    #[test]
    fn test_sow_certain_fills_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut plots = [Plot::default(); 6];
        let sown = sow_empty_plots(&mut plots, 1.0, &mut rng);
        assert_eq!(sown.len(), 6);
        assert_eq!(empty_plot_count(&plots), 0);
    }

    #[test]
    fn test_sow_never_fills_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut plots = [Plot::default(); 6];
        assert!(sow_empty_plots(&mut plots, 0.0, &mut rng).is_empty());
        assert_eq!(empty_plot_count(&plots), 6);
    }

    #[test]
    fn test_water_skips_empty_and_caps() {
        let mut plots = [Plot::default(); 3];
        plots[0] = planted(CropType::Herbs, 90, 98);
        let n = water_planted(&mut plots, 20, 5);
        assert_eq!(n, 1);
        assert!(plots[0].watered);
        assert_eq!(plots[0].growth.value(), 100);
        assert_eq!(plots[0].health.value(), 100);
        assert!(!plots[1].watered);
        assert_eq!(plots[1].growth, Gauge::ZERO);
    }

    #[test]
    fn test_boost_health_hits_empty_plots_too() {
        let mut plots = [Plot::default(); 2];
        plots[0].health = Gauge::new(50);
        plots[1] = planted(CropType::Carrots, 30, 90);
        boost_health(&mut plots, 20);
        assert_eq!(plots[0].health.value(), 70);
        assert_eq!(plots[1].health.value(), 100);
    }

    #[test]
    fn test_soil_report_counts_unhealthy() {
        let mut plots = [Plot::default(); 6];
        plots[0].health = Gauge::new(69);
        plots[3].health = Gauge::new(10);
        plots[5].health = Gauge::new(70);
        let report = soil_report(&plots);
        assert_eq!(report.plots_needing_attention, 2);
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_harvestable_threshold() {
        assert!(!planted(CropType::Lettuce, 79, 100).is_harvestable());
        assert!(planted(CropType::Lettuce, 80, 100).is_harvestable());
        let mut empty = Plot::default();
        empty.growth = Gauge::FULL;
        assert!(!empty.is_harvestable());
    }

    #[test]
    fn test_clear_keeps_health() {
        let mut plot = planted(CropType::Tomatoes, 85, 64);
        plot.watered = true;
        plot.clear();
        assert!(plot.is_empty());
        assert_eq!(plot.growth, Gauge::ZERO);
        assert!(!plot.watered);
        assert_eq!(plot.health.value(), 64);
    }

    #[test]
    fn test_inspect_out_of_range() {
        let plots = [Plot::default(); 6];
        assert_eq!(inspect(&plots, 6), Err(CommandError::NoSuchPlot(6)));
        let info = inspect(&plots, 2).unwrap();
        assert_eq!(info.index, 2);
        assert!(!info.harvestable);
    }
}
