//! Static crop catalog.

use serde::{Deserialize, Serialize};

/// The five crops a plot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropType {
    Tomatoes,
    Carrots,
    Lettuce,
    Peppers,
    Herbs,
}

impl CropType {
    /// Every crop, in catalog order. Random planting draws uniformly from this.
    pub const ALL: [CropType; 5] = [
        CropType::Tomatoes,
        CropType::Carrots,
        CropType::Lettuce,
        CropType::Peppers,
        CropType::Herbs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CropType::Tomatoes => "Tomatoes",
            CropType::Carrots => "Carrots",
            CropType::Lettuce => "Lettuce",
            CropType::Peppers => "Peppers",
            CropType::Herbs => "Herbs",
        }
    }

    /// Base market value in dollars before quality and demand.
    pub fn base_value(self) -> u32 {
        match self {
            CropType::Tomatoes => 15,
            CropType::Carrots => 10,
            CropType::Lettuce => 12,
            CropType::Peppers => 18,
            CropType::Herbs => 20,
        }
    }

    /// Nominal weeks to maturity, shown when a plot is inspected.
    pub fn growth_weeks(self) -> u32 {
        match self {
            CropType::Tomatoes => 2,
            CropType::Carrots => 1,
            CropType::Lettuce => 1,
            CropType::Peppers => 3,
            CropType::Herbs => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_distinct_crops() {
        let mut names: Vec<_> = CropType::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_herbs_are_most_valuable() {
        let best = CropType::ALL
            .iter()
            .max_by_key(|c| c.base_value())
            .copied();
        assert_eq!(best, Some(CropType::Herbs));
    }

    #[test]
    fn test_growth_weeks_positive() {
        assert!(CropType::ALL.iter().all(|c| c.growth_weeks() >= 1));
    }
}
