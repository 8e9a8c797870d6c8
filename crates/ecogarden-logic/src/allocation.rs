//! Weekly budget allocation across the five spending buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommandError;

/// One of the five spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Seeds,
    Tools,
    Water,
    Marketing,
    Eco,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Seeds,
        Bucket::Tools,
        Bucket::Water,
        Bucket::Marketing,
        Bucket::Eco,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Seeds => "seeds",
            Bucket::Tools => "tools",
            Bucket::Water => "water",
            Bucket::Marketing => "marketing",
            Bucket::Eco => "eco",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dollars assigned to each bucket for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allocation {
    pub seeds: u32,
    pub tools: u32,
    pub water: u32,
    pub marketing: u32,
    pub eco: u32,
}

/// Live totals for the budget screen while the player adjusts sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPreview {
    pub total: u64,
    /// Budget minus total; negative when over budget.
    pub remaining: i64,
    pub over_budget: bool,
}

impl Allocation {
    /// Same amount in every bucket.
    pub fn uniform(amount: u32) -> Self {
        Self {
            seeds: amount,
            tools: amount,
            water: amount,
            marketing: amount,
            eco: amount,
        }
    }

    pub fn get(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::Seeds => self.seeds,
            Bucket::Tools => self.tools,
            Bucket::Water => self.water,
            Bucket::Marketing => self.marketing,
            Bucket::Eco => self.eco,
        }
    }

    pub fn set(&mut self, bucket: Bucket, amount: u32) {
        match bucket {
            Bucket::Seeds => self.seeds = amount,
            Bucket::Tools => self.tools = amount,
            Bucket::Water => self.water = amount,
            Bucket::Marketing => self.marketing = amount,
            Bucket::Eco => self.eco = amount,
        }
    }

    /// Builder-style variant of [`Allocation::set`].
    pub fn with(mut self, bucket: Bucket, amount: u32) -> Self {
        self.set(bucket, amount);
        self
    }

    /// Sum of all buckets. Widened so five `u32::MAX` buckets cannot overflow.
    pub fn total(&self) -> u64 {
        Bucket::ALL.iter().map(|&b| u64::from(self.get(b))).sum()
    }

    pub fn preview(&self, budget: u32) -> AllocationPreview {
        let total = self.total();
        let remaining = i64::from(budget) - total as i64;
        AllocationPreview {
            total,
            remaining,
            over_budget: remaining < 0,
        }
    }

    /// Check the allocation fits within `budget`, returning the total to deduct.
    pub fn validate(&self, budget: u32) -> Result<u32, CommandError> {
        let total = self.total();
        if total > u64::from(budget) {
            return Err(CommandError::OverBudget {
                allocated: total,
                budget,
            });
        }
        // total <= budget, so it fits in u32
        Ok(total as u32)
    }

    /// Reject an action whose bucket is below the required minimum.
    pub fn require(&self, bucket: Bucket, required: u32) -> Result<(), CommandError> {
        let allocated = self.get(bucket);
        if allocated < required {
            return Err(CommandError::InsufficientBudget {
                bucket,
                required,
                allocated,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starter() -> Allocation {
        Allocation {
            seeds: 100,
            tools: 75,
            water: 100,
            marketing: 50,
            eco: 75,
        }
    }

    #[test]
    fn test_total() {
        assert_eq!(starter().total(), 400);
        assert_eq!(Allocation::uniform(50).total(), 250);
    }

    #[test]
    fn test_validate_exact_budget_ok() {
        assert_eq!(starter().validate(400), Ok(400));
    }

    #[test]
    fn test_validate_over_budget() {
        let err = starter().validate(399).unwrap_err();
        assert_eq!(
            err,
            CommandError::OverBudget {
                allocated: 400,
                budget: 399
            }
        );
    }

    #[test]
    fn test_validate_no_overflow() {
        let huge = Allocation::uniform(u32::MAX);
        assert!(huge.validate(u32::MAX).is_err());
    }

    #[test]
    fn test_preview_remaining() {
        let p = starter().preview(500);
        assert_eq!(p.total, 400);
        assert_eq!(p.remaining, 100);
        assert!(!p.over_budget);

        let p = starter().with(Bucket::Tools, 300).preview(500);
        assert_eq!(p.remaining, -125);
        assert!(p.over_budget);
    }

    #[test]
    fn test_require_threshold() {
        let alloc = starter().with(Bucket::Seeds, 19);
        assert!(alloc.require(Bucket::Seeds, 20).is_err());
        assert!(alloc.with(Bucket::Seeds, 20).require(Bucket::Seeds, 20).is_ok());
    }

    #[test]
    fn test_get_set_each_bucket() {
        let mut alloc = Allocation::default();
        for (i, bucket) in Bucket::ALL.iter().enumerate() {
            alloc.set(*bucket, i as u32 + 1);
        }
        assert_eq!(alloc.seeds, 1);
        assert_eq!(alloc.eco, 5);
        assert_eq!(alloc.total(), 15);
    }
}
