//! Bounded 0–100 percentage gauge.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::GAUGE_MAX;

/// A percentage that always stays within `0..=100`.
///
/// Every constructor and mutator clamps, so a `Gauge` can never hold an
/// out-of-range value. Deserialization goes through [`Gauge::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Gauge(u32);

impl Gauge {
    pub const ZERO: Gauge = Gauge(0);
    pub const FULL: Gauge = Gauge(GAUGE_MAX);

    pub fn new(value: u32) -> Self {
        Self(value.min(GAUGE_MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Apply a signed delta and re-clamp.
    pub fn adjusted(self, delta: i32) -> Self {
        let raw = i64::from(self.0) + i64::from(delta);
        Self(raw.clamp(0, i64::from(GAUGE_MAX)) as u32)
    }

    pub fn adjust(&mut self, delta: i32) {
        *self = self.adjusted(delta);
    }

    /// Add an unsigned amount, saturating at 100.
    pub fn raise(&mut self, amount: u32) {
        *self = Self::new(self.0.saturating_add(amount));
    }
}

impl From<u32> for Gauge {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Gauge> for u32 {
    fn from(gauge: Gauge) -> Self {
        gauge.0
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
