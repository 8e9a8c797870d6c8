//! Game phases and the pre-game tutorial.
//!
//! # Phase Flow
//!
//! ```text
//! Welcome ─► Tutorial{0..4} ─► Budget ─► Garden ─► Market ─► Summary ─┐
//!    │                          ▲                                       │
//!    └──── skip_tutorial ───────┘◄────────── advance_week ──────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Tutorial pages shown before the first week.
pub const TUTORIAL_STEPS: [&str; 5] = [
    "Welcome to EcoNomics! You're now the manager of a sustainable garden.",
    "Each week, you'll plan your budget across 5 key areas: seeds, tools, water, marketing, and eco-upgrades.",
    "After budgeting, you'll manage your garden by planting, watering, and monitoring your crops.",
    "Then you'll sell your harvest at the farmer's market for revenue.",
    "Finally, you'll review your weekly performance and plan for the next week. Let's start!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Welcome,
    Tutorial { step: usize },
    /// Split the week's budget across buckets.
    Budget,
    /// Plant, water, upgrade; random events resolve here.
    Garden,
    /// Harvest has been evaluated and priced; waiting to sell.
    Market,
    /// Week is closed; waiting to advance.
    Summary,
}

impl Phase {
    /// Whether the weekly loop has started.
    pub fn in_game(self) -> bool {
        matches!(
            self,
            Phase::Budget | Phase::Garden | Phase::Market | Phase::Summary
        )
    }

    /// Text of the current tutorial page, if any.
    pub fn tutorial_text(self) -> Option<&'static str> {
        match self {
            Phase::Tutorial { step } => TUTORIAL_STEPS.get(step).copied(),
            _ => None,
        }
    }

    /// "n / total" progress label for the tutorial.
    pub fn tutorial_progress(self) -> Option<(usize, usize)> {
        match self {
            Phase::Tutorial { step } => Some((step + 1, TUTORIAL_STEPS.len())),
            _ => None,
        }
    }

    /// Phase after the tutorial "next" button. The last page starts the game.
    pub fn next_tutorial(self) -> Option<Phase> {
        match self {
            Phase::Tutorial { step } if step + 1 < TUTORIAL_STEPS.len() => {
                Some(Phase::Tutorial { step: step + 1 })
            }
            Phase::Tutorial { .. } => Some(Phase::Budget),
            _ => None,
        }
    }

    /// Phase after the tutorial "previous" button; stays on the first page.
    pub fn previous_tutorial(self) -> Option<Phase> {
        match self {
            Phase::Tutorial { step } => Some(Phase::Tutorial {
                step: step.saturating_sub(1),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_walkthrough_reaches_budget() {
        let mut phase = Phase::Tutorial { step: 0 };
        let mut pages = 1;
        while let Some(next) = phase.next_tutorial() {
            phase = next;
            if phase == Phase::Budget {
                break;
            }
            pages += 1;
        }
        assert_eq!(phase, Phase::Budget);
        assert_eq!(pages, TUTORIAL_STEPS.len());
    }

    #[test]
    fn test_previous_stays_on_first_page() {
        let phase = Phase::Tutorial { step: 0 };
        assert_eq!(phase.previous_tutorial(), Some(Phase::Tutorial { step: 0 }));
    }

    #[test]
    fn test_tutorial_text_and_progress() {
        let phase = Phase::Tutorial { step: 4 };
        assert_eq!(phase.tutorial_progress(), Some((5, 5)));
        assert!(phase.tutorial_text().is_some_and(|t| t.contains("Let's start")));
        assert_eq!(Phase::Budget.tutorial_text(), None);
    }

    #[test]
    fn test_in_game() {
        assert!(!Phase::Welcome.in_game());
        assert!(!Phase::Tutorial { step: 2 }.in_game());
        assert!(Phase::Market.in_game());
    }
}
