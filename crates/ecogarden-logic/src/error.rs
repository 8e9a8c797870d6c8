//! Command rejection errors.
//!
//! Every variant is a validation failure: the command was refused and the
//! game state is exactly as it was before the call.

use crate::allocation::Bucket;
use crate::phase::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Allocation total exceeds the available budget.
    OverBudget { allocated: u64, budget: u32 },
    /// An action's bucket is below its minimum allocation.
    InsufficientBudget {
        bucket: Bucket,
        required: u32,
        allocated: u32,
    },
    /// Planting was attempted with every plot occupied.
    NoEmptyPlots,
    /// The command is not available in the current phase.
    WrongPhase {
        command: &'static str,
        phase: Phase,
    },
    /// A random event must be confirmed first.
    EventPending,
    NoPendingEvent,
    NoSuchPlot(usize),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::OverBudget { allocated, budget } => {
                write!(f, "Over budget: allocated ${} of ${}", allocated, budget)
            }
            CommandError::InsufficientBudget {
                bucket,
                required,
                allocated,
            } => write!(
                f,
                "Not enough {} budget: need ${}, allocated ${}",
                bucket, required, allocated
            ),
            CommandError::NoEmptyPlots => write!(f, "All plots are already planted"),
            CommandError::WrongPhase { command, phase } => {
                write!(f, "Cannot {} during the {:?} phase", command, phase)
            }
            CommandError::EventPending => write!(f, "A random event is awaiting confirmation"),
            CommandError::NoPendingEvent => write!(f, "No random event to confirm"),
            CommandError::NoSuchPlot(index) => write!(f, "No plot at index {}", index),
        }
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CommandError::InsufficientBudget {
            bucket: Bucket::Water,
            required: 30,
            allocated: 10,
        };
        assert_eq!(
            err.to_string(),
            "Not enough water budget: need $30, allocated $10"
        );
        assert_eq!(
            CommandError::WrongPhase {
                command: "sell",
                phase: Phase::Garden
            }
            .to_string(),
            "Cannot sell during the Garden phase"
        );
    }
}
