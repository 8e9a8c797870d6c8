//! Pure game logic for EcoGarden.
//!
//! A weekly garden-economy loop: split a budget across five buckets, tend
//! six plots, sell the harvest, review the week. Everything here is plain
//! data and deterministic functions of state plus an injected RNG; there is
//! no rendering, storage or engine dependency.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`achievements`] | Threshold achievements, each unlocked once |
//! | [`allocation`] | Five-bucket weekly budget split and validation |
//! | [`config`] | Tunable starting values and probabilities |
//! | [`constants`] | Fixed thresholds and formula coefficients |
//! | [`crops`] | Static crop catalog |
//! | [`error`] | Command rejection errors |
//! | [`events`] | Random weekly events and their effects |
//! | [`game`] | Pure state transitions for every command |
//! | [`garden`] | Plot operations: sow, water, boost, soil check |
//! | [`gauge`] | Clamped 0–100 percentage type |
//! | [`market`] | Quality grading, prices, sale revenue |
//! | [`phase`] | Phase enum and tutorial pages |
//! | [`session`] | Seeded, stateful wrapper over [`game`] |
//! | [`state`] | The complete game state |

pub mod achievements;
pub mod allocation;
pub mod config;
pub mod constants;
pub mod crops;
pub mod error;
pub mod events;
pub mod game;
pub mod garden;
pub mod gauge;
pub mod market;
pub mod phase;
pub mod session;
pub mod state;
