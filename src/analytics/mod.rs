//! Sustainability analytics over grid intensity, generation mix and
//! net-zero targets.
//!
//! Every component is a pure function over sorted input snapshots;
//! [`GoalTracker`] sequences them and owns the error policy.

pub mod align;
pub mod alignment_index;
pub mod anomaly;
pub mod budget;
pub mod correlation;
pub mod engine;
pub mod pathway;
pub mod velocity;

pub use engine::GoalTracker;
