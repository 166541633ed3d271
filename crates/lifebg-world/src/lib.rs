//! Cellular-automaton engine behind the page backgrounds.
//!
//! A [`Simulation`] owns one toroidal [`Grid`], a [`Topology`] that says who
//! neighbors whom, and a [`RuleSet`] that turns a neighbor census into the
//! next state. A [`Background`] wraps a simulation with the scroll pacing and
//! canvas layout of one page.

pub mod grid;
pub mod topology;
pub mod rules;
pub mod simulation;
pub mod pacer;
pub mod background;

pub use grid::Grid;
pub use topology::Topology;
pub use rules::{CompetitionRules, RuleSet, RuleTable};
pub use simulation::{Simulation, SimulationConfig};
pub use pacer::ScrollPacer;
pub use background::{Background, BackgroundConfig};
