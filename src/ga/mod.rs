//! GA-based timetable optimization.
//!
//! Searches for a conflict-free assignment of every course to a
//! (teacher, room, timeslot) triple.
//!
//! # Encoding
//!
//! A chromosome is a [`Schedule`](crate::models::Schedule): one gene per
//! course, in catalog course order. Genes are exchanged position by position.
//!
//! # Submodules
//!
//! - [`fitness`](mod@fitness): conflict counting and the `1 / (1 + conflicts)` score
//! - [`operators`]: probability-configured crossover and mutation
//!
//! # Reference
//! Holland (1975), "Adaptation in Natural and Artificial Systems"
//! Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
mod config;
pub mod fitness;
pub mod operators;
mod runner;

pub use chromosome::{random_schedule, reassign_mutation, uniform_crossover};
pub use config::GaConfig;
pub use fitness::fitness;
pub use operators::GeneticOperators;
pub use runner::{GaResult, GaRunner, GenerationReport, StopReason};
