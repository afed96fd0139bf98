//! Course timetabling by genetic algorithm.
//!
//! Assigns every course of a [`Catalog`](models::Catalog) a teacher, a room
//! and a timeslot so that no room and no teacher is used twice in the same
//! timeslot. The search is best-effort: it stops at the first conflict-free
//! schedule or when the generation budget runs out.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Catalog`, `Assignment`, `Schedule`, `Conflict`
//! - **`ga`**: Generator, fitness, operators, configuration and the runner
//! - **`validation`**: Input checks (empty sets, bad parameters)
//! - **`error`**: Crate error type
//!
//! # Example
//!
//! ```
//! use u_timetable::ga::{GaConfig, GaRunner};
//! use u_timetable::models::Catalog;
//!
//! let catalog = Catalog::new(
//!     ["C1", "C2", "C3"],
//!     ["T1", "T2", "T3"],
//!     ["R1", "R2"],
//!     ["Morning", "Afternoon"],
//! );
//! let result = GaRunner::run(&catalog, &GaConfig::default().with_seed(1))?;
//! for a in &result.best {
//!     println!("{}: {} / {} / {}", a.course(), a.teacher, a.room, a.timeslot);
//! }
//! # Ok::<(), u_timetable::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod models;
pub mod validation;

pub use error::{Error, Result};
