//! Timetabling domain models.
//!
//! Provides the value types for describing a timetabling problem
//! (the [`Catalog`]) and a candidate solution ([`Schedule`]).
//!
//! # Domain Mappings
//!
//! | u-timetable | University | School | Conference |
//! |-------------|------------|--------|------------|
//! | Course | Lecture | Class | Session |
//! | Teacher | Lecturer | Teacher | Speaker |
//! | Room | Lecture Hall | Classroom | Track Room |
//! | Timeslot | Period | Lesson Slot | Time Block |

mod catalog;
mod schedule;

pub use catalog::Catalog;
pub use schedule::{Assignment, Conflict, ConflictKind, Schedule};
