//! Course-aligned chromosome for timetabling.
//!
//! # Encoding
//!
//! A chromosome is a [`Schedule`] itself: one gene per course, in catalog
//! course order, each gene a (teacher, room, timeslot) triple. Because all
//! individuals share the course order, position `i` of any two schedules
//! refers to the same course and genes can be exchanged position by position.
//!
//! An empty catalog set yields empty IDs in the drawn genes, mirroring how
//! an activity without candidates gets an empty resource. Validation rejects
//! such catalogs before a run starts.

use rand::Rng;
use rand::prelude::IndexedRandom;

use super::operators::{DEFAULT_CROSSOVER_BIAS, probability_or};
use crate::models::{Assignment, Catalog, Schedule};

/// Creates a random schedule.
///
/// Every course independently draws a teacher, a room and a timeslot
/// uniformly from the catalog. Conflicts are not avoided.
pub fn random_schedule<R: Rng>(catalog: &Catalog, rng: &mut R) -> Schedule {
    let genes = catalog
        .courses
        .iter()
        .map(|course| {
            let (teacher, room, timeslot) = random_triple(catalog, rng);
            Assignment::new(course.clone(), teacher, room, timeslot)
        })
        .collect();
    Schedule::from_assignments(genes)
}

fn random_triple<R: Rng>(catalog: &Catalog, rng: &mut R) -> (String, String, String) {
    let teacher = pick(&catalog.teachers, rng);
    let room = pick(&catalog.rooms, rng);
    let timeslot = pick(&catalog.timeslots, rng);
    (teacher, room, timeslot)
}

fn pick<R: Rng>(ids: &[String], rng: &mut R) -> String {
    ids.choose(rng).cloned().unwrap_or_default()
}

// ======================== Crossover operators ========================

/// Uniform crossover.
///
/// For each course position a fresh draw decides the donor: parent A with
/// probability `bias`, parent B otherwise. The chosen gene is cloned, so the
/// child never shares an assignment with either parent.
///
/// A NaN bias falls back to 0.5; other values are clamped to [0, 1].
///
/// Parents are expected to have the same length. If they differ, the child
/// is as long as the shorter one.
pub fn uniform_crossover<R: Rng>(
    parent_a: &Schedule,
    parent_b: &Schedule,
    bias: f64,
    rng: &mut R,
) -> Schedule {
    let bias = probability_or(bias, DEFAULT_CROSSOVER_BIAS);
    let genes = parent_a
        .iter()
        .zip(parent_b.iter())
        .map(|(a, b)| if rng.random_bool(bias) { a.clone() } else { b.clone() })
        .collect();
    Schedule::from_assignments(genes)
}

// ======================== Mutation operators ========================

/// Reassignment mutation: redraws the whole triple of one random course.
///
/// The new teacher, room and timeslot are uniform draws from the catalog and
/// may coincide with the old ones. The course is never changed. Returns the
/// mutated position, or `None` for an empty schedule.
pub fn reassign_mutation<R: Rng>(
    schedule: &mut Schedule,
    catalog: &Catalog,
    rng: &mut R,
) -> Option<usize> {
    if schedule.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..schedule.len());
    let (teacher, room, timeslot) = random_triple(catalog, rng);
    let gene = schedule.get_mut(idx)?;
    gene.reassign(teacher, room, timeslot);
    Some(idx)
}
