//! Catalog model.
//!
//! The catalog is the fixed universe a timetable is built from: the courses
//! to place and the teachers, rooms and timeslots available to them. It is
//! created once by the host and shared read-only by every GA component.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Immutable sets of identifiers available for assignment.
///
/// Course order is significant: every schedule of a run lists its
/// assignments in this order, which lets crossover align parents by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Courses to schedule, in fixed order.
    pub courses: Vec<String>,
    /// Teachers a course may be given by.
    pub teachers: Vec<String>,
    /// Rooms a course may be held in.
    pub rooms: Vec<String>,
    /// Timeslots a course may be held at.
    pub timeslots: Vec<String>,
}

impl Catalog {
    /// Creates a catalog from four identifier lists.
    pub fn new<C, T, R, S>(courses: C, teachers: T, rooms: R, timeslots: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            courses: courses.into_iter().map(Into::into).collect(),
            teachers: teachers.into_iter().map(Into::into).collect(),
            rooms: rooms.into_iter().map(Into::into).collect(),
            timeslots: timeslots.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a course at the end of the course order.
    pub fn with_course(mut self, id: impl Into<String>) -> Self {
        self.courses.push(id.into());
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, id: impl Into<String>) -> Self {
        self.teachers.push(id.into());
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, id: impl Into<String>) -> Self {
        self.rooms.push(id.into());
        self
    }

    /// Adds a timeslot.
    pub fn with_timeslot(mut self, id: impl Into<String>) -> Self {
        self.timeslots.push(id.into());
        self
    }

    /// Number of courses (schedule length).
    #[inline]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of distinct (teacher, room, timeslot) triples.
    pub fn combination_count(&self) -> usize {
        self.teachers.len() * self.rooms.len() * self.timeslots.len()
    }

    /// Upper bound on how many courses can be placed without any conflict.
    ///
    /// Each timeslot can host at most one course per room and one per
    /// teacher, so the bound is `timeslots × min(rooms, teachers)`.
    pub fn conflict_free_capacity(&self) -> usize {
        self.timeslots.len() * self.rooms.len().min(self.teachers.len())
    }

    /// Whether any set lists the same identifier twice.
    ///
    /// Repeats are legal but weight the uniform draws toward the repeated ID.
    pub fn has_duplicate_ids(&self) -> bool {
        [&self.courses, &self.teachers, &self.rooms, &self.timeslots]
            .iter()
            .any(|ids| {
                let mut seen = HashSet::new();
                !ids.iter().all(|id| seen.insert(id.as_str()))
            })
    }

    /// Whether a conflict-free schedule can exist at all.
    pub fn admits_perfect_schedule(&self) -> bool {
        self.course_count() <= self.conflict_free_capacity()
    }
}
