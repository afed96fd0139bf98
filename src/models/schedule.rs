//! Schedule (solution) model.
//!
//! A schedule is one candidate timetable: a (teacher, room, timeslot)
//! triple for every course of the catalog, listed in catalog course order.
//! Schedules are plain values. Reproduction always builds new ones, so no
//! two individuals of a population ever share an assignment.

use serde::{Deserialize, Serialize};

/// A course-teacher-room-timeslot assignment.
///
/// The course is fixed when the assignment is created; only the triple
/// can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    course: String,
    /// Assigned teacher ID.
    pub teacher: String,
    /// Assigned room ID.
    pub room: String,
    /// Assigned timeslot ID.
    pub timeslot: String,
}

/// A complete candidate timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    assignments: Vec<Assignment>,
}

/// A pair of assignments that cannot both hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Which resource is double-booked.
    pub kind: ConflictKind,
    /// Position of the earlier assignment.
    pub first: usize,
    /// Position of the later assignment.
    pub second: usize,
    /// Shared timeslot.
    pub timeslot: String,
    /// Shared room or teacher ID, depending on `kind`.
    pub resource: String,
}

/// Classification of conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Two courses in the same room at the same time.
    Room,
    /// Two courses taught by the same teacher at the same time.
    Teacher,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        course: impl Into<String>,
        teacher: impl Into<String>,
        room: impl Into<String>,
        timeslot: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            teacher: teacher.into(),
            room: room.into(),
            timeslot: timeslot.into(),
        }
    }

    /// Course this assignment places.
    #[inline]
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Replaces the teacher, room and timeslot. The course is untouched.
    pub fn reassign(&mut self, teacher: String, room: String, timeslot: String) {
        self.teacher = teacher;
        self.room = room;
        self.timeslot = timeslot;
    }

    /// Whether both assignments occupy the same room at the same time.
    #[inline]
    pub fn shares_room_with(&self, other: &Assignment) -> bool {
        self.timeslot == other.timeslot && self.room == other.room
    }

    /// Whether both assignments occupy the same teacher at the same time.
    #[inline]
    pub fn shares_teacher_with(&self, other: &Assignment) -> bool {
        self.timeslot == other.timeslot && self.teacher == other.teacher
    }

    /// The (teacher, room, timeslot) triple.
    pub fn triple(&self) -> (&str, &str, &str) {
        (&self.teacher, &self.room, &self.timeslot)
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from assignments already in course order.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Appends an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// All assignments in course order.
    #[inline]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Assignment at a course position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Assignment> {
        self.assignments.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Assignment> {
        self.assignments.get_mut(index)
    }

    /// Looks up the assignment for a course ID.
    pub fn assignment_for(&self, course: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.course == course)
    }

    /// Number of assignments.
    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule has no assignments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates over assignments in course order.
    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    /// Course IDs in schedule order.
    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.course())
    }

    /// Assignments held in a timeslot.
    pub fn assignments_at<'a>(
        &'a self,
        timeslot: &'a str,
    ) -> impl Iterator<Item = &'a Assignment> {
        self.assignments.iter().filter(move |a| a.timeslot == timeslot)
    }

    /// Assignments given by a teacher.
    pub fn assignments_for_teacher<'a>(
        &'a self,
        teacher: &'a str,
    ) -> impl Iterator<Item = &'a Assignment> {
        self.assignments.iter().filter(move |a| a.teacher == teacher)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

impl Conflict {
    /// Creates a room conflict between two positions.
    pub fn room(first: usize, second: usize, assignment: &Assignment) -> Self {
        Self {
            kind: ConflictKind::Room,
            first,
            second,
            timeslot: assignment.timeslot.clone(),
            resource: assignment.room.clone(),
        }
    }

    /// Creates a teacher conflict between two positions.
    pub fn teacher(first: usize, second: usize, assignment: &Assignment) -> Self {
        Self {
            kind: ConflictKind::Teacher,
            first,
            second,
            timeslot: assignment.timeslot.clone(),
            resource: assignment.teacher.clone(),
        }
    }
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            ConflictKind::Room => "room",
            ConflictKind::Teacher => "teacher",
        };
        write!(
            f,
            "positions {} and {} share {} '{}' at '{}'",
            self.first, self.second, what, self.resource, self.timeslot
        )
    }
}
