//! Conflict-based fitness evaluation.
//!
//! A conflict is a pair of assignments sharing a timeslot and also a room,
//! or sharing a timeslot and also a teacher. The two checks are independent:
//! a pair that shares both room and teacher counts twice.
//!
//! Fitness maps the conflict count `c` to `1 / (1 + c)`, so a conflict-free
//! schedule scores exactly 1.0 and every schedule scores in (0, 1].
//! Higher is better (maximization convention).

use std::collections::HashMap;

use crate::models::{Conflict, Schedule};

/// Fitness of a schedule in (0, 1].
pub fn fitness(schedule: &Schedule) -> f64 {
    score(count_conflicts(schedule))
}

/// Maps a conflict count to a fitness score.
#[inline]
pub fn score(conflicts: usize) -> f64 {
    1.0 / (1.0 + conflicts as f64)
}

/// Counts conflicts by scanning every unordered pair of assignments.
///
/// O(n²) in the number of courses.
pub fn count_conflicts(schedule: &Schedule) -> usize {
    let assignments = schedule.assignments();
    let mut conflicts = 0;
    for (i, a) in assignments.iter().enumerate() {
        for b in &assignments[i + 1..] {
            if a.shares_room_with(b) {
                conflicts += 1;
            }
            if a.shares_teacher_with(b) {
                conflicts += 1;
            }
        }
    }
    conflicts
}

/// Counts conflicts by grouping on (timeslot, room) and (timeslot, teacher).
///
/// A group of `k` assignments holds `k·(k−1)/2` pairs. The result is always
/// equal to [`count_conflicts`]; this variant is O(n) for large catalogs.
pub fn count_conflicts_grouped(schedule: &Schedule) -> usize {
    let mut by_room: HashMap<(&str, &str), usize> = HashMap::new();
    let mut by_teacher: HashMap<(&str, &str), usize> = HashMap::new();

    for a in schedule {
        *by_room.entry((a.timeslot.as_str(), a.room.as_str())).or_insert(0) += 1;
        *by_teacher.entry((a.timeslot.as_str(), a.teacher.as_str())).or_insert(0) += 1;
    }

    by_room
        .values()
        .chain(by_teacher.values())
        .map(|&k| k * (k - 1) / 2)
        .sum()
}

/// Lists every conflicting pair.
///
/// Ordered by first position, then second, with the room conflict of a
/// pair before its teacher conflict. The length always equals
/// [`count_conflicts`].
pub fn find_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let assignments = schedule.assignments();
    let mut conflicts = Vec::new();
    for (i, a) in assignments.iter().enumerate() {
        for (offset, b) in assignments[i + 1..].iter().enumerate() {
            let j = i + 1 + offset;
            if a.shares_room_with(b) {
                conflicts.push(Conflict::room(i, j, a));
            }
            if a.shares_teacher_with(b) {
                conflicts.push(Conflict::teacher(i, j, a));
            }
        }
    }
    conflicts
}

/// Whether the schedule has no conflicts at all.
pub fn is_conflict_free(schedule: &Schedule) -> bool {
    count_conflicts(schedule) == 0
}
