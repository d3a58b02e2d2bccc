//! Conflict detection over scheduled walk slots.
//!
//! A candidate slot conflicts with an existing task when both belong to the
//! same pet, the existing task still occupies time (has a duration and is not
//! completed), and the half-open intervals intersect. Completed walks are
//! history, not reservations.

use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;

use crate::household::Owner;
use crate::interval::TimeInterval;
use crate::task::Task;

/// A detected overlap, naming the task already holding the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub task_id: String,
    pub description: String,
    pub start: DateTime<Utc>,
    /// Minutes.
    pub minutes: i64,
}

impl Conflict {
    fn with(task: &Task, slot: TimeInterval) -> Self {
        Self {
            task_id: task.id.clone(),
            description: task.description.clone(),
            start: slot.start,
            minutes: slot.minutes,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "overlaps {:?} ({}) at {} for {} min",
            self.description,
            self.task_id,
            self.start.format("%Y-%m-%d %H:%M"),
            self.minutes
        )
    }
}

/// First pending walk of `pet_id` whose slot overlaps `candidate`.
///
/// Scans short-circuit on the first hit; a zero-width candidate never
/// conflicts. Pure query, no side effects.
pub fn find_conflict(tasks: &[Task], pet_id: &str, candidate: TimeInterval) -> Option<Conflict> {
    if candidate.is_empty() {
        return None;
    }

    for task in tasks {
        if task.completed || task.pet_id.as_deref() != Some(pet_id) {
            continue;
        }
        let Some(slot) = task.slot() else { continue };
        if slot.overlaps(&candidate) {
            debug!(
                "slot {} +{}min collides with task {}",
                candidate.start.format("%H:%M"),
                candidate.minutes,
                task.id
            );
            return Some(Conflict::with(task, slot));
        }
    }

    None
}

/// One colliding pair found by a full-schedule sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictPair {
    pub pet_name: String,
    pub first: Conflict,
    pub second: Conflict,
}

impl fmt::Display for ConflictPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:?} ({}) {}",
            self.pet_name, self.first.description, self.first.task_id, self.second
        )
    }
}

/// Validate the whole existing schedule pairwise, per pet.
///
/// Quadratic in tasks-per-pet; fine at personal-roster scale.
pub fn check_all_conflicts(owner: &Owner) -> Vec<ConflictPair> {
    let mut found = Vec::new();

    for pet in &owner.pets {
        let slots: Vec<(&Task, TimeInterval)> = owner
            .tasks
            .iter()
            .filter(|t| !t.completed && t.pet_id.as_deref() == Some(pet.id.as_str()))
            .filter_map(|t| t.slot().map(|s| (t, s)))
            .collect();

        for i in 0..slots.len() {
            for j in (i + 1)..slots.len() {
                let (a, slot_a) = slots[i];
                let (b, slot_b) = slots[j];
                if slot_a.overlaps(&slot_b) {
                    found.push(ConflictPair {
                        pet_name: pet.name.clone(),
                        first: Conflict::with(a, slot_a),
                        second: Conflict::with(b, slot_b),
                    });
                }
            }
        }
    }

    found
}
