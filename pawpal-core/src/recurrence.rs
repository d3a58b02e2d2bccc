//! Recurring-task expansion.
//!
//! Completing a recurring task derives exactly one successor: fresh identity,
//! due time advanced by the recurrence step, every other field carried over.

use chrono::{DateTime, Duration, Utc};
use log::info;

use crate::task::{Recurrence, Task};

/// Due time of the next occurrence, or `None` for non-recurring tasks.
pub fn next_due(due: DateTime<Utc>, recurrence: Recurrence) -> Option<DateTime<Utc>> {
    match recurrence {
        Recurrence::None => None,
        Recurrence::Daily => Some(due + Duration::days(1)),
        Recurrence::Weekly => Some(due + Duration::days(7)),
    }
}

/// Successor instance for a recurring task.
///
/// Only `id` and `due` differ from the predecessor; description, priority,
/// recurrence, pet, and duration carry over verbatim, and the successor
/// starts out pending.
pub fn successor_of(task: &Task, id: impl Into<String>) -> Option<Task> {
    let due = next_due(task.due, task.recurrence)?;
    let mut next = task.clone();
    next.id = id.into();
    next.due = due;
    next.completed = false;
    info!("task {} recurs {}; next due {}", task.id, task.recurrence, due.format("%Y-%m-%d %H:%M"));
    Some(next)
}
