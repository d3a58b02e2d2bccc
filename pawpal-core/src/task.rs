//! Task model for the pet-care scheduling engine.

use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::interval::TimeInterval;

/// Display priority. `High` sorts before `Medium` sorts before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
}

impl Priority {
    /// Sort rank: high = 0, medium = 1, low = 2.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => bail!("unknown priority {other:?} (expected high, medium or low)"),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Whether completing a task spawns a successor instance.
///
/// Unrecognized values are rejected when the task is created, not when it is
/// completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
}

impl FromStr for Recurrence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            other => bail!("unknown recurrence {other:?} (expected none, daily or weekly)"),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::None => write!(f, "none"),
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
        }
    }
}

/// A schedulable unit of care.
///
/// Tasks carrying a duration are walk-type tasks: they occupy a time slot and
/// participate in conflict checking. Tasks are append-only history; the only
/// mutation after creation is the single flip of `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,

    /// Pet this task is for; `None` means a general household task.
    pub pet_id: Option<String>,

    pub description: String,
    pub priority: Priority,

    /// Due time (UTC, minute granularity). For walk-type tasks this is the
    /// activity start.
    pub due: DateTime<Utc>,

    /// Minutes; present only for time-bounded activities. Absence means the
    /// task has no conflict surface.
    pub duration_minutes: Option<i64>,

    pub completed: bool,
    pub recurrence: Recurrence,
}

impl Task {
    pub fn new(id: impl Into<String>, description: impl Into<String>, due: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            pet_id: None,
            description: description.into(),
            priority: Priority::Medium,
            due,
            duration_minutes: None,
            completed: false,
            recurrence: Recurrence::None,
        }
    }

    pub fn with_pet(mut self, pet_id: impl Into<String>) -> Self {
        self.pet_id = Some(pet_id.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// The slot this task occupies, when it is a walk-type task.
    pub fn slot(&self) -> Option<TimeInterval> {
        self.duration_minutes
            .map(|m| TimeInterval::new(self.due, m))
    }

    pub fn is_walk(&self) -> bool {
        self.duration_minutes.is_some()
    }

    /// Whether this task is due on the given UTC calendar day.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due.date_naive() == day
    }
}
