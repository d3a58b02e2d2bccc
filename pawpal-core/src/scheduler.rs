//! Scheduler facade: walk booking, task completion, and the query surface.
//!
//! Wraps one [`Owner`] and composes the conflict checker, ordering engine,
//! and recurrence engine. Domain outcomes (a rejected walk, a no-op
//! completion) are explicit values, not errors; `Err` is reserved for bad
//! references and bad input.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use log::warn;

use crate::conflict::{Conflict, ConflictPair, check_all_conflicts, find_conflict};
use crate::household::Owner;
use crate::interval::TimeInterval;
use crate::ordering::{OrganizedTasks, UnassignedPolicy, organize_todays_tasks};
use crate::recurrence::successor_of;
use crate::task::{Priority, Recurrence, Task};

/// Outcome of a walk request. A rejected walk is never created; there is no
/// override path.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkOutcome {
    Scheduled(Task),
    Rejected(Conflict),
}

impl WalkOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, WalkOutcome::Scheduled(_))
    }
}

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// First completion. Recurring tasks carry their freshly registered
    /// successor here.
    Completed { successor: Option<Task> },
    /// The task was already done; nothing changed and nothing was spawned.
    AlreadyCompleted,
}

/// Headline counts for the owner's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub pets: usize,
    pub walks_scheduled: usize,
    pub due_today: usize,
}

pub struct Scheduler {
    owner: Owner,
}

impl Scheduler {
    pub fn new(owner: Owner) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn into_owner(self) -> Owner {
        self.owner
    }

    pub fn add_pet(
        &mut self,
        name: impl Into<String>,
        breed: impl Into<String>,
        age: u32,
    ) -> Result<String> {
        Ok(self.owner.add_pet(name, breed, age)?.details())
    }

    /// Book a walk slot for a pet.
    ///
    /// The candidate interval is checked against every pending walk of the
    /// same pet before anything is inserted; on overlap the request is
    /// rejected outright and no task exists afterwards.
    pub fn schedule_walk(
        &mut self,
        pet_name: &str,
        start: DateTime<Utc>,
        minutes: i64,
        recurrence: Recurrence,
    ) -> Result<WalkOutcome> {
        if minutes < 0 {
            bail!("walk duration must be non-negative, got {minutes}");
        }
        let Some(pet) = self.owner.find_pet(pet_name) else {
            bail!("no pet named {pet_name:?} on the roster");
        };
        let (pet_id, display_name) = (pet.id.clone(), pet.name.clone());

        let candidate = TimeInterval::new(start, minutes);
        if let Some(conflict) = find_conflict(&self.owner.tasks, &pet_id, candidate) {
            warn!("walk for {display_name} rejected: {conflict}");
            return Ok(WalkOutcome::Rejected(conflict));
        }

        let id = self.owner.allocate_task_id();
        let task = Task::new(id, format!("Walk {display_name}"), start)
            .with_pet(pet_id)
            .with_duration(minutes)
            .with_recurrence(recurrence);
        self.owner.add_task(task.clone());
        Ok(WalkOutcome::Scheduled(task))
    }

    /// Register a recurring (or one-off) care task for a pet. Not a walk:
    /// no duration, no conflict surface.
    pub fn create_recurring_task(
        &mut self,
        pet_name: &str,
        description: impl Into<String>,
        start: DateTime<Utc>,
        priority: Priority,
        recurrence: Recurrence,
    ) -> Result<Task> {
        let Some(pet) = self.owner.find_pet(pet_name) else {
            bail!("no pet named {pet_name:?} on the roster");
        };
        let pet_id = pet.id.clone();

        let id = self.owner.allocate_task_id();
        let task = Task::new(id, description, start)
            .with_pet(pet_id)
            .with_priority(priority)
            .with_recurrence(recurrence);
        self.owner.add_task(task.clone());
        Ok(task)
    }

    /// General task construction: optional pet, optional walk duration.
    pub fn add_task(
        &mut self,
        description: impl Into<String>,
        due: DateTime<Utc>,
        pet_name: Option<&str>,
        priority: Priority,
        recurrence: Recurrence,
        minutes: Option<i64>,
    ) -> Result<Task> {
        if let Some(m) = minutes {
            if m < 0 {
                bail!("duration must be non-negative, got {m}");
            }
        }
        let pet_id = match pet_name {
            Some(name) => match self.owner.find_pet(name) {
                Some(pet) => Some(pet.id.clone()),
                None => bail!("no pet named {name:?} on the roster"),
            },
            None => None,
        };

        let id = self.owner.allocate_task_id();
        let mut task = Task::new(id, description, due)
            .with_priority(priority)
            .with_recurrence(recurrence);
        if let Some(pet_id) = pet_id {
            task = task.with_pet(pet_id);
        }
        if let Some(m) = minutes {
            task = task.with_duration(m);
        }
        self.owner.add_task(task.clone());
        Ok(task)
    }

    /// Mark a task done. First completion flips the flag and, for recurring
    /// tasks, registers exactly one successor. Completing again is a no-op,
    /// never an error and never a re-expansion.
    pub fn complete_task(&mut self, task_id: &str) -> Result<CompletionOutcome> {
        let Some(task) = self.owner.task_mut(task_id) else {
            bail!("no task with id {task_id:?}");
        };
        if task.completed {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }
        task.completed = true;
        let done = task.clone();

        let successor = if done.recurrence == Recurrence::None {
            None
        } else {
            let id = self.owner.allocate_task_id();
            let next = successor_of(&done, id);
            if let Some(ref next) = next {
                self.owner.add_task(next.clone());
            }
            next
        };

        Ok(CompletionOutcome::Completed { successor })
    }

    /// All tasks for a pet, case-insensitive name match, original order,
    /// every status.
    pub fn tasks_by_pet_name(&self, name: &str) -> Result<Vec<&Task>> {
        let Some(pet) = self.owner.find_pet(name) else {
            bail!("no pet named {name:?} on the roster");
        };
        Ok(self.owner.tasks_for_pet(&pet.id))
    }

    pub fn tasks_by_status(&self, completed: bool) -> Vec<&Task> {
        self.owner
            .tasks
            .iter()
            .filter(|t| t.completed == completed)
            .collect()
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks_by_status(false)
    }

    pub fn tasks_by_priority(&self, level: Priority) -> Vec<&Task> {
        self.owner
            .tasks
            .iter()
            .filter(|t| t.priority == level)
            .collect()
    }

    /// Pending tasks due on `day`, original order.
    pub fn todays_tasks(&self, day: NaiveDate) -> Vec<&Task> {
        self.owner
            .tasks
            .iter()
            .filter(|t| !t.completed && t.is_due_on(day))
            .collect()
    }

    /// The per-pet, priority+time ordered view of `day`.
    pub fn organized_todays_tasks(
        &self,
        day: NaiveDate,
        policy: &UnassignedPolicy,
    ) -> OrganizedTasks<'_> {
        organize_todays_tasks(&self.owner, day, policy)
    }

    /// Pairwise validation of the whole schedule.
    pub fn check_all_conflicts(&self) -> Vec<ConflictPair> {
        check_all_conflicts(&self.owner)
    }

    pub fn summary(&self, day: NaiveDate) -> ScheduleSummary {
        ScheduleSummary {
            pets: self.owner.pets.len(),
            walks_scheduled: self.owner.walk_count(),
            due_today: self.todays_tasks(day).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 15, hour, minute, 0).unwrap()
    }

    fn scheduler() -> Scheduler {
        let mut owner = Owner::new("owner-1", "Malik", "malik@pawpal.app");
        owner.add_pet("Buddy", "Golden Retriever", 3).unwrap();
        owner.add_pet("Whiskers", "Siamese", 2).unwrap();
        Scheduler::new(owner)
    }

    #[test]
    fn overlapping_walk_is_rejected_and_not_created() {
        let mut s = scheduler();
        let first = s
            .schedule_walk("Buddy", at(8, 0), 30, Recurrence::None)
            .unwrap();
        assert!(first.is_scheduled());

        let second = s
            .schedule_walk("Buddy", at(8, 15), 30, Recurrence::None)
            .unwrap();
        let WalkOutcome::Rejected(conflict) = second else {
            panic!("expected rejection");
        };
        assert!(conflict.to_string().contains("Walk Buddy"));
        assert_eq!(s.owner().walk_count(), 1);
    }

    #[test]
    fn walks_for_different_pets_share_a_slot() {
        let mut s = scheduler();
        assert!(
            s.schedule_walk("Buddy", at(8, 0), 30, Recurrence::None)
                .unwrap()
                .is_scheduled()
        );
        assert!(
            s.schedule_walk("Whiskers", at(8, 0), 30, Recurrence::None)
                .unwrap()
                .is_scheduled()
        );
    }

    #[test]
    fn zero_duration_walk_always_fits() {
        let mut s = scheduler();
        s.schedule_walk("Buddy", at(8, 0), 60, Recurrence::None)
            .unwrap();
        assert!(
            s.schedule_walk("Buddy", at(8, 30), 0, Recurrence::None)
                .unwrap()
                .is_scheduled()
        );
    }

    #[test]
    fn unknown_pet_fails_fast() {
        let mut s = scheduler();
        assert!(
            s.schedule_walk("Rex", at(8, 0), 30, Recurrence::None)
                .is_err()
        );
        assert!(s.tasks_by_pet_name("Rex").is_err());
        assert!(
            s.create_recurring_task("Rex", "Feed", at(8, 0), Priority::High, Recurrence::Daily)
                .is_err()
        );
    }

    #[test]
    fn completion_spawns_one_successor_then_noops() {
        let mut s = scheduler();
        let task = s
            .create_recurring_task(
                "Buddy",
                "Feed Buddy",
                at(8, 0),
                Priority::High,
                Recurrence::Daily,
            )
            .unwrap();

        let outcome = s.complete_task(&task.id).unwrap();
        let CompletionOutcome::Completed { successor } = outcome else {
            panic!("expected first completion");
        };
        let next = successor.expect("daily task spawns a successor");
        assert_eq!(next.due, Utc.with_ymd_and_hms(2026, 2, 16, 8, 0, 0).unwrap());
        assert_ne!(next.id, task.id);

        // Second completion: no-op, no duplicate successor.
        let again = s.complete_task(&task.id).unwrap();
        assert_eq!(again, CompletionOutcome::AlreadyCompleted);
        assert_eq!(s.owner().tasks.len(), 2);
    }

    #[test]
    fn completing_non_recurring_task_spawns_nothing() {
        let mut s = scheduler();
        let task = s
            .add_task(
                "Vet visit",
                at(9, 0),
                Some("Buddy"),
                Priority::High,
                Recurrence::None,
                None,
            )
            .unwrap();

        let outcome = s.complete_task(&task.id).unwrap();
        assert_eq!(outcome, CompletionOutcome::Completed { successor: None });
        assert_eq!(s.owner().tasks.len(), 1);
    }

    #[test]
    fn unknown_task_id_is_an_error() {
        let mut s = scheduler();
        assert!(s.complete_task("task-9999").is_err());
    }

    #[test]
    fn status_and_priority_filters_rescan_the_collection() {
        let mut s = scheduler();
        let feed = s
            .create_recurring_task(
                "Buddy",
                "Feed Buddy",
                at(8, 0),
                Priority::High,
                Recurrence::None,
            )
            .unwrap();
        s.add_task(
            "Brush Whiskers",
            at(10, 0),
            Some("Whiskers"),
            Priority::Low,
            Recurrence::None,
            None,
        )
        .unwrap();

        assert_eq!(s.pending_tasks().len(), 2);
        assert_eq!(s.tasks_by_priority(Priority::High).len(), 1);

        s.complete_task(&feed.id).unwrap();
        assert_eq!(s.pending_tasks().len(), 1);
        assert_eq!(s.tasks_by_status(true).len(), 1);
    }

    #[test]
    fn pet_name_filter_is_case_insensitive_and_keeps_history() {
        let mut s = scheduler();
        let walk = s
            .schedule_walk("Buddy", at(8, 0), 30, Recurrence::None)
            .unwrap();
        let WalkOutcome::Scheduled(walk) = walk else {
            panic!("expected scheduled walk")
        };
        s.complete_task(&walk.id).unwrap();

        let upper = s.tasks_by_pet_name("BUDDY").unwrap();
        let lower = s.tasks_by_pet_name("buddy").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert!(upper[0].completed);
    }

    #[test]
    fn summary_counts_pets_walks_and_todays_load() {
        let mut s = scheduler();
        s.schedule_walk("Buddy", at(8, 0), 30, Recurrence::None)
            .unwrap();
        s.add_task(
            "Order kibble",
            at(10, 0),
            None,
            Priority::Low,
            Recurrence::None,
            None,
        )
        .unwrap();

        let summary = s.summary(at(0, 0).date_naive());
        assert_eq!(summary.pets, 2);
        assert_eq!(summary.walks_scheduled, 1);
        assert_eq!(summary.due_today, 2);
    }
}
