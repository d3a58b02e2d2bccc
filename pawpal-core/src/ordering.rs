//! Priority/time orderings and the organized day view.
//!
//! All sorts are stable: exact ties keep their original relative order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::household::Owner;
use crate::task::Task;

/// Stable ascending sort by due time. Returns a fresh ordering; the input is
/// untouched.
pub fn sorted_by_time<'a>(tasks: &[&'a Task]) -> Vec<&'a Task> {
    let mut out = tasks.to_vec();
    out.sort_by_key(|t| t.due);
    out
}

/// Stable sort by `(priority rank, due time)`.
///
/// Priority dominates: a later high-priority task precedes an earlier
/// low-priority one.
pub fn sorted_by_priority<'a>(tasks: &[&'a Task]) -> Vec<&'a Task> {
    let mut out = tasks.to_vec();
    out.sort_by_key(|t| (t.priority.rank(), t.due));
    out
}

/// How tasks with no assigned pet appear in the organized day view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnassignedPolicy {
    /// Group them under the given label.
    GroupAs(String),
    /// Leave them out of the view entirely.
    Exclude,
}

impl Default for UnassignedPolicy {
    fn default() -> Self {
        UnassignedPolicy::GroupAs("General".to_string())
    }
}

/// Per-pet day view: group labels in first-seen scan order, each group in
/// priority+time order. Groups are only present when they have tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizedTasks<'a> {
    groups: Vec<(String, Vec<&'a Task>)>,
}

impl<'a> OrganizedTasks<'a> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Case-insensitive group lookup, matching pet-name lookup semantics.
    pub fn get(&self, label: &str) -> Option<&[&'a Task]> {
        let wanted = label.to_lowercase();
        self.groups
            .iter()
            .find(|(l, _)| l.to_lowercase() == wanted)
            .map(|(_, tasks)| tasks.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Task])> {
        self.groups
            .iter()
            .map(|(label, tasks)| (label.as_str(), tasks.as_slice()))
    }

    fn push(&mut self, label: &str, task: &'a Task) {
        match self.groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, tasks)) => tasks.push(task),
            None => self.groups.push((label.to_string(), vec![task])),
        }
    }
}

/// Pending tasks due on `day`, grouped by pet name and ordered for display.
///
/// Tasks referencing a pet no longer on the roster are skipped rather than
/// grouped under an invented label.
pub fn organize_todays_tasks<'a>(
    owner: &'a Owner,
    day: NaiveDate,
    policy: &UnassignedPolicy,
) -> OrganizedTasks<'a> {
    let mut view = OrganizedTasks::default();

    for task in &owner.tasks {
        if task.completed || !task.is_due_on(day) {
            continue;
        }
        match task.pet_id.as_deref() {
            Some(pet_id) => {
                let Some(pet) = owner.pet_by_id(pet_id) else { continue };
                view.push(&pet.name, task);
            }
            None => match policy {
                UnassignedPolicy::GroupAs(label) => view.push(label, task),
                UnassignedPolicy::Exclude => continue,
            },
        }
    }

    for (_, tasks) in &mut view.groups {
        tasks.sort_by_key(|t| (t.priority.rank(), t.due));
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 15, hour, minute, 0).unwrap()
    }

    fn today() -> NaiveDate {
        at(0, 0).date_naive()
    }

    #[test]
    fn time_sort_is_ascending_and_stable() {
        let a = Task::new("a", "evening", at(18, 0));
        let b = Task::new("b", "morning", at(8, 0));
        let c = Task::new("c", "also morning", at(8, 0));

        let sorted = sorted_by_time(&[&a, &b, &c]);
        let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn priority_dominates_time() {
        let low = Task::new("low", "low early", at(7, 0)).with_priority(Priority::Low);
        let high = Task::new("high", "high later", at(8, 0)).with_priority(Priority::High);
        let medium = Task::new("med", "medium latest", at(9, 0)).with_priority(Priority::Medium);

        let sorted = sorted_by_priority(&[&low, &high, &medium]);
        let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["high", "med", "low"]);
    }

    #[test]
    fn exact_ties_preserve_input_order() {
        let first = Task::new("first", "one", at(8, 0)).with_priority(Priority::High);
        let second = Task::new("second", "two", at(8, 0)).with_priority(Priority::High);

        let sorted = sorted_by_priority(&[&first, &second]);
        assert_eq!(sorted[0].id, "first");
        assert_eq!(sorted[1].id, "second");
    }

    fn roster() -> Owner {
        let mut owner = Owner::new("o1", "Malik", "malik@pawpal.app");
        owner.add_pet("Buddy", "Golden Retriever", 3).unwrap();
        owner.add_pet("Whiskers", "Siamese", 2).unwrap();
        owner
    }

    #[test]
    fn groups_by_pet_in_first_seen_order_and_sorts_within() {
        let mut owner = roster();
        let buddy = owner.find_pet("Buddy").unwrap().id.clone();
        let whiskers = owner.find_pet("Whiskers").unwrap().id.clone();

        owner.add_task(
            Task::new("t1", "Play with Whiskers", at(12, 0))
                .with_pet(whiskers.clone())
                .with_priority(Priority::Medium),
        );
        owner.add_task(
            Task::new("t2", "Walk Buddy", at(8, 0))
                .with_pet(buddy.clone())
                .with_priority(Priority::Low),
        );
        owner.add_task(
            Task::new("t3", "Feed Buddy", at(18, 0))
                .with_pet(buddy)
                .with_priority(Priority::High),
        );

        let view = organize_todays_tasks(&owner, today(), &UnassignedPolicy::default());
        let labels: Vec<&str> = view.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["Whiskers", "Buddy"]);

        let buddy_tasks = view.get("buddy").unwrap();
        assert_eq!(buddy_tasks[0].id, "t3");
        assert_eq!(buddy_tasks[1].id, "t2");
    }

    #[test]
    fn filters_out_completed_and_other_days() {
        let mut owner = roster();
        let buddy = owner.find_pet("Buddy").unwrap().id.clone();

        let mut done = Task::new("t1", "Walk Buddy", at(8, 0)).with_pet(buddy.clone());
        done.completed = true;
        owner.add_task(done);

        let tomorrow = Utc.with_ymd_and_hms(2026, 2, 16, 8, 0, 0).unwrap();
        owner.add_task(Task::new("t2", "Vet visit", tomorrow).with_pet(buddy));

        let view = organize_todays_tasks(&owner, today(), &UnassignedPolicy::default());
        assert!(view.is_empty());
    }

    #[test]
    fn unassigned_tasks_follow_the_policy() {
        let mut owner = roster();
        owner.add_task(Task::new("t1", "Order kibble", at(10, 0)));

        let grouped = organize_todays_tasks(&owner, today(), &UnassignedPolicy::default());
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.get("General").unwrap()[0].id, "t1");

        let excluded = organize_todays_tasks(&owner, today(), &UnassignedPolicy::Exclude);
        assert!(excluded.is_empty());
    }
}
