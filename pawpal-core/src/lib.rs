//! pawpal-core: scheduling engine for pet-care routines.
//!
//! Pure and synchronous: every operation that depends on "now" or "today"
//! takes the instant as a parameter. The owner's task collection is the
//! single source of truth; pet groupings are derived views.

pub mod conflict;
pub mod household;
pub mod interval;
pub mod ordering;
pub mod recurrence;
pub mod scheduler;
pub mod task;
pub mod time;

pub use conflict::{Conflict, ConflictPair, check_all_conflicts, find_conflict};
pub use household::{Owner, Pet};
pub use interval::TimeInterval;
pub use ordering::{
    OrganizedTasks, UnassignedPolicy, organize_todays_tasks, sorted_by_priority, sorted_by_time,
};
pub use recurrence::{next_due, successor_of};
pub use scheduler::{CompletionOutcome, ScheduleSummary, Scheduler, WalkOutcome};
pub use task::{Priority, Recurrence, Task};
pub use time::{format_clock, format_minute_stamp, parse_minute_stamp};
