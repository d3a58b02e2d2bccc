//! Terminal rendering for schedule views.

use chrono_tz::Tz;
use pawpal_core::{
    ConflictPair, OrganizedTasks, Recurrence, ScheduleSummary, Task, format_clock,
    format_minute_stamp,
};

pub fn status_glyph(task: &Task) -> &'static str {
    if task.completed { "✓" } else { "○" }
}

/// Compact line for day views: clock time only.
pub fn day_line(task: &Task, tz: Tz) -> String {
    let mut line = format!(
        "{} {} - {} [{}]",
        status_glyph(task),
        format_clock(task.due, tz),
        task.description,
        task.priority
    );
    if task.recurrence != Recurrence::None {
        line.push_str(&format!(" ({})", task.recurrence));
    }
    if let Some(minutes) = task.duration_minutes {
        line.push_str(&format!(" {minutes}min"));
    }
    line
}

/// Full row for listings: id and complete minute-stamp.
pub fn list_line(task: &Task, tz: Tz) -> String {
    format!(
        "{} {} {} - {} [{}]",
        task.id,
        status_glyph(task),
        format_minute_stamp(task.due, tz),
        task.description,
        task.priority
    )
}

pub fn print_day_view(view: &OrganizedTasks<'_>, tz: Tz) {
    if view.is_empty() {
        println!("Nothing on the schedule today.");
        return;
    }
    for (label, tasks) in view.iter() {
        println!("{label}");
        for task in tasks {
            println!("  {}", day_line(task, tz));
        }
    }
}

pub fn print_conflicts(pairs: &[ConflictPair]) {
    if pairs.is_empty() {
        println!("No conflicts in the schedule.");
        return;
    }
    println!("{} conflicting pair(s):", pairs.len());
    for pair in pairs {
        println!("  {pair}");
    }
}

pub fn print_summary(name: &str, email: &str, summary: &ScheduleSummary) {
    println!("{name} <{email}>");
    println!("  pets:            {}", summary.pets);
    println!("  walks scheduled: {}", summary.walks_scheduled);
    println!("  due today:       {}", summary.due_today);
}
