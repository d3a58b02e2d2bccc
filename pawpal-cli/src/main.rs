use anyhow::{Context, Result, bail};
use chrono::Utc;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use pawpal_core::{
    CompletionOutcome, Owner, Priority, Recurrence, Scheduler, WalkOutcome, format_minute_stamp,
    parse_minute_stamp, sorted_by_priority, sorted_by_time,
};

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(name = "pawpal", version, about = "PawPal pet-care scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create (or replace) the owner profile
    Setup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// IANA timezone for schedule input/output (saved to config.toml)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Register a new pet
    AddPet {
        #[arg(long)]
        name: String,

        #[arg(long)]
        breed: String,

        /// Years
        #[arg(long)]
        age: u32,
    },

    /// Add a care task
    AddTask {
        #[arg(long)]
        description: String,

        /// Due time, "YYYY-MM-DD HH:MM" in the configured timezone
        #[arg(long)]
        due: String,

        /// Pet name; omit for a general household task
        #[arg(long)]
        pet: Option<String>,

        #[arg(long, default_value = "medium")]
        priority: String,

        #[arg(long, default_value = "none")]
        recurrence: String,

        /// Make this a walk-type task occupying a slot of this many minutes
        #[arg(long)]
        minutes: Option<i64>,
    },

    /// Book a walk slot (rejected outright on any overlap)
    Walk {
        #[arg(long)]
        pet: String,

        /// Start time, "YYYY-MM-DD HH:MM" in the configured timezone
        #[arg(long)]
        at: String,

        #[arg(long)]
        minutes: i64,

        #[arg(long, default_value = "none")]
        recurrence: String,
    },

    /// Mark a task done (recurring tasks spawn their next occurrence)
    Complete {
        /// Task id, e.g. task-0003
        #[arg(long)]
        task: String,
    },

    /// Today's schedule, grouped per pet
    Today,

    /// List tasks with optional filters
    List {
        #[arg(long)]
        pet: Option<String>,

        #[arg(long)]
        completed: bool,

        #[arg(long)]
        pending: bool,

        #[arg(long)]
        priority: Option<String>,
    },

    /// Validate the whole schedule pairwise
    Conflicts,

    /// Owner profile and headline counts
    Summary,

    /// Registered pets
    Pets,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Setup {
            name,
            email,
            timezone,
        } => setup(name, email, timezone),

        Command::AddPet { name, breed, age } => {
            let mut scheduler = Scheduler::new(state::require_owner()?);
            let details = scheduler.add_pet(name, breed, age)?;
            state::save_owner(scheduler.owner())?;
            println!("Added {details}");
            Ok(())
        }

        Command::AddTask {
            description,
            due,
            pet,
            priority,
            recurrence,
            minutes,
        } => add_task(description, due, pet, priority, recurrence, minutes),

        Command::Walk {
            pet,
            at,
            minutes,
            recurrence,
        } => walk(pet, at, minutes, recurrence),

        Command::Complete { task } => complete(task),

        Command::Today => today(),

        Command::List {
            pet,
            completed,
            pending,
            priority,
        } => list(pet, completed, pending, priority),

        Command::Conflicts => {
            let scheduler = Scheduler::new(state::require_owner()?);
            render::print_conflicts(&scheduler.check_all_conflicts());
            Ok(())
        }

        Command::Summary => {
            let scheduler = Scheduler::new(state::require_owner()?);
            let summary = scheduler.summary(Utc::now().date_naive());
            let owner = scheduler.owner();
            render::print_summary(&owner.name, &owner.email, &summary);
            Ok(())
        }

        Command::Pets => {
            let owner = state::require_owner()?;
            if owner.pets.is_empty() {
                println!("No pets yet; add one with `pawpal add-pet`.");
            }
            for pet in &owner.pets {
                println!("{} ({})", pet.details(), pet.id);
            }
            Ok(())
        }
    }
}

fn setup(name: String, email: String, timezone: Option<String>) -> Result<()> {
    if let Some(tz) = timezone {
        let _: Tz = tz
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
        let mut cfg = config::load_config()?;
        cfg.schedule.timezone = tz;
        config::save_config(&cfg)?;
    }

    let owner = Owner::new("owner-0001", name, email);
    state::save_owner(&owner)?;
    println!(
        "Roster created for {} at {}",
        owner.name,
        state::roster_path()?.display()
    );
    Ok(())
}

fn add_task(
    description: String,
    due: String,
    pet: Option<String>,
    priority: String,
    recurrence: String,
    minutes: Option<i64>,
) -> Result<()> {
    let cfg = config::load_config()?;
    let due = parse_minute_stamp(&due, &cfg.schedule.timezone)?;
    let priority: Priority = priority.parse()?;
    let recurrence: Recurrence = recurrence.parse()?;

    let mut scheduler = Scheduler::new(state::require_owner()?);
    let task = scheduler.add_task(
        description,
        due,
        pet.as_deref(),
        priority,
        recurrence,
        minutes,
    )?;
    state::save_owner(scheduler.owner())?;
    println!("Added {} ({})", task.description, task.id);
    Ok(())
}

fn walk(pet: String, at: String, minutes: i64, recurrence: String) -> Result<()> {
    let cfg = config::load_config()?;
    let tz: Tz = cfg
        .schedule
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in config: {}", cfg.schedule.timezone))?;
    let start = parse_minute_stamp(&at, &cfg.schedule.timezone)?;
    let recurrence: Recurrence = recurrence.parse()?;

    let mut scheduler = Scheduler::new(state::require_owner()?);
    match scheduler.schedule_walk(&pet, start, minutes, recurrence)? {
        WalkOutcome::Scheduled(task) => {
            state::save_owner(scheduler.owner())?;
            println!(
                "Scheduled {} ({}) at {} for {minutes}min",
                task.description,
                task.id,
                format_minute_stamp(task.due, tz)
            );
        }
        WalkOutcome::Rejected(conflict) => {
            // Domain outcome, not a process error: nothing was created.
            println!("Walk rejected: {conflict}");
        }
    }
    Ok(())
}

fn complete(task_id: String) -> Result<()> {
    let cfg = config::load_config()?;
    let tz: Tz = cfg
        .schedule
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in config: {}", cfg.schedule.timezone))?;

    let mut scheduler = Scheduler::new(state::require_owner()?);
    match scheduler.complete_task(&task_id)? {
        CompletionOutcome::Completed { successor } => {
            state::save_owner(scheduler.owner())?;
            println!("Completed {task_id}");
            if let Some(next) = successor {
                println!(
                    "Next occurrence {} due {}",
                    next.id,
                    format_minute_stamp(next.due, tz)
                );
            }
        }
        CompletionOutcome::AlreadyCompleted => {
            println!("{task_id} was already completed; nothing to do.");
        }
    }
    Ok(())
}

fn today() -> Result<()> {
    let cfg = config::load_config()?;
    let tz: Tz = cfg
        .schedule
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in config: {}", cfg.schedule.timezone))?;

    let scheduler = Scheduler::new(state::require_owner()?);
    let view = scheduler.organized_todays_tasks(Utc::now().date_naive(), &cfg.unassigned_policy());
    render::print_day_view(&view, tz);
    Ok(())
}

fn list(
    pet: Option<String>,
    completed: bool,
    pending: bool,
    priority: Option<String>,
) -> Result<()> {
    if completed && pending {
        bail!("--completed and --pending are mutually exclusive");
    }
    let cfg = config::load_config()?;
    let tz: Tz = cfg
        .schedule
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in config: {}", cfg.schedule.timezone))?;
    let priority = priority
        .map(|p| p.parse::<Priority>())
        .transpose()
        .context("bad --priority")?;

    let owner = state::require_owner()?;
    let scheduler = Scheduler::new(owner);

    let mut tasks = match pet.as_deref() {
        Some(name) => scheduler.tasks_by_pet_name(name)?,
        None => scheduler.owner().tasks.iter().collect(),
    };
    if completed || pending {
        tasks.retain(|t| t.completed == completed);
    }
    if let Some(level) = priority {
        tasks.retain(|t| t.priority == level);
    }

    // Pending views read best priority-first; everything else chronologically.
    let ordered = if pending {
        sorted_by_priority(&tasks)
    } else {
        sorted_by_time(&tasks)
    };

    if ordered.is_empty() {
        println!("No matching tasks.");
    }
    for task in ordered {
        println!("{}", render::list_line(task, tz));
    }
    Ok(())
}
