//! Owner roster: pets plus the single authoritative task collection.
//!
//! The owner's `tasks` vector is the one source of truth. Per-pet views are
//! computed from it on demand; there is no second mutable copy to diverge.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    /// Display and grouping key. Lookups are case-insensitive.
    pub name: String,
    pub breed: String,
    /// Years.
    pub age: u32,
}

impl Pet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, breed: impl Into<String>, age: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            breed: breed.into(),
            age,
        }
    }

    /// One-line summary for listings.
    pub fn details(&self) -> String {
        format!("{} ({}, {} years old)", self.name, self.breed, self.age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub email: String,

    pub pets: Vec<Pet>,

    /// Authoritative, insertion-ordered task history. Tasks are never removed;
    /// completed tasks stay for status filtering.
    pub tasks: Vec<Task>,

    /// Monotonic allocator for task and pet ids. Persisted with the roster so
    /// recurring chains keep unique ids across sessions.
    #[serde(default)]
    seq: u64,
}

impl Owner {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            pets: Vec::new(),
            tasks: Vec::new(),
            seq: 0,
        }
    }

    /// Register a pet. Names are the lookup key, so duplicates (ignoring
    /// case) are rejected.
    pub fn add_pet(&mut self, name: impl Into<String>, breed: impl Into<String>, age: u32) -> Result<&Pet> {
        let name = name.into();
        if self.find_pet(&name).is_some() {
            bail!("a pet named {name:?} already exists");
        }
        self.seq += 1;
        let pet = Pet::new(format!("pet-{:04}", self.seq), name, breed, age);
        self.pets.push(pet);
        Ok(self.pets.last().expect("pet was just pushed"))
    }

    /// Case-insensitive exact match on pet name.
    pub fn find_pet(&self, name: &str) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn pet_by_id(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == id)
    }

    pub fn allocate_task_id(&mut self) -> String {
        self.seq += 1;
        format!("task-{:04}", self.seq)
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Derived per-pet view, original order, all statuses.
    pub fn tasks_for_pet(&self, pet_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.pet_id.as_deref() == Some(pet_id))
            .collect()
    }

    /// Number of walk-type tasks on the books (any status).
    pub fn walk_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_walk()).count()
    }
}
