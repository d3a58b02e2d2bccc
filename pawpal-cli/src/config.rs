use anyhow::{Context, Result};
use pawpal_core::UnassignedPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_pawpal_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schedule: ScheduleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSection {
    /// IANA zone used to read and print "YYYY-MM-DD HH:MM" stamps.
    pub timezone: String,

    /// Label for tasks with no pet attached in the day view.
    pub general_label: String,

    /// Set false to leave pet-less tasks out of the day view.
    pub include_unassigned: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleSection {
                timezone: "America/Chicago".to_string(),
                general_label: "General".to_string(),
                include_unassigned: true,
            },
        }
    }
}

impl Config {
    pub fn unassigned_policy(&self) -> UnassignedPolicy {
        if self.schedule.include_unassigned {
            UnassignedPolicy::GroupAs(self.schedule.general_label.clone())
        } else {
            UnassignedPolicy::Exclude
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pawpal_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
