//! On-disk roster state under ~/.pawpal.

use anyhow::{Context, Result};
use pawpal_core::Owner;
use std::fs;
use std::path::PathBuf;

pub fn pawpal_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pawpal"))
}

pub fn ensure_pawpal_home() -> Result<PathBuf> {
    let dir = pawpal_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn roster_path() -> Result<PathBuf> {
    Ok(ensure_pawpal_home()?.join("roster.json"))
}

pub fn save_owner(owner: &Owner) -> Result<()> {
    let p = roster_path()?;
    let json = serde_json::to_string_pretty(owner)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn load_owner() -> Result<Option<Owner>> {
    let p = roster_path()?;
    if !p.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(Some(
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?,
    ))
}

pub fn require_owner() -> Result<Owner> {
    load_owner()?.context("no roster yet; run `pawpal setup --name ... --email ...` first")
}
