use std::path::{Path, PathBuf};

use crate::error::{BudgetError, Result};

/// Seed database shipped inside the binary. Built from `assets/schema.sql`
/// and `assets/seed.sql`.
pub const BUNDLED_SEED: &[u8] = include_bytes!("../assets/budget.db");

pub const DB_NAME: &str = "budget.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provision {
    Copied { bytes: u64 },
    AlreadyPresent,
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("SQLite").join(DB_NAME)
}

/// Copy `seed` to `dest` unless something already lives there. An existing
/// database is never touched, so this is safe to call on every launch.
pub fn provision(dest: &Path, seed: &[u8]) -> Result<Provision> {
    if dest.exists() {
        tracing::debug!("database already present at {}", dest.display());
        return Ok(Provision::AlreadyPresent);
    }
    if let Some(dir) = dest.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(dest, seed)?;
    tracing::info!("seeded database at {} ({} bytes)", dest.display(), seed.len());
    Ok(Provision::Copied {
        bytes: seed.len() as u64,
    })
}

/// Like [`provision`], with the seed read from a file on disk.
pub fn provision_from_file(dest: &Path, seed_path: &Path) -> Result<Provision> {
    if dest.exists() {
        return Ok(Provision::AlreadyPresent);
    }
    if !seed_path.is_file() {
        return Err(BudgetError::SeedNotFound(seed_path.display().to_string()));
    }
    let seed = std::fs::read(seed_path)?;
    provision(dest, &seed)
}
