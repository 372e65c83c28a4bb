use std::path::{Path, PathBuf};

use crate::bootstrap::{database_path, provision, provision_from_file, Provision, BUNDLED_SEED};
use crate::db::{check_schema, get_connection};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, seed: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let db_path = database_path(&resolved);
    let outcome = match seed {
        Some(path) => provision_from_file(&db_path, Path::new(&shellexpand_path(&path)))?,
        None => provision(&db_path, BUNDLED_SEED)?,
    };

    let conn = get_connection(&db_path)?;
    check_schema(&conn)?;

    match outcome {
        Provision::Copied { bytes } => {
            println!("Seeded {} ({})", db_path.display(), format_bytes(bytes))
        }
        Provision::AlreadyPresent => {
            println!("Database already present at {}", db_path.display())
        }
    }
    println!("Initialized budget-buddy at {}", resolved.display());
    Ok(())
}
