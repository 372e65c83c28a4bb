use crate::bootstrap::database_path;
use crate::db::{count, get_connection};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = database_path(&data_dir);

    println!("User:       {}", if settings.user_name.is_empty() { "(not set)" } else { &settings.user_name });
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let categories = count(&conn, "Categories")?;
        let transactions = count(&conn, "Transactions")?;

        println!();
        println!("Categories:    {categories}");
        println!("Transactions:  {transactions}");
    } else {
        println!();
        println!("Database not found. Run `budget-buddy init` to set up.");
    }

    Ok(())
}
