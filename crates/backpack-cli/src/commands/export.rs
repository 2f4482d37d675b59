//! Export and import command implementations

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use backpack_core::db::{Database, ExpenseFilter};
use backpack_core::export::FullBackup;
use backpack_core::models::ExpenseCategory;

use super::{confirm, parse_choice, parse_optional_date, AUDIT_ACTOR};

/// Export expenses to CSV, to a file or stdout
pub fn cmd_export_expenses(
    db: &Database,
    output: Option<&Path>,
    from: Option<&str>,
    to: Option<&str>,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let from_date = parse_optional_date(from).context("Invalid --from date")?;
    let to_date = parse_optional_date(to).context("Invalid --to date")?;
    let category = category
        .map(parse_choice::<ExpenseCategory>)
        .transpose()?;

    let filter = ExpenseFilter::new()
        .search(search)
        .category(category)
        .date_range(from_date, to_date);

    let csv = db.export_expenses_csv(&filter)?;

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(csv.as_bytes())?;

            let rows = csv.lines().count().saturating_sub(1);
            println!("✅ Exported {} expenses to {}", rows, path.display());
        }
        None => {
            print!("{}", csv);
        }
    }

    Ok(())
}

/// Export full database backup to JSON
pub fn cmd_export_full(db: &Database, output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    println!("📦 Exporting full database backup...");

    let backup = db.export_full_backup()?;
    let json =
        serde_json::to_string_pretty(&backup).context("Failed to serialize backup to JSON")?;

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    file.write_all(json.as_bytes())?;

    println!("✅ Full backup exported to: {}", output.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Total records: {}", backup.metadata.total_records);
    println!();
    println!("   Goals: {}", backup.goals.len());
    println!("   Expenses: {}", backup.expenses.len());
    println!("   Settings: {}", backup.settings.len());

    Ok(())
}

/// Import a full JSON backup
pub fn cmd_import_full(db: &Database, input: &Path, clear: bool, yes: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Backup file not found: {}", input.display());
    }

    let mut file = File::open(input)
        .with_context(|| format!("Failed to open backup file: {}", input.display()))?;
    let mut json = String::new();
    file.read_to_string(&mut json)
        .context("Failed to read backup file")?;

    let backup: FullBackup =
        serde_json::from_str(&json).context("Failed to parse backup file as JSON")?;

    println!("📦 Importing full backup from: {}", input.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Created: {}", backup.metadata.created_at);
    println!("   Total records: {}", backup.metadata.total_records);
    println!();

    if clear && !yes {
        println!("⚠️  This will DELETE all existing data before importing.");
        println!("   Goals: {} → {}", db.count_goals()?, backup.goals.len());
        println!(
            "   Expenses: {} → {}",
            db.count_expenses(&ExpenseFilter::new())?,
            backup.expenses.len()
        );
        println!();
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    } else if !clear && !yes {
        println!("⚠️  Importing into existing database. Records with matching IDs will be replaced.");
        println!("   Use --clear to replace all existing data instead.");
        println!();
        if !confirm("Continue?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let stats = db.import_full_backup(&backup, clear)?;
    db.log_audit(
        AUDIT_ACTOR,
        "import_backup",
        None,
        None,
        Some(&format!(
            "goals={}, expenses={}, settings={}, clear={}",
            stats.goals, stats.expenses, stats.settings, clear
        )),
    )?;

    println!();
    println!("✅ Import complete!");
    println!("   Goals: {}", stats.goals);
    println!("   Expenses: {}", stats.expenses);
    println!("   Settings: {}", stats.settings);

    Ok(())
}
