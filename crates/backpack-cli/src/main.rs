//! Backpack CLI - Student savings planner and expense tracker
//!
//! Usage:
//!   backpack init                                   Initialize database
//!   backpack goals add "Laptop" --target 50000      Add a savings goal
//!   backpack plan --target 12000 --date 2025-01-01  Preview a goal
//!   backpack expenses add 120 "Lunch" -c food       Record an expense
//!   backpack serve --port 3000                      Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use backpack_core::models::SettingsUpdate;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let today = commands::today();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Status => commands::cmd_status(&cli.db, &config, today),
        Commands::Goals { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&db, &config, today),
                Some(GoalsAction::Add(args)) => commands::cmd_goals_add(&db, &config, today, &args),
                Some(GoalsAction::Save { id, amount }) => commands::cmd_goals_save(&db, id, amount),
                Some(GoalsAction::Edit(args)) => commands::cmd_goals_edit(&db, &args),
                Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&db, id),
                Some(GoalsAction::Purchase { id }) => commands::cmd_goals_purchase(&db, id),
                Some(GoalsAction::Show { id }) => commands::cmd_goals_show(&db, &config, today, id),
            }
        }
        Commands::Plan {
            target,
            saved,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_plan(&db, &config, today, target, saved, date.as_deref())
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_expenses_list(
                    &db,
                    &ListExpensesArgs {
                        limit: 20,
                        search: None,
                        category: None,
                        from: None,
                        to: None,
                        sort: "newest".to_string(),
                    },
                ),
                Some(ExpensesAction::List(args)) => commands::cmd_expenses_list(&db, &args),
                Some(ExpensesAction::Add(args)) => {
                    commands::cmd_expenses_add(&db, &config, today, &args)
                }
                Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, id),
            }
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(BudgetAction::Show) => commands::cmd_budget_show(&db, &config, today),
                Some(BudgetAction::Set {
                    budget,
                    capacity,
                    name,
                    campus,
                }) => commands::cmd_budget_set(
                    &db,
                    &SettingsUpdate {
                        display_name: name,
                        campus,
                        monthly_budget: budget,
                        savings_capacity: capacity,
                    },
                ),
            }
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db)?;
            match report_type {
                ReportType::Categories { month } => {
                    commands::cmd_report_categories(&db, &config, today, month.as_deref())
                }
            }
        }
        Commands::Export { export_type } => {
            let db = commands::open_db(&cli.db)?;
            match export_type {
                ExportType::Expenses {
                    output,
                    from,
                    to,
                    category,
                    search,
                } => commands::cmd_export_expenses(
                    &db,
                    output.as_deref(),
                    from.as_deref(),
                    to.as_deref(),
                    category.as_deref(),
                    search.as_deref(),
                ),
                ExportType::Full { output } => commands::cmd_export_full(&db, &output),
            }
        }
        Commands::ImportFull { file, clear, yes } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import_full(&db, &file, clear, yes)
        }
        Commands::History { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_history(&db, limit)
        }
        Commands::Reset { soft, yes } => commands::cmd_reset(&cli.db, soft, yes),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, config, &host, port, static_dir.as_deref()).await,
    }
}
