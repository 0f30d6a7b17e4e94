use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sanction_desk::{
    config::{self, AppConfig, database},
    core::{
        roster::{self, NewTeacher, TeacherRoster},
        sanction::Selection,
        service, store,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Issue and record monthly sanction orders for guest teachers.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the teacher roster
    Teachers,
    /// Add a teacher to the roster
    AddTeacher {
        /// Application ID
        #[arg(long)]
        app_id: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Designation, e.g. "TGT MATH"
        #[arg(long)]
        designation: String,
        /// Secondary identity code
        #[arg(long)]
        nic_pin: String,
    },
    /// Remove a teacher from the roster (issued orders are kept)
    RemoveTeacher {
        /// Application ID
        app_id: String,
    },
    /// Issue a new sanction order
    Issue {
        /// Month the order covers, e.g. "March"
        #[arg(long)]
        month: String,
        /// Issue date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Selected teacher and worked days as APP_ID=DAYS, in table order
        #[arg(required = true, value_parser = parse_days)]
        days: Vec<(String, i64)>,
    },
    /// Change worked days on an issued order
    Edit {
        /// Order ID
        id: i64,
        /// New worked days as APP_ID=DAYS
        #[arg(required = true, value_parser = parse_days)]
        days: Vec<(String, i64)>,
    },
    /// Show one order
    Show {
        /// Order ID
        id: i64,
    },
    /// List issued orders, newest first
    List,
    /// Render an order's document again
    Render {
        /// Order ID
        id: i64,
    },
}

fn parse_days(raw: &str) -> std::result::Result<(String, i64), String> {
    let (app_id, days) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected APP_ID=DAYS, got '{raw}'"))?;
    let days = days
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid days in '{raw}': {e}"))?;
    Ok((app_id.trim().to_string(), days))
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed the roster from configuration
    roster::seed_teachers(&db, &app_config.teachers)
        .await
        .inspect_err(|e| error!("Failed to seed teachers: {}", e))?;

    run(&db, &app_config, cli.command)
        .await
        .inspect_err(|e| error!("{}", e))
}

async fn run(db: &DatabaseConnection, config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Teachers => {
            for teacher in roster::list_teachers(db).await? {
                println!(
                    "{:<12} {:<28} {:<32} {}",
                    teacher.app_id, teacher.name, teacher.designation, teacher.nic_pin
                );
            }
        }
        Command::AddTeacher {
            app_id,
            name,
            designation,
            nic_pin,
        } => {
            let teacher = db
                .insert_teacher(NewTeacher {
                    app_id,
                    name,
                    designation,
                    nic_pin,
                })
                .await?;
            println!("Added {} ({})", teacher.name, teacher.app_id);
        }
        Command::RemoveTeacher { app_id } => {
            db.delete_teacher(&app_id).await?;
            println!("Removed {app_id}");
        }
        Command::Issue { month, date, days } => {
            let issued_date = date.unwrap_or_else(|| Local::now().date_naive());
            let selections: Vec<Selection> = days
                .into_iter()
                .map(|(app_id, days)| Selection { app_id, days })
                .collect();
            let issued =
                service::issue_sanction(db, config, &month, issued_date, &selections).await?;
            println!(
                "Issued order {}: Rs. {} ({})",
                issued.order.id.unwrap_or_default(),
                issued.order.total.grouped,
                issued.order.total.words
            );
            println!(
                "Document: {} (download as {})",
                issued.artifact.path.display(),
                issued.artifact.download_name
            );
        }
        Command::Edit { id, days } => {
            let updates: HashMap<String, i64> = days.into_iter().collect();
            let edited = service::edit_sanction(db, config, id, &updates).await?;
            println!(
                "Order {id} updated: Rs. {} ({})",
                edited.order.total.grouped, edited.order.total.words
            );
            println!("Document: {}", edited.artifact.path.display());
        }
        Command::Show { id } => {
            let order = store::get_order(db, id).await?;
            println!(
                "Order {id} - {} {} - issued {}",
                order.month,
                order.year(),
                order.issued_date
            );
            for (index, line) in order.lines.iter().enumerate() {
                println!(
                    "{:>3}. {:<12} {:<28} {:<32} {:>3} days  Rs. {}",
                    index + 1,
                    line.app_id,
                    line.name,
                    line.designation,
                    line.days,
                    sanction_desk::core::amount::group_digits(line.amount)
                );
            }
            println!("Total: Rs. {} ({})", order.total.grouped, order.total.words);
            if let Some(path) = order.file_path {
                println!("Document: {path}");
            }
        }
        Command::List => {
            for summary in store::list_orders(db).await? {
                let teachers: Vec<String> = summary
                    .teachers
                    .iter()
                    .map(|t| format!("{} ({} days)", t.name, t.days))
                    .collect();
                println!(
                    "#{} {} issued {} Rs. {} - {}",
                    summary.id,
                    summary.month,
                    summary.issued_date,
                    summary.total_amount,
                    teachers.join(", ")
                );
            }
        }
        Command::Render { id } => {
            let artifact = service::render_sanction(db, config, id).await?;
            println!(
                "Document: {} (download as {})",
                artifact.path.display(),
                artifact.download_name
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("2017090786=12"), Ok(("2017090786".to_string(), 12)));
        assert_eq!(parse_days(" 2017090786 = -1"), Ok(("2017090786".to_string(), -1)));
        assert!(parse_days("2017090786").is_err());
        assert!(parse_days("2017090786=ten").is_err());
    }

    #[test]
    fn test_cli_parses_issue() {
        let cli = Cli::try_parse_from([
            "sanction-desk",
            "issue",
            "--month",
            "March",
            "--date",
            "2025-03-31",
            "2013051618=10",
            "2017090786=8",
        ]);
        let Ok(Cli {
            command: Command::Issue { month, date, days },
        }) = cli
        else {
            panic!("issue command did not parse");
        };
        assert_eq!(month, "March");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert_eq!(days.len(), 2);
    }
}
