use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use log::error;

use cash_reminder::notify::{format_amount, notify_due_summary, ConsoleNotifier};
use cash_reminder::{AppResult, Config, ReminderRepository, ReminderService, SupabaseStore};

#[derive(Parser)]
#[command(
    name = "cash-reminder",
    about = "Track recurring and one-time payment reminders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Silent due check for schedulers; exits 1 when anything is due
    Check,
    /// List active recurring reminders
    List {
        #[arg(long)]
        group: Option<String>,
    },
    /// Add a recurring reminder
    AddRecurring {
        name: String,
        amount: f64,
        /// daily, weekly, monthly, quarterly, yearly, or a day count
        frequency: String,
        #[arg(long)]
        day_of_month: Option<u32>,
        #[arg(long)]
        group: Option<String>,
    },
    /// Add a one-time reminder
    AddOneTime {
        name: String,
        amount: f64,
        /// Target date, YYYY-MM-DD
        date: String,
        #[arg(long)]
        group: Option<String>,
    },
    /// Record that a recurring reminder was paid today
    Record { id: i64 },
    /// Mark a one-time reminder completed
    Complete { id: i64 },
    /// Delete a reminder by id, whichever kind it is
    Delete { id: i64 },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let store = match SupabaseStore::connect(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    let service = ReminderService::new(store);

    match cli.command {
        None => {
            show_due(&service);
            ExitCode::SUCCESS
        }
        Some(Command::Check) => {
            if service.any_due(Local::now().date_naive()) {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Some(Command::List { group }) => list_active(&service, group.as_deref()),
        Some(Command::AddRecurring {
            name,
            amount,
            frequency,
            day_of_month,
            group,
        }) => report(
            service.add_recurring(
                &name,
                amount,
                &frequency,
                day_of_month,
                group.as_deref().unwrap_or(&config.default_group),
            ),
            "Reminder added.",
        ),
        Some(Command::AddOneTime {
            name,
            amount,
            date,
            group,
        }) => report(
            service.add_one_time(
                &name,
                amount,
                &date,
                group.as_deref().unwrap_or(&config.default_group),
            ),
            "Reminder added.",
        ),
        Some(Command::Record { id }) => report(service.record_completion(id), "Recorded."),
        Some(Command::Complete { id }) => {
            report(service.mark_one_time_completed(id), "Completed.")
        }
        Some(Command::Delete { id }) => report(service.delete_reminder(id), "Deleted."),
    }
}

fn show_due<R: ReminderRepository>(service: &ReminderService<R>) {
    let due = service.get_due_reminders_today();
    if due.is_empty() {
        println!("No reminders due today.");
        return;
    }

    notify_due_summary(&ConsoleNotifier, &due);
    for r in &due.recurring {
        println!(
            "  [{}] {} {} ({}, {})",
            r.id,
            r.name,
            format_amount(r.amount),
            r.frequency,
            r.group_name
        );
    }
    for r in &due.one_time {
        println!(
            "  [{}] {} {} (one-time {}, {})",
            r.id,
            r.name,
            format_amount(r.amount),
            r.reminder_date,
            r.group_name
        );
    }
    println!("Mark done with `cash-reminder record <id>` or `cash-reminder complete <id>`.");
}

fn list_active<R: ReminderRepository>(
    service: &ReminderService<R>,
    group: Option<&str>,
) -> ExitCode {
    match service.get_active_recurring(group) {
        Ok(reminders) => {
            if reminders.is_empty() {
                println!("No active recurring reminders.");
            }
            for r in &reminders {
                println!(
                    "  [{}] {} {} ({}, day {}, {})",
                    r.id,
                    r.name,
                    format_amount(r.amount),
                    r.frequency,
                    r.day_of_month
                        .map_or_else(|| "-".to_string(), |d| d.to_string()),
                    r.group_name
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(result: AppResult<()>, success: &str) -> ExitCode {
    match result {
        Ok(()) => {
            println!("{}", success);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
