use chrono::{Local, NaiveDate};
use log::{info, warn};

use crate::error::{AppError, AppResult};
use crate::frequency::Frequency;
use crate::reminder::{
    parse_iso_date, NewOneTimeReminder, NewRecurringReminder, OneTimeReminder, RecurringReminder,
};
use crate::storage::ReminderRepository;

/// Due reminders for a single check, partitioned by record kind.
#[derive(Debug, Default)]
pub struct DueReminders {
    pub recurring: Vec<RecurringReminder>,
    pub one_time: Vec<OneTimeReminder>,
}

impl DueReminders {
    pub fn is_empty(&self) -> bool {
        self.recurring.is_empty() && self.one_time.is_empty()
    }

    pub fn total(&self) -> usize {
        self.recurring.len() + self.one_time.len()
    }
}

/// Orchestrates due checks and completion against the repository. Holds no
/// cached record state; every check re-reads the store.
pub struct ReminderService<R> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Everything due on `today`, recurring and one-time. A fetch failure on
    /// either kind empties only that partition; the other still goes through.
    pub fn get_due_reminders(&self, today: NaiveDate) -> DueReminders {
        let recurring = match self.repo.list_recurring(None) {
            Ok(rows) => rows.into_iter().filter(|r| r.is_due(today)).collect(),
            Err(e) => {
                warn!("Failed to fetch recurring reminders: {}", e);
                Vec::new()
            }
        };

        let one_time = match self.repo.list_one_time_due_by(today) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to fetch one-time reminders: {}", e);
                Vec::new()
            }
        };

        DueReminders {
            recurring,
            one_time,
        }
    }

    pub fn get_due_reminders_today(&self) -> DueReminders {
        self.get_due_reminders(Local::now().date_naive())
    }

    /// Non-interactive check used by schedulers. True iff anything is due.
    pub fn any_due(&self, today: NaiveDate) -> bool {
        let due = self.get_due_reminders(today);
        if !due.is_empty() {
            info!(
                "Found {} due reminders (recurring={}, one_time={})",
                due.total(),
                due.recurring.len(),
                due.one_time.len()
            );
        }
        !due.is_empty()
    }

    /// Mark a recurring reminder done today.
    pub fn record_completion(&self, id: i64) -> AppResult<()> {
        self.record_completion_on(id, Local::now().date_naive())
    }

    /// Calendar-day valued, so recording twice on the same day rewrites the
    /// same date and the due verdict does not change.
    pub fn record_completion_on(&self, id: i64, date: NaiveDate) -> AppResult<()> {
        self.repo.update_recurring_last_recorded(id, date)
    }

    /// Permanently retire a one-time reminder. There is no way back through
    /// this interface.
    pub fn mark_one_time_completed(&self, id: i64) -> AppResult<()> {
        self.repo.update_one_time_completed(id)
    }

    pub fn delete_reminder(&self, id: i64) -> AppResult<()> {
        self.repo.delete_by_id(id)
    }

    /// Validated insert of a recurring reminder. An unrecognized frequency is
    /// accepted but will never come due, so it is called out in the log.
    pub fn add_recurring(
        &self,
        name: &str,
        amount: f64,
        frequency: &str,
        day_of_month: Option<u32>,
        group: &str,
    ) -> AppResult<()> {
        let name = validate_name(name)?;
        validate_amount(amount)?;
        if let Some(day) = day_of_month {
            if !(1..=31).contains(&day) {
                return Err(AppError::validation(format!(
                    "day of month must be between 1 and 31, got {}",
                    day
                )));
            }
        }
        let frequency = frequency.trim().to_lowercase();
        if Frequency::parse(&frequency).is_none() {
            warn!(
                "Frequency {:?} of new reminder {:?} is not recognized; it will never come due",
                frequency, name
            );
        }

        self.repo.insert_recurring(&NewRecurringReminder {
            name,
            amount,
            frequency,
            day_of_month,
            group_name: group.to_string(),
        })
    }

    /// Validated insert of a one-time reminder. The date string must parse;
    /// nothing is written otherwise.
    pub fn add_one_time(&self, name: &str, amount: f64, date: &str, group: &str) -> AppResult<()> {
        let name = validate_name(name)?;
        validate_amount(amount)?;
        let date = parse_iso_date(date).ok_or_else(|| {
            AppError::validation(format!("invalid date {:?}, expected YYYY-MM-DD", date))
        })?;

        self.repo.insert_one_time(&NewOneTimeReminder {
            name,
            amount,
            reminder_date: date.format("%Y-%m-%d").to_string(),
            group_name: group.to_string(),
            is_completed: false,
        })
    }

    /// Active recurring reminders, optionally restricted to one group.
    pub fn get_active_recurring(&self, group: Option<&str>) -> AppResult<Vec<RecurringReminder>> {
        let rows = self.repo.list_recurring(group)?;
        Ok(rows.into_iter().filter(|r| r.is_active).collect())
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }
    Ok(name.to_string())
}

fn validate_amount(amount: f64) -> AppResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::validation(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(())
}
