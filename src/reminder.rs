use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::frequency::Frequency;

/// Parse a stored ISO date string, tolerating a trailing time component
/// (`2024-03-15T09:30:00`). Unparseable values are logged and treated as
/// absent.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let day_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(day_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Unparseable date string: {}", raw);
            None
        }
    }
}

fn default_true() -> bool {
    true
}

/// A reminder that repeats on a cadence and tracks only its last completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringReminder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub frequency: String,
    /// Advisory, not consulted when deciding dueness
    #[serde(default)]
    pub day_of_month: Option<u32>,
    #[serde(default)]
    pub group_name: String,
    /// Rows predating the column have no value and count as active
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_recorded_date: Option<String>,
}

impl RecurringReminder {
    /// Whether this reminder should fire on `today`. Pure: repeated calls with
    /// the same inputs give the same verdict.
    ///
    /// Inactive reminders and blank or unrecognized frequency tags are never
    /// due. A malformed last-completion date counts as no completion, so the
    /// reminder fires.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        let tag = self.frequency.trim();
        if tag.is_empty() {
            return false;
        }
        let frequency = match Frequency::parse(tag) {
            Some(frequency) => frequency,
            None => return false,
        };
        let last = self.last_recorded_date.as_deref().and_then(parse_iso_date);
        frequency.is_due_since(last, today)
    }
}

/// A reminder tied to a single target date, exhausted after completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeReminder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    pub reminder_date: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl OneTimeReminder {
    /// Due once its target date is reached, and stays due until completed or
    /// deleted. A target date that cannot be parsed never fires.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        if self.is_completed {
            return false;
        }
        match parse_iso_date(&self.reminder_date) {
            Some(date) => date <= today,
            None => false,
        }
    }
}

/// Insert payload for the recurring table; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecurringReminder {
    pub name: String,
    pub amount: f64,
    pub frequency: String,
    pub day_of_month: Option<u32>,
    pub group_name: String,
}

/// Insert payload for the one-time table; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewOneTimeReminder {
    pub name: String,
    pub amount: f64,
    pub reminder_date: String,
    pub group_name: String,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn recurring(frequency: &str, last: Option<&str>) -> RecurringReminder {
        RecurringReminder {
            id: 1,
            name: "Rent".to_string(),
            amount: 850.0,
            frequency: frequency.to_string(),
            day_of_month: None,
            group_name: "ДОМАКИНСТВО".to_string(),
            is_active: true,
            last_recorded_date: last.map(String::from),
        }
    }

    #[test]
    fn test_parse_iso_date_plain() {
        assert_eq!(parse_iso_date("2024-03-15"), Some(date("2024-03-15")));
    }

    #[test]
    fn test_parse_iso_date_strips_time_component() {
        assert_eq!(
            parse_iso_date("2024-03-15T09:30:00"),
            Some(date("2024-03-15"))
        );
        assert_eq!(
            parse_iso_date(" 2024-03-15T09:30:00Z "),
            Some(date("2024-03-15"))
        );
    }

    #[test]
    fn test_parse_iso_date_garbage_is_none() {
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("yesterday"), None);
        assert_eq!(parse_iso_date("15/03/2024"), None);
    }

    #[test]
    fn test_inactive_is_never_due() {
        let mut reminder = recurring("daily", None);
        reminder.is_active = false;
        assert!(!reminder.is_due(date("2024-03-15")));
    }

    #[test]
    fn test_blank_frequency_is_never_due() {
        assert!(!recurring("", None).is_due(date("2024-03-15")));
        assert!(!recurring("   ", None).is_due(date("2024-03-15")));
    }

    #[test]
    fn test_unknown_frequency_is_never_due() {
        assert!(!recurring("biweekly", None).is_due(date("2024-03-15")));
    }

    #[test]
    fn test_never_completed_is_due() {
        assert!(recurring("monthly", None).is_due(date("2024-03-15")));
    }

    #[test]
    fn test_malformed_last_date_counts_as_never_completed() {
        let reminder = recurring("weekly", Some("not-a-date"));
        assert!(reminder.is_due(date("2024-03-15")));
    }

    #[test]
    fn test_is_due_is_idempotent() {
        let reminder = recurring("weekly", Some("2024-03-08"));
        let today = date("2024-03-15");
        let first = reminder.is_due(today);
        for _ in 0..10 {
            assert_eq!(reminder.is_due(today), first);
        }
    }

    fn one_time(reminder_date: &str, completed: bool) -> OneTimeReminder {
        OneTimeReminder {
            id: 7,
            name: "Car tax".to_string(),
            amount: 120.0,
            reminder_date: reminder_date.to_string(),
            group_name: "АВТОМОБИЛ".to_string(),
            is_completed: completed,
        }
    }

    #[test]
    fn test_one_time_due_from_target_date_onwards() {
        let reminder = one_time("2024-01-10", false);
        assert!(!reminder.is_due(date("2024-01-09")));
        assert!(reminder.is_due(date("2024-01-10")));
        assert!(reminder.is_due(date("2024-02-01")));
    }

    #[test]
    fn test_completed_one_time_is_never_due() {
        let reminder = one_time("2024-01-10", true);
        assert!(!reminder.is_due(date("2024-02-01")));
    }

    #[test]
    fn test_one_time_with_unreadable_date_is_not_due() {
        let reminder = one_time("soon", false);
        assert!(!reminder.is_due(date("2024-02-01")));
    }
}
