use std::env;

use crate::error::{AppError, AppResult};

/// Supabase table holding recurring payment reminders
pub const RECURRING_TABLE: &str = "recurring_payments";

/// Supabase table holding one-time reminders
pub const ONE_TIME_TABLE: &str = "one_time_reminders";

/// Group assigned to reminders added without an explicit one
pub const DEFAULT_GROUP: &str = "ДОМАКИНСТВО";

/// Known reminder groups, in display order
pub const GROUP_NAMES: [&str; 11] = [
    "СОЛУНСКА",
    "БАНКЯ",
    "ДОМАКИНСТВО",
    "АВТОМОБИЛ",
    "ХРАНЕНЕ",
    "НЕДА",
    "РАДА",
    "МИЛА И ГОГО",
    "КОТКИ",
    "ЛИЧНИ ГРИЖИ",
    "РАЗВЛЕЧЕНИЯ",
];

/// Runtime configuration, read once at startup and passed explicitly to the
/// store constructor.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub default_group: String,
    pub log_level: String,
}

impl Config {
    /// Read configuration from the environment. `SUPABASE_URL` and
    /// `SUPABASE_KEY` are required; the rest have defaults.
    pub fn from_env() -> AppResult<Self> {
        let supabase_url = require_env("SUPABASE_URL")?;
        let supabase_key = require_env("SUPABASE_KEY")?;

        Ok(Self {
            supabase_url,
            supabase_key,
            default_group: env::var("REMINDER_DEFAULT_GROUP")
                .unwrap_or_else(|_| DEFAULT_GROUP.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> AppResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "{} missing in environment (.env)",
            key
        ))),
    }
}
