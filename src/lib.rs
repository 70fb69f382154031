pub mod config;
pub mod error;
pub mod frequency;
pub mod notify;
pub mod reminder;
pub mod service;
pub mod storage;
mod urlencoding;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use frequency::Frequency;
pub use reminder::{OneTimeReminder, RecurringReminder};
pub use service::{DueReminders, ReminderService};
pub use storage::{ReminderRepository, SupabaseStore};
