mod supabase;

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::reminder::{
    NewOneTimeReminder, NewRecurringReminder, OneTimeReminder, RecurringReminder,
};

pub use supabase::SupabaseStore;

/// Narrow persistence interface consumed by the reminder service.
///
/// Every method is fallible and blocking; a stalled store call stalls the
/// whole check. Callers decide how much of a check survives a failure.
pub trait ReminderRepository {
    /// All recurring reminders, optionally restricted to one group.
    fn list_recurring(&self, group: Option<&str>) -> AppResult<Vec<RecurringReminder>>;

    /// Uncompleted one-time reminders whose target date is on or before
    /// `date`. The store applies the filter so overdue rows keep surfacing
    /// until completed or deleted.
    fn list_one_time_due_by(&self, date: NaiveDate) -> AppResult<Vec<OneTimeReminder>>;

    fn insert_recurring(&self, record: &NewRecurringReminder) -> AppResult<()>;

    fn insert_one_time(&self, record: &NewOneTimeReminder) -> AppResult<()>;

    fn update_recurring_last_recorded(&self, id: i64, date: NaiveDate) -> AppResult<()>;

    fn update_one_time_completed(&self, id: i64) -> AppResult<()>;

    /// Delete `id` from whichever collection holds it. Ids are not namespaced
    /// by kind, so both tables are tried; a miss in either is a no-op.
    fn delete_by_id(&self, id: i64) -> AppResult<()>;
}
