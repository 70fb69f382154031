use chrono::NaiveDate;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, ONE_TIME_TABLE, RECURRING_TABLE};
use crate::error::{AppError, AppResult};
use crate::reminder::{
    NewOneTimeReminder, NewRecurringReminder, OneTimeReminder, RecurringReminder,
};
use crate::storage::ReminderRepository;
use crate::urlencoding;

/// Blocking PostgREST client for the two reminder tables.
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    /// Build a client from configuration and verify the store is reachable
    /// with a probe query. Initialization failure is fatal to the caller.
    pub fn connect(config: &Config) -> AppResult<Self> {
        let store = Self {
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_key.clone(),
        };

        let probe = format!("{}?select=id&limit=1", store.table_url(RECURRING_TABLE));
        store
            .fetch_rows::<serde_json::Value>(&probe)
            .map_err(|e| AppError::config(format!("failed to initialize store: {}", e)))?;

        info!("Connected to reminder store at {}", store.base_url);
        Ok(store)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        ureq::request(method, url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }

    fn fetch_rows<T: DeserializeOwned>(&self, url: &str) -> AppResult<Vec<T>> {
        debug!("GET {}", url);
        let response = self
            .request("GET", url)
            .call()
            .map_err(|e| map_api_error("fetch", e))?;
        response
            .into_json::<Vec<T>>()
            .map_err(|e| AppError::storage(format!("malformed response: {}", e)))
    }

    fn send_write<B: Serialize>(&self, op: &str, method: &str, url: &str, body: B) -> AppResult<()> {
        debug!("{} {}", method, url);
        self.request(method, url)
            .set("Prefer", "return=minimal")
            .set("Content-Type", "application/json")
            .send_json(body)
            .map(|_| ())
            .map_err(|e| map_api_error(op, e))
    }
}

fn map_api_error(op: &str, err: ureq::Error) -> AppError {
    match err {
        ureq::Error::Status(401, _) | ureq::Error::Status(403, _) => {
            AppError::storage(format!("{}: API key rejected", op))
        }
        ureq::Error::Status(code, _) => AppError::storage(format!("{}: API error {}", op, code)),
        other => AppError::network(other.to_string()),
    }
}

impl ReminderRepository for SupabaseStore {
    fn list_recurring(&self, group: Option<&str>) -> AppResult<Vec<RecurringReminder>> {
        let mut url = format!("{}?select=*", self.table_url(RECURRING_TABLE));
        if let Some(group) = group {
            url.push_str("&group_name=eq.");
            url.push_str(&urlencoding::encode(group));
        }
        self.fetch_rows(&url)
    }

    fn list_one_time_due_by(&self, date: NaiveDate) -> AppResult<Vec<OneTimeReminder>> {
        let url = format!(
            "{}?select=*&reminder_date=lte.{}&is_completed=eq.false",
            self.table_url(ONE_TIME_TABLE),
            date.format("%Y-%m-%d"),
        );
        self.fetch_rows(&url)
    }

    fn insert_recurring(&self, record: &NewRecurringReminder) -> AppResult<()> {
        self.send_write(
            "insert recurring",
            "POST",
            &self.table_url(RECURRING_TABLE),
            record,
        )
    }

    fn insert_one_time(&self, record: &NewOneTimeReminder) -> AppResult<()> {
        self.send_write(
            "insert one-time",
            "POST",
            &self.table_url(ONE_TIME_TABLE),
            record,
        )
    }

    fn update_recurring_last_recorded(&self, id: i64, date: NaiveDate) -> AppResult<()> {
        let url = format!("{}?id=eq.{}", self.table_url(RECURRING_TABLE), id);
        self.send_write(
            "record completion",
            "PATCH",
            &url,
            serde_json::json!({ "last_recorded_date": date.format("%Y-%m-%d").to_string() }),
        )
    }

    fn update_one_time_completed(&self, id: i64) -> AppResult<()> {
        let url = format!("{}?id=eq.{}", self.table_url(ONE_TIME_TABLE), id);
        self.send_write(
            "complete one-time",
            "PATCH",
            &url,
            serde_json::json!({ "is_completed": true }),
        )
    }

    fn delete_by_id(&self, id: i64) -> AppResult<()> {
        // One-time first, then recurring; a miss in either table removes nothing
        for table in [ONE_TIME_TABLE, RECURRING_TABLE] {
            let url = format!("{}?id=eq.{}", self.table_url(table), id);
            debug!("DELETE {}", url);
            self.request("DELETE", &url)
                .call()
                .map_err(|e| map_api_error("delete", e))?;
        }
        Ok(())
    }
}
