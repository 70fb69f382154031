use chrono::{Datelike, NaiveDate};

/// Recurrence cadence of a recurring reminder, parsed from the stored tag.
///
/// `monthly` and `yearly` are calendar-boundary rules; the rest count elapsed
/// days from the last completion. A completion is never required twice on the
/// same calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    /// Custom interval from a literal digit string, e.g. `"14"`
    EveryDays(u32),
}

impl Frequency {
    /// Parse a frequency tag, trimmed and case-insensitive. Unrecognized tags
    /// yield `None`, which callers must treat as never due.
    pub fn parse(tag: &str) -> Option<Frequency> {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "quarterly" => Some(Frequency::Quarterly),
            "yearly" => Some(Frequency::Yearly),
            other if !other.is_empty() && other.bytes().all(|b| b.is_ascii_digit()) => {
                other.parse().ok().map(Frequency::EveryDays)
            }
            _ => None,
        }
    }

    /// Whether a reminder last completed on `last` should fire again on
    /// `today`. No completion on record always fires.
    pub fn is_due_since(self, last: Option<NaiveDate>, today: NaiveDate) -> bool {
        let last = match last {
            Some(date) => date,
            None => return true,
        };

        match self {
            Frequency::Daily => (today - last).num_days() >= 1,
            Frequency::Weekly => (today - last).num_days() >= 7,
            // Calendar-month boundary, not a 30-day window
            Frequency::Monthly => last.month() != today.month() || last.year() != today.year(),
            Frequency::Quarterly => (today - last).num_days() >= 90,
            Frequency::Yearly => last.year() < today.year(),
            Frequency::EveryDays(days) => (today - last).num_days() >= i64::from(days),
        }
    }
}
