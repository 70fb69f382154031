use log::info;

use crate::service::DueReminders;

/// Outbound notification capability. The presentation layer supplies the
/// sink; the core never talks to a UI directly.
pub trait NotificationSink {
    fn notify(&self, title: &str, message: &str);
}

/// Sink for terminal and scheduled runs.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        println!("{}: {}", title, message);
        info!("Notification sent: {}", title);
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Push a one-line summary of a due check through the sink: total count plus
/// up to the first three names. Quiet when nothing is due.
pub fn notify_due_summary(sink: &dyn NotificationSink, due: &DueReminders) {
    if due.is_empty() {
        return;
    }
    let names: Vec<&str> = due
        .recurring
        .iter()
        .map(|r| r.name.as_str())
        .chain(due.one_time.iter().map(|r| r.name.as_str()))
        .take(3)
        .collect();
    let title = format!("{} reminders due today", due.total());
    sink.notify(&title, &names.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::{OneTimeReminder, RecurringReminder};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        sent: RefCell<Vec<(String, String)>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, title: &str, message: &str) {
            self.sent
                .borrow_mut()
                .push((title.to_string(), message.to_string()));
        }
    }

    fn recurring(name: &str) -> RecurringReminder {
        RecurringReminder {
            id: 0,
            name: name.to_string(),
            amount: 10.0,
            frequency: "monthly".to_string(),
            day_of_month: None,
            group_name: String::new(),
            is_active: true,
            last_recorded_date: None,
        }
    }

    fn one_time(name: &str) -> OneTimeReminder {
        OneTimeReminder {
            id: 0,
            name: name.to_string(),
            amount: 10.0,
            reminder_date: "2024-01-10".to_string(),
            group_name: String::new(),
            is_completed: false,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(850.5), "$850.50");
    }

    #[test]
    fn test_nothing_sent_when_nothing_due() {
        let sink = RecordingSink::default();
        notify_due_summary(&sink, &DueReminders::default());
        assert!(sink.sent.borrow().is_empty());
    }

    #[test]
    fn test_summary_caps_names_at_three() {
        let sink = RecordingSink::default();
        let due = DueReminders {
            recurring: vec![recurring("Rent"), recurring("Water")],
            one_time: vec![one_time("Car tax"), one_time("Insurance")],
        };
        notify_due_summary(&sink, &due);

        let sent = sink.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "4 reminders due today");
        assert_eq!(sent[0].1, "Rent, Water, Car tax");
    }
}
