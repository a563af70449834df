use crate::domain::model::{EventKind, ReminderEvent};
use chrono::{Datelike, NaiveDate};

/// Built-in reminders used when the configuration lists none.
pub fn default_events(year: i32) -> Vec<ReminderEvent> {
    let mut events = Vec::new();
    if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 15) {
        events.push(ReminderEvent {
            id: "1".to_string(),
            title: "Annual Water Tank Cleaning".to_string(),
            date,
            kind: EventKind::Annual,
            description: Some("Schedule tank cleaning service".to_string()),
        });
    }
    if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 5) {
        events.push(ReminderEvent {
            id: "2".to_string(),
            title: "Monthly Electricity Bill".to_string(),
            date,
            kind: EventKind::Monthly,
            description: Some("Pay electricity bill".to_string()),
        });
    }
    events
}

/// First date on or after `from` when the event falls due. Recurring events
/// never occur before their anchor date.
pub fn next_occurrence(event: &ReminderEvent, from: NaiveDate) -> Option<NaiveDate> {
    let start = from.max(event.date);
    match event.kind {
        EventKind::OneTime => (event.date >= from).then_some(event.date),
        EventKind::Monthly => {
            let day = event.date.day();
            let this_month = clamped_date(start.year(), start.month(), day)?;
            if this_month >= start {
                return Some(this_month);
            }
            let (year, month) = if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            clamped_date(year, month, day)
        }
        EventKind::Annual => {
            let (month, day) = (event.date.month(), event.date.day());
            let this_year = clamped_date(start.year(), month, day)?;
            if this_year >= start {
                return Some(this_year);
            }
            clamped_date(start.year() + 1, month, day)
        }
    }
}

/// Events by next occurrence, soonest first; past one-time events are dropped.
pub fn upcoming(
    events: &[ReminderEvent],
    from: NaiveDate,
    limit: usize,
) -> Vec<(NaiveDate, &ReminderEvent)> {
    let mut due: Vec<(NaiveDate, &ReminderEvent)> = events
        .iter()
        .filter_map(|event| next_occurrence(event, from).map(|date| (date, event)))
        .collect();
    due.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.title.cmp(&b.1.title)));
    due.truncate(limit);
    due
}

pub fn events_on(events: &[ReminderEvent], day: NaiveDate) -> Vec<&ReminderEvent> {
    events
        .iter()
        .filter(|event| next_occurrence(event, day) == Some(day))
        .collect()
}

// Day-of-month clamped to the month's length, so the 31st becomes the 30th or 28th.
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}
