use crate::core::formatter::CurrencyFormatter;
use crate::domain::model::{MaintenanceInput, MaintenanceResult};
use crate::domain::ports::Clock;
use crate::utils::error::{MaintenanceError, Result};
use chrono::{Days, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SHARE_BASE_URL: &str = "https://wa.me/";
pub const DEFAULT_DUE_IN_DAYS: u64 = 7;

/// Characters left as-is in the message text; matches JavaScript's `encodeURIComponent`.
const MESSAGE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Click-to-chat endpoint; the recipient number is appended as a path segment.
    pub base_url: String,
    pub due_in_days: u64,
    pub default_phone: Option<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            due_in_days: DEFAULT_DUE_IN_DAYS,
            default_phone: None,
        }
    }
}

/// Composes the text summary sent to residents.
pub struct ShareMessageBuilder<'a> {
    formatter: &'a CurrencyFormatter,
    clock: &'a dyn Clock,
    due_in_days: u64,
}

impl<'a> ShareMessageBuilder<'a> {
    pub fn new(formatter: &'a CurrencyFormatter, clock: &'a dyn Clock) -> Self {
        Self {
            formatter,
            clock,
            due_in_days: DEFAULT_DUE_IN_DAYS,
        }
    }

    pub fn with_due_in_days(mut self, days: u64) -> Self {
        self.due_in_days = days;
        self
    }

    pub fn build(
        &self,
        input: &MaintenanceInput,
        result: &MaintenanceResult,
        due_date: Option<NaiveDate>,
    ) -> String {
        let today = self.clock.today();
        let due_date = due_date.unwrap_or_else(|| {
            today
                .checked_add_days(Days::new(self.due_in_days))
                .unwrap_or(today)
        });
        let fmt = |amount: u64| self.formatter.format_currency(amount);

        let lines = [
            format!(
                "🏠 *Apartment Maintenance – {}*",
                self.formatter.month_label(today)
            ),
            String::new(),
            format!("💡 Electricity: {}", fmt(input.electricity)),
            format!("🚰 Water: {}", fmt(input.water)),
            format!("👮 Watchman: {}", fmt(input.watchman)),
            format!("🗑️ Garbage: {}", fmt(input.garbage)),
            String::new(),
            format!("📊 *Total Expense:* {}", fmt(result.total_expense)),
            format!(
                "💰 *Maintenance Per Flat:* {}",
                fmt(result.rounded_cost_per_flat)
            ),
            format!(
                "🏦 *Miscellaneous Fund Added:* {}",
                self.formatter.format_currency(result.surplus)
            ),
            String::new(),
            format!(
                "📅 Please complete payment by: *{}*",
                self.formatter.format_date(due_date)
            ),
            String::new(),
            "Thank you 😊".to_string(),
        ];

        lines.join("\n")
    }
}

pub fn build_share_message(
    input: &MaintenanceInput,
    result: &MaintenanceResult,
    due_date: Option<NaiveDate>,
    clock: &dyn Clock,
    formatter: &CurrencyFormatter,
) -> String {
    ShareMessageBuilder::new(formatter, clock).build(input, result, due_date)
}

/// Click-to-chat link on the default endpoint.
pub fn build_share_link(message: &str, phone_number: Option<&str>) -> Result<String> {
    build_share_link_with_base(DEFAULT_SHARE_BASE_URL, message, phone_number)
}

pub fn build_share_link_with_base(
    base_url: &str,
    message: &str,
    phone_number: Option<&str>,
) -> Result<String> {
    let mut url = Url::parse(base_url).map_err(|e| MaintenanceError::InvalidConfigValue {
        field: "share.base_url".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    // a blank recipient means "let the user pick a contact"
    let phone_number = phone_number.map(str::trim).filter(|p| !p.is_empty());
    if let Some(phone) = phone_number {
        let digits = normalize_phone(phone)?;
        url.path_segments_mut()
            .map_err(|_| MaintenanceError::InvalidConfigValue {
                field: "share.base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot take a recipient path".to_string(),
            })?
            .pop_if_empty()
            .push(&digits);
    }

    url.set_query(None);
    url.set_fragment(None);
    let mut link: String = url.into();
    link.push_str("?text=");
    link.extend(utf8_percent_encode(message, MESSAGE_SAFE));
    Ok(link)
}

/// Strips spaces, dashes, parentheses and a leading `+`; the rest must be digits.
pub fn normalize_phone(phone: &str) -> Result<String> {
    let trimmed = phone.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(MaintenanceError::validation(
            "phone",
            format!("'{}' is not a valid phone number", phone),
        ));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::calculate;
    use crate::core::clock::FixedClock;

    fn sample() -> (MaintenanceInput, MaintenanceResult) {
        let input = MaintenanceInput {
            electricity: 5000,
            water: 2000,
            watchman: 8000,
            garbage: 1500,
            number_of_flats: 12,
        };
        let result = calculate(&input, 500).unwrap();
        (input, result)
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_message_contains_formatted_totals() {
        let (input, result) = sample();
        let formatter = CurrencyFormatter::default();
        let message = build_share_message(&input, &result, None, &clock(), &formatter);

        assert!(message.contains("₹1,500"));
        assert!(message.contains("₹16,500"));
        assert!(message.contains("💡 Electricity: ₹5,000"));
        assert!(message.contains("👮 Watchman: ₹8,000"));
        assert!(message.starts_with("🏠 *Apartment Maintenance – October 2026*"));
        assert!(message.ends_with("Thank you 😊"));
    }

    #[test]
    fn test_due_date_defaults_to_a_week_after_today() {
        let (input, result) = sample();
        let formatter = CurrencyFormatter::default();
        let message = build_share_message(&input, &result, None, &clock(), &formatter);

        assert!(message.contains("Please complete payment by: *23 October 2026*"));
    }

    #[test]
    fn test_explicit_due_date_wins() {
        let (input, result) = sample();
        let formatter = CurrencyFormatter::default();
        let due = NaiveDate::from_ymd_opt(2026, 11, 1);
        let message = build_share_message(&input, &result, due, &clock(), &formatter);

        assert!(message.contains("*1 November 2026*"));
    }

    #[test]
    fn test_custom_due_window_crosses_month() {
        let (input, result) = sample();
        let formatter = CurrencyFormatter::default();
        let clock = clock();
        let message = ShareMessageBuilder::new(&formatter, &clock)
            .with_due_in_days(20)
            .build(&input, &result, None);

        assert!(message.contains("*5 November 2026*"));
        assert!(message.contains("Apartment Maintenance – October 2026"));
    }

    #[test]
    fn test_negative_surplus_is_rendered_with_sign() {
        let input = MaintenanceInput {
            electricity: 1100,
            water: 1100,
            watchman: 1100,
            garbage: 1100,
            number_of_flats: 4,
        };
        let result = calculate(&input, 500).unwrap();
        let formatter = CurrencyFormatter::default();
        let message = build_share_message(&input, &result, None, &clock(), &formatter);

        assert!(message.contains("*Miscellaneous Fund Added:* -₹400"));
    }

    #[test]
    fn test_generic_link_without_phone() {
        let link = build_share_link("Hello world", None).unwrap();
        assert_eq!(link, "https://wa.me/?text=Hello%20world");
    }

    #[test]
    fn test_link_with_phone() {
        let link = build_share_link("Hi", Some("+91 98765-43210")).unwrap();
        assert_eq!(link, "https://wa.me/919876543210?text=Hi");
    }

    #[test]
    fn test_link_encodes_message() {
        let link = build_share_link("a&b=c\n₹", None).unwrap();
        assert_eq!(link, "https://wa.me/?text=a%26b%3Dc%0A%E2%82%B9");
    }

    #[test]
    fn test_link_leaves_unreserved_marks_alone() {
        let link = build_share_link("Pay (now)! ~it's *due*", None).unwrap();
        assert_eq!(link, "https://wa.me/?text=Pay%20(now)!%20~it's%20*due*");
    }

    #[test]
    fn test_blank_phone_gives_generic_link() {
        assert_eq!(build_share_link("Hi", Some("")).unwrap(), "https://wa.me/?text=Hi");
        assert_eq!(build_share_link("Hi", Some("   ")).unwrap(), "https://wa.me/?text=Hi");
    }

    #[test]
    fn test_invalid_phone_is_rejected() {
        assert!(build_share_link("Hi", Some("call me")).is_err());
        assert!(build_share_link("Hi", Some("+-()")).is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = build_share_link_with_base("not a url", "Hi", None).unwrap_err();
        assert!(matches!(err, MaintenanceError::InvalidConfigValue { .. }));
    }
}
