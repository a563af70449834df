use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How digits left of the decimal point are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// 12,34,567: last three digits, then pairs.
    Indian,
    /// 1,234,567
    Western,
}

/// Pinned locale settings. Output never depends on the process environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub locale: String,
    pub currency_symbol: String,
    pub grouping: Grouping,
    pub group_separator: String,
    /// chrono pattern for the month heading of the share message
    pub month_label_format: String,
    /// chrono pattern for due dates
    pub date_format: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::en_in()
    }
}

impl LocaleConfig {
    pub fn en_in() -> Self {
        Self {
            locale: "en-IN".to_string(),
            currency_symbol: "₹".to_string(),
            grouping: Grouping::Indian,
            group_separator: ",".to_string(),
            month_label_format: "%B %Y".to_string(),
            date_format: "%-d %B %Y".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurrencyFormatter {
    locale: LocaleConfig,
}

impl CurrencyFormatter {
    pub fn new(locale: LocaleConfig) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    /// Whole-unit currency text, e.g. `₹1,500` or `-₹400`. Accepts any
    /// integer amount, signed or unsigned, without clamping.
    pub fn format_currency(&self, amount: impl Into<i128>) -> String {
        let amount: i128 = amount.into();
        let digits = amount.unsigned_abs().to_string();
        let grouped = group_digits(&digits, self.locale.grouping, &self.locale.group_separator);
        let sign = if amount < 0 { "-" } else { "" };
        format!("{}{}{}", sign, self.locale.currency_symbol, grouped)
    }

    /// Rounds half away from zero to whole units before formatting.
    pub fn format_fractional(&self, amount: f64) -> String {
        self.format_currency(amount.round() as i128)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.locale.date_format).to_string()
    }

    pub fn month_label(&self, date: NaiveDate) -> String {
        date.format(&self.locale.month_label_format).to_string()
    }
}

fn group_digits(digits: &str, grouping: Grouping, separator: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_group = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(head_group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_en_in() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format_currency(1500), "₹1,500");
        assert_eq!(formatter.format_currency(0), "₹0");
        assert_eq!(formatter.format_currency(999), "₹999");
        assert_eq!(formatter.format_currency(16500), "₹16,500");
        assert_eq!(formatter.format_currency(100000), "₹1,00,000");
        assert_eq!(formatter.format_currency(12345678), "₹1,23,45,678");
    }

    #[test]
    fn test_format_amounts_beyond_i64() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(
            formatter.format_currency(10_000_000_000_000_000_000u64),
            "₹1,00,00,00,00,00,00,00,00,000"
        );
        assert_eq!(formatter.format_currency(i64::MIN), "-₹92,23,37,20,36,85,47,75,808");
    }

    #[test]
    fn test_format_negative_amount() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format_currency(-400), "-₹400");
        assert_eq!(formatter.format_currency(-1500), "-₹1,500");
    }

    #[test]
    fn test_western_grouping() {
        let formatter = CurrencyFormatter::new(LocaleConfig {
            locale: "en-US".to_string(),
            currency_symbol: "$".to_string(),
            grouping: Grouping::Western,
            ..LocaleConfig::default()
        });
        assert_eq!(formatter.format_currency(1234567), "$1,234,567");
        assert_eq!(formatter.format_currency(100000), "$100,000");
    }

    #[test]
    fn test_format_fractional_rounds_half_away() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format_fractional(1374.5), "₹1,375");
        assert_eq!(formatter.format_fractional(1374.49), "₹1,374");
        assert_eq!(formatter.format_fractional(-0.5), "-₹1");
    }

    #[test]
    fn test_dates_use_pinned_patterns() {
        let formatter = CurrencyFormatter::default();
        let date = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();
        assert_eq!(formatter.format_date(date), "23 October 2026");
        assert_eq!(formatter.month_label(date), "October 2026");
    }
}
