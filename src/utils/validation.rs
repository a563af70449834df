use crate::domain::model::MaintenanceInput;
use crate::utils::error::{MaintenanceError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Unparsed text from the calculator form, one entry per field.
#[derive(Debug, Clone, Default)]
pub struct RawForm {
    pub electricity: String,
    pub water: String,
    pub watchman: String,
    pub garbage: String,
    pub number_of_flats: String,
}

struct FormField {
    key: &'static str,
    label: &'static str,
}

const FORM_FIELDS: [FormField; 5] = [
    FormField { key: "electricity", label: "Electricity Bill" },
    FormField { key: "water", label: "Water Bill" },
    FormField { key: "watchman", label: "Watchman Fees" },
    FormField { key: "garbage", label: "Garbage Collection" },
    FormField { key: "number_of_flats", label: "Number of Flats" },
];

impl RawForm {
    fn value(&self, key: &str) -> &str {
        match key {
            "electricity" => &self.electricity,
            "water" => &self.water,
            "watchman" => &self.watchman,
            "garbage" => &self.garbage,
            _ => &self.number_of_flats,
        }
    }
}

/// Validates every field and reports all failures at once, in form order.
pub fn parse_form(form: &RawForm) -> std::result::Result<MaintenanceInput, Vec<MaintenanceError>> {
    let mut errors = Vec::new();
    let mut values = [0u64; 5];

    for (slot, field) in values.iter_mut().zip(FORM_FIELDS.iter()) {
        match parse_positive_field(field.key, field.label, form.value(field.key)) {
            Ok(value) => *slot = value,
            Err(e) => errors.push(e),
        }
    }

    let number_of_flats = match u32::try_from(values[4]) {
        Ok(flats) => flats,
        Err(_) => {
            errors.push(MaintenanceError::validation(
                "number_of_flats",
                "Value is too large",
            ));
            0
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(MaintenanceInput {
        electricity: values[0],
        water: values[1],
        watchman: values[2],
        garbage: values[3],
        number_of_flats,
    })
}

/// Required, digits only, strictly positive.
pub fn parse_positive_field(key: &str, label: &str, raw: &str) -> Result<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(MaintenanceError::validation(
            key,
            format!("Please enter {}", label.to_lowercase()),
        ));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(MaintenanceError::validation(key, "Only digits are allowed"));
    }
    let parsed: u64 = value
        .parse()
        .map_err(|_| MaintenanceError::validation(key, "Value is too large"))?;
    if parsed == 0 {
        return Err(MaintenanceError::validation(key, "Value must be greater than 0"));
    }
    Ok(parsed)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MaintenanceError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MaintenanceError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MaintenanceError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MaintenanceError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MaintenanceError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(MaintenanceError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MaintenanceError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
