use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use ::validator::{ValidateEmail, ValidateUrl};

/// Digits with optional spacing, dashes, dots, parentheses and a leading `+`.
pub static PHONE_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").unwrap());

/// Per-request accumulator of field-level validation failures. Only the
/// first failure recorded for a field is kept.
#[derive(Debug, Default)]
pub struct Validator {
    pub errors: HashMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no rule has failed so far.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record `message` under `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

pub fn is_url(value: &str) -> bool {
    value.validate_url()
}

/// Case-sensitive membership test, used for sort safelists.
pub fn permitted(value: &str, list: &[String]) -> bool {
    list.iter().any(|candidate| candidate == value)
}

pub fn unique(values: &[String]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value.as_str()))
}
