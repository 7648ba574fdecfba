// src/validation.rs
use std::collections::BTreeMap;

/// Field name to message, reported back as `validation_errors`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless an earlier rule already failed it.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Fails `field` when it is missing or whitespace-only.
    pub fn required(&mut self, field: &str, value: Option<&str>, message: &str) {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.add(field, message);
        }
    }

    /// Fails `field` when it is longer than `max` characters. Missing values pass.
    pub fn max_chars(&mut self, field: &str, value: Option<&str>, max: usize, message: &str) {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    /// `Ok(())` when nothing failed.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_per_field_wins() {
        let mut errors = FieldErrors::new();
        let padded = " ".repeat(10);
        errors.required("content", Some(padded.as_str()), "required");
        errors.max_chars("content", Some(padded.as_str()), 5, "too long");
        assert_eq!(errors.get("content"), Some("required"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut errors = FieldErrors::new();
        errors.max_chars("sender", Some("ééééé"), 5, "too long");
        assert!(errors.is_empty());
        errors.max_chars("sender", Some("éééééé"), 5, "too long");
        assert_eq!(errors.get("sender"), Some("too long"));
    }

    #[test]
    fn missing_value_is_required_but_not_too_long() {
        let mut errors = FieldErrors::new();
        errors.max_chars("sender", None, 5, "too long");
        assert!(errors.clone().finish().is_ok());
        errors.required("sender", None, "required");
        assert_eq!(errors.finish().unwrap_err().get("sender"), Some("required"));
    }
}
