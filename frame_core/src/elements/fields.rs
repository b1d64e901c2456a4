//! Raw form fields
//!
//! [`RawFields`] holds the strings a user typed into an element form, keyed
//! by field name. Its accessors implement the normalization rules shared by
//! every element type:
//!
//! - required numbers: blank is `MissingField`, unparsable is `InvalidInput`
//! - material strengths: blank takes the design-code default
//! - loads: blank (or unparsable) is zero, never an error
//! - options: matched case-insensitively against the allowed labels

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{FrameError, FrameResult};

/// A closed set of labelled choices offered by a form (beam type, soil type, ...).
pub trait FormOption: Sized + Copy + 'static {
    /// Every choice, in the order offered to the user
    const ALL: &'static [Self];

    /// Label as shown in the form and sent on the wire
    fn label(&self) -> &'static str;

    /// Case-insensitive match against [`FormOption::label`]
    fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.label().eq_ignore_ascii_case(s))
    }
}

/// Raw string values of one element form.
///
/// # Example
///
/// ```rust
/// use frame_core::elements::RawFields;
///
/// let fields = RawFields::new()
///     .with("width", "30")
///     .with("dead", "");
///
/// assert_eq!(fields.required_positive("width").unwrap(), 30.0);
/// assert_eq!(fields.load("dead"), 0.0);
/// assert!(fields.required_positive("depth").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(BTreeMap<String, String>);

impl RawFields {
    /// Empty form
    pub fn new() -> Self {
        RawFields::default()
    }

    /// Set a field (builder pattern)
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Trimmed value, `None` when absent or blank
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// A required number
    pub fn required_f64(&self, field: &str) -> FrameResult<f64> {
        let raw = self.get(field).ok_or_else(|| FrameError::missing_field(field))?;
        parse_number(field, raw)
    }

    /// A required number that must be greater than zero (geometry)
    pub fn required_positive(&self, field: &str) -> FrameResult<f64> {
        let value = self.required_f64(field)?;
        if value <= 0.0 {
            return Err(FrameError::invalid_input(field, value.to_string(), "must be positive"));
        }
        Ok(value)
    }

    /// A required whole count that must be at least one (bars, steps)
    pub fn required_count(&self, field: &str) -> FrameResult<u32> {
        let raw = self.get(field).ok_or_else(|| FrameError::missing_field(field))?;
        match raw.parse::<u32>() {
            Ok(0) => Err(FrameError::invalid_input(field, raw, "must be at least 1")),
            Ok(count) => Ok(count),
            Err(_) => Err(FrameError::invalid_input(field, raw, "not a whole number")),
        }
    }

    /// An optional count; blank is `None`, anything present must be valid
    pub fn optional_count(&self, field: &str) -> FrameResult<Option<u32>> {
        match self.get(field) {
            Some(_) => self.required_count(field).map(Some),
            None => Ok(None),
        }
    }

    /// An optional positive number with a fallback for blank input
    pub fn positive_or(&self, field: &str, default: f64) -> FrameResult<f64> {
        match self.get(field) {
            Some(_) => self.required_positive(field),
            None => Ok(default),
        }
    }

    /// A material strength: blank takes the code default
    pub fn strength(&self, field: &str, default: f64) -> FrameResult<f64> {
        match self.get(field) {
            Some(_) => self.required_positive(field),
            None => {
                debug!(field, default, "material strength left blank, using code default");
                Ok(default)
            }
        }
    }

    /// A load component: blank or unparsable is zero
    pub fn load(&self, field: &str) -> f64 {
        match self.get(field) {
            Some(raw) => match parse_number(field, raw) {
                Ok(value) => value,
                Err(_) => {
                    warn!(field, raw, "unparsable load treated as zero");
                    0.0
                }
            },
            None => 0.0,
        }
    }

    /// A free-text value, `None` when blank
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// A choice; blank takes `default`, or is `MissingField` when there is none
    pub fn option<T: FormOption>(&self, field: &str, default: Option<T>) -> FrameResult<T> {
        match self.get(field) {
            Some(raw) => T::from_label(raw).ok_or_else(|| {
                let allowed: Vec<&str> = T::ALL.iter().map(|o| o.label()).collect();
                FrameError::invalid_input(field, raw, format!("expected one of: {}", allowed.join(", ")))
            }),
            None => default.ok_or_else(|| FrameError::missing_field(field)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn parse_number(field: &str, raw: &str) -> FrameResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FrameError::invalid_input(field, raw, "not a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Shade {
        Light,
        Dark,
    }

    impl FormOption for Shade {
        const ALL: &'static [Self] = &[Shade::Light, Shade::Dark];

        fn label(&self) -> &'static str {
            match self {
                Shade::Light => "Light",
                Shade::Dark => "Dark",
            }
        }
    }

    #[test]
    fn test_blank_required_is_missing() {
        let fields = RawFields::new().with("width", "   ");
        let err = fields.required_f64("width").unwrap_err();
        assert_eq!(err, FrameError::missing_field("width"));
    }

    #[test]
    fn test_unparsable_required_is_invalid() {
        let fields = RawFields::new().with("width", "thirty");
        let err = fields.required_f64("width").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("width"));

        let fields = RawFields::new().with("width", "NaN");
        assert!(fields.required_f64("width").is_err());
    }

    #[test]
    fn test_positive_geometry() {
        let fields = RawFields::new().with("depth", "0").with("length", "-2");
        assert!(fields.required_positive("depth").is_err());
        assert!(fields.required_positive("length").is_err());
    }

    #[test]
    fn test_counts() {
        let fields = RawFields::new().with("n", "4").with("zero", "0").with("frac", "2.5");
        assert_eq!(fields.required_count("n").unwrap(), 4);
        assert!(fields.required_count("zero").is_err());
        assert!(fields.required_count("frac").is_err());
        assert_eq!(fields.optional_count("absent").unwrap(), None);
    }

    #[test]
    fn test_strength_defaults_only_when_blank() {
        let fields = RawFields::new().with("fy", "500").with("bad", "x");
        assert_eq!(fields.strength("fc", 28.0).unwrap(), 28.0);
        assert_eq!(fields.strength("fy", 420.0).unwrap(), 500.0);
        assert!(fields.strength("bad", 420.0).is_err());
    }

    #[test]
    fn test_loads_never_fail() {
        let fields = RawFields::new().with("dead", "12.5").with("live", "lots");
        assert_eq!(fields.load("dead"), 12.5);
        assert_eq!(fields.load("live"), 0.0);
        assert_eq!(fields.load("snow"), 0.0);
    }

    #[test]
    fn test_options() {
        let fields = RawFields::new().with("shade", "dark").with("other", "purple");
        assert_eq!(fields.option("shade", None::<Shade>).unwrap(), Shade::Dark);
        assert_eq!(fields.option("missing", Some(Shade::Light)).unwrap(), Shade::Light);
        assert!(fields.option::<Shade>("missing", None).is_err());

        let err = fields.option::<Shade>("other", None).unwrap_err();
        assert!(err.to_string().contains("Light, Dark"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let fields: RawFields = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(fields.get("b"), Some("2"));
    }
}
