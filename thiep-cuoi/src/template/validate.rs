//! Required-field validation for card data
//!
//! Each card template carries a JSON object declaring the fields it expects,
//! mapping field name to a human label:
//!
//! ```json
//! {"groom_name": "Tên chú rể", "bride_name": "Tên cô dâu", "wedding_venue": "Địa điểm"}
//! ```
//!
//! Every declared field must be present in the user's data. Declared fields
//! listed in [`MANDATORY_FIELDS`] must also be non-blank; other declared
//! fields may be left empty.

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasher;
use thiserror::Error;

/// Fields that must be non-blank whenever a template declares them
pub const MANDATORY_FIELDS: [&str; 3] = ["groom_name", "bride_name", "wedding_date"];

/// Strip leading and trailing characters at or below U+0020
///
/// Covers ASCII spaces, tabs, newlines and other control characters. Unicode
/// spaces such as U+00A0 or U+3000 are content and are kept.
///
/// # Examples
///
/// ```rust
/// use thiep_cuoi::template::trim_space;
///
/// assert_eq!(trim_space("\t groom_name \n"), "groom_name");
/// assert_eq!(trim_space("\u{a0}"), "\u{a0}");
/// ```
#[must_use]
pub fn trim_space(value: &str) -> &str {
    value.trim_matches(|c: char| c <= ' ')
}

/// Whether `value` is empty after [`trim_space`]
#[must_use]
pub fn is_blank(value: &str) -> bool {
    trim_space(value).is_empty()
}

/// Reason a data mapping was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// The required-field declaration is not a JSON object
    #[error("Required-field declaration is not a JSON object: {0}")]
    MalformedDeclaration(String),

    /// A declared field is absent from the data
    #[error("Missing declared field: {0}")]
    MissingField(String),

    /// A mandatory field is present but blank
    #[error("Mandatory field is blank: {0}")]
    BlankMandatoryField(String),
}

/// Parse a required-field declaration into its declared field names
///
/// Labels are ignored; only the key set matters.
///
/// # Errors
///
/// Returns [`ValidationFailure::MalformedDeclaration`] if `json` is not a
/// JSON object.
pub fn declared_fields(json: &str) -> Result<Vec<String>, ValidationFailure> {
    serde_json::from_str::<Map<String, Value>>(json)
        .map(|declaration| declaration.into_iter().map(|(field, _)| field).collect())
        .map_err(|e| ValidationFailure::MalformedDeclaration(e.to_string()))
}

/// Validator for user-supplied card data
///
/// Holds the set of mandatory field names: always [`MANDATORY_FIELDS`], plus
/// any extras added with [`TemplateDataValidator::with_mandatory`].
#[derive(Debug, Clone)]
pub struct TemplateDataValidator {
    mandatory: BTreeSet<String>,
}

impl Default for TemplateDataValidator {
    fn default() -> Self {
        Self {
            mandatory: MANDATORY_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl TemplateDataValidator {
    /// Create a validator with the built-in mandatory fields
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add extra mandatory field names
    ///
    /// # Examples
    ///
    /// ```rust
    /// use thiep_cuoi::template::TemplateDataValidator;
    ///
    /// let validator = TemplateDataValidator::new().with_mandatory(["wedding_venue"]);
    /// assert!(validator.is_mandatory("wedding_venue"));
    /// assert!(validator.is_mandatory("groom_name"));
    /// ```
    #[must_use]
    pub fn with_mandatory<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.mandatory.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Whether `field` must be non-blank when declared
    #[must_use]
    pub fn is_mandatory(&self, field: &str) -> bool {
        self.mandatory.contains(field)
    }

    /// Check `data` against a required-field declaration, reporting why it fails
    ///
    /// A blank declaration declares nothing and always passes.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationFailure`] found.
    pub fn check<S: BuildHasher>(
        &self,
        required_fields_json: &str,
        data: &HashMap<String, String, S>,
    ) -> Result<(), ValidationFailure> {
        if is_blank(required_fields_json) {
            return Ok(());
        }

        for field in declared_fields(required_fields_json)? {
            let Some(value) = data.get(&field) else {
                return Err(ValidationFailure::MissingField(field));
            };
            if is_blank(value) && self.is_mandatory(&field) {
                return Err(ValidationFailure::BlankMandatoryField(field));
            }
        }

        Ok(())
    }

    /// Whether `data` satisfies a required-field declaration
    ///
    /// Never panics or errors; a malformed declaration simply fails.
    #[must_use]
    pub fn validate<S: BuildHasher>(
        &self,
        required_fields_json: &str,
        data: &HashMap<String, String, S>,
    ) -> bool {
        self.check(required_fields_json, data).is_ok()
    }
}

/// Validate `data` with the built-in mandatory fields
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use thiep_cuoi::template::validate;
///
/// let data = HashMap::from([("groom_name".to_string(), "Minh".to_string())]);
/// assert!(validate(r#"{"groom_name": "Tên chú rể"}"#, &data));
/// assert!(!validate("not json", &data));
/// assert!(validate("", &HashMap::<String, String>::new()));
/// ```
#[must_use]
pub fn validate<S: BuildHasher>(required_fields_json: &str, data: &HashMap<String, String, S>) -> bool {
    TemplateDataValidator::default().validate(required_fields_json, data)
}
