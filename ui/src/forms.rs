//! Contact-form field validation with localized messages.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::i18n::TranslationStore;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("valid phone pattern"));

/// Input kinds with their own format rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
}

impl FieldKind {
    /// From an `<input type=…>` value; anything unrecognised is plain text.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Tel,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl FieldError {
    pub fn message_key(self) -> &'static str {
        match self {
            Self::Required => "form_error_required",
            Self::InvalidEmail => "form_error_email",
            Self::InvalidPhone => "form_error_phone",
        }
    }

    pub fn message(self, store: &TranslationStore) -> &str {
        store.lookup(self.message_key())
    }
}

/// Validate one field value. Surrounding whitespace is ignored and format
/// rules only apply to non-empty values.
pub fn validate_field(kind: FieldKind, required: bool, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return if required { Err(FieldError::Required) } else { Ok(()) };
    }
    match kind {
        FieldKind::Email if !EMAIL.is_match(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !PHONE.is_match(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Outcome of checking a form's required fields on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// Failing fields by position, in the order they were given.
    Rejected(Vec<(usize, FieldError)>),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Position of the field that should receive focus.
    pub fn first_failure(&self) -> Option<usize> {
        match self {
            Self::Accepted => None,
            Self::Rejected(failures) => failures.first().map(|(index, _)| *index),
        }
    }
}

/// Check every required field of a form. All fields are checked, not just
/// up to the first failure, so each one can show its own message.
pub fn review_submission<'v>(fields: impl IntoIterator<Item = (FieldKind, &'v str)>) -> Submission {
    let failures: Vec<_> = fields
        .into_iter()
        .enumerate()
        .filter_map(|(index, (kind, value))| {
            validate_field(kind, true, value).err().map(|err| (index, err))
        })
        .collect();
    if failures.is_empty() {
        Submission::Accepted
    } else {
        Submission::Rejected(failures)
    }
}

/// Confirmation shown after a successful submission.
pub fn success_message(store: &TranslationStore) -> &str {
    store.lookup("form_success")
}
