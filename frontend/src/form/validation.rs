use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::form::draft::{ApplicationDraft, Field};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("{} doesn't look like a valid address", .0.label())]
    Malformed(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) | ValidationError::Malformed(field) => *field,
        }
    }
}

pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email.trim())
}

/// Checks the fields an application cannot be sent without.
///
/// Phone, experience, interests, message and consent are optional and never
/// produce errors.
pub fn validate(draft: &ApplicationDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.first_name.trim().is_empty() {
        errors.push(ValidationError::Required(Field::FirstName));
    }
    if draft.last_name.trim().is_empty() {
        errors.push(ValidationError::Required(Field::LastName));
    }
    if draft.email.trim().is_empty() {
        errors.push(ValidationError::Required(Field::Email));
    } else if !is_email_shaped(&draft.email) {
        errors.push(ValidationError::Malformed(Field::Email));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ApplicationDraft {
        ApplicationDraft {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            ..ApplicationDraft::default()
        }
    }

    #[test]
    fn complete_draft_has_no_errors() {
        assert!(validate(&complete()).is_empty());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = validate(&ApplicationDraft::default());
        assert_eq!(
            errors,
            vec![
                ValidationError::Required(Field::FirstName),
                ValidationError::Required(Field::LastName),
                ValidationError::Required(Field::Email),
            ]
        );
        assert_eq!(errors[0].to_string(), "First name is required");
    }

    #[test]
    fn whitespace_only_names_are_missing() {
        let draft = ApplicationDraft {
            last_name: "   ".to_string(),
            ..complete()
        };
        assert_eq!(validate(&draft), vec![ValidationError::Required(Field::LastName)]);
    }

    #[test]
    fn malformed_email_is_reported() {
        let draft = ApplicationDraft {
            email: "grace.navy.mil".to_string(),
            ..complete()
        };
        let errors = validate(&draft);
        assert_eq!(errors, vec![ValidationError::Malformed(Field::Email)]);
        assert_eq!(errors[0].field(), Field::Email);
    }

    #[test]
    fn email_shape() {
        assert!(is_email_shaped("ada@example.com"));
        assert!(is_email_shaped(" ada@example.co.uk "));
        assert!(!is_email_shaped("ada@example"));
        assert!(!is_email_shaped("ada @example.com"));
        assert!(!is_email_shaped("@example.com"));
        assert!(!is_email_shaped("ada@@example.com"));
    }
}
