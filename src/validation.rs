use thiserror::Error;

use crate::record::UserInput;

/// A failed validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Age is required")]
    AgeRequired,
    #[error("Age must be a positive number")]
    InvalidAge,
}

/// Run every rule in order and collect all failures.
///
/// Rules are independent: a failing name check does not stop the email and age
/// checks. The two email rules, and likewise the two age rules, are exclusive.
/// An age must be a non-negative number with a whole-year reading that fits
/// in a `u64`.
pub fn validate(input: &UserInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.name.as_deref().map_or(true, str::is_empty) {
        errors.push(ValidationError::NameRequired);
    }

    match input.email.as_deref() {
        None | Some("") => errors.push(ValidationError::EmailRequired),
        Some(email) if !email.contains('@') => errors.push(ValidationError::InvalidEmailFormat),
        Some(_) => {}
    }

    match &input.age {
        Some(age) if !age.is_blank() => {
            let numeric = age.as_number().is_some_and(|n| n >= 0.0);
            if !numeric || age.as_integer().is_none() {
                errors.push(ValidationError::InvalidAge);
            }
        }
        _ => errors.push(ValidationError::AgeRequired),
    }

    errors
}
