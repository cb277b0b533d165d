//! Field validators for request payloads.
//!
//! Each validator returns the normalised value or a `ValidationErrorKind`;
//! callers decide whether to propagate or recover.

use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const LIST_LIMIT_MAX: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("Title must be between 1 and 255 characters")]
    TitleLength,
    #[error("Description must be less than 1000 characters")]
    DescriptionTooLong,
    #[error("Position must be a non-negative integer")]
    NegativePosition,
    #[error("A valid email address is required")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("limit must be between 1 and 1000")]
    LimitOutOfRange,
    #[error("order_by must be one of position, createdAt, updatedAt")]
    UnknownOrderField,
    #[error("order_direction must be asc or desc")]
    UnknownOrderDirection,
}

impl ValidationErrorKind {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleLength => "title",
            Self::DescriptionTooLong => "description",
            Self::NegativePosition => "position",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort => "password",
            Self::PasswordMismatch => "confirmPassword",
            Self::LimitOutOfRange => "limit",
            Self::UnknownOrderField => "order_by",
            Self::UnknownOrderDirection => "order_direction",
        }
    }
}

/// Trim and bound a task title. The untrimmed length is bounded too.
pub fn validate_title(title: &str) -> Result<String, ValidationErrorKind> {
    let trimmed = title.trim();
    if trimmed.is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationErrorKind::TitleLength);
    }
    Ok(trimmed.to_string())
}

pub fn validate_description(
    description: Option<String>,
) -> Result<Option<String>, ValidationErrorKind> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => {
            Err(ValidationErrorKind::DescriptionTooLong)
        }
        other => Ok(other),
    }
}

pub fn validate_position(position: Option<i32>) -> Result<Option<i32>, ValidationErrorKind> {
    match position {
        Some(p) if p < 0 => Err(ValidationErrorKind::NegativePosition),
        other => Ok(other),
    }
}

/// Trim and lowercase; the only structural requirement is an `@`.
pub fn normalize_email(email: &str) -> Result<String, ValidationErrorKind> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationErrorKind::InvalidEmail);
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), ValidationErrorKind> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationErrorKind::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_limit(limit: u64) -> Result<u64, ValidationErrorKind> {
    if limit == 0 || limit > LIST_LIMIT_MAX {
        return Err(ValidationErrorKind::LimitOutOfRange);
    }
    Ok(limit)
}
