use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    #[error("Title cannot be empty or contain only whitespace")]
    EmptyTitle,
    #[error("Title must be between 1 and {TITLE_MAX_CHARS} characters, got {0}")]
    TitleTooLong(usize),
    #[error("Description must be {DESCRIPTION_MAX_CHARS} characters or less, got {0}")]
    DescriptionTooLong(usize),
}

/// Trimmed title of 1..=200 characters.
pub fn validate_title(title: &str) -> Result<String, ValidationErrorKind> {
    let title = title.trim();
    let len = title.chars().count();
    if len == 0 {
        return Err(ValidationErrorKind::EmptyTitle);
    }
    if len > TITLE_MAX_CHARS {
        return Err(ValidationErrorKind::TitleTooLong(len));
    }
    Ok(title.to_string())
}

/// Length is checked before trimming; the stored value is trimmed.
pub fn validate_description(description: &str) -> Result<String, ValidationErrorKind> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(ValidationErrorKind::DescriptionTooLong(len));
    }
    Ok(description.trim().to_string())
}
