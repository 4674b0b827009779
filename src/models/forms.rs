use serde::Serialize;
use thiserror::Error;

use super::types::{Category, Warning, WarningStatus};
use crate::constants::{
    DEFAULT_CATEGORY_ID, MAX_COMMENT_LEN, MIN_DESCRIPTION_LEN, MIN_EDITED_WARNING_SIGNS_LEN,
    MIN_PASSWORD_LEN, MIN_TITLE_LEN, MIN_WARNING_SIGNS_LEN,
};

/// A form field failed a client-side check; the message is user-facing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Login form
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() {
            return Err(ValidationError::new("Please enter your email"));
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::new("Please enter your password"));
        }
        Ok(())
    }
}

/// Account registration form
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::new("Please enter a username"));
        }
        if self.email.is_empty() {
            return Err(ValidationError::new("Please enter your email"));
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::new("Please enter a password"));
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// Report form for a new warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarning {
    pub title: String,
    pub description: String,
    pub warning_signs: String,
    pub category_id: Option<i64>,
}

impl NewWarning {
    pub fn new(title: &str, description: &str, warning_signs: &str, category_id: Option<i64>) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            warning_signs: warning_signs.trim().to_string(),
            category_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_warning_text(
            &self.title,
            &self.description,
            &self.warning_signs,
            MIN_WARNING_SIGNS_LEN,
        )?;
        if self.category_id.is_none() {
            return Err(ValidationError::new("Please select a category"));
        }
        Ok(())
    }
}

/// Moderator edit of an existing warning; sent whole, not as a patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningUpdate {
    pub title: String,
    pub description: String,
    pub warning_signs: String,
    pub category_id: i64,
    pub status: WarningStatus,
}

impl WarningUpdate {
    /// Pre-fill the edit form from a warning as listed by the admin endpoint
    ///
    /// The admin listing carries only the category name, so the id is looked
    /// up in `categories` and falls back to [`DEFAULT_CATEGORY_ID`].
    pub fn from_warning(warning: &Warning, categories: &[Category]) -> Self {
        let category_id = warning
            .category_id
            .or_else(|| {
                let name = warning.category_name.as_deref()?;
                categories.iter().find(|c| c.name == name).map(|c| c.id)
            })
            .unwrap_or(DEFAULT_CATEGORY_ID);

        Self {
            title: warning.title.clone(),
            description: warning.description.clone(),
            warning_signs: warning.warning_signs.clone(),
            category_id,
            status: warning.status,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_warning_text(
            &self.title,
            &self.description,
            &self.warning_signs,
            MIN_EDITED_WARNING_SIGNS_LEN,
        )
    }
}

fn check_warning_text(
    title: &str,
    description: &str,
    warning_signs: &str,
    min_signs: usize,
) -> Result<(), ValidationError> {
    if char_len(title.trim()) < MIN_TITLE_LEN {
        return Err(ValidationError::new(format!(
            "Title must be at least {} characters",
            MIN_TITLE_LEN
        )));
    }
    if char_len(description.trim()) < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::new(format!(
            "Description must be at least {} characters",
            MIN_DESCRIPTION_LEN
        )));
    }
    if char_len(warning_signs.trim()) < min_signs {
        return Err(ValidationError::new(format!(
            "Warning signs must be at least {} characters",
            min_signs
        )));
    }
    Ok(())
}

/// Trim a comment and check it is postable; returns the text to send
pub fn validate_comment(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Please enter a comment"));
    }
    if char_len(trimmed) > MAX_COMMENT_LEN {
        return Err(ValidationError::new(format!(
            "Comment must be at most {} characters",
            MAX_COMMENT_LEN
        )));
    }
    Ok(trimmed.to_string())
}
