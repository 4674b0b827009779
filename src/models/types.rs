use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::FALLBACK_CATEGORIES;

/// Identity of the logged-in user, as returned by `/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Moderation state of a warning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for WarningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningStatus::Pending => "Pending",
            WarningStatus::Approved => "Approved",
            WarningStatus::Rejected => "Rejected",
            WarningStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A user-submitted scam report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Comma-delimited on the wire; see [`Warning::sign_list`]
    #[serde(default, deserialize_with = "deserialize_warning_signs")]
    pub warning_signs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: WarningStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
}

impl Warning {
    /// Warning signs as a display list
    pub fn sign_list(&self) -> Vec<String> {
        split_warning_signs(&self.warning_signs)
    }

    pub fn is_approved(&self) -> bool {
        self.status == WarningStatus::Approved
    }
}

/// Split a delimited warning-signs string into trimmed, non-empty entries
pub fn split_warning_signs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// Explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Some service versions send the signs already split into an array.
fn deserialize_warning_signs<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Signs {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Option::<Signs>::deserialize(deserializer)? {
        Some(Signs::Joined(joined)) => joined,
        Some(Signs::List(items)) => items.join(", "),
        None => String::new(),
    })
}

/// A community comment on a warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Comment {
    /// Calendar date of `created_at`, when it is a recognizable timestamp
    pub fn created_on(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.date_naive());
        }
        if let Ok(stamp) = raw.parse::<NaiveDateTime>() {
            return Some(stamp.date());
        }
        raw.parse::<NaiveDate>().ok()
    }
}

/// Static reference data for classifying warnings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    /// Categories to offer when the service list is unavailable
    pub fn fallback_list() -> Vec<Category> {
        FALLBACK_CATEGORIES
            .iter()
            .map(|(id, name)| Category {
                id: *id,
                name: name.to_string(),
            })
            .collect()
    }

    /// Find a category by id or case-insensitive name
    pub fn resolve<'a>(categories: &'a [Category], needle: &str) -> Option<&'a Category> {
        let needle = needle.trim();
        if let Ok(id) = needle.parse::<i64>() {
            return categories.iter().find(|c| c.id == id);
        }
        categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(needle))
    }
}
