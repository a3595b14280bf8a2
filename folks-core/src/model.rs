use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person record as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(rename = "person_name")]
    pub name: String,
    pub age: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hobbies: Vec<String>,
    #[serde(rename = "created_date")]
    pub created_at: DateTime<Utc>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque pagination token issued by the server.
///
/// The token already encodes the filter and ordering it was issued for, so a
/// cursor request never carries query parameters of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

impl Cursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of list results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub items: Vec<Person>,
    pub next: Option<Cursor>,
    pub previous: Option<Cursor>,
    /// Total number of records matching the query, across all pages
    pub total_count: u64,
}

impl Page {
    pub fn ids(&self) -> Vec<PersonId> {
        self.items.iter().map(|p| p.id).collect()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Same rows with both cursors dropped
    pub fn without_cursors(&self) -> Page {
        Page {
            items: self.items.clone(),
            next: None,
            previous: None,
            total_count: self.total_count,
        }
    }
}

/// Identifier of a server-side background task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregate age statistics computed by the stats task
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(alias = "media_idade")]
    pub mean_age: f64,
    #[serde(alias = "desvio_padrao")]
    pub stddev_age: f64,
    pub total: u64,
}

/// Status of a background task as last observed
#[derive(Debug, Clone, PartialEq)]
pub enum TaskStatus {
    Pending,
    Succeeded(StatsSummary),
    Failed,
}

/// Payload for creating or updating a person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDraft {
    #[serde(rename = "person_name")]
    pub name: String,
    pub age: u32,
    pub hobbies: Vec<String>,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, age: u32, hobbies: &str) -> Self {
        Self {
            name: name.into(),
            age,
            hobbies: parse_hobbies(hobbies),
        }
    }
}

/// Split a comma-separated hobby list, trimming entries and dropping blanks
pub fn parse_hobbies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}
