// src/types/job.rs
//! Job records as the backend sends them: a loose bag of optional fields

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const UNTITLED_ROLE: &str = "Untitled Role";

// ===== Field Aliases =====

/// Field names that may carry a job's title, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAliases(Vec<String>);

impl FieldAliases {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self::new(["title", "name", "position", "role", "job_title"])
    }
}

// ===== Job Identity =====

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ===== Job Record =====

/// One job posting. Every field is optional and unknown fields survive a
/// save/load cycle untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job(Map<String, Value>);

impl Job {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Text of a field, or `None` when it is absent, null or empty.
    pub fn text(&self, name: &str) -> Option<String> {
        self.0.get(name).and_then(value_text).filter(|s| !s.is_empty())
    }

    /// Server supplied id, stringified. Empty strings, zero and
    /// non-scalar values count as missing.
    pub fn raw_id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    (i != 0).then(|| i.to_string())
                } else if let Some(u) = n.as_u64() {
                    (u != 0).then(|| u.to_string())
                } else {
                    n.as_f64().filter(|f| *f != 0.0).map(format_float)
                }
            }
            _ => None,
        }
    }

    /// First non-empty title-like field, or the placeholder.
    pub fn title(&self, aliases: &FieldAliases) -> String {
        aliases
            .names()
            .find_map(|name| self.text(name))
            .unwrap_or_else(|| UNTITLED_ROLE.to_string())
    }

    pub fn company(&self) -> Option<String> {
        self.text("company")
    }

    pub fn location(&self) -> Option<String> {
        self.text("location")
    }

    pub fn url(&self) -> Option<String> {
        self.text("url")
    }

    pub fn posted_at(&self) -> Option<String> {
        self.text("posted_at")
    }

    pub fn description(&self) -> Option<String> {
        self.text("description")
    }

    pub fn skills(&self) -> Vec<String> {
        self.list("skills")
    }

    pub fn hard_matches(&self) -> Vec<String> {
        self.list("hard_matches")
    }

    pub fn soft_matches(&self) -> Vec<String> {
        self.list("soft_matches")
    }

    fn list(&self, name: &str) -> Vec<String> {
        match self.0.get(name) {
            Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for Job {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => format_float(f),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
