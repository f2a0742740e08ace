//! Issues, values and the negotiation domain
//!
//! A domain is the fixed set of issues both parties negotiate over. Only
//! discrete issues are modeled by the agent; other issue kinds can be
//! described by the host but are rejected at the first capability check.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// A single discrete value of an issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of an issue's value set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueKind {
    /// Finite, enumerable set of values
    Discrete { values: Vec<Value> },
    /// Integer range (not modeled by the agent)
    Integer { min: i64, max: i64 },
    /// Continuous range (not modeled by the agent)
    Real { lower: f64, upper: f64 },
}

impl IssueKind {
    pub fn name(&self) -> &'static str {
        match self {
            IssueKind::Discrete { .. } => "discrete",
            IssueKind::Integer { .. } => "integer",
            IssueKind::Real { .. } => "real",
        }
    }
}

/// A negotiated issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Host-assigned issue number
    pub number: u32,
    /// Human readable name
    pub name: String,
    /// Value set
    pub kind: IssueKind,
}

impl Issue {
    /// Create a discrete issue from its values
    pub fn discrete<V: Into<Value>>(
        number: u32,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            kind: IssueKind::Discrete {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Values of a discrete issue, or `UnsupportedIssueType` for any other kind
    pub fn values(&self) -> Result<&[Value]> {
        match &self.kind {
            IssueKind::Discrete { values } => Ok(values),
            other => Err(DomainError::UnsupportedIssueType {
                issue: self.name.clone(),
                kind: other.name().to_string(),
            }
            .into()),
        }
    }

    /// Position of `value` in the issue's value list
    pub fn position(&self, value: &Value) -> Option<usize> {
        match &self.kind {
            IssueKind::Discrete { values } => values.iter().position(|v| v == value),
            _ => None,
        }
    }
}

/// The set of issues negotiated in one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub issues: Vec<Issue>,
}

impl Domain {
    pub fn new(name: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            name: name.into(),
            issues,
        }
    }

    /// Check that every issue is discrete and has at least one value
    pub fn require_discrete(&self) -> Result<()> {
        for issue in &self.issues {
            let values = issue.values()?;
            if values.is_empty() {
                return Err(DomainError::EmptyIssue(issue.name.clone()).into());
            }
        }
        Ok(())
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn issue(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }
}
