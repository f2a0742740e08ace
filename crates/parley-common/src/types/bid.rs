//! Bid - a complete assignment of one value to every issue
//!
//! Bids are immutable value objects. Deriving a bid from another one always
//! produces a new instance through [`Bid::with_overrides`].

use serde::{Deserialize, Serialize};

use super::issue::{Domain, Value};
use crate::error::{DomainError, Result};

/// One value per issue, stored in domain issue order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    values: Vec<Value>,
}

impl Bid {
    /// Create a bid, checking arity and value membership against the domain
    pub fn new(domain: &Domain, values: Vec<Value>) -> Result<Self> {
        if values.len() != domain.issue_count() {
            return Err(DomainError::InvalidBid(format!(
                "expected {} values, got {}",
                domain.issue_count(),
                values.len()
            ))
            .into());
        }

        for (issue, value) in domain.issues.iter().zip(&values) {
            if !issue.values()?.contains(value) {
                return Err(DomainError::UnknownValue {
                    issue: issue.name.clone(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        Ok(Self { values })
    }

    /// Convenience constructor from string slices
    pub fn from_strs(domain: &Domain, values: &[&str]) -> Result<Self> {
        Self::new(domain, values.iter().map(|v| Value::from(*v)).collect())
    }

    /// Build a new bid from this one with the given `(issue index, value)` overrides applied
    ///
    /// Out-of-range indices are ignored; values are taken as-is, so callers
    /// must draw them from the issue's own value set.
    pub fn with_overrides(&self, overrides: impl IntoIterator<Item = (usize, Value)>) -> Self {
        let mut values = self.values.clone();
        for (index, value) in overrides {
            if let Some(slot) = values.get_mut(index) {
                *slot = value;
            }
        }
        Self { values }
    }

    /// Value assigned to the issue at `index`
    #[inline]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Display for Bid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bid[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::issue::Issue;
    use crate::ParleyError;

    fn domain() -> Domain {
        Domain::new(
            "laptop",
            vec![
                Issue::discrete(1, "brand", ["dell", "mac", "hp"]),
                Issue::discrete(2, "disk", ["256", "512"]),
                Issue::discrete(3, "screen", ["13", "15", "17"]),
            ],
        )
    }

    #[test]
    fn test_bid_validation() {
        let domain = domain();
        assert!(Bid::from_strs(&domain, &["mac", "512", "13"]).is_ok());

        let err = Bid::from_strs(&domain, &["mac", "512"]).unwrap_err();
        assert!(matches!(err, ParleyError::Domain(DomainError::InvalidBid(_))));

        let err = Bid::from_strs(&domain, &["mac", "1024", "13"]).unwrap_err();
        assert!(matches!(err, ParleyError::Domain(DomainError::UnknownValue { .. })));
    }

    #[test]
    fn test_with_overrides_creates_new_bid() {
        let domain = domain();
        let base = Bid::from_strs(&domain, &["mac", "512", "13"]).unwrap();
        let derived = base.with_overrides([(0, Value::from("hp")), (2, Value::from("17"))]);

        assert_eq!(base.value(0), Some(&Value::from("mac")));
        assert_eq!(derived.value(0), Some(&Value::from("hp")));
        assert_eq!(derived.value(1), Some(&Value::from("512")));
        assert_eq!(derived.value(2), Some(&Value::from("17")));
        assert_eq!(derived.len(), base.len());
    }

    #[test]
    fn test_equality_and_display() {
        let domain = domain();
        let a = Bid::from_strs(&domain, &["dell", "256", "15"]).unwrap();
        let b = a.with_overrides(std::iter::empty());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Bid[dell, 256, 15]");
    }
}
