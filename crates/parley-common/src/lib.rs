//! # Parley Common
//!
//! Shared domain model and errors for the Parley bilateral negotiation agent.
//!
//! ## Core Types
//!
//! - [`Domain`]: the negotiated issues and their discrete values
//! - [`Bid`]: an immutable assignment of one value to every issue
//! - [`AdditiveUtility`]: weighted sum of per-issue value evaluations
//! - [`BidRanking`]: elicited partial order over a sample of bids
//!
//! ## Errors
//!
//! - [`ParleyError`]: unified error type for every Parley crate

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DomainError, ParleyError, Result};
pub use types::{
    bid::Bid,
    issue::{Domain, Issue, IssueKind, Value},
    ranking::BidRanking,
    utility::{AdditiveUtility, IssueEvaluator},
};

/// Tolerance used when comparing utilities and normalized weights
pub const UTILITY_EPSILON: f64 = 1e-9;
