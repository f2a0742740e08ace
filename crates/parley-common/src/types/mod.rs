//! Core data types for the negotiation domain

pub mod bid;
pub mod issue;
pub mod ranking;
pub mod utility;
