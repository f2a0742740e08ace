//! # Parley Agent
//!
//! Decision policy for one bilateral negotiation session.
//!
//! ## Turn
//!
//! ```text
//! no offer received           → Offer(own best bid)
//! u(o) ≥ u_max or o was sent  → Accept(o)
//! otherwise                   → evolve, draw c from the top-K shortlist
//!                               u(c) ≥ u(o) ? Offer(c) : Accept(o)
//! ```
//!
//! Where o is the opponent's last offer and u the estimated own utility.

pub mod action;
pub mod agent;
pub mod config;
pub mod session;

pub use action::{Action, ActionKind};
pub use agent::NegotiationAgent;
pub use config::AgentConfig;
pub use session::{NegotiationPhase, SessionState};

/// Parley version
pub const PARLEY_VERSION: &str = env!("CARGO_PKG_VERSION");
