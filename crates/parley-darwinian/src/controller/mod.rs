//! Time-pressure concession controller
pub mod schedule;

pub use self::schedule::ConcessionSchedule;
