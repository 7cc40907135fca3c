//! Core domain types
//!
//! These types describe a simulation run as seen by the CI step: its status,
//! the counters reported by the evaluation service and the final verdict.

pub mod run;
pub mod verdict;
