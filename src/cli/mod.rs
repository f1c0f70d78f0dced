//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod compare;
mod matches;
mod search;

pub use compare::run_compare;
pub use matches::run_match;
pub use search::run_search;
