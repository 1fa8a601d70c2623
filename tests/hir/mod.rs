//! Symbol graph tests
//!
//! - Declaration enumeration and classification
//! - Function, class and property properties
//! - Compute-once memoization under concurrency
//! - Session scoping and stale contexts
//! - Back-references, lookup and the visitor
//! - Unfinished capabilities

pub mod tests_classification;
pub mod tests_sessions;
pub mod tests_unfinished;
pub mod tests_visitor;
