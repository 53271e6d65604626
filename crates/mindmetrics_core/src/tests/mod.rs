//! Cross-module tests for the metrics engine
//!
//! Tests are organized by topic:
//! - `fixtures` - Synthetic survey generator shared by the topics below
//! - `rates` - End-to-end aggregate rate scenarios
//! - `correlation` - Matrix properties and encoding determinism
//! - `risk` - Composite score extremes
//! - `projections` - Parameter boundary and monotonicity checks

mod fixtures;
mod projections;
