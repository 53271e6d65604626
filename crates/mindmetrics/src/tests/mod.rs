//! Front-end tests
//!
//! Tests are organized by topic:
//! - `loader` - Dataset and scenario files on disk
//! - `report` - Page assembly and rendering

mod loader;
