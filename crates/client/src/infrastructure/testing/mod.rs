//! Simple test fixtures used across unit tests.

mod fixtures;

pub use fixtures::{page_of, raw_record};
