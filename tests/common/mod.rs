//! Shared fixtures for the integration tests
//!
//! Builds a small scholarly corpus spread over the four system sources:
//! a working set, bookmarks, history and a JSON-file cache.

pub mod corpus;

pub use corpus::{author, work, CorpusBuilder, Fixture};
