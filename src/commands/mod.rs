//! Command implementations for the Airlift CLI

pub mod clean_cache;
pub mod completions;
pub mod mirror;
pub mod resolve;
pub mod retag;
pub mod save;
pub mod version;
