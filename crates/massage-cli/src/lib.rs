//! CLI library components for the county massager.

pub mod logging;
pub mod summary;
