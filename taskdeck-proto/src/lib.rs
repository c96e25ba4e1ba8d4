//! Shared wire definitions for the `Taskdeck` task API.

pub mod codec;
pub mod query;
pub mod task;
