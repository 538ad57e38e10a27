//! Task use cases shared by every tickler front end.

pub mod error;
pub mod task;
