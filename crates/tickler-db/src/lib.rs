//! Task persistence for tickler.
//!
//! Storage is reached through the [`db::TaskStore`] trait so callers receive
//! an explicit handle instead of a global connection. Two stores exist: a
//! Postgres store on a bb8 pool and an in-process store.

pub mod db;
pub mod error;
pub mod model;
