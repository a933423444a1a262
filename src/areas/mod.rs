//! Core repository components
//!
//! This module contains the building blocks of a simulated repository:
//!
//! - `config`: Default branch, log limit and prefix-length settings
//! - `database`: Commit table with prefix lookup
//! - `errors`: Precondition and consistency error types
//! - `events`: Change notifications for listeners
//! - `refs`: Branches, tags, remote-tracking refs and HEAD
//! - `repository`: The repository instance and its transaction helper
//! - `stash`: Stack of bookmarked commit ids
//! - `verify`: Consistency invariants checked around every mutation

pub mod config;
pub mod database;
pub mod errors;
pub mod events;
pub mod refs;
pub mod repository;
pub mod stash;
pub(crate) mod verify;
