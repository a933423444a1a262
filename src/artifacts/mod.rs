//! Repository data structures and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `core`: Output helpers (pager writer)
//! - `graph`: Ancestry walks, merge-base search and graph layout
//! - `log`: Commit history traversal
//! - `objects`: Commit and object id types
//! - `snapshot`: Independent copies of the repository for renderers
//! - `status`: Repository status summary

pub mod branch;
pub mod core;
pub mod graph;
pub mod log;
pub mod objects;
pub mod snapshot;
pub mod status;
