//! Commit DAG algorithms
//!
//! - `ancestry`: reachability queries (ancestors, commits since a boundary)
//! - `bca_finder`: best common ancestor search used by `merge`
//! - `layout`: topological order, rows and lanes for rendering

pub mod ancestry;
pub mod bca_finder;
pub mod layout;
