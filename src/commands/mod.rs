//! Repository commands
//!
//! - `porcelain`: the repository model operations, one file per operation
//! - `interpreter`: the text front end mapping command lines onto them

pub mod interpreter;
pub mod porcelain;
