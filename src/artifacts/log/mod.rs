//! Commit history traversal for `log`
//!
//! The walk starts at a tip and visits every parent of every commit,
//! breadth first, so both sides of a merge show up. Each commit is listed
//! once even when several paths lead to it.

pub mod rev_list;
