//! Commit graph objects
//!
//! The simulator stores a single kind of object, the commit. Commits carry
//! no tree or blob content; they only record a message, their parents and
//! some provenance metadata.
//!
//! - `object_id`: opaque 40-hex commit identifiers
//! - `commit`: the immutable commit record and its slim projection

pub mod commit;
pub mod object_id;

/// Length of an object id in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form used when displaying ids
pub const SHORT_OID_LENGTH: usize = 7;
