//! Repository status summary
//!
//! There is no working tree to inspect, so status reports the checkout
//! position (HEAD, detachment and tip), the branch list and the stash depth.

pub mod status_info;
