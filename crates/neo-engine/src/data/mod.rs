//! Decoding of planet, feed and snapshot data, plus the re-poll policy.
//! No I/O happens here; the hosts fetch bytes and hand them in.

pub mod feed;
pub mod planets;
pub mod poll;
pub mod snapshot;
