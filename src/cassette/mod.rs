//! Cassettes: recorded port interactions for offline replay.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
