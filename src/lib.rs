//! Simple to use cli for keeping track of a daily routine: wake up time, the overnight fasting
//! window and a few habits. Every day becomes one row of a CSV table which can be listed,
//! summarised over the last days and exported.
//!

pub mod cli;
pub mod routine;
pub mod stats;
pub mod storage;
pub mod utils;
