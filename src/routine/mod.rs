//! The daily record and the metrics derived from what the user entered.

pub mod derivation;
pub mod record;
