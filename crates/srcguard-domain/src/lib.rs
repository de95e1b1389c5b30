//! Pure policy evaluation (no IO).
//!
//! Input: one source file at a time, read elsewhere.
//! Output: findings, an optional guard rewrite, and finally a verdict + summary data.

#![forbid(unsafe_code)]

pub mod copyright;
pub mod guard;
pub mod model;
pub mod policy;
pub mod report;

pub mod checks;
mod engine;
mod fingerprint;

pub use engine::{evaluate_file, is_failing, should_stop, summarize};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
