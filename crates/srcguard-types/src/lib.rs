//! Stable DTOs and IDs used across the srcguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs and codes
//! - canonical base-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    Finding, Location, ReportEnvelope, SCHEMA_REPORT_V1, Severity, SrcguardData, SrcguardReport,
    ToolMeta, Verdict,
};
