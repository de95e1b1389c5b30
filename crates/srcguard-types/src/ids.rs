//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_GUARD_INCLUDE_GUARD: &str = "guard.include_guard";
pub const CHECK_COPYRIGHT_NOTICE: &str = "copyright.notice";

// Codes: guard.include_guard
pub const CODE_GUARD_MISMATCH: &str = "guard_mismatch";
pub const CODE_GUARD_REWRITTEN: &str = "guard_rewritten";

// Codes: copyright.notice
pub const CODE_MISSING_COPYRIGHT: &str = "missing_copyright";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
