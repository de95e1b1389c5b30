//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after code examples.
    pub examples: ExamplePair,
}

/// Before and after code examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Code that would trigger a finding.
    pub before: &'static str,
    /// Code that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_GUARD_INCLUDE_GUARD => Some(explain_include_guard()),
        ids::CHECK_COPYRIGHT_NOTICE => Some(explain_copyright_notice()),

        // Codes
        ids::CODE_GUARD_MISMATCH => Some(explain_guard_mismatch()),
        ids::CODE_GUARD_REWRITTEN => Some(explain_guard_rewritten()),
        ids::CODE_MISSING_COPYRIGHT => Some(explain_missing_copyright()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_GUARD_INCLUDE_GUARD, ids::CHECK_COPYRIGHT_NOTICE]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_GUARD_MISMATCH,
        ids::CODE_GUARD_REWRITTEN,
        ids::CODE_MISSING_COPYRIGHT,
    ]
}

// --- Check-level explanations ---

fn explain_include_guard() -> Explanation {
    Explanation {
        title: "Canonical Include Guards",
        description: "\
Every header's include guard token is derived from its path relative to the base
directory:

1. The first `src/` or `include/` segment is removed.
2. The extension dot becomes a separator, then the path is split on `/`.
3. Each component has `_` inserted before inner upper-case letters and is upper-cased.
4. Components are joined with `_` and a trailing `_` is appended.

`include/kwctoolkit/base/ArraySize.h` therefore maps to `KWCTOOLKIT_BASE_ARRAY_SIZE_H_`.

Only headers that already carry a guard are considered: an `#ifndef TOKEN` line followed
directly by `#define TOKEN` with the same token. Headers without such a pair are left alone.",
        remediation: "\
Run srcguard without `--check-only`; it rewrites both guard lines in place and leaves
every other byte of the file untouched.

If the header has no guard at all, add one by hand using the derived token.",
        examples: ExamplePair {
            before: r#"// include/foo/BarBaz.h
#ifndef BARBAZ_H
#define BARBAZ_H
#endif"#,
            after: r#"// include/foo/BarBaz.h
#ifndef FOO_BAR_BAZ_H_
#define FOO_BAR_BAZ_H_
#endif"#,
        },
    }
}

fn explain_copyright_notice() -> Explanation {
    Explanation {
        title: "Copyright Notice Required",
        description: "\
Every candidate source and header file must contain at least one line matching the
configured copyright pattern. The default pattern is

    Copyright (c) YYYY[-YYYY], Kai Wolf - SW Consulting

with `c` or `C` accepted inside the parentheses.

In the default profile the first file without a notice stops the whole run; files after it
are not examined.",
        remediation: "\
Add the notice to the top of the file, as a comment:

    // Copyright (c) 2021, Kai Wolf - SW Consulting. All rights reserved.

A year range such as `2019-2021` is accepted. Use `[copyright] pattern` in srcguard.toml
if the project uses a different notice.",
        examples: ExamplePair {
            before: r#"#include "kwctoolkit/base/Assert.h"

namespace kwc {}"#,
            after: r#"// Copyright (c) 2021, Kai Wolf - SW Consulting. All rights reserved.

#include "kwctoolkit/base/Assert.h"

namespace kwc {}"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_guard_mismatch() -> Explanation {
    let mut exp = explain_include_guard();
    exp.title = "Include Guard Mismatch";
    exp
}

fn explain_guard_rewritten() -> Explanation {
    Explanation {
        title: "Include Guard Rewritten",
        description: "\
Informational: srcguard found an include guard whose token did not match the token derived
from the header's path, and rewrote the `#ifndef` and `#define` lines in place.",
        remediation: "\
Nothing to do beyond committing the rewritten header. Use `--check-only` to report the
mismatch without touching the file.",
        examples: explain_include_guard().examples,
    }
}

fn explain_missing_copyright() -> Explanation {
    let mut exp = explain_copyright_notice();
    exp.title = "Missing Copyright Notice";
    exp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id() {
        assert!(lookup_explanation(ids::CHECK_GUARD_INCLUDE_GUARD).is_some());
        assert!(lookup_explanation(ids::CHECK_COPYRIGHT_NOTICE).is_some());
    }

    #[test]
    fn lookup_by_code() {
        assert!(lookup_explanation(ids::CODE_GUARD_MISMATCH).is_some());
        assert!(lookup_explanation(ids::CODE_GUARD_REWRITTEN).is_some());
        assert!(lookup_explanation(ids::CODE_MISSING_COPYRIGHT).is_some());
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation(ids::CHECK_TOOL_RUNTIME).is_none());
    }

    #[test]
    fn all_ids_and_codes_are_registered() {
        for id in all_check_ids().iter().chain(all_codes()) {
            assert!(
                lookup_explanation(id).is_some(),
                "{} should be in registry",
                id
            );
        }
    }
}
