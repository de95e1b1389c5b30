//! Include guard naming and in-text normalization.
//!
//! The canonical guard token is a pure function of a header's base-relative path.
//! Locating the existing guard is a two-step parse: an `#ifndef` line supplies the token,
//! and the line right after it must be a `#define` of that exact token. The first such pair
//! in the file is the guard.

use srcguard_types::RepoPath;
use std::ops::Range;

pub const DEFAULT_STRIP_PREFIXES: &[&str] = &["src/", "include/"];

/// Derive the canonical guard token for `path`.
///
/// `include/foo/BarBaz.h` becomes `FOO_BAR_BAZ_H_`. If none of `strip_prefixes` occurs
/// in the path it is used as is.
pub fn derive_guard_name(path: &RepoPath, strip_prefixes: &[String]) -> String {
    let stripped = strip_first_prefix(path.as_str(), strip_prefixes);
    let dotted = stripped.replace('.', "/");

    let parts: Vec<String> = dotted
        .split('/')
        .filter(|part| !part.is_empty())
        .map(split_camel_case)
        .collect();

    let mut guard = parts.join("_");
    guard.push('_');
    guard
}

/// Remove the earliest occurrence of any prefix. Ties go to the prefix listed first.
fn strip_first_prefix(path: &str, prefixes: &[String]) -> String {
    let earliest = prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .filter_map(|p| path.find(p.as_str()).map(|idx| (idx, p.len())))
        .min_by_key(|(idx, _)| *idx);

    match earliest {
        Some((idx, len)) => format!("{}{}", &path[..idx], &path[idx + len..]),
        None => path.to_string(),
    }
}

/// `BarBaz` -> `BAR_BAZ`, `ABC` -> `A_B_C`, `foo` -> `FOO`.
fn split_camel_case(part: &str) -> String {
    let mut out = String::with_capacity(part.len() + 4);
    for (i, c) in part.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_uppercase()
}

/// Location of an existing, self-consistent guard pair inside a header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardSite {
    pub token: String,
    /// 1-based line number of the `#ifndef`.
    pub line: u32,
    /// Byte range of the token on the `#ifndef` line.
    pub ifndef_span: Range<usize>,
    /// Byte range of the token on the `#define` line.
    pub define_span: Range<usize>,
}

/// Find the first guard pair, if any.
///
/// Every `#ifndef` line is a candidate: the pair matches when the very next line is a
/// `#define` of the same token. Returns `None` when no line in the file forms such a pair.
pub fn locate_guard(text: &str) -> Option<GuardSite> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    for line in text.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    lines.windows(2).enumerate().find_map(|(idx, pair)| {
        let &[(ifndef_start, ifndef_line), (define_start, define_line)] = pair else {
            return None;
        };
        let ifndef = directive_token(ifndef_line, "#ifndef")?;
        let define = directive_token(define_line, "#define")?;

        let token = &ifndef_line[ifndef.clone()];
        if token != &define_line[define.clone()] {
            return None;
        }

        Some(GuardSite {
            token: token.to_string(),
            line: u32::try_from(idx + 1).unwrap_or(u32::MAX),
            ifndef_span: ifndef_start + ifndef.start..ifndef_start + ifndef.end,
            define_span: define_start + define.start..define_start + define.end,
        })
    })
}

/// Parse `<directive> <TOKEN>` and return the token's byte range within `line`.
///
/// The directive must start the line; the token must be the last thing on it apart from
/// trailing whitespace.
fn directive_token(line: &str, directive: &str) -> Option<Range<usize>> {
    let rest = line.strip_prefix(directive)?;
    let body = rest.trim_end();

    let token = body.trim_start_matches([' ', '\t']);
    if token.len() == body.len() || token.is_empty() {
        return None;
    }
    if !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let start = directive.len() + (body.len() - token.len());
    Some(start..start + token.len())
}

/// Replace both occurrences of the guard token, leaving every other byte as is.
pub fn normalize_guard(text: &str, site: &GuardSite, expected: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2 * expected.len());
    out.push_str(&text[..site.ifndef_span.start]);
    out.push_str(expected);
    out.push_str(&text[site.ifndef_span.end..site.define_span.start]);
    out.push_str(expected);
    out.push_str(&text[site.define_span.end..]);
    out
}
