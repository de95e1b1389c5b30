//! The `explain` use case: look up check/code documentation.

use srcguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; carries what is available instead.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim();
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display. Examples are C/C++ snippets.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    heading(&mut out, exp.title, '=');
    out.push_str(exp.description);
    out.push_str("\n\n");

    heading(&mut out, "Remediation", '-');
    out.push_str(exp.remediation);
    out.push_str("\n\n");

    heading(&mut out, "Examples", '-');
    for (label, snippet) in [
        ("Before (violation):", exp.examples.before),
        ("After (fixed):", exp.examples.after),
    ] {
        out.push_str(label);
        out.push_str("\n```cpp\n");
        out.push_str(snippet);
        out.push_str("\n```\n");
    }

    out
}

fn heading(out: &mut String, title: &str, underline: char) {
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat_n(underline, title.chars().count()));
    out.push_str("\n\n");
}

pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n\n");

    for (title, items) in [("Available check_ids:", check_ids), ("Available codes:", codes)] {
        out.push_str(title);
        out.push('\n');
        for item in items {
            out.push_str(&format!("  - {item}\n"));
        }
        out.push('\n');
    }

    out
}
