//! Fuzz target for include guard location and rewriting.
//!
//! Goal: never panic, and a rewritten header must itself carry the canonical guard.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_guard_normalizer
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use srcguard_domain::guard::{
    derive_guard_name, locate_guard, normalize_guard, DEFAULT_STRIP_PREFIXES,
};
use srcguard_types::RepoPath;

#[derive(Arbitrary, Debug)]
struct HeaderInput {
    /// Base-relative path, e.g. "include/foo/BarBaz.h"
    path: String,
    /// Header contents
    text: String,
}

fuzz_target!(|input: HeaderInput| {
    if input.path.len() > 512 || input.text.len() > 64 * 1024 {
        return;
    }

    let prefixes: Vec<String> = DEFAULT_STRIP_PREFIXES.iter().map(|s| s.to_string()).collect();
    let expected = derive_guard_name(&RepoPath::new(&input.path), &prefixes);
    assert!(expected.ends_with('_'));

    let Some(site) = locate_guard(&input.text) else {
        return;
    };
    let rewritten = normalize_guard(&input.text, &site, &expected);

    // Only derived tokens made of identifier characters can be found again.
    if expected.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        let again = locate_guard(&rewritten).expect("rewritten guard is locatable");
        assert_eq!(again.token, expected);
        assert_eq!(normalize_guard(&rewritten, &again, &expected), rewritten);
    }
});
