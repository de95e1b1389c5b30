use crate::fingerprint::fingerprint_for_file;
use crate::guard::{locate_guard, normalize_guard};
use crate::model::{FileOutcome, GuardFix, SourceFile};
use crate::policy::{EffectiveConfig, Mode};
use srcguard_types::{Finding, Location, Severity, ids};
use serde_json::json;

pub fn run(file: &SourceFile, cfg: &EffectiveConfig, out: &mut FileOutcome) {
    let Some(policy) = cfg.check_policy(ids::CHECK_GUARD_INCLUDE_GUARD) else {
        return;
    };
    if !file.is_header() {
        return;
    }
    // Headers without a consistent #ifndef/#define pair are left alone.
    let Some(site) = locate_guard(&file.text) else {
        return;
    };

    let expected = cfg.guard.canonical_guard(&file.path);
    if site.token == expected {
        return;
    }

    let (severity, code, message) = match cfg.mode {
        Mode::Fix => (
            Severity::Info,
            ids::CODE_GUARD_REWRITTEN,
            format!(
                "include guard '{}' rewritten to '{}'",
                site.token, expected
            ),
        ),
        Mode::CheckOnly => (
            policy.severity,
            ids::CODE_GUARD_MISMATCH,
            format!(
                "include guard '{}' does not match '{}' derived from {}",
                site.token, expected, file.path
            ),
        ),
    };

    out.findings.push(Finding {
        severity,
        check_id: ids::CHECK_GUARD_INCLUDE_GUARD.to_string(),
        code: code.to_string(),
        message,
        location: Some(Location {
            path: file.path.clone(),
            line: Some(site.line),
            col: None,
        }),
        help: Some(format!(
            "Use '{}' on both the #ifndef and #define lines.",
            expected
        )),
        url: None,
        fingerprint: Some(fingerprint_for_file(
            ids::CHECK_GUARD_INCLUDE_GUARD,
            code,
            file.path.as_str(),
            Some(&expected),
        )),
        data: json!({
            "found": site.token,
            "expected": expected,
        }),
    });

    if cfg.mode == Mode::Fix {
        out.fix = Some(GuardFix {
            path: file.path.clone(),
            contents: normalize_guard(&file.text, &site, &expected),
            found: site.token,
            expected,
        });
    }
}
