use srcguard_domain::copyright::CopyrightMatcher;
use srcguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, GuardPolicy, Mode};
use srcguard_types::Severity;
use std::collections::BTreeMap;

/// Known profile names, default first.
pub const PROFILES: &[&str] = &["strict", "warn", "audit"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "strict" => Some(strict_profile()),
        "warn" => Some(warn_profile()),
        "audit" => Some(audit_profile()),
        _ => None,
    }
}

/// Stop at the first file without a notice.
fn strict_profile() -> EffectiveConfig {
    base("strict", true, Severity::Error)
}

/// Report everything as warnings; the run only fails on errors.
fn warn_profile() -> EffectiveConfig {
    base("warn", false, Severity::Warning)
}

/// Collect every violation as an error.
fn audit_profile() -> EffectiveConfig {
    base("audit", false, Severity::Error)
}

fn base(profile: &str, fail_fast: bool, default_severity: Severity) -> EffectiveConfig {
    EffectiveConfig {
        profile: profile.to_string(),
        fail_on: FailOn::Error,
        fail_fast,
        mode: Mode::Fix,
        max_findings: 200,
        roots: vec!["src".to_string(), "include".to_string()],
        extensions: vec!["cc".to_string(), "h".to_string()],
        header_extension: "h".to_string(),
        exclude: Vec::new(),
        guard: GuardPolicy::default(),
        copyright: CopyrightMatcher::default(),
        checks: default_checks(default_severity),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    use srcguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(
        CHECK_GUARD_INCLUDE_GUARD.to_string(),
        CheckPolicy::enabled(default_severity),
    );
    m.insert(
        CHECK_COPYRIGHT_NOTICE.to_string(),
        CheckPolicy::enabled(default_severity),
    );

    m
}
