use crate::{model::SrcguardConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use srcguard_domain::copyright::CopyrightMatcher;
use srcguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, Mode};
use srcguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
    /// `Some(false)` forces collect-all (`--keep-going`).
    pub fail_fast: Option<bool>,
    /// Report guard mismatches without rewriting (`--check-only`).
    pub check_only: bool,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: SrcguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected one of {})",
            presets::PROFILES.join("|")
        )
    })?;

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    if let Some(fail_fast) = overrides.fail_fast.or(cfg.fail_fast) {
        effective.fail_fast = fail_fast;
    }

    if overrides.check_only {
        effective.mode = Mode::CheckOnly;
    }

    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // Walk inputs
    if let Some(roots) = cfg.roots {
        if roots.is_empty() {
            anyhow::bail!("roots must not be empty");
        }
        effective.roots = roots.iter().map(|r| r.trim_end_matches('/').to_string()).collect();
    }
    if let Some(extensions) = cfg.extensions {
        effective.extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }
    if let Some(header_extension) = cfg.header_extension {
        effective.header_extension = header_extension.trim_start_matches('.').to_string();
    }
    validate_excludes(&cfg.exclude)?;
    effective.exclude = cfg.exclude;

    if let Some(strip_prefixes) = cfg.guard.strip_prefixes {
        effective.guard.strip_prefixes = strip_prefixes;
    }
    if let Some(prefix) = cfg.guard.prefix {
        validate_guard_prefix(&prefix)?;
        effective.guard.prefix = prefix;
    }

    if let Some(pattern) = cfg.copyright.pattern.as_deref() {
        effective.copyright = CopyrightMatcher::new(pattern)
            .with_context(|| format!("invalid copyright pattern: {pattern}"))?;
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    Ok(ResolvedConfig { effective })
}

fn validate_excludes(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid exclude glob: {pattern}"))?;
    }
    Ok(())
}

/// The prefix ends up inside the guard token, so it may only use identifier characters.
fn validate_guard_prefix(prefix: &str) -> anyhow::Result<()> {
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        anyhow::bail!("invalid guard prefix: {prefix:?} (expected [A-Za-z0-9_]*)");
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
