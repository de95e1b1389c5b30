//! The `check` use case: walk the roots, normalize guards, check notices, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use srcguard_domain::model::RunStats;
use srcguard_domain::policy::Mode;
use srcguard_repo::SourceFilter;
use srcguard_settings::{Overrides, ResolvedConfig};
use srcguard_types::{Finding, RepoPath, SCHEMA_REPORT_V1, SrcguardReport, Verdict};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::report::tool_meta;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Base directory the roots are resolved against.
    pub base_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: SrcguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// Headers whose guard was rewritten on disk, in walk order.
    pub rewritten: Vec<RepoPath>,
    /// Findings that fail the run, in walk order and never truncated. A fail-fast run
    /// records only the one that stopped it.
    pub failures: Vec<Finding>,
}

/// Run the check use case.
///
/// Files are handled one at a time: read, evaluate, rewrite, then decide whether to stop. A
/// fail-fast stop therefore leaves every later file untouched.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        srcguard_settings::SrcguardConfigV1::default()
    } else {
        srcguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = srcguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    let effective = &resolved.effective;

    let filter = SourceFilter::new(&effective.extensions, &effective.exclude)?;

    let mut findings = Vec::new();
    let mut rewritten = Vec::new();
    let mut failures = Vec::new();
    let mut stats = RunStats {
        roots: effective.roots.clone(),
        ..RunStats::default()
    };

    'roots: for root in &effective.roots {
        let candidates = srcguard_repo::discover_root(input.base_dir, root, &filter)
            .with_context(|| format!("discover files under {root}"))?;

        for candidate in candidates {
            let file = srcguard_repo::read_source(&candidate, &effective.header_extension)?;
            let outcome = srcguard_domain::evaluate_file(&file, effective);
            stats.files_scanned += 1;

            if let Some(fix) = &outcome.fix {
                if effective.mode == Mode::Fix {
                    srcguard_repo::apply_fix(input.base_dir, fix)?;
                    stats.headers_rewritten += 1;
                    rewritten.push(fix.path.clone());
                }
            }

            let stop = srcguard_domain::should_stop(&outcome, effective);
            let failing = outcome
                .findings
                .iter()
                .filter(|f| srcguard_domain::is_failing(f, effective.fail_on))
                .cloned();
            if stop {
                failures.extend(failing.take(1));
            } else {
                failures.extend(failing);
            }
            findings.extend(outcome.findings);

            if stop {
                warn!(path = %file.path, "stopping at first failing file");
                stats.stopped_at = Some(file.path);
                break 'roots;
            }
        }
    }

    debug!(
        files = stats.files_scanned,
        rewritten = stats.headers_rewritten,
        findings = findings.len(),
        "walk finished"
    );

    let domain_report = srcguard_domain::summarize(findings, stats, effective);

    let report = SrcguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: domain_report.verdict,
        findings: domain_report.findings,
        data: domain_report.data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        rewritten,
        failures,
    })
}

/// Map a verdict to the process exit code (0 = pass/warn, 2 = policy failure).
pub fn verdict_exit_code(verdict: &Verdict) -> i32 {
    match verdict {
        Verdict::Pass | Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
