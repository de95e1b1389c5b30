use crate::checks;
use crate::model::{FileOutcome, RunStats, SourceFile};
use crate::policy::{EffectiveConfig, FailOn, Mode};
use crate::report::{DomainReport, SeverityCounts};
use srcguard_types::{Finding, Severity, SrcguardData, Verdict};

/// Run every enabled check against one file.
pub fn evaluate_file(file: &SourceFile, cfg: &EffectiveConfig) -> FileOutcome {
    let mut outcome = FileOutcome::default();
    checks::run_all(file, cfg, &mut outcome);
    outcome
}

/// Whether a finding fails the run under `fail_on`.
pub fn is_failing(finding: &Finding, fail_on: FailOn) -> bool {
    match finding.severity {
        Severity::Error => true,
        Severity::Warning => fail_on == FailOn::Warning,
        Severity::Info => false,
    }
}

/// In fail-fast mode the first failing finding ends the walk.
pub fn should_stop(outcome: &FileOutcome, cfg: &EffectiveConfig) -> bool {
    cfg.fail_fast && outcome.findings.iter().any(|f| is_failing(f, cfg.fail_on))
}

/// Order, truncate and judge everything collected during a run.
pub fn summarize(findings: Vec<Finding>, stats: RunStats, cfg: &EffectiveConfig) -> DomainReport {
    let mut findings = findings;

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    // The verdict covers every finding, including the ones truncated away below.
    let verdict = compute_verdict(&findings, cfg.fail_on, stats.stopped_at.is_some());

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let counts = SeverityCounts::from_findings(&emitted);

    let data = SrcguardData {
        profile: cfg.profile.clone(),
        fail_fast: cfg.fail_fast,
        check_only: cfg.mode == Mode::CheckOnly,
        roots: stats.roots,
        files_scanned: stats.files_scanned,
        headers_rewritten: stats.headers_rewritten,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        stopped_at: stats.stopped_at,
        truncated_reason,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn, stopped: bool) -> Verdict {
    if stopped || findings.iter().any(|f| f.severity == Severity::Error) {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.line (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let (ap, al) = match &a.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };
    let (bp, bl) = match &b.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ap.cmp(bp))
        .then(al.cmp(&bl))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config, header, source};
    use srcguard_types::{RepoPath, ids};

    #[test]
    fn compliant_header_produces_nothing() {
        let cfg = config(Mode::Fix);
        let file = header(
            "include/foo/BarBaz.h",
            "// Copyright (c) 2021, Kai Wolf - SW Consulting\n#ifndef FOO_BAR_BAZ_H_\n#define FOO_BAR_BAZ_H_\n#endif\n",
        );
        let outcome = evaluate_file(&file, &cfg);
        assert!(outcome.findings.is_empty());
        assert!(outcome.fix.is_none());
        assert!(!should_stop(&outcome, &cfg));
    }

    #[test]
    fn missing_copyright_stops_fail_fast_run() {
        let cfg = config(Mode::Fix);
        let outcome = evaluate_file(&source("src/main.cc", "int main() {}\n"), &cfg);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].code, ids::CODE_MISSING_COPYRIGHT);
        assert_eq!(outcome.findings[0].message, "No copyright message found in src/main.cc");
        assert!(should_stop(&outcome, &cfg));

        let mut keep_going = config(Mode::Fix);
        keep_going.fail_fast = false;
        assert!(!should_stop(&outcome, &keep_going));
    }

    #[test]
    fn rewritten_guard_does_not_stop_the_run() {
        let cfg = config(Mode::Fix);
        let file = header(
            "include/foo/BarBaz.h",
            "// Copyright (c) 2021, Kai Wolf - SW Consulting\n#ifndef OLD\n#define OLD\n#endif\n",
        );
        let outcome = evaluate_file(&file, &cfg);
        assert!(outcome.fix.is_some());
        assert_eq!(outcome.findings[0].severity, Severity::Info);
        assert!(!should_stop(&outcome, &cfg));
    }

    #[test]
    fn warning_fails_only_when_fail_on_warning() {
        let mut cfg = config(Mode::CheckOnly);
        cfg.checks
            .get_mut(ids::CHECK_COPYRIGHT_NOTICE)
            .expect("policy")
            .severity = Severity::Warning;

        let outcome = evaluate_file(&source("src/a.cc", ""), &cfg);
        let report = summarize(outcome.findings.clone(), RunStats::default(), &cfg);
        assert_eq!(report.verdict, Verdict::Warn);

        cfg.fail_on = FailOn::Warning;
        let report = summarize(outcome.findings, RunStats::default(), &cfg);
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn summarize_sorts_and_truncates() {
        let mut cfg = config(Mode::Fix);
        cfg.fail_fast = false;
        cfg.max_findings = 2;

        let mut findings = Vec::new();
        for path in ["src/c.cc", "src/a.cc", "src/b.cc"] {
            findings.extend(evaluate_file(&source(path, ""), &cfg).findings);
        }

        let stats = RunStats {
            roots: vec!["src".to_string()],
            files_scanned: 3,
            ..RunStats::default()
        };
        let report = summarize(findings, stats, &cfg);

        let paths: Vec<&str> = report
            .findings
            .iter()
            .filter_map(|f| f.path().map(RepoPath::as_str))
            .collect();
        assert_eq!(paths, vec!["src/a.cc", "src/b.cc"]);
        assert_eq!(report.data.findings_total, 3);
        assert_eq!(report.data.findings_emitted, 2);
        assert!(report.data.truncated_reason.is_some());
        assert_eq!(report.counts.error, 2);
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn stopped_run_always_fails() {
        let cfg = config(Mode::Fix);
        let stats = RunStats {
            stopped_at: Some(RepoPath::new("src/a.cc")),
            ..RunStats::default()
        };
        let report = summarize(Vec::new(), stats, &cfg);
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.data.stopped_at, Some(RepoPath::new("src/a.cc")));
    }

    #[test]
    fn empty_run_passes() {
        let cfg = config(Mode::Fix);
        let report = summarize(Vec::new(), RunStats::default(), &cfg);
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.data.fail_fast);
        assert!(!report.data.check_only);
    }
}
