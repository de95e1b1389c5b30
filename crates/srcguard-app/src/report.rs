use anyhow::Context;
use srcguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
use srcguard_types::{
    Finding, SCHEMA_REPORT_V1, Severity, SrcguardData, SrcguardReport, ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<SrcguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse srcguard report")
}

pub fn serialize_report(report: &SrcguardReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "srcguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Report emitted when the run itself failed (I/O, bad config) rather than a check.
pub fn runtime_error_report(message: &str) -> SrcguardReport {
    let now = OffsetDateTime::now_utc();
    SrcguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: None,
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: SrcguardData {
            findings_total: 1,
            findings_emitted: 1,
            ..SrcguardData::default()
        },
    }
}

pub fn to_renderable(report: &SrcguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            files_scanned: report.data.files_scanned,
            headers_rewritten: report.data.headers_rewritten,
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            stopped_at: report.data.stopped_at.as_ref().map(|p| p.as_str().to_string()),
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
        }),
        help: f.help.clone(),
    }
}
