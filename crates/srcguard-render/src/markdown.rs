use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# srcguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Files scanned: {}\n- Headers rewritten: {}\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.files_scanned,
        report.data.headers_rewritten,
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(path) = &report.data.stopped_at {
        out.push_str(&format!(
            "> Stopped at `{}`: later files were not checked.\n\n",
            path
        ));
    }
    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        match &f.location {
            Some(loc) => match loc.line {
                Some(line) => out.push_str(&format!(
                    "- [{}] `{}` / `{}`: {} (`{}`:{})\n",
                    sev, f.check_id, f.code, f.message, loc.path, line
                )),
                None => out.push_str(&format!(
                    "- [{}] `{}` / `{}`: {} (`{}`)\n",
                    sev, f.check_id, f.code, f.message, loc.path
                )),
            },
            None => out.push_str(&format!(
                "- [{}] `{}` / `{}`: {}\n",
                sev, f.check_id, f.code, f.message
            )),
        }

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
