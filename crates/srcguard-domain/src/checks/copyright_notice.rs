use crate::fingerprint::fingerprint_for_file;
use crate::model::{FileOutcome, SourceFile};
use crate::policy::EffectiveConfig;
use srcguard_types::{Finding, Location, ids};
use serde_json::json;

pub fn run(file: &SourceFile, cfg: &EffectiveConfig, out: &mut FileOutcome) {
    let Some(policy) = cfg.check_policy(ids::CHECK_COPYRIGHT_NOTICE) else {
        return;
    };

    let text = out
        .fix
        .as_ref()
        .map(|fix| fix.contents.as_str())
        .unwrap_or(&file.text);
    if cfg.copyright.find_line(text).is_some() {
        return;
    }

    out.findings.push(Finding {
        severity: policy.severity,
        check_id: ids::CHECK_COPYRIGHT_NOTICE.to_string(),
        code: ids::CODE_MISSING_COPYRIGHT.to_string(),
        message: format!("No copyright message found in {}", file.path),
        location: Some(Location {
            path: file.path.clone(),
            line: None,
            col: None,
        }),
        help: Some("Add a copyright notice line matching the configured pattern.".to_string()),
        url: None,
        fingerprint: Some(fingerprint_for_file(
            ids::CHECK_COPYRIGHT_NOTICE,
            ids::CODE_MISSING_COPYRIGHT,
            file.path.as_str(),
            None,
        )),
        data: json!({
            "pattern": cfg.copyright.pattern(),
        }),
    });
}
