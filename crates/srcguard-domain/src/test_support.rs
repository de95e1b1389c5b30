use crate::copyright::CopyrightMatcher;
use crate::model::SourceFile;
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn, GuardPolicy, Mode};
use srcguard_types::{RepoPath, Severity, ids};
use std::collections::BTreeMap;

pub const NOTICE: &str = "// Copyright (c) 2021, Kai Wolf - SW Consulting. All rights reserved.\n";

/// Strict-profile equivalent: both checks at error, fail-fast on.
pub fn config(mode: Mode) -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(
        ids::CHECK_GUARD_INCLUDE_GUARD.to_string(),
        CheckPolicy::enabled(Severity::Error),
    );
    checks.insert(
        ids::CHECK_COPYRIGHT_NOTICE.to_string(),
        CheckPolicy::enabled(Severity::Error),
    );

    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        fail_fast: true,
        mode,
        max_findings: 200,
        roots: vec!["src".to_string(), "include".to_string()],
        extensions: vec!["cc".to_string(), "h".to_string()],
        header_extension: "h".to_string(),
        exclude: Vec::new(),
        guard: GuardPolicy::default(),
        copyright: CopyrightMatcher::default(),
        checks,
    }
}

pub fn header(path: &str, text: &str) -> SourceFile {
    SourceFile::new(RepoPath::new(path), text.to_string(), "h")
}

pub fn source(path: &str, text: &str) -> SourceFile {
    SourceFile::new(RepoPath::new(path), text.to_string(), "h")
}
