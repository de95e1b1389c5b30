use crate::copyright::CopyrightMatcher;
use crate::guard;
use srcguard_types::{RepoPath, Severity};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// Whether guard mismatches are rewritten on disk or only reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Fix,
    CheckOnly,
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardPolicy {
    /// Literal segments removed (first occurrence only) before deriving a guard name.
    pub strip_prefixes: Vec<String>,
    /// Project prefix put in front of every derived token, e.g. `KWCTOOLKIT_`.
    pub prefix: String,
}

impl GuardPolicy {
    /// The guard token a header at `path` must carry.
    pub fn canonical_guard(&self, path: &RepoPath) -> String {
        format!(
            "{}{}",
            self.prefix,
            guard::derive_guard_name(path, &self.strip_prefixes)
        )
    }
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            strip_prefixes: guard::DEFAULT_STRIP_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            prefix: String::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    /// Stop the walk at the first failing finding.
    pub fail_fast: bool,
    pub mode: Mode,
    pub max_findings: usize,

    pub roots: Vec<String>,
    pub extensions: Vec<String>,
    pub header_extension: String,
    pub exclude: Vec<String>,

    pub guard: GuardPolicy,
    pub copyright: CopyrightMatcher,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
