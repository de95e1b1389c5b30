use srcguard_types::{Finding, RepoPath};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Header,
    Source,
}

/// A candidate file as seen by the checks: base-relative path plus full contents.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: RepoPath,
    pub kind: FileKind,
    pub text: String,
}

impl SourceFile {
    /// Classify by extension: anything ending in `header_extension` is a header.
    pub fn new(path: RepoPath, text: String, header_extension: &str) -> Self {
        let kind = if path.extension() == Some(header_extension) {
            FileKind::Header
        } else {
            FileKind::Source
        };
        Self { path, kind, text }
    }

    pub fn is_header(&self) -> bool {
        self.kind == FileKind::Header
    }
}

/// A pending in-place rewrite of a header's include guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardFix {
    pub path: RepoPath,
    pub found: String,
    pub expected: String,
    /// Full file contents after the rewrite.
    pub contents: String,
}

/// Everything the checks produced for a single file.
#[derive(Clone, Debug, Default)]
pub struct FileOutcome {
    pub findings: Vec<Finding>,
    pub fix: Option<GuardFix>,
}

/// Counters collected by the caller while walking the tree.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    pub roots: Vec<String>,
    pub files_scanned: u32,
    pub headers_rewritten: u32,
    pub stopped_at: Option<RepoPath>,
}
