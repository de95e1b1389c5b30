use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use srcguard_types::RepoPath;
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// A candidate file: absolute path for IO, base-relative path for everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePath {
    pub abs: Utf8PathBuf,
    pub rel: RepoPath,
}

/// Which files count as candidates and which directories are skipped.
#[derive(Clone, Debug)]
pub struct SourceFilter {
    extensions: Vec<String>,
    exclude: GlobSet,
}

impl SourceFilter {
    pub fn new(extensions: &[String], exclude: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            extensions: extensions.to_vec(),
            exclude: build_globset(exclude).context("compile exclude globset")?,
        })
    }

    fn accepts_file(&self, name: &str) -> bool {
        // Same rule as splitting on '.' and taking the last piece.
        let ext = name.rsplit('.').next().unwrap_or(name);
        self.extensions.iter().any(|e| e == ext)
    }

    fn excludes_dir(&self, name: &str, rel: &str) -> bool {
        self.exclude.is_match(name) || self.exclude.is_match(rel)
    }
}

/// Enumerate candidates under every root, roots in the given order.
pub fn discover_sources(
    base_dir: &Utf8Path,
    roots: &[String],
    filter: &SourceFilter,
) -> anyhow::Result<Vec<SourcePath>> {
    let mut out = Vec::new();
    for root in roots {
        out.extend(discover_root(base_dir, root, filter)?);
    }
    Ok(out)
}

/// Enumerate candidates below `<base_dir>/<root>`.
///
/// Entries are visited sorted by file name so a run over an unchanged tree always sees the
/// same order. A missing root yields nothing.
pub fn discover_root(
    base_dir: &Utf8Path,
    root: &str,
    filter: &SourceFilter,
) -> anyhow::Result<Vec<SourcePath>> {
    let root_dir = base_dir.join(root);
    if !root_dir.is_dir() {
        debug!(root = %root_dir, "root directory missing, skipping");
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(&root_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, base_dir, filter));

    let mut out = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("walk {}", root_dir))?;
        // Symlinks are not followed by the walk itself; a link to a file is still a candidate.
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        if !filter.accepts_file(&entry.file_name().to_string_lossy()) {
            continue;
        }
        // A candidate that cannot be named in findings must not pass unchecked.
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            anyhow::bail!("non-UTF-8 path under {}: {}", root_dir, entry.path().display());
        };
        let rel = relative_to(&abs, base_dir);
        out.push(SourcePath { abs, rel });
    }

    debug!(root = %root, files = out.len(), "discovered candidate files");
    Ok(out)
}

fn is_excluded_dir(entry: &DirEntry, base_dir: &Utf8Path, filter: &SourceFilter) -> bool {
    // The root itself is never pruned.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    let rel = entry
        .path()
        .strip_prefix(base_dir.as_std_path())
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();
    filter.excludes_dir(name, &rel)
}

fn relative_to(abs: &Utf8Path, base_dir: &Utf8Path) -> RepoPath {
    RepoPath::new(abs.strip_prefix(base_dir).unwrap_or(abs).as_str())
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
