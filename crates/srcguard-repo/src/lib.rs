//! Repository adapters: walk the source roots, read candidate files, rewrite guards.
//!
//! This crate is the only one that touches the filesystem on behalf of the checks. It does not
//! decide anything: what to rewrite comes from `srcguard-domain`.

#![forbid(unsafe_code)]

mod discover;

use anyhow::Context;
use camino::Utf8Path;
use srcguard_domain::model::{GuardFix, SourceFile};
use tracing::{debug, info};

pub use discover::{SourceFilter, SourcePath, discover_root, discover_sources};

/// Read a candidate file into the domain model.
///
/// Files must be UTF-8; anything else is reported as an error.
pub fn read_source(source: &SourcePath, header_extension: &str) -> anyhow::Result<SourceFile> {
    let text = std::fs::read_to_string(&source.abs)
        .with_context(|| format!("read {}", source.abs))?;
    debug!(path = %source.rel, bytes = text.len(), "read source file");
    Ok(SourceFile::new(source.rel.clone(), text, header_extension))
}

/// Rewrite a header in place (truncate + write) with the normalized guard.
pub fn apply_fix(base_dir: &Utf8Path, fix: &GuardFix) -> anyhow::Result<()> {
    let abs = base_dir.join(fix.path.as_str());
    std::fs::write(&abs, fix.contents.as_bytes()).with_context(|| format!("write {}", abs))?;
    info!(
        path = %fix.path,
        found = %fix.found,
        expected = %fix.expected,
        "rewrote include guard"
    );
    Ok(())
}
