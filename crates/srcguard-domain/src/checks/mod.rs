use crate::model::{FileOutcome, SourceFile};
use crate::policy::EffectiveConfig;

pub mod copyright_notice;
pub mod include_guard;

/// Guard normalization runs first so the copyright check sees the rewritten contents.
pub fn run_all(file: &SourceFile, cfg: &EffectiveConfig, out: &mut FileOutcome) {
    include_guard::run(file, cfg, out);
    copyright_notice::run(file, cfg, out);
}
