//! CLI entry point for srcguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `srcguard-app` crate.

mod logging;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use logging::CliLogLevel;
use srcguard_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown, run_check,
    run_explain, runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use srcguard_settings::Overrides;
use srcguard_types::SrcguardReport;

#[derive(Parser, Debug)]
#[command(
    name = "srcguard",
    version,
    about = "Include-guard and copyright linter for C/C++ source trees"
)]
struct Cli {
    /// Base directory containing the source roots.
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    /// Path to srcguard config TOML, relative to the base directory.
    #[arg(long, global = true, default_value = "srcguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|audit).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Console log level (RUST_LOG takes precedence).
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: CliLogLevel,

    /// Defaults to `check` when omitted.
    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize include guards and check copyright notices.
    Check(CheckArgs),

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "guard.include_guard") or code (e.g., "missing_copyright").
        identifier: String,
    },
}

#[derive(Args, Debug, Default)]
struct CheckArgs {
    /// Report guard mismatches instead of rewriting headers.
    #[arg(long)]
    check_only: bool,

    /// Process every file instead of stopping at the first failure.
    #[arg(long)]
    keep_going: bool,

    /// Write the JSON report here.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Write a Markdown summary here.
    #[arg(long)]
    markdown_out: Option<Utf8PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_level)?;

    match &cli.cmd {
        None => cmd_check(&cli, &CheckArgs::default()),
        Some(Commands::Check(args)) => cmd_check(&cli, args),
        Some(Commands::Md { report, output }) => cmd_md(report, output.as_deref()),
        Some(Commands::Annotations { report, max }) => cmd_annotations(report, *max),
        Some(Commands::Explain { identifier }) => cmd_explain(identifier),
    }
}

fn cmd_check(cli: &Cli, args: &CheckArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let base_dir = cli
            .root
            .canonicalize_utf8()
            .with_context(|| format!("base directory does not exist: {}", cli.root))?;

        // Load config if present; missing file is allowed (defaults apply).
        let cfg_path = base_dir.join(&cli.config);
        let cfg_text = if cfg_path.is_file() {
            std::fs::read_to_string(&cfg_path)
                .with_context(|| format!("read config: {}", cfg_path))?
        } else {
            String::new()
        };

        let overrides = Overrides {
            profile: cli.profile.clone(),
            max_findings: cli.max_findings,
            fail_fast: args.keep_going.then_some(false),
            check_only: args.check_only,
        };

        let output = run_check(CheckInput {
            base_dir: &base_dir,
            config_text: &cfg_text,
            overrides,
        })?;

        for finding in &output.failures {
            println!("Error: {}", finding.message);
        }

        if let Some(path) = &args.report_out {
            write_report_file(path, &output.report).context("write report json")?;
        }
        if let Some(path) = &args.markdown_out {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(path, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(&output.report.verdict))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            if let Some(path) = &args.report_out {
                let report = runtime_error_report(&format!("{err:#}"));
                let _ = write_report_file(path, &report);
            }
            eprintln!("srcguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &SrcguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<SrcguardReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{}", md),
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", srcguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                srcguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
