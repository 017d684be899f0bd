// src/cli/handlers/mod.rs
//! Command handlers.

use super::args::ScanArgs;
use crate::analysis::{Engine, FileOutcome, Source};
use crate::config::{Config, WcagLevel, CONFIG_FILE};
use crate::contrast::{self, TextSize};
use crate::discovery;
use crate::exit::UxscanExit;
use crate::reporting::{self, ScanJson};
use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

mod listing;

pub use listing::{handle_guidelines, handle_rules};

/// Loads config and applies the scan flags on top of it.
///
/// # Errors
/// Returns error if the config file cannot be read or parsed.
pub fn resolve_config(args: &ScanArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = &mut config.context;
    if let Some(focus) = args.focus {
        ctx.focus = focus;
    }
    if let Some(level) = args.wcag {
        ctx.wcag_level = level;
    }
    if let Some(bps) = &args.breakpoints {
        ctx.target_breakpoints.clone_from(bps);
    }
    if args.desktop_first {
        ctx.mobile_first = false;
    }
    if let Some(budget) = args.budget {
        ctx.performance_budget_ms = budget;
    }
    config.rules.strict_colors |= args.strict_colors;
    Ok(config)
}

/// Handles the scan command.
///
/// # Errors
/// Returns error if config loading, discovery or file reading fails.
pub fn handle_scan(args: &ScanArgs) -> Result<UxscanExit> {
    let config = resolve_config(args)?;
    info!("{}", config.context.summary());

    let files = discovery::discover(&args.paths)?;
    if files.is_empty() {
        eprintln!("{} No .tsx or .jsx files found", "warning:".yellow());
        return Ok(UxscanExit::Success);
    }

    let sources = files
        .iter()
        .map(|path| Ok(Source::new(path.clone(), discovery::read_source(path)?)))
        .collect::<Result<Vec<_>>>()?;

    let start = Instant::now();
    let engine = Engine::from_config(&config);
    let outcomes = engine.analyze_batch(&sources, &config.context);

    if args.json {
        reporting::print_json(&ScanJson::new(&outcomes))?;
    } else {
        reporting::print_report(&outcomes, start.elapsed());
    }
    Ok(scan_exit(&outcomes))
}

/// Unanalyzable input outranks findings: a partial scan cannot pass a gate.
#[must_use]
pub fn scan_exit(outcomes: &[FileOutcome]) -> UxscanExit {
    if outcomes.iter().any(|o| o.result.is_err()) {
        return UxscanExit::InvalidInput;
    }
    let blocking = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .any(crate::report::Report::has_blocking);
    if blocking {
        UxscanExit::CheckFailed
    } else {
        UxscanExit::Success
    }
}

#[derive(Serialize)]
struct ContrastJson<'a> {
    foreground: &'a str,
    background: &'a str,
    size: TextSize,
    level: WcagLevel,
    required: f64,
    passes: bool,
    #[serde(flatten)]
    result: contrast::ContrastResult,
}

/// Handles the contrast command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_contrast(
    foreground: &str,
    background: &str,
    large: bool,
    level: WcagLevel,
    json: bool,
) -> Result<UxscanExit> {
    let result = match contrast::contrast_between(foreground, background) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(UxscanExit::InvalidInput);
        }
    };
    let size = if large { TextSize::Large } else { TextSize::Normal };
    let required = contrast::threshold(size, level);
    let passes = result.passes(size, level);

    if json {
        reporting::print_json(&ContrastJson {
            foreground,
            background,
            size,
            level,
            required,
            passes,
            result,
        })?;
    } else {
        let verdict = if passes { "PASS".green().bold() } else { "FAIL".red().bold() };
        println!(
            "{verdict} {foreground} on {background}: {:.2}:1 ({size} text, {level} needs {required}:1)",
            result.ratio
        );
        let mark = |ok: bool| if ok { "pass".green() } else { "fail".red() };
        println!(
            "   AA normal {}  AA large {}  AAA normal {}  AAA large {}",
            mark(result.passes_aa_normal),
            mark(result.passes_aa_large),
            mark(result.passes_aaa_normal),
            mark(result.passes_aaa_large)
        );
    }
    Ok(if passes { UxscanExit::Success } else { UxscanExit::CheckFailed })
}

/// Handles the init command.
///
/// # Errors
/// Returns error if the file exists without `force`, or the write fails.
pub fn handle_init(force: bool) -> Result<UxscanExit> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{CONFIG_FILE} already exists (use --force to overwrite)");
    }
    Config::new().save(path)?;
    println!("{} Wrote {CONFIG_FILE}", "OK".green().bold());
    Ok(UxscanExit::Success)
}
