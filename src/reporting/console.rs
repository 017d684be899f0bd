use crate::analysis::FileOutcome;
use crate::guidelines;
use crate::reporting::shared::{collect_findings, next_occurrence, pluralize, rule_counts, severity_counts};
use crate::report::Report;
use crate::types::{Finding, Severity};
use colored::{ColoredString, Colorize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Prints per-file scores, then findings grouped by rule, then a summary.
///
/// The first occurrence of each rule shows rationale, fix and WCAG
/// reference; later occurrences are one-liners pointing back to it.
pub fn print_report(outcomes: &[FileOutcome], elapsed: Duration) {
    for file in outcomes {
        print_file_header(file);
    }
    println!();

    let all = collect_findings(outcomes);
    let counts = rule_counts(&all);
    let mut shown: HashMap<&str, usize> = HashMap::new();
    for (path, f) in &all {
        let total = counts.get(f.rule_id.as_str()).copied().unwrap_or(1);
        let occurrence = next_occurrence(&mut shown, &f.rule_id);
        if occurrence == 1 {
            print_finding_full(path, f, occurrence, total);
        } else {
            print_finding_compact(path, f, occurrence, total);
        }
    }

    print_summary(outcomes, elapsed);
}

fn print_file_header(file: &FileOutcome) {
    match &file.result {
        Ok(report) => {
            println!(
                "{} {}  {}",
                grade_label(report),
                file.path.display(),
                score_line(report).dimmed()
            );
            for w in &report.summary.warnings {
                println!("   {} {}", "warning:".yellow(), w);
            }
        }
        Err(e) => println!("{} {}  {}", "ERR".red().bold(), file.path.display(), e.to_string().red()),
    }
}

fn grade_label(report: &Report) -> ColoredString {
    let label = format!("[{}]", report.scores.grade);
    match report.scores.overall {
        90.. => label.green().bold(),
        70..=89 => label.yellow().bold(),
        _ => label.red().bold(),
    }
}

fn score_line(report: &Report) -> String {
    let parts: Vec<String> = report
        .scores
        .by_category
        .iter()
        .map(|(c, s)| format!("{c} {s}"))
        .collect();
    format!("{} | {}", report.scores.overall, parts.join(", "))
}

fn paint(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Critical => text.red().bold().underline(),
        Severity::High => text.red().bold(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.dimmed(),
    }
}

fn location(path: &Path, f: &Finding) -> String {
    match &f.location_hint {
        Some(hint) => format!("{} @ {hint}", path.display()),
        None => path.display().to_string(),
    }
}

fn print_finding_full(path: &Path, f: &Finding, occurrence: usize, total: usize) {
    let count_label = if total > 1 {
        format!(" [{occurrence} of {total}]")
    } else {
        String::new()
    };
    let header = format!("{}:{count_label} {}", f.severity.as_str().to_uppercase(), f.message);
    println!("{}", paint(f.severity, &header));
    println!("  {} {}", "-->".blue(), location(path, f));
    println!("   {} {}: {}", "=".blue(), f.rule_id.yellow(), f.category);

    println!("   {}", "|".blue());
    println!("   {} {} {}", "=".blue(), "WHY:".cyan(), f.rationale);
    if let Some(fix) = &f.fix_suggestion {
        println!("   {}", "|".blue());
        println!("   {} {} {}", "=".blue(), "FIX:".green(), fix);
    }
    if let Some(sc) = &f.wcag {
        let reference = guidelines::lookup(sc).map_or_else(
            || format!("WCAG {sc}"),
            |g| format!("WCAG {sc} {} (Level {})", g.guideline, g.level),
        );
        println!("   {}", "|".blue());
        println!("   {} {} {}", "=".blue(), "WCAG:".cyan(), reference.dimmed());
    }
    println!();
}

fn print_finding_compact(path: &Path, f: &Finding, occurrence: usize, total: usize) {
    let header = format!(
        "{}: [{occurrence} of {total}] {}",
        f.severity.as_str().to_uppercase(),
        f.message
    );
    println!("{}", paint(f.severity, &header));
    println!("  {} {}", "-->".blue(), location(path, f));
    println!("   {} {}: see first {} above", "=".blue(), f.rule_id.yellow(), f.rule_id);
    println!();
}

fn print_summary(outcomes: &[FileOutcome], elapsed: Duration) {
    let all = collect_findings(outcomes);
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let files = outcomes.len();

    if all.is_empty() && failed == 0 {
        println!(
            "{} No findings in {files} {} ({elapsed:?}).",
            "OK".green().bold(),
            pluralize("file", files)
        );
        return;
    }

    let mut parts: Vec<String> = severity_counts(&all)
        .into_iter()
        .map(|(s, n)| format!("{n} {s}"))
        .collect();
    if failed > 0 {
        parts.push(format!("{failed} {}", pluralize("parse error", failed)));
    }
    let summary = parts.join(", ");
    let blocking = all.iter().any(|(_, f)| f.severity.is_blocking());

    if blocking || failed > 0 {
        println!(
            "{} uxscan found {summary} in {files} {} ({elapsed:?}).",
            "X".red().bold(),
            pluralize("file", files)
        );
    } else {
        println!(
            "{} uxscan found {summary} in {files} {} ({elapsed:?}).",
            "~".yellow().bold(),
            pluralize("file", files)
        );
    }
}
