// src/cli/handlers/listing.rs
//! Rule catalog and WCAG reference listings.

use crate::config::WcagLevel;
use crate::exit::UxscanExit;
use crate::guidelines::WCAG_GUIDELINES;
use crate::reporting;
use crate::rules::{Gate, Rule, RuleRegistry};
use crate::types::{Category, Severity};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct RuleJson {
    id: &'static str,
    category: Category,
    severity: Severity,
    gate: Gate,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<WcagLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wcag: Option<&'static str>,
    summary: &'static str,
}

impl From<&Rule> for RuleJson {
    fn from(r: &Rule) -> Self {
        Self {
            id: r.id,
            category: r.category,
            severity: r.severity,
            gate: r.gate,
            level: r.level,
            wcag: r.wcag,
            summary: r.summary,
        }
    }
}

/// Handles the rules command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_rules(json: bool) -> Result<UxscanExit> {
    let registry = RuleRegistry::builtin();
    if json {
        let rules: Vec<RuleJson> = registry.iter().map(RuleJson::from).collect();
        reporting::print_json(&rules)?;
        return Ok(UxscanExit::Success);
    }

    for category in Category::ALL {
        println!("{}", category.as_str().to_uppercase().bold());
        for rule in registry.iter().filter(|r| r.category == category) {
            let mut tags = vec![rule.severity.to_string()];
            tags.extend(rule.wcag.map(|sc| format!("WCAG {sc}")));
            tags.extend(rule.level.map(|l| format!("{l} only")));
            match rule.gate {
                Gate::Always => {}
                Gate::Aria => tags.push("aria".into()),
                Gate::Keyboard => tags.push("keyboard".into()),
            }
            println!(
                "  {} {} {}",
                format!("{:<38}", rule.id).yellow(),
                rule.summary,
                format!("({})", tags.join(", ")).dimmed()
            );
        }
        println!();
    }
    Ok(UxscanExit::Success)
}

/// Handles the guidelines command.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn handle_guidelines(json: bool) -> Result<UxscanExit> {
    if json {
        reporting::print_json(&WCAG_GUIDELINES)?;
        return Ok(UxscanExit::Success);
    }
    println!("{}", "WCAG 2.1 Key Guidelines".bold());
    println!();
    for g in WCAG_GUIDELINES {
        println!(
            "  {} {} - {} {}",
            g.criterion.cyan(),
            g.principle,
            g.guideline.bold(),
            format!("[{}]", g.level).dimmed()
        );
        println!("        {}", g.requirement);
    }
    Ok(UxscanExit::Success)
}
