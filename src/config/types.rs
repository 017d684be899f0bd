use crate::types::{Category, ConfigurationWarning, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Narrows which rule categories execute in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    General,
    Accessibility,
    Responsive,
    Performance,
    Ux,
}

impl Focus {
    /// `General` selects every category; any other focus selects exactly one.
    #[must_use]
    pub fn includes(self, category: Category) -> bool {
        match self {
            Self::General => true,
            Self::Accessibility => category == Category::Accessibility,
            Self::Responsive => category == Category::Responsive,
            Self::Performance => category == Category::Performance,
            Self::Ux => category == Category::Ux,
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::General => "general",
            Self::Accessibility => "accessibility",
            Self::Responsive => "responsive",
            Self::Performance => "performance",
            Self::Ux => "ux",
        };
        f.write_str(s)
    }
}

impl FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "accessibility" | "a11y" => Ok(Self::Accessibility),
            "responsive" => Ok(Self::Responsive),
            "performance" | "perf" => Ok(Self::Performance),
            "ux" => Ok(Self::Ux),
            other => Err(format!("Unknown focus area: {other}")),
        }
    }
}

/// WCAG conformance target for the run.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WcagLevel {
    #[default]
    #[serde(alias = "aa")]
    AA,
    #[serde(alias = "aaa")]
    AAA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AA => f.write_str("AA"),
            Self::AAA => f.write_str("AAA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AA" => Ok(Self::AA),
            "AAA" => Ok(Self::AAA),
            other => Err(format!("Unknown WCAG level: {other}")),
        }
    }
}

/// Settings for one analysis run. Immutable once the run starts.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisContext {
    #[serde(default)]
    pub focus: Focus,
    #[serde(default)]
    pub wcag_level: WcagLevel,
    #[serde(default = "default_true")]
    pub require_aria_support: bool,
    #[serde(default = "default_true")]
    pub require_keyboard_nav: bool,
    #[serde(default = "default_breakpoints")]
    pub target_breakpoints: Vec<u32>,
    #[serde(default = "default_true")]
    pub mobile_first: bool,
    #[serde(default = "default_budget_ms")]
    pub performance_budget_ms: u32,
    #[serde(default = "default_true")]
    pub code_splitting_enabled: bool,
    #[serde(default = "default_true")]
    pub lazy_loading_enabled: bool,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            focus: Focus::default(),
            wcag_level: WcagLevel::default(),
            require_aria_support: true,
            require_keyboard_nav: true,
            target_breakpoints: default_breakpoints(),
            mobile_first: true,
            performance_budget_ms: default_budget_ms(),
            code_splitting_enabled: true,
            lazy_loading_enabled: true,
        }
    }
}

impl AnalysisContext {
    #[must_use]
    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }

    #[must_use]
    pub fn with_wcag_level(mut self, level: WcagLevel) -> Self {
        self.wcag_level = level;
        self
    }

    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Vec<u32>) -> Self {
        self.target_breakpoints = breakpoints;
        self
    }

    /// Returns a copy that satisfies the context invariants, plus a warning
    /// for every value that had to change.
    #[must_use]
    pub fn normalized(&self) -> (Self, Vec<ConfigurationWarning>) {
        let mut ctx = self.clone();
        let mut warnings = Vec::new();

        if ctx.performance_budget_ms == 0 {
            warnings.push(ConfigurationWarning::out_of_range(
                "performance_budget_ms",
                0,
                default_budget_ms(),
            ));
            ctx.performance_budget_ms = default_budget_ms();
        }

        if !is_strictly_increasing(&ctx.target_breakpoints) {
            let mut fixed: Vec<u32> = ctx
                .target_breakpoints
                .iter()
                .copied()
                .filter(|&w| w > 0)
                .collect();
            fixed.sort_unstable();
            fixed.dedup();
            warnings.push(ConfigurationWarning::unordered_breakpoints(
                &ctx.target_breakpoints,
                &fixed,
            ));
            ctx.target_breakpoints = fixed;
        }

        (ctx, warnings)
    }

    /// The narrowest breakpoint the component must render at.
    #[must_use]
    pub fn smallest_breakpoint(&self) -> Option<u32> {
        self.target_breakpoints.first().copied()
    }

    /// One-line human summary of the run settings.
    #[must_use]
    pub fn summary(&self) -> String {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        format!(
            "Focus: {} | WCAG Level: {} | Mobile First: {} | Breakpoints: {:?} | Budget: {}ms",
            self.focus,
            self.wcag_level,
            yes_no(self.mobile_first),
            self.target_breakpoints,
            self.performance_budget_ms
        )
    }
}

fn is_strictly_increasing(values: &[u32]) -> bool {
    values.first().map_or(true, |&w| w > 0) && values.windows(2).all(|w| w[0] < w[1])
}

/// Per-rule switches from the `[rules]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Propagate invalid color literals as errors instead of downgrading them.
    #[serde(default)]
    pub strict_colors: bool,
    #[serde(default)]
    pub severity: BTreeMap<String, Severity>,
}

/// On-disk shape of `uxscan.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UxscanToml {
    #[serde(default)]
    pub context: AnalysisContext,
    #[serde(default)]
    pub rules: RuleConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub context: AnalysisContext,
    pub rules: RuleConfig,
}

const fn default_true() -> bool { true }
const fn default_budget_ms() -> u32 { 3000 }

fn default_breakpoints() -> Vec<u32> {
    vec![320, 768, 1024, 1440]
}
