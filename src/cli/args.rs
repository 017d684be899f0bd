use crate::config::{Focus, WcagLevel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "uxscan",
    version,
    about = "Static accessibility, responsive, performance and UX analysis for React components"
)]
pub struct Cli {
    /// Log rule execution to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze .tsx/.jsx files or directories
    Scan(ScanArgs),
    /// Compute the WCAG contrast ratio of two colors
    Contrast {
        /// Foreground color (#RGB, #RRGGBB or a named color)
        foreground: String,
        /// Background color
        background: String,
        /// Judge as large text (18pt, or 14pt bold)
        #[arg(long)]
        large: bool,
        #[arg(long, default_value = "AA")]
        level: WcagLevel,
        #[arg(long)]
        json: bool,
    },
    /// List the registered rules
    Rules {
        #[arg(long)]
        json: bool,
    },
    /// Print the WCAG 2.1 reference table
    Guidelines {
        #[arg(long)]
        json: bool,
    },
    /// Write a default uxscan.toml to the working directory
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Arguments for the scan command. Flags override `uxscan.toml`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,
    /// Only run rules of one category
    #[arg(long)]
    pub focus: Option<Focus>,
    #[arg(long)]
    pub wcag: Option<WcagLevel>,
    /// Target viewport widths, e.g. 320,768,1024
    #[arg(long, value_delimiter = ',')]
    pub breakpoints: Option<Vec<u32>>,
    /// Treat the component as desktop-first
    #[arg(long)]
    pub desktop_first: bool,
    /// Render budget in milliseconds
    #[arg(long)]
    pub budget: Option<u32>,
    /// Fail on unparseable color literals instead of reporting them
    #[arg(long)]
    pub strict_colors: bool,
    /// Config file (default: ./uxscan.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}
