// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output configuration for CLI commands.
//!
//! - `--format json` emits machine-readable JSON to stdout
//! - `--no-color` disables ANSI styling in text output

use std::io::Write;

use console::style;
use microlens_common::{Finding, Severity};
use serde::Serialize;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'. Expected one of: text, json")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl OutputConfig {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        console::set_colors_enabled(color);
        Self { format }
    }

    /// Emit a final result value. In JSON mode it is serialized to stdout;
    /// in text mode `text_fn` renders it.
    pub fn emit_result<T: Serialize>(&self, value: &T, text_fn: impl FnOnce(&T)) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
            }
            OutputFormat::Text => text_fn(value),
        }
        Ok(())
    }
}

/// One finding as a styled text line.
pub fn render_finding(finding: &Finding) -> String {
    let tag = match finding.severity {
        Severity::Error => style("error").red().bold(),
        Severity::Warning => style("warning").yellow(),
    };
    let mut location = String::new();
    if let Some(event) = &finding.event_id {
        location.push_str(event);
    }
    if let Some(solution) = &finding.solution_id {
        if !location.is_empty() {
            location.push('/');
        }
        location.push_str(solution);
    }
    if location.is_empty() {
        format!("{tag}[{}]: {}", finding.code, finding.message)
    } else {
        format!("{tag}[{}] {}: {}", finding.code, style(location).dim(), finding.message)
    }
}
