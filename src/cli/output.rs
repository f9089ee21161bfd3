//! Output formatting for multiple formats
//!
//! Human output goes through a [`Renderer`]; JSON and YAML serialize the
//! report types of the library.
//!
//! # Example
//!
//! ```
//! use permscope::cli::output::{OutputFormat, OutputFormatter};
//! use permscope::{Permissions, Renderer};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json, Renderer::plain());
//! let decoded = vec![("644".to_string(), Permissions::from_mode(0o644))];
//! let output = formatter.format_decoded(&decoded).unwrap();
//! assert!(output.contains("\"octal\": \"0644\""));
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::entry::{EntryReport, FileEntry};
use crate::permissions::{Permissions, PermissionsReport};
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Rendered listing lines
    Human,
}

/// A decoded mode together with the text it was parsed from.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedReport {
    pub input: String,
    #[serde(flatten)]
    pub permissions: PermissionsReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub threshold: f64,
    pub scanned: usize,
    pub findings: Vec<EntryReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrantReport {
    pub path: PathBuf,
    pub before: PermissionsReport,
    pub after: PermissionsReport,
}

pub struct OutputFormatter {
    format: OutputFormat,
    renderer: Renderer,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, renderer: Renderer) -> Self {
        Self { format, renderer }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// One line per entry, owner and group columns aligned.
    pub fn format_entries(&self, entries: &[FileEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(join_lines(self.renderer.entries(entries))),
            OutputFormat::Json => to_json(&entry_reports(entries), "entries"),
            OutputFormat::Yaml => to_yaml(&entry_reports(entries), "entries"),
        }
    }

    pub fn format_decoded(&self, decoded: &[(String, Permissions)]) -> Result<String> {
        match self.format {
            OutputFormat::Human => {
                let width = decoded.iter().map(|(input, _)| input.len()).max().unwrap_or(0);
                let lines = decoded.iter().map(|(input, perms)| {
                    format!(
                        "{:>width$}  {}",
                        input,
                        self.renderer.permissions(perms),
                        width = width
                    )
                });
                Ok(join_lines(lines))
            }
            OutputFormat::Json => to_json(&decoded_reports(decoded), "decoded modes"),
            OutputFormat::Yaml => to_yaml(&decoded_reports(decoded), "decoded modes"),
        }
    }

    pub fn format_audit(
        &self,
        findings: &[FileEntry],
        scanned: usize,
        threshold: f64,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Human => {
                let mut output = String::new();
                let lines = self.renderer.entries(findings);
                for (line, entry) in lines.iter().zip(findings) {
                    output.push_str(&format!("{}  {:.2}\n", line, entry.permissions.risk()));
                }
                output.push_str(&format!(
                    "{} of {} entries at or above risk {:.2}\n",
                    findings.len(),
                    scanned,
                    threshold
                ));
                Ok(output)
            }
            OutputFormat::Json | OutputFormat::Yaml => {
                let report = AuditReport {
                    threshold,
                    scanned,
                    findings: entry_reports(findings),
                };
                if self.format == OutputFormat::Json {
                    to_json(&report, "audit report")
                } else {
                    to_yaml(&report, "audit report")
                }
            }
        }
    }

    pub fn format_grant(
        &self,
        path: &Path,
        before: &Permissions,
        after: &Permissions,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(format!(
                "{}\n  before {}\n  after  {}\n",
                path.display(),
                self.renderer.permissions(before),
                self.renderer.permissions(after)
            )),
            OutputFormat::Json | OutputFormat::Yaml => {
                let report = GrantReport {
                    path: path.to_path_buf(),
                    before: before.report(),
                    after: after.report(),
                };
                if self.format == OutputFormat::Json {
                    to_json(&report, "grant report")
                } else {
                    to_yaml(&report, "grant report")
                }
            }
        }
    }
}

fn entry_reports(entries: &[FileEntry]) -> Vec<EntryReport> {
    entries.iter().map(FileEntry::report).collect()
}

fn decoded_reports(decoded: &[(String, Permissions)]) -> Vec<DecodedReport> {
    decoded
        .iter()
        .map(|(input, perms)| DecodedReport {
            input: input.clone(),
            permissions: perms.report(),
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    let mut output = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))?;
    output.push('\n');
    Ok(output)
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&line);
        output.push('\n');
    }
    output
}
