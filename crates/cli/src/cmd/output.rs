//! Shared output formatting for analyze and fix runs.

use clap::ValueEnum;
use fmcheck_core::reconcile::{Diagnostic, DocumentError, EditOp};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::pool::Processed;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Per-document error for JSON output.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub kind: &'static str,
    pub message: String,
}

impl From<&DocumentError> for ErrorOutput {
    fn from(err: &DocumentError) -> Self {
        Self { kind: err.kind(), message: err.to_string() }
    }
}

/// One analyzed file for JSON output.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput<'a> {
    pub path: String,
    pub conformant: bool,
    #[serde(flatten)]
    pub diagnostic: Option<&'a Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

impl<'a> From<&'a Processed> for AnalyzeOutput<'a> {
    fn from(p: &'a Processed) -> Self {
        let path = p.path.display().to_string();
        match &p.result {
            Ok(report) => Self {
                path,
                conformant: report.diagnostic.is_conformant(),
                diagnostic: Some(&report.diagnostic),
                error: None,
            },
            Err(e) => Self { path, conformant: false, diagnostic: None, error: Some(e.into()) },
        }
    }
}

/// One fixed file for JSON output.
#[derive(Debug, Serialize)]
pub struct FixOutput<'a> {
    pub path: String,
    pub written: bool,
    pub ops: Vec<&'a EditOp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

impl<'a> From<&'a Processed> for FixOutput<'a> {
    fn from(p: &'a Processed) -> Self {
        let path = p.path.display().to_string();
        match &p.result {
            Ok(report) => Self {
                path,
                written: report.written,
                ops: report.plan.iter().collect(),
                error: None,
            },
            Err(e) => Self { path, written: false, ops: Vec::new(), error: Some(e.into()) },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub files: usize,
    pub conformant: usize,
    pub nonconformant: usize,
    pub changed: usize,
    pub errors: usize,
}

impl Summary {
    pub fn of(results: &[Processed]) -> Self {
        let mut summary =
            Self { files: results.len(), conformant: 0, nonconformant: 0, changed: 0, errors: 0 };
        for p in results {
            match &p.result {
                Ok(report) => {
                    if report.diagnostic.is_conformant() {
                        summary.conformant += 1;
                    } else {
                        summary.nonconformant += 1;
                    }
                    if !report.plan.is_empty() {
                        summary.changed += 1;
                    }
                }
                Err(_) => summary.errors += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Serialize)]
pub struct Report<T: Serialize> {
    pub files: Vec<T>,
    pub summary: Summary,
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

#[derive(Tabled)]
pub struct AnalyzeRow {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Missing")]
    pub missing: String,
    #[tabled(rename = "Extra")]
    pub extra: String,
    #[tabled(rename = "Order")]
    pub order: String,
}

impl From<&Processed> for AnalyzeRow {
    fn from(p: &Processed) -> Self {
        let path = p.path.display().to_string();
        match &p.result {
            Ok(report) => {
                let d = &report.diagnostic;
                Self {
                    path,
                    missing: list_or_dash(&d.missing_keys),
                    extra: list_or_dash(&d.extra_keys),
                    order: if d.order_mismatch { "mismatch" } else { "ok" }.to_string(),
                }
            }
            Err(e) => Self {
                path,
                missing: format!("error: {}", e.kind()),
                extra: "-".to_string(),
                order: "-".to_string(),
            },
        }
    }
}

fn list_or_dash(keys: &[String]) -> String {
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join(", ")
    }
}

pub fn print_table(rows: Vec<AnalyzeRow>) {
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

/// Print per-document errors to stderr after the main output.
pub fn print_errors(results: &[Processed]) {
    for p in results {
        if let Err(e) = &p.result {
            eprintln!("error: {}: {}", p.path.display(), e);
        }
    }
}
