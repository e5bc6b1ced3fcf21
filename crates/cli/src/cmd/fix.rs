use std::path::PathBuf;

use fmcheck_core::files::Mode;
use fmcheck_core::reconcile::Reconciler;

use super::output::{print_errors, print_json, FixOutput, OutputFormat, Report, Summary};
use super::pool::{process_all, Processed};

/// Apply the enabled policies to every file. Returns the process exit code.
pub fn run(
    reconciler: &Reconciler,
    files: &[PathBuf],
    dry_run: bool,
    format: OutputFormat,
) -> i32 {
    let results = process_all(reconciler, files, Mode::Fix { dry_run });
    let summary = Summary::of(&results);
    let failed = summary.errors > 0;

    match format {
        OutputFormat::Json => {
            let files: Vec<_> = results.iter().map(FixOutput::from).collect();
            print_json(&Report { files, summary });
        }
        OutputFormat::Table => {
            print_changes(&results, dry_run);
            let verb = if dry_run { "would change" } else { "changed" };
            println!(
                "{} files processed: {} {verb}, {} unchanged, {} errors",
                summary.files,
                summary.changed,
                summary.files - summary.changed - summary.errors,
                summary.errors
            );
        }
    }

    print_errors(&results);
    if failed {
        1
    } else {
        0
    }
}

fn print_changes(results: &[Processed], dry_run: bool) {
    for p in results {
        let Ok(report) = &p.result else { continue };
        if report.plan.is_empty() {
            continue;
        }
        let marker = if dry_run { " (dry run)" } else { "" };
        println!("{}{marker}", p.path.display());
        for op in &report.plan {
            println!("  - {op}");
        }
    }
}
