use std::path::PathBuf;

use fmcheck_core::files::Mode;
use fmcheck_core::reconcile::Reconciler;

use super::output::{
    print_errors, print_json, print_table, AnalyzeOutput, AnalyzeRow, OutputFormat, Report,
    Summary,
};
use super::pool::process_all;

/// Diff every file against the template. Returns the process exit code.
pub fn run(reconciler: &Reconciler, files: &[PathBuf], format: OutputFormat) -> i32 {
    let results = process_all(reconciler, files, Mode::Analyze);
    let summary = Summary::of(&results);
    let failed = summary.errors > 0;

    match format {
        OutputFormat::Json => {
            let files: Vec<_> = results.iter().map(AnalyzeOutput::from).collect();
            print_json(&Report { files, summary });
        }
        OutputFormat::Table => {
            print_table(results.iter().map(AnalyzeRow::from).collect());
            println!(
                "{} files checked: {} conformant, {} nonconformant, {} errors",
                summary.files, summary.conformant, summary.nonconformant, summary.errors
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
