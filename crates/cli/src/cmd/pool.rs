//! Parallel per-file processing.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use fmcheck_core::files::{process_file, FileReport, Mode};
use fmcheck_core::reconcile::{DocumentError, Reconciler};

/// Result for one input file, in input order.
pub struct Processed {
    pub path: PathBuf,
    pub result: Result<FileReport, DocumentError>,
}

/// Process every file on a scoped pool, one contiguous chunk per worker.
///
/// Results come back in the order of `files`.
pub fn process_all(reconciler: &Reconciler, files: &[PathBuf], mode: Mode) -> Vec<Processed> {
    let workers = thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(files.len())
        .max(1);
    let chunk_size = files.len().div_ceil(workers).max(1);
    tracing::debug!(files = files.len(), workers, "processing files");

    thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| Processed {
                            path: path.clone(),
                            result: process_file(reconciler, path, mode),
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}
