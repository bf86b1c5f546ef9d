// ============================================================
// Layer 4 — Layout Writer
// ============================================================
// Persists one record into the output tree. The destination is
// a pure function of the identifiers and the run mode:
//
//   train → <output_dir>/train/<patient>/<class>/<segment>.mat
//   test  → <output_dir>/test/<patient>/<segment>.mat
//
// Only the `data` matrix is written, as a compressed MAT-file;
// the other struct fields (sampling rate, sample count, ...)
// exist only to be read, never re-persisted.
//
// Directory creation goes through fs::create_dir_all, which
// treats already-existing directories as success — the
// idempotence the contract asks for. An existing file at the
// destination is silently overwritten: identical identifiers
// mean identical paths, and the last writer wins.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Working with Files and Paths)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::mode::Mode;
use crate::domain::record::{SegmentIds, SegmentRecord};
use crate::domain::traits::RecordSink;
use crate::infra::mat5;

/// Compute where a record with these identifiers lands.
/// Pure: no filesystem access, same inputs → same path.
pub fn destination_path(output_dir: &Path, mode: Mode, ids: &SegmentIds) -> Result<PathBuf> {
    let mut path = output_dir.join(mode.as_str()).join(ids.patient.to_string());

    if mode == Mode::Train {
        let class = ids.class_label.with_context(|| {
            format!(
                "train-mode record {}_{} has no class label in its filename",
                ids.patient, ids.segment
            )
        })?;
        path.push(class.to_string());
    }

    path.push(format!("{}.mat", ids.segment));
    Ok(path)
}

/// Writes records into the patient/class/segment tree.
pub struct LayoutWriter {
    output_dir: PathBuf,
    mode: Mode,
    /// Print each destination path as it is written
    verbose: bool,
}

impl LayoutWriter {
    pub fn new(output_dir: impl Into<PathBuf>, mode: Mode, verbose: bool) -> Self {
        Self { output_dir: output_dir.into(), mode, verbose }
    }
}

impl RecordSink for LayoutWriter {
    fn persist(&self, record: &SegmentRecord) -> Result<PathBuf> {
        let path = destination_path(&self.output_dir, self.mode, &record.ids)?;

        let data = record.data().with_context(|| {
            format!(
                "record {}_{} has no data matrix",
                record.ids.patient, record.ids.segment
            )
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create '{}'", parent.display()))?;
        }

        if self.verbose {
            // The destination listing is the tool's primary
            // output, so it goes to stdout, not the log
            println!("Storing: {}", path.display());
        }

        mat5::write_array(&path, "data", data)
            .with_context(|| format!("cannot write '{}'", path.display()))?;

        Ok(path)
    }
}
