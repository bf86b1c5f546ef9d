// ============================================================
// Layer 2 — IngestUseCase
// ============================================================
// Orchestrates the full repacking pipeline in order:
//
//   Step 1: Find matching archives      (this module)
//   Step 2: Walk each archive's entries (Layer 4 - archive)
//   Step 3: Normalize each record       (Layer 4 - normalizer)
//   Step 4: Persist each record         (Layer 4 - layout)
//
// Archives are processed one at a time, entries within an
// archive one at a time — strictly sequential, no shared state
// between records beyond the output tree itself.
//
// There is no skip-and-continue: the first malformed filename,
// unreadable archive, or bad MAT container aborts the whole
// run with a context chain naming the offending file.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Rust Book §9 (Error Handling with anyhow)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::archive::ArchiveRecords;
use crate::data::layout::LayoutWriter;
use crate::domain::mode::Mode;
use crate::domain::traits::RecordSink;

// ─── Ingest Configuration ─────────────────────────────────────────────────────
// Everything one run needs. Defaults mirror the CLI defaults so
// a config built in code behaves like a bare invocation.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Directory scanned for `<mode>*.zip` archives
    pub input_dir: PathBuf,

    /// Root of the written patient/class/segment tree
    pub output_dir: PathBuf,

    /// train or test; controls both the archive glob and the
    /// output path shape
    pub mode: Mode,

    /// Scratch root for extraction (a ramdisk by default)
    pub tmp_dir: PathBuf,

    /// Print each destination path as it is written
    pub verbose: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/processed"),
            mode: Mode::Train,
            tmp_dir: PathBuf::from("/dev/shm"),
            verbose: true,
        }
    }
}

// ─── IngestUseCase ────────────────────────────────────────────────────────────
// Owns the config and runs the full pipeline.
pub struct IngestUseCase {
    config: IngestConfig,
}

impl IngestUseCase {
    /// Create a new IngestUseCase with the given configuration
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Execute the full repacking pipeline end to end.
    /// Returns the number of records written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        // ── Step 1: Find the archives for this mode ───────────────────────────
        let archives = find_archives(&cfg.input_dir, cfg.mode)?;
        if archives.is_empty() {
            tracing::warn!(
                "No {}*.zip archives found in '{}' — nothing to do",
                cfg.mode,
                cfg.input_dir.display()
            );
            return Ok(0);
        }
        tracing::info!("Found {} archive(s) to process", archives.len());

        let writer = LayoutWriter::new(&cfg.output_dir, cfg.mode, cfg.verbose);

        // ── Step 2-4: Walk, normalize, persist — one record at a time ─────────
        let mut written = 0usize;
        for archive_path in &archives {
            tracing::info!("Processing archive '{}'", archive_path.display());

            // The walker owns the scratch directory; dropping it
            // at the end of this scope (or on error propagation)
            // removes every extracted temp file
            let walker = ArchiveRecords::open(archive_path, &cfg.tmp_dir)?;
            for record in walker {
                let record = record.with_context(|| {
                    format!("while processing '{}'", archive_path.display())
                })?;
                writer.persist(&record)?;
                written += 1;
            }
        }

        tracing::info!(
            "Wrote {} record(s) under '{}'",
            written,
            cfg.output_dir.join(cfg.mode.as_str()).display()
        );
        Ok(written)
    }
}

/// List `<mode>*.zip` files in the input directory, sorted by
/// name so runs are deterministic. A missing input directory is
/// an empty list, not an error — the tool can run before any
/// data has been downloaded.
fn find_archives(input_dir: &Path, mode: Mode) -> Result<Vec<PathBuf>> {
    if !input_dir.exists() {
        tracing::warn!(
            "Input directory '{}' does not exist — returning no archives",
            input_dir.display()
        );
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("cannot list input directory '{}'", input_dir.display()))?;

    let mut archives = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("cannot list input directory '{}'", input_dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        if name.starts_with(mode.as_str()) && name.ends_with(".zip") {
            archives.push(entry.path());
        }
    }

    archives.sort();
    Ok(archives)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::io::Write;

    use ndarray::{arr2, ArrayD};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use crate::infra::mat5::{self, MatValue};

    /// Write a dataset-shaped recording and return its bytes.
    fn recording_bytes(dir: &Path, data: ArrayD<f64>) -> Vec<u8> {
        let path = dir.join("fixture.mat");
        mat5::write_struct(
            &path,
            "dataStruct",
            &[("data", data), ("iEEGsamplingRate", arr2(&[[400.0]]).into_dyn())],
        )
        .unwrap();
        fs::read(&path).unwrap()
    }

    fn build_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, bytes) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap();
    }

    fn config(root: &Path, mode: Mode) -> IngestConfig {
        IngestConfig {
            input_dir: root.join("raw"),
            output_dir: root.join("processed"),
            mode,
            tmp_dir: root.to_path_buf(),
            verbose: false,
        }
    }

    #[test]
    fn test_train_archive_lands_in_class_tree() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw")).unwrap();

        // The spec's concrete scenario: train1.zip containing
        // 1_1_0.mat with a 4×4 zero data matrix
        let zeros = ArrayD::zeros(ndarray::IxDyn(&[4, 4]));
        let mat = recording_bytes(tmp.path(), zeros.clone());
        build_zip(&tmp.path().join("raw/train1.zip"), &[("1_1_0.mat", mat)]);

        let written = IngestUseCase::new(config(tmp.path(), Mode::Train))
            .execute()
            .unwrap();
        assert_eq!(written, 1);

        let out = tmp.path().join("processed/train/1/0/1.mat");
        assert!(out.exists());

        let vars = mat5::read_variables(&out).unwrap();
        assert_eq!(vars[0].0, "data");
        assert_eq!(vars[0].1, MatValue::Numeric(zeros));
    }

    #[test]
    fn test_test_archive_lands_without_class_level() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw")).unwrap();

        let mat = recording_bytes(tmp.path(), arr2(&[[1.5, 2.5]]).into_dyn());
        build_zip(&tmp.path().join("raw/test2.zip"), &[("3_7.mat", mat)]);

        let written = IngestUseCase::new(config(tmp.path(), Mode::Test))
            .execute()
            .unwrap();
        assert_eq!(written, 1);
        assert!(tmp.path().join("processed/test/3/7.mat").exists());
    }

    #[test]
    fn test_only_matching_archives_are_read() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw")).unwrap();

        let mat = recording_bytes(tmp.path(), arr2(&[[1.0]; 2]).into_dyn());
        build_zip(&tmp.path().join("raw/train1.zip"), &[("1_1_0.mat", mat.clone())]);
        // Wrong mode and wrong extension — both must be ignored
        build_zip(&tmp.path().join("raw/test1.zip"), &[("9_9.mat", mat.clone())]);
        fs::write(tmp.path().join("raw/train2.tar"), b"not a zip").unwrap();

        let written = IngestUseCase::new(config(tmp.path(), Mode::Train))
            .execute()
            .unwrap();
        assert_eq!(written, 1);
        assert!(!tmp.path().join("processed/test").exists());
    }

    #[test]
    fn test_missing_input_dir_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        // config points at raw/, which was never created
        let written = IngestUseCase::new(config(tmp.path(), Mode::Train))
            .execute()
            .unwrap();
        assert_eq!(written, 0);
    }

    #[test]
    fn test_first_malformed_record_aborts_the_run() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw")).unwrap();

        let good = recording_bytes(tmp.path(), arr2(&[[1.0]; 2]).into_dyn());
        build_zip(
            &tmp.path().join("raw/train1.zip"),
            &[
                ("1_1_0.mat", good.clone()),
                ("badname.mat", good.clone()),
                ("1_3_0.mat", good),
            ],
        );

        let result = IngestUseCase::new(config(tmp.path(), Mode::Train)).execute();
        assert!(result.is_err());

        // The record before the bad one was written, the one
        // after it was never reached
        assert!(tmp.path().join("processed/train/1/0/1.mat").exists());
        assert!(!tmp.path().join("processed/train/1/0/3.mat").exists());
    }

    #[test]
    fn test_archives_process_in_name_order() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("raw")).unwrap();

        let first = recording_bytes(tmp.path(), arr2(&[[1.0]]).into_dyn());
        let second = recording_bytes(tmp.path(), arr2(&[[2.0, 2.0]]).into_dyn());
        // Same identifiers in both archives: the later archive
        // must overwrite the earlier one's output
        build_zip(&tmp.path().join("raw/train2.zip"), &[("1_1_0.mat", second)]);
        build_zip(&tmp.path().join("raw/train1.zip"), &[("1_1_0.mat", first)]);

        IngestUseCase::new(config(tmp.path(), Mode::Train))
            .execute()
            .unwrap();

        let out = tmp.path().join("processed/train/1/0/1.mat");
        let vars = mat5::read_variables(&out).unwrap();
        assert_eq!(
            vars[0].1,
            MatValue::Numeric(arr2(&[[2.0, 2.0]]).into_dyn())
        );
    }
}
