// ============================================================
// Layer 4 — Archive Walker
// ============================================================
// Opens one zip archive and yields a parsed record for every
// entry whose name ends in `.mat`, one at a time.
//
// Why extract to scratch space at all?
//   The MAT parser works on files, and the archives are large —
//   extracting one entry at a time into a scratch directory
//   (by default under /dev/shm, so it never touches a real
//   disk) keeps memory flat no matter how big the archive is.
//
// The scratch directory is the one resource this tool must
// never leak. It is owned as a tempfile::TempDir, so it is
// removed when the walker is dropped — after normal
// exhaustion, after the consumer stops early, or during
// unwinding if something panics mid-iteration. tempfile also
// retries the create under a fresh unique name if it collides
// with an existing one.
//
// The iterator is finite and non-restartable: each entry is
// extracted and parsed exactly once, in archive order.
//
// Reference: Rust Book §13 (Iterators), §15 (Drop)
//            zip / tempfile crate documentation

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use zip::ZipArchive;

use crate::data::normalizer::{self, DATA_SUFFIX};
use crate::domain::record::SegmentRecord;

/// Lazy iterator over one archive's `.mat` entries.
pub struct ArchiveRecords {
    archive: ZipArchive<File>,
    /// Names of the .mat entries, in archive order
    entries: Vec<String>,
    /// Scratch space for extraction; removed on drop
    scratch: TempDir,
    next: usize,
}

impl ArchiveRecords {
    /// Open an archive and set up its scratch directory under
    /// `tmp_root`. Fails if the archive cannot be opened or the
    /// scratch directory cannot be created.
    pub fn open(archive_path: &Path, tmp_root: &Path) -> Result<Self> {
        let file = File::open(archive_path)
            .with_context(|| format!("cannot open archive '{}'", archive_path.display()))?;
        let archive = ZipArchive::new(file)
            .with_context(|| format!("cannot read archive '{}'", archive_path.display()))?;

        // Entry names are collected up front (they borrow the
        // archive), but extraction and parsing stay lazy
        let entries: Vec<String> = archive
            .file_names()
            .filter(|name| name.ends_with(DATA_SUFFIX))
            .map(String::from)
            .collect();

        let scratch = TempDir::new_in(tmp_root).with_context(|| {
            format!("cannot create scratch directory under '{}'", tmp_root.display())
        })?;

        Ok(Self { archive, entries, scratch, next: 0 })
    }

    /// Where this walker extracts entries to.
    /// Exposed so tests can verify the directory is gone after drop.
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// Extract one entry into the scratch directory and return
    /// the extracted file's path.
    fn extract(&mut self, entry_name: &str) -> Result<PathBuf> {
        let mut entry = self
            .archive
            .by_name(entry_name)
            .with_context(|| format!("cannot read archive entry '{}'", entry_name))?;

        // enclosed_name rejects entries that would escape the
        // scratch directory (absolute paths, "..")
        let relative = entry
            .enclosed_name()
            .with_context(|| format!("archive entry '{}' has an unsafe path", entry_name))?;
        let out_path = self.scratch.path().join(relative);

        // Entries may sit inside a folder within the archive
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create '{}'", parent.display()))?;
        }

        let mut out = File::create(&out_path)
            .with_context(|| format!("cannot create '{}'", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("cannot extract '{}'", entry_name))?;

        Ok(out_path)
    }
}

impl Iterator for ArchiveRecords {
    type Item = Result<SegmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry_name = self.entries.get(self.next)?.clone();
        self.next += 1;

        let record = self
            .extract(&entry_name)
            .and_then(|path| normalizer::read_record(&path));
        Some(record)
    }
}
