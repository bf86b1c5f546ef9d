// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// the seams where one pipeline stage hands off to the next.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - ArchiveRecords implements RecordSource
//   - A future DirRecords (loose .mat files, no zip) could
//     also implement RecordSource
//   - The application layer only sees RecordSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §13 (Iterators)

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::record::SegmentRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a lazy stream of records.
///
/// The stream is finite and non-restartable: once exhausted (or
/// abandoned after an error) the source is done, and any scratch
/// resources it holds are released when it is dropped.
///
/// Implementations:
///   - ArchiveRecords → one zip archive's .mat entries
pub trait RecordSource: Iterator<Item = Result<SegmentRecord>> {}

/// Every fallible record iterator is a RecordSource.
impl<T> RecordSource for T where T: Iterator<Item = Result<SegmentRecord>> {}

// ─── RecordSink ───────────────────────────────────────────────────────────────
/// Any component that can persist one record.
///
/// Implementations:
///   - LayoutWriter → patient/class/segment tree of MAT-files
pub trait RecordSink {
    /// Persist one record, returning the path it was written to.
    /// Writing the same identifiers twice hits the same path —
    /// the second write silently replaces the first.
    fn persist(&self, record: &SegmentRecord) -> Result<PathBuf>;
}
