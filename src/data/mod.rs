// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw zip archives all the
// way to the repacked output tree.
//
// The pipeline flows in this order:
//
//   <mode>*.zip archives
//       │
//       ▼
//   ArchiveRecords    → extracts .mat entries to scratch space,
//       │               yields one parsed record per entry
//       ▼
//   normalizer        → MAT struct + filename → SegmentRecord
//       │               (1×1 sub-fields unwrapped to scalars)
//       ▼
//   LayoutWriter      → <out>/<mode>/<patient>[/<class>]/<segment>.mat
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            zip crate documentation

/// Walks one zip archive, yielding a record per .mat entry
pub mod archive;

/// Parses one extracted MAT-file into a SegmentRecord
pub mod normalizer;

/// Computes destination paths and persists records
pub mod layout;
