// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Handles the cross-cutting concern that doesn't belong in
// any business layer:
//
//   mat5.rs — MATLAB Level 5 MAT-file codec
//             Reads the dataset's struct-in-a-file recordings
//             (including zlib-compressed elements and the
//             "small data element" tag format) and writes the
//             compressed single-matrix output files. Scoped to
//             exactly the shapes this dataset uses — numeric
//             matrices and 1×1 struct arrays.
//
// Why is this a separate layer?
//   The data layer should say "read the struct out of this
//   file", not carry tag-parsing and padding arithmetic.
//   Keeping the binary format here:
//   - Prevents duplication between reader and writer
//   - Keeps other layers focused on their core logic
//   - Makes the lossless round-trip independently testable
//
// Reference: Rust Book §7 (Modules)
//            MAT-File Format reference (MathWorks documentation)

/// MATLAB Level 5 MAT-file reading and writing
pub mod mat5;
