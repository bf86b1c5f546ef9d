// ============================================================
// Layer 4 — Record Normalizer
// ============================================================
// Turns one extracted MAT-file into a SegmentRecord:
//
//   1. Read the file's `dataStruct` variable (every recording
//      in the dataset is a single struct under that name).
//   2. For each named sub-field, unwrap a 1×1-shaped value
//      into a plain scalar; keep every other shape as an
//      array. The shape check is explicit — exactly (1, 1) —
//      so a 1×N vector stays an array.
//   3. Parse the filename stem on `_` for the identifiers:
//      patient, segment, and (train data only) class label.
//
// Why unwrap 1×1 fields at all?
//   MATLAB has no scalars — a number is a 1×1 matrix. Fields
//   like the sampling rate come out of the file as tiny
//   matrices, and every consumer downstream would have to
//   unwrap them. Doing it once here keeps the record uniform.
//
// Reference: Rust Book §6 (Pattern Matching)
//            Rust Book §9 (Error Handling)

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::domain::record::{FieldValue, SegmentIds, SegmentRecord};
use crate::infra::mat5::{self, MatValue};

/// The struct variable every recording file contains
pub const DATA_STRUCT_VAR: &str = "dataStruct";

/// The data-file suffix entries are filtered on
pub const DATA_SUFFIX: &str = ".mat";

/// Parse one extracted data file into a SegmentRecord.
pub fn read_record(path: &Path) -> Result<SegmentRecord> {
    let raw_fields = mat5::read_struct(path, DATA_STRUCT_VAR)
        .with_context(|| format!("cannot parse recording '{}'", path.display()))?;

    let mut fields = IndexMap::with_capacity(raw_fields.len());
    for (name, value) in raw_fields {
        fields.insert(name, normalize_field(value)?);
    }

    let ids = parse_ids(path)?;
    Ok(SegmentRecord { fields, ids })
}

/// Unwrap a 1×1 numeric value to a scalar; keep anything else
/// as an array. Nested structs do not occur in the dataset.
fn normalize_field(value: MatValue) -> Result<FieldValue> {
    match value {
        MatValue::Numeric(array) => {
            if array.shape() == [1, 1] {
                Ok(FieldValue::Scalar(array[[0, 0]]))
            } else {
                Ok(FieldValue::Array(array))
            }
        }
        MatValue::Struct(_) => {
            anyhow::bail!("nested structs are not part of the recording format")
        }
    }
}

/// Parse patient/segment/class identifiers from the file name.
fn parse_ids(path: &Path) -> Result<SegmentIds> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("recording '{}' has no usable file name", path.display()))?;

    let stem = file_name.strip_suffix(DATA_SUFFIX).unwrap_or(file_name);

    SegmentIds::parse_stem(stem)
        .map_err(|reason| anyhow::anyhow!("bad recording filename '{}': {}", file_name, reason))
}
