// ============================================================
// Layer 3 — Segment Record Domain Types
// ============================================================
// Represents one sensor recording segment after normalization:
// the named sub-fields of the MAT struct, plus the identifiers
// parsed out of the source filename.
//
// Every sub-field is either a plain scalar or an N-dimensional
// array — never "maybe a 1×1 array that is really a number".
// Modelling that as an explicit enum keeps the normalizer's
// output type uniform and forces every consumer to say which
// shape it expects.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)
//            Rust Book §8 (Hash Maps — here an ordered map)

use indexmap::IndexMap;
use ndarray::ArrayD;

/// One field of a parsed record: either a scalar that was
/// unwrapped from a 1×1 container, or an array of any other shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A 1×1 sub-field unwrapped to a plain number
    Scalar(f64),

    /// Any other shape, kept as-is (the 16-channel sensor
    /// matrix is the important case)
    Array(ArrayD<f64>),
}

impl FieldValue {
    /// Borrow the array inside an Array field, or None for a Scalar.
    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            FieldValue::Array(a) => Some(a),
            FieldValue::Scalar(_) => None,
        }
    }

    /// The scalar inside a Scalar field, or None for an Array.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FieldValue::Scalar(x) => Some(*x),
            FieldValue::Array(_) => None,
        }
    }
}

// ─── SegmentIds ───────────────────────────────────────────────────────────────

/// The identifiers encoded in a data file's name.
///
/// Filenames look like `<patient>_<segment>.mat` (test data) or
/// `<patient>_<segment>_<class>.mat` (train data, with the
/// ground-truth label as the third part).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentIds {
    /// Integer id grouping multiple segments
    pub patient: i64,

    /// One recording session, unique within a patient
    pub segment: i64,

    /// Ground-truth category — present only for train data
    pub class_label: Option<i64>,
}

impl SegmentIds {
    /// Parse identifiers from a filename stem (extension already
    /// stripped), split on `_`.
    ///
    /// The first two parts are patient and segment. A class label
    /// is attached only when the stem has exactly three parts —
    /// stems with extra parts keep just the identifiers.
    ///
    /// Errors if there are fewer than two parts or a part is not
    /// an integer; a bad filename poisons the whole run.
    pub fn parse_stem(stem: &str) -> Result<Self, String> {
        let parts: Vec<&str> = stem.split('_').collect();

        if parts.len() < 2 {
            return Err(format!(
                "expected at least <patient>_<segment> in filename stem '{}'",
                stem
            ));
        }

        let parse_int = |part: &str, what: &str| -> Result<i64, String> {
            part.parse::<i64>()
                .map_err(|_| format!("{} '{}' in stem '{}' is not an integer", what, part, stem))
        };

        let patient = parse_int(parts[0], "patient id")?;
        let segment = parse_int(parts[1], "segment id")?;

        // Exactly three parts means the third is the class label.
        // (Two parts = test data, no label.)
        let class_label = if parts.len() == 3 {
            Some(parse_int(parts[2], "class label")?)
        } else {
            None
        };

        Ok(Self { patient, segment, class_label })
    }
}

// ─── SegmentRecord ────────────────────────────────────────────────────────────

/// One fully normalized recording segment: every named sub-field
/// of the MAT struct (insertion order preserved, matching the
/// field order in the source file) plus the filename identifiers.
///
/// Records are built once by the normalizer and never mutated —
/// they live for exactly one trip through the pipeline.
#[derive(Debug, Clone)]
pub struct SegmentRecord {
    /// Sub-field name → scalar or array, in source order
    pub fields: IndexMap<String, FieldValue>,

    /// Identifiers parsed from the filename stem
    pub ids: SegmentIds,
}

impl SegmentRecord {
    /// The primary sensor matrix — the `data` sub-field.
    /// This is the only field that gets re-persisted downstream.
    pub fn data(&self) -> Option<&ArrayD<f64>> {
        self.fields.get("data").and_then(FieldValue::as_array)
    }
}
