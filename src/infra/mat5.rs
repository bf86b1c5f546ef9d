// ============================================================
// Layer 5 — MAT Level 5 Codec
// ============================================================
// Reads and writes the MATLAB Level 5 MAT-file binary format,
// scoped to exactly what this dataset contains.
//
// How a Level 5 MAT-file is laid out:
//   - 128-byte header: 116 bytes of description text,
//     8 bytes of subsystem offset, a 2-byte version (0x0100)
//     and a 2-byte endian indicator ("IM" = little-endian).
//   - A sequence of data elements. Each element is an 8-byte
//     tag (u32 type, u32 byte count) followed by the payload,
//     padded to the next 8-byte boundary. Elements of 4 bytes
//     or fewer may use the "small data element" format, where
//     type and length share the first word of the tag and the
//     payload sits in the second word.
//   - A matrix (miMATRIX) element nests sub-elements: array
//     flags, dimensions, name, then the data — or, for a
//     struct array, the field name table and one nested matrix
//     per field.
//   - A miCOMPRESSED element wraps one complete element in a
//     zlib stream; that is how MATLAB (and scipy) usually save.
//
// Supported on read: numeric matrices of every integer/float
// type (all widened to f64, column-major order preserved) and
// 1×1 struct arrays — the shape of every `dataStruct` in the
// dataset. Cell arrays, objects, sparse and complex matrices
// are outside the dataset and are rejected, as are big-endian
// and v7.3 (HDF5-based) files.
//
// Supported on write: one real double matrix under a given
// variable name, zlib-compressed (the tool's output files),
// plus 1×1 structs so tests can fabricate input recordings.
//
// Reference: MAT-File Format reference (MathWorks documentation)
//            byteorder / flate2 crate documentation

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use thiserror::Error;

// ─── Element types (the `mi*` constants from the format spec) ─────────────────
const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT16: u32 = 3;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_SINGLE: u32 = 7;
const MI_DOUBLE: u32 = 9;
const MI_INT64: u32 = 12;
const MI_UINT64: u32 = 13;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;
const MI_UTF8: u32 = 16;
const MI_UTF16: u32 = 17;

// ─── Matrix classes (the `mx*CLASS` constants) ────────────────────────────────
const MX_CELL: u8 = 1;
const MX_STRUCT: u8 = 2;
const MX_OBJECT: u8 = 3;
const MX_CHAR: u8 = 4;
const MX_SPARSE: u8 = 5;
const MX_DOUBLE: u8 = 6;
const MX_UINT64: u8 = 15;

/// Complex flag bit in the array-flags word
const FLAG_COMPLEX: u32 = 0x0800;

/// Fixed slot width for struct field names, matching MATLAB's own writer
const FIELD_NAME_LEN: usize = 32;

// ─── Error taxonomy ───────────────────────────────────────────────────────────

/// Everything that can go wrong while reading or writing a MAT-file.
/// Data-format problems are fatal to the whole run — there is no
/// skip-and-continue — so each variant carries enough context to
/// diagnose the offending file from the error chain alone.
#[derive(Debug, Error)]
pub enum MatError {
    #[error("not a Level 5 MAT-file (bad header)")]
    BadHeader,

    #[error("big-endian MAT-files are not supported")]
    BigEndian,

    #[error("unsupported MAT element type {0}")]
    UnsupportedType(u32),

    #[error("unsupported matrix class {0}")]
    UnsupportedClass(u8),

    #[error("variable '{0}' not found in MAT-file")]
    MissingVariable(String),

    #[error("variable '{0}' is not a struct")]
    NotAStruct(String),

    #[error("malformed MAT element: {0}")]
    Malformed(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One parsed MATLAB value: a numeric array (every element type
/// widened to f64) or a 1×1 struct of named values.
#[derive(Debug, Clone, PartialEq)]
pub enum MatValue {
    Numeric(ArrayD<f64>),
    Struct(IndexMap<String, MatValue>),
}

// ─── Reading ──────────────────────────────────────────────────────────────────

/// Read every variable in a MAT-file, in file order.
pub fn read_variables(path: &Path) -> Result<Vec<(String, MatValue)>, MatError> {
    let buf = fs::read(path)?;
    parse_file(&buf)
}

/// Read one named struct variable and return its fields in order.
/// This is the shape every recording in the dataset has: a single
/// struct (conventionally `dataStruct`) holding the sensor matrix
/// and a handful of scalar metadata fields.
pub fn read_struct(path: &Path, var_name: &str) -> Result<IndexMap<String, MatValue>, MatError> {
    let vars = read_variables(path)?;
    for (name, value) in vars {
        if name == var_name {
            return match value {
                MatValue::Struct(fields) => Ok(fields),
                MatValue::Numeric(_) => Err(MatError::NotAStruct(name)),
            };
        }
    }
    Err(MatError::MissingVariable(var_name.to_string()))
}

fn parse_file(buf: &[u8]) -> Result<Vec<(String, MatValue)>, MatError> {
    if buf.len() < 128 {
        return Err(MatError::BadHeader);
    }

    // The endian indicator is the last two header bytes.
    // "IM" = little-endian (ours), "MI" = big-endian (rejected).
    match (buf[126], buf[127]) {
        (b'I', b'M') => {}
        (b'M', b'I') => return Err(MatError::BigEndian),
        _ => return Err(MatError::BadHeader),
    }

    let body = &buf[128..];
    let mut cur = Cursor::new(body);
    let mut vars = Vec::new();

    // Top-level element loop. Anything under 8 bytes left is
    // trailing padding, not another element.
    while body.len() - cur.position() as usize >= 8 {
        let (ty, data) = read_element(&mut cur)?;
        match ty {
            MI_COMPRESSED => {
                // The payload is a zlib stream wrapping exactly
                // one complete element (tag included)
                let mut inflated = Vec::new();
                ZlibDecoder::new(&data[..]).read_to_end(&mut inflated)?;
                let mut inner = Cursor::new(&inflated[..]);
                let (inner_ty, inner_data) = read_element(&mut inner)?;
                if inner_ty == MI_MATRIX {
                    vars.push(parse_matrix(&inner_data)?);
                }
            }
            MI_MATRIX => vars.push(parse_matrix(&data)?),
            // Other top-level element kinds carry no variables
            _ => {}
        }
    }

    Ok(vars)
}

/// Read one data element: its type and its payload bytes.
/// Handles both the normal 8-byte tag and the packed
/// "small data element" format, and skips the inter-element
/// padding (absent after compressed elements and at EOF).
fn read_element(cur: &mut Cursor<&[u8]>) -> Result<(u32, Vec<u8>), MatError> {
    let first = cur.read_u32::<LittleEndian>()?;

    // Small data element: the upper 16 bits of the first word
    // hold the (nonzero) byte count, the lower 16 the type, and
    // the payload lives in the second word of the tag.
    if first >> 16 != 0 {
        let len = (first >> 16) as usize;
        if len > 4 {
            return Err(MatError::Malformed("small element longer than 4 bytes"));
        }
        let mut word = [0u8; 4];
        cur.read_exact(&mut word)?;
        return Ok((first & 0xFFFF, word[..len].to_vec()));
    }

    let len = cur.read_u32::<LittleEndian>()? as usize;
    if len > cur.get_ref().len() - cur.position() as usize {
        return Err(MatError::Malformed("element length exceeds remaining data"));
    }
    let mut data = vec![0u8; len];
    cur.read_exact(&mut data)?;

    // Payloads are padded to the next 8-byte boundary, except
    // compressed elements (and the pad can be missing at EOF)
    if first != MI_COMPRESSED {
        let pad = (8 - len % 8) % 8;
        let next = cur.position() + pad as u64;
        cur.set_position(next.min(cur.get_ref().len() as u64));
    }

    Ok((first, data))
}

/// Parse the body of one miMATRIX element into (name, value).
fn parse_matrix(body: &[u8]) -> Result<(String, MatValue), MatError> {
    let mut cur = Cursor::new(body);

    // Sub-element 1: array flags — class byte + flag bits
    let (ty, flags_raw) = read_element(&mut cur)?;
    if ty != MI_UINT32 || flags_raw.len() < 8 {
        return Err(MatError::Malformed("bad array flags sub-element"));
    }
    let flags = LittleEndian::read_u32(&flags_raw[0..4]);
    let class = (flags & 0xFF) as u8;
    if flags & FLAG_COMPLEX != 0 {
        return Err(MatError::Malformed("complex matrices are not supported"));
    }

    // Sub-element 2: dimensions
    let (ty, dims_raw) = read_element(&mut cur)?;
    if ty != MI_INT32 || dims_raw.len() % 4 != 0 {
        return Err(MatError::Malformed("bad dimensions sub-element"));
    }
    let mut dims_i32 = vec![0i32; dims_raw.len() / 4];
    LittleEndian::read_i32_into(&dims_raw, &mut dims_i32);
    let dims: Vec<usize> = dims_i32.iter().map(|&d| d.max(0) as usize).collect();

    // Sub-element 3: array name (empty for struct field values)
    let (ty, name_raw) = read_element(&mut cur)?;
    if ty != MI_INT8 {
        return Err(MatError::Malformed("bad array name sub-element"));
    }
    let name = String::from_utf8_lossy(&name_raw)
        .trim_end_matches('\0')
        .to_string();

    let value = match class {
        MX_STRUCT => parse_struct(&mut cur, &dims)?,
        MX_CELL | MX_OBJECT | MX_SPARSE => return Err(MatError::UnsupportedClass(class)),
        // Char matrices decode as code-point values; every other
        // supported class is plainly numeric
        MX_CHAR => parse_numeric(&mut cur, &dims)?,
        c if (MX_DOUBLE..=MX_UINT64).contains(&c) => parse_numeric(&mut cur, &dims)?,
        other => return Err(MatError::UnsupportedClass(other)),
    };

    Ok((name, value))
}

/// Parse the data sub-element of a numeric matrix. The stored
/// element type is independent of the matrix class (writers may
/// shrink doubles into smaller integer types), so decoding keys
/// off the element tag and widens everything to f64.
fn parse_numeric(cur: &mut Cursor<&[u8]>, dims: &[usize]) -> Result<MatValue, MatError> {
    let (dt, data_raw) = read_element(cur)?;
    let values = decode_numeric(dt, &data_raw)?;

    let expected: usize = dims.iter().product();
    if values.len() != expected {
        return Err(MatError::Malformed("data length does not match dimensions"));
    }

    // MAT-files store arrays in column-major (Fortran) order
    let array = ArrayD::from_shape_vec(IxDyn(dims).f(), values)
        .map_err(|_| MatError::Malformed("data length does not match dimensions"))?;
    Ok(MatValue::Numeric(array))
}

/// Widen one raw payload to f64 values according to its element type.
fn decode_numeric(dt: u32, bytes: &[u8]) -> Result<Vec<f64>, MatError> {
    // Fixed-width slice decode via byteorder; a payload that is
    // not a whole number of elements is malformed.
    fn check(bytes: &[u8], width: usize) -> Result<usize, MatError> {
        if bytes.len() % width != 0 {
            return Err(MatError::Malformed("payload is not a whole number of elements"));
        }
        Ok(bytes.len() / width)
    }

    let values = match dt {
        MI_INT8 => bytes.iter().map(|&b| b as i8 as f64).collect(),
        MI_UINT8 | MI_UTF8 => bytes.iter().map(|&b| b as f64).collect(),
        MI_INT16 => {
            let mut v = vec![0i16; check(bytes, 2)?];
            LittleEndian::read_i16_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        MI_UINT16 | MI_UTF16 => {
            let mut v = vec![0u16; check(bytes, 2)?];
            LittleEndian::read_u16_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        MI_INT32 => {
            let mut v = vec![0i32; check(bytes, 4)?];
            LittleEndian::read_i32_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        MI_UINT32 => {
            let mut v = vec![0u32; check(bytes, 4)?];
            LittleEndian::read_u32_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        MI_SINGLE => {
            let mut v = vec![0f32; check(bytes, 4)?];
            LittleEndian::read_f32_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        MI_DOUBLE => {
            let mut v = vec![0f64; check(bytes, 8)?];
            LittleEndian::read_f64_into(bytes, &mut v);
            v
        }
        MI_INT64 => {
            let mut v = vec![0i64; check(bytes, 8)?];
            LittleEndian::read_i64_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        MI_UINT64 => {
            let mut v = vec![0u64; check(bytes, 8)?];
            LittleEndian::read_u64_into(bytes, &mut v);
            v.into_iter().map(|x| x as f64).collect()
        }
        other => return Err(MatError::UnsupportedType(other)),
    };

    Ok(values)
}

/// Parse the struct-specific sub-elements: the field name table,
/// then one nested matrix per field. Only 1×1 struct arrays occur
/// in the dataset, so larger ones are rejected outright.
fn parse_struct(cur: &mut Cursor<&[u8]>, dims: &[usize]) -> Result<MatValue, MatError> {
    let nelems: usize = dims.iter().product();
    if nelems != 1 {
        return Err(MatError::Malformed("only 1x1 struct arrays are supported"));
    }

    let (ty, len_raw) = read_element(cur)?;
    if ty != MI_INT32 || len_raw.len() < 4 {
        return Err(MatError::Malformed("bad field name length sub-element"));
    }
    let name_len = LittleEndian::read_i32(&len_raw[0..4]);
    if name_len <= 0 {
        return Err(MatError::Malformed("non-positive field name length"));
    }
    let name_len = name_len as usize;

    let (ty, names_raw) = read_element(cur)?;
    if ty != MI_INT8 || names_raw.len() % name_len != 0 {
        return Err(MatError::Malformed("bad field names sub-element"));
    }
    let nfields = names_raw.len() / name_len;

    // Field names are NUL-padded fixed-width slots
    let mut field_names = Vec::with_capacity(nfields);
    for slot in names_raw.chunks(name_len) {
        let end = slot.iter().position(|&b| b == 0).unwrap_or(name_len);
        field_names.push(String::from_utf8_lossy(&slot[..end]).to_string());
    }

    // One nested matrix per field, in field-table order,
    // each with an empty name of its own
    let mut fields = IndexMap::with_capacity(nfields);
    for field_name in field_names {
        let (ty, field_body) = read_element(cur)?;
        if ty != MI_MATRIX {
            return Err(MatError::Malformed("struct field is not a matrix"));
        }
        let (_, value) = parse_matrix(&field_body)?;
        fields.insert(field_name, value);
    }

    Ok(MatValue::Struct(fields))
}

// ─── Writing ──────────────────────────────────────────────────────────────────

/// Write one real double matrix as a compressed MAT-file holding
/// a single variable. This is the tool's entire output surface:
/// every destination file is `data` and nothing else.
pub fn write_array(path: &Path, var_name: &str, array: &ArrayD<f64>) -> Result<(), MatError> {
    let mut element = Vec::new();
    push_element(&mut element, MI_MATRIX, &numeric_matrix_body(var_name, array));
    write_compressed(path, &element)
}

/// Write a 1×1 struct of double matrices as a compressed MAT-file.
/// Production code only reads structs; this writer exists so tests
/// can fabricate recordings shaped exactly like the dataset's.
pub fn write_struct(
    path: &Path,
    var_name: &str,
    fields: &[(&str, ArrayD<f64>)],
) -> Result<(), MatError> {
    let mut element = Vec::new();
    push_element(&mut element, MI_MATRIX, &struct_matrix_body(var_name, fields)?);
    write_compressed(path, &element)
}

/// Wrap one complete element in a zlib stream, prepend the
/// 128-byte header, and write the file.
fn write_compressed(path: &Path, element: &[u8]) -> Result<(), MatError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(element)?;
    let deflated = encoder.finish()?;

    let mut out = Vec::with_capacity(128 + 8 + deflated.len());
    out.extend_from_slice(&file_header());
    out.extend_from_slice(&MI_COMPRESSED.to_le_bytes());
    out.extend_from_slice(&(deflated.len() as u32).to_le_bytes());
    out.extend_from_slice(&deflated);

    fs::write(path, out)?;
    Ok(())
}

/// The 128-byte MAT-file header: description text (space padded
/// to 116 bytes), zeroed subsystem offset, version 0x0100, and
/// the little-endian indicator "IM".
fn file_header() -> [u8; 128] {
    let mut header = [0u8; 128];

    let text = b"MATLAB 5.0 MAT-file, created by seizure-data-prep";
    for byte in header[..116].iter_mut() {
        *byte = b' ';
    }
    header[..text.len()].copy_from_slice(text);

    // bytes 116..124 stay zero (no subsystem data)
    header[124] = 0x00;
    header[125] = 0x01;
    header[126] = b'I';
    header[127] = b'M';
    header
}

/// Append one data element: 8-byte tag, payload, pad to 8 bytes.
/// (The writer never uses the small-element format — the long
/// form is valid at every size and keeps this code simple.)
fn push_element(out: &mut Vec<u8>, mi_type: u32, data: &[u8]) {
    out.extend_from_slice(&mi_type.to_le_bytes());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    let pad = (8 - data.len() % 8) % 8;
    out.extend(std::iter::repeat(0u8).take(pad));
}

/// The body of a real double miMATRIX: flags, dims, name, data.
fn numeric_matrix_body(name: &str, array: &ArrayD<f64>) -> Vec<u8> {
    let mut body = Vec::new();

    // Array flags: double class, no flag bits
    let mut flags = [0u8; 8];
    flags[0] = MX_DOUBLE;
    push_element(&mut body, MI_UINT32, &flags);

    // MATLAB arrays always have at least two dimensions;
    // lower-rank input is promoted by prepending size-1 axes
    let mut dims: Vec<i32> = array.shape().iter().map(|&d| d as i32).collect();
    while dims.len() < 2 {
        dims.insert(0, 1);
    }
    let mut dim_bytes = vec![0u8; dims.len() * 4];
    LittleEndian::write_i32_into(&dims, &mut dim_bytes);
    push_element(&mut body, MI_INT32, &dim_bytes);

    push_element(&mut body, MI_INT8, name.as_bytes());

    // Real part in column-major order: iterating the
    // reversed-axes view row-major yields Fortran order
    let mut data_bytes = Vec::with_capacity(array.len() * 8);
    for &x in array.t().iter() {
        data_bytes.extend_from_slice(&x.to_le_bytes());
    }
    push_element(&mut body, MI_DOUBLE, &data_bytes);

    body
}

/// The body of a 1×1 struct miMATRIX: flags, dims, name, field
/// name table, then one anonymous nested matrix per field.
fn struct_matrix_body(
    name: &str,
    fields: &[(&str, ArrayD<f64>)],
) -> Result<Vec<u8>, MatError> {
    let mut body = Vec::new();

    let mut flags = [0u8; 8];
    flags[0] = MX_STRUCT;
    push_element(&mut body, MI_UINT32, &flags);

    let dims: [i32; 2] = [1, 1];
    let mut dim_bytes = [0u8; 8];
    LittleEndian::write_i32_into(&dims, &mut dim_bytes);
    push_element(&mut body, MI_INT32, &dim_bytes);

    push_element(&mut body, MI_INT8, name.as_bytes());

    // Fixed-width NUL-padded field name slots
    push_element(&mut body, MI_INT32, &(FIELD_NAME_LEN as i32).to_le_bytes());

    let mut names = vec![0u8; FIELD_NAME_LEN * fields.len()];
    for (i, (field_name, _)) in fields.iter().enumerate() {
        if field_name.len() >= FIELD_NAME_LEN {
            return Err(MatError::Malformed("struct field name too long"));
        }
        names[i * FIELD_NAME_LEN..i * FIELD_NAME_LEN + field_name.len()]
            .copy_from_slice(field_name.as_bytes());
    }
    push_element(&mut body, MI_INT8, &names);

    for (_, array) in fields {
        push_element(&mut body, MI_MATRIX, &numeric_matrix_body("", array));
    }

    Ok(body)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use tempfile::TempDir;

    #[test]
    fn test_array_round_trip_is_lossless() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rt.mat");

        // Non-symmetric on purpose: a row/column-major mix-up
        // would round-trip a symmetric matrix just fine
        let original = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.5, -6.0]]).into_dyn();
        write_array(&path, "data", &original).unwrap();

        let vars = read_variables(&path).unwrap();
        assert_eq!(vars.len(), 1);
        let (name, value) = &vars[0];
        assert_eq!(name, "data");
        assert_eq!(value, &MatValue::Numeric(original));
    }

    #[test]
    fn test_one_by_one_array_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scalar.mat");

        let original = arr2(&[[42.5]]).into_dyn();
        write_array(&path, "x", &original).unwrap();

        let vars = read_variables(&path).unwrap();
        assert_eq!(vars[0].1, MatValue::Numeric(original));
    }

    #[test]
    fn test_struct_round_trip_preserves_fields_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("struct.mat");

        let data = arr2(&[[0.0, 1.0], [2.0, 3.0]]).into_dyn();
        let rate = arr2(&[[400.0]]).into_dyn();
        write_struct(
            &path,
            "dataStruct",
            &[("data", data.clone()), ("iEEGsamplingRate", rate.clone())],
        )
        .unwrap();

        let fields = read_struct(&path, "dataStruct").unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["data", "iEEGsamplingRate"]);
        assert_eq!(fields["data"], MatValue::Numeric(data));
        assert_eq!(fields["iEEGsamplingRate"], MatValue::Numeric(rate));
    }

    #[test]
    fn test_read_struct_rejects_numeric_variable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain.mat");
        write_array(&path, "data", &arr2(&[[1.0]]).into_dyn()).unwrap();

        match read_struct(&path, "data") {
            Err(MatError::NotAStruct(name)) => assert_eq!(name, "data"),
            other => panic!("expected NotAStruct, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.mat");
        write_array(&path, "other", &arr2(&[[1.0]]).into_dyn()).unwrap();

        match read_struct(&path, "dataStruct") {
            Err(MatError::MissingVariable(name)) => assert_eq!(name, "dataStruct"),
            other => panic!("expected MissingVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_file_is_a_bad_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("short.mat");
        fs::write(&path, b"not a mat file").unwrap();

        assert!(matches!(read_variables(&path), Err(MatError::BadHeader)));
    }

    #[test]
    fn test_big_endian_files_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("be.mat");

        let mut header = file_header();
        header[126] = b'M';
        header[127] = b'I';
        fs::write(&path, header).unwrap();

        assert!(matches!(read_variables(&path), Err(MatError::BigEndian)));
    }

    #[test]
    fn test_small_data_element_format_is_read() {
        // Hand-build an uncompressed file whose name sub-element
        // uses the packed small-element format, the way scipy
        // writes short names
        let mut matrix = Vec::new();

        let mut flags = [0u8; 8];
        flags[0] = MX_DOUBLE;
        push_element(&mut matrix, MI_UINT32, &flags);

        let mut dim_bytes = [0u8; 8];
        LittleEndian::write_i32_into(&[1, 2], &mut dim_bytes);
        push_element(&mut matrix, MI_INT32, &dim_bytes);

        // Small element: type miINT8, length 2 ("xy"), padded word
        matrix.extend_from_slice(&((2u32 << 16) | MI_INT8).to_le_bytes());
        matrix.extend_from_slice(b"xy\0\0");

        let mut data_bytes = Vec::new();
        data_bytes.extend_from_slice(&7.0f64.to_le_bytes());
        data_bytes.extend_from_slice(&8.0f64.to_le_bytes());
        push_element(&mut matrix, MI_DOUBLE, &data_bytes);

        let mut file = file_header().to_vec();
        push_element(&mut file, MI_MATRIX, &matrix);

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("small.mat");
        fs::write(&path, file).unwrap();

        let vars = read_variables(&path).unwrap();
        assert_eq!(vars[0].0, "xy");
        assert_eq!(
            vars[0].1,
            MatValue::Numeric(arr2(&[[7.0, 8.0]]).into_dyn())
        );
    }

    #[test]
    fn test_integer_element_types_widen_to_f64() {
        // A double-class matrix whose payload was shrunk to
        // miINT16, as scipy does when values fit
        let mut matrix = Vec::new();

        let mut flags = [0u8; 8];
        flags[0] = MX_DOUBLE;
        push_element(&mut matrix, MI_UINT32, &flags);

        let mut dim_bytes = [0u8; 8];
        LittleEndian::write_i32_into(&[2, 1], &mut dim_bytes);
        push_element(&mut matrix, MI_INT32, &dim_bytes);

        push_element(&mut matrix, MI_INT8, b"v");

        let mut data_bytes = [0u8; 4];
        LittleEndian::write_i16_into(&[-3, 9], &mut data_bytes);
        push_element(&mut matrix, MI_INT16, &data_bytes);

        let mut file = file_header().to_vec();
        push_element(&mut file, MI_MATRIX, &matrix);

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("int16.mat");
        fs::write(&path, file).unwrap();

        let vars = read_variables(&path).unwrap();
        assert_eq!(
            vars[0].1,
            MatValue::Numeric(arr2(&[[-3.0], [9.0]]).into_dyn())
        );
    }
}
