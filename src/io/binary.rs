//! The binary STL variant.
//!
//! Layout, little endian throughout:
//!
//! ```text
//! bytes 0..80    header text, NUL padded
//! bytes 80..84   facet count N as u32
//! then N records of 50 bytes:
//!     12 bytes   normal  (3 × f32)
//!     36 bytes   corners (9 × f32)
//!      2 bytes   attribute byte count, ignored on read, zero on write
//! ```

use nalgebra::{Point3, Vector3};

use crate::errors::{Location, ParseError};
use crate::float_types::Real;
use crate::io::{BINARY_HEADER_LEN, DecodeOptions};
use crate::mesh::{Mesh, Triangle};

/// Width of the header text field.
const HEADER_LEN: usize = 80;
/// Bytes per facet record.
const RECORD_LEN: usize = 50;

pub(crate) fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Mesh, ParseError> {
    if bytes.len() < BINARY_HEADER_LEN {
        return Err(ParseError::TruncatedBinary {
            at: Location::Byte(bytes.len()),
            expected: BINARY_HEADER_LEN as u64,
            actual: bytes.len() as u64,
        });
    }

    let declared = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);

    // Check the declared count against what the buffer actually holds
    // before any allocation is sized by it. A hostile count must not drive
    // a speculative `N * 50` reservation, and the arithmetic stays in u64
    // so it cannot wrap on 32-bit targets either.
    let needed = BINARY_HEADER_LEN as u64 + u64::from(declared) * RECORD_LEN as u64;
    let actual = bytes.len() as u64;
    if actual < needed {
        return Err(ParseError::TruncatedBinary {
            at: Location::Byte(bytes.len()),
            expected: needed,
            actual,
        });
    }
    if actual > needed {
        return Err(ParseError::CountMismatch {
            at: Location::Byte(needed as usize),
            declared,
            trailing: (actual - needed) as usize,
        });
    }

    let mut triangles = Vec::with_capacity(declared as usize);
    for index in 0..declared as usize {
        let offset = BINARY_HEADER_LEN + index * RECORD_LEN;
        if options.should_stop(index) {
            return Err(ParseError::Cancelled {
                at: Location::Byte(offset),
                decoded: index,
            });
        }
        triangles.push(decode_record(bytes, offset)?);
    }

    Ok(Mesh {
        name: decode_header(&bytes[..HEADER_LEN]),
        triangles,
    })
}

/// One 50-byte facet record. The two attribute bytes at the end are not
/// part of the model and are skipped.
fn decode_record(bytes: &[u8], offset: usize) -> Result<Triangle, ParseError> {
    let normal = Vector3::new(
        decode_float(bytes, offset)?,
        decode_float(bytes, offset + 4)?,
        decode_float(bytes, offset + 8)?,
    );
    let mut vertices = [Point3::origin(); 3];
    for (corner, vertex) in vertices.iter_mut().enumerate() {
        let base = offset + 12 + corner * 12;
        *vertex = Point3::new(
            decode_float(bytes, base)?,
            decode_float(bytes, base + 4)?,
            decode_float(bytes, base + 8)?,
        );
    }
    Ok(Triangle::new(normal, vertices))
}

fn decode_float(bytes: &[u8], offset: usize) -> Result<Real, ParseError> {
    let value = Real::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidFloat {
            at: Location::Byte(offset),
            value: value.to_string(),
        })
    }
}

/// Best-effort text of the 80-byte header: lossy UTF-8 with NUL padding and
/// surrounding whitespace stripped. A blank header reads as `None`.
fn decode_header(header: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(header);
    let trimmed = text.trim_matches(['\0', ' ', '\t', '\r', '\n']);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn encode(mesh: &Mesh) -> Vec<u8> {
    // The count field is a u32; larger meshes are not representable in
    // binary STL at all.
    debug_assert!(mesh.len() <= u32::MAX as usize);

    let mut out = Vec::with_capacity(BINARY_HEADER_LEN + mesh.len() * RECORD_LEN);
    out.extend_from_slice(&encode_header(mesh.name.as_deref()));
    out.extend_from_slice(&(mesh.len() as u32).to_le_bytes());
    for triangle in mesh.iter() {
        push_floats(
            &mut out,
            [triangle.normal.x, triangle.normal.y, triangle.normal.z],
        );
        for vertex in &triangle.vertices {
            push_floats(&mut out, [vertex.x, vertex.y, vertex.z]);
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

fn push_floats(out: &mut Vec<u8>, values: [Real; 3]) {
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Name truncated to the 80-byte field and NUL padded; an unnamed mesh gets
/// an all-zero header.
fn encode_header(name: Option<&str>) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    if let Some(name) = name {
        let bytes = name.as_bytes();
        let len = bytes.len().min(HEADER_LEN);
        header[..len].copy_from_slice(&bytes[..len]);
    }
    header
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header_blank_is_none() {
        assert_eq!(decode_header(&[0u8; HEADER_LEN]), None);
        assert_eq!(decode_header(&[b' '; HEADER_LEN]), None);
    }

    #[test]
    fn test_header_name_round_trip() {
        let header = encode_header(Some("calibration cube"));
        assert_eq!(decode_header(&header).as_deref(), Some("calibration cube"));
    }

    #[test]
    fn test_header_truncates_long_names() {
        let long = "x".repeat(200);
        let header = encode_header(Some(&long));
        assert_eq!(decode_header(&header).as_deref(), Some(&long[..HEADER_LEN]));
    }

    #[test]
    fn test_record_layout_width() {
        let mesh = Mesh::from_triangles(vec![Triangle::new(
            Vector3::zeros(),
            [Point3::origin(); 3],
        )]);
        assert_eq!(encode(&mesh).len(), BINARY_HEADER_LEN + RECORD_LEN);
    }
}
