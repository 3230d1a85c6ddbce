//! STL byte-level input and output: format detection, decoding, encoding.
//!
//! Two encodings of the same triangle soup circulate in the wild. Binary is
//! an 80-byte header, a little-endian `u32` facet count, then fixed 50-byte
//! records. ASCII is a keyword grammar bracketed by `solid`/`endsolid`.
//! Detection works on content, never on a file name, and handles the
//! classic trap: a binary file whose header text happens to begin with the
//! word `solid`.

mod ascii;
mod binary;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::ParseError;
use crate::mesh::Mesh;

/// Minimum size of a binary STL: 80-byte header plus 4-byte count.
pub(crate) const BINARY_HEADER_LEN: usize = 84;

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// 80-byte header, `u32` facet count, 50-byte records, little endian.
    Binary,
    /// `solid` / `facet` / `vertex` keyword grammar, whitespace separated.
    Ascii,
}

/// Limits and cooperative cancellation applied while decoding.
///
/// Both conditions are checked between facet records, never inside one, so
/// a stop surfaces as [`ParseError::Cancelled`] carrying an exact count of
/// facets decoded so far.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Upper bound on facets accepted from one payload.
    pub max_triangles: Option<u32>,
    /// Externally raised stop flag, polled between facets.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl DecodeOptions {
    /// `true` once no further facet may be decoded beyond the `decoded`
    /// already accepted.
    pub(crate) fn should_stop(&self, decoded: usize) -> bool {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.max_triangles
            .is_some_and(|cap| decoded as u64 >= u64::from(cap))
    }
}

/// Decode STL bytes of either variant into a [`Mesh`].
///
/// The variant is sniffed from content. A payload that does not open with
/// the token `solid` is decoded as binary. A payload that does is decoded
/// as ASCII first; if that fails structurally and the payload is large
/// enough to be binary, binary decoding is tried before giving up, which
/// recovers binary files whose header text starts with `solid`.
///
/// Errors are terminal: no partial mesh accompanies a [`ParseError`].
pub fn decode(bytes: &[u8]) -> Result<Mesh, ParseError> {
    decode_with(bytes, &DecodeOptions::default())
}

/// [`decode`] with a facet budget and a cancellation flag.
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Mesh, ParseError> {
    if !starts_with_solid(bytes) {
        return binary::decode(bytes, options);
    }
    // Opens with `solid`. Anything too short for a binary header can only
    // be ASCII.
    if bytes.len() < BINARY_HEADER_LEN {
        return ascii::decode(bytes, options);
    }
    match ascii::decode(bytes, options) {
        Ok(mesh) => Ok(mesh),
        // A cancellation is the caller's doing, not a format mismatch;
        // retrying the same payload as binary would be wrong.
        Err(cancelled @ ParseError::Cancelled { .. }) => Err(cancelled),
        Err(ascii_error) => match binary::decode(bytes, options) {
            Ok(mesh) => Ok(mesh),
            // Both readings failed. Report the error from the variant the
            // payload more plausibly was.
            Err(binary_error) => {
                if looks_textual(bytes) {
                    Err(ascii_error)
                } else {
                    Err(binary_error)
                }
            },
        },
    }
}

/// Serialize a mesh to the chosen variant.
///
/// Infallible: every `Mesh` value is encodable. Output is deterministic,
/// equal meshes produce identical bytes. Binary output of a binary-decoded
/// mesh reproduces the coordinate bytes exactly; ASCII output formats every
/// component with six decimal places.
pub fn encode(mesh: &Mesh, format: Format) -> Vec<u8> {
    match format {
        Format::Binary => binary::encode(mesh),
        Format::Ascii => ascii::encode(mesh).into_bytes(),
    }
}

/// Re-encode STL bytes into `format`: decode then encode, the
/// ASCII-to-binary converter and back.
pub fn transcode(bytes: &[u8], format: Format) -> Result<Vec<u8>, ParseError> {
    Ok(encode(&decode(bytes)?, format))
}

/// Content sniff: does the payload open with the token `solid`,
/// case-insensitive, after optional leading whitespace?
fn starts_with_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];
    rest.len() >= 5
        && rest[..5].eq_ignore_ascii_case(b"solid")
        // Token boundary: `solidify` is not the keyword.
        && rest.get(5).is_none_or(|b| b.is_ascii_whitespace())
}

/// Printability scan over the head of the buffer, used only to pick the
/// more useful error once both readings have failed.
fn looks_textual(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .take(256)
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..0x7f).contains(&b))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_starts_with_solid() {
        assert!(starts_with_solid(b"solid part"));
        assert!(starts_with_solid(b"  \t\nsolid part"));
        assert!(starts_with_solid(b"SOLID PART"));
        assert!(starts_with_solid(b"solid"));
        assert!(!starts_with_solid(b"solidify everything"));
        assert!(!starts_with_solid(b"sol"));
        assert!(!starts_with_solid(b""));
        assert!(!starts_with_solid(&[0u8; 84]));
    }

    #[test]
    fn test_looks_textual() {
        assert!(looks_textual(b"solid part\n facet normal 0 0 1\n"));
        assert!(!looks_textual(&[b's', b'o', b'l', b'i', b'd', 0, 1, 2]));
    }

    #[test]
    fn test_should_stop_budget() {
        let options = DecodeOptions {
            max_triangles: Some(2),
            cancel: None,
        };
        assert!(!options.should_stop(0));
        assert!(!options.should_stop(1));
        assert!(options.should_stop(2));
    }

    #[test]
    fn test_should_stop_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let options = DecodeOptions {
            max_triangles: None,
            cancel: Some(flag.clone()),
        };
        assert!(!options.should_stop(0));
        flag.store(true, Ordering::Relaxed);
        assert!(options.should_stop(0));
    }
}
