//! The ASCII STL variant.
//!
//! ```text
//! solid <name>
//!   facet normal nx ny nz
//!     outer loop
//!       vertex x y z        (exactly three)
//!     endloop
//!   endfacet                (any number of facet blocks)
//! endsolid <name>
//! ```
//!
//! Keywords are lowercase except `solid`, which files in the wild also
//! write capitalized. Tokens are separated by runs of whitespace and line
//! breaks carry no meaning of their own, with one exception: the name on a
//! `solid` or `endsolid` line runs to the end of that line. The scanner
//! tracks line numbers so errors can point at their source.

use nalgebra::{Point3, Vector3};

use crate::errors::{Location, ParseError};
use crate::float_types::Real;
use crate::io::DecodeOptions;
use crate::mesh::{Mesh, Triangle};

/// Whitespace-delimited token scanner over raw bytes, keeping a 1-based
/// line counter. Working on bytes rather than `str` means a binary payload
/// fed through the ASCII path fails with a parse error instead of a UTF-8
/// panic, which is what the format-detection fallback relies on.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Scanner { bytes, pos: 0, line: 1 }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            if !byte.is_ascii_whitespace() {
                break;
            }
            if byte == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    /// Next token and the line it starts on, or `None` at end of input.
    fn next_token(&mut self) -> Option<(&'a [u8], usize)> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(&byte) = self.bytes.get(self.pos) {
            if byte.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            None
        } else {
            Some((&self.bytes[start..self.pos], self.line))
        }
    }

    /// Rest of the current line with surrounding whitespace trimmed. The
    /// terminating newline is left in place for `skip_whitespace` to count.
    fn rest_of_line(&mut self) -> &'a [u8] {
        let start = self.pos;
        while let Some(&byte) = self.bytes.get(self.pos) {
            if byte == b'\n' {
                break;
            }
            self.pos += 1;
        }
        self.bytes[start..self.pos].trim_ascii()
    }
}

fn unexpected(line: usize, expected: &'static str, found: Option<&[u8]>) -> ParseError {
    ParseError::UnexpectedToken {
        at: Location::Line(line),
        expected,
        found: found.map_or_else(
            || "end of input".to_string(),
            |token| String::from_utf8_lossy(token).into_owned(),
        ),
    }
}

pub(crate) fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Mesh, ParseError> {
    let mut scanner = Scanner::new(bytes);

    match scanner.next_token() {
        Some((token, _)) if token.eq_ignore_ascii_case(b"solid") => {},
        Some((token, line)) => return Err(unexpected(line, "`solid`", Some(token))),
        None => return Err(unexpected(1, "`solid`", None)),
    }
    let name = match scanner.rest_of_line() {
        s if s.is_empty() => None,
        s => Some(String::from_utf8_lossy(s).into_owned()),
    };

    let mut triangles = Vec::new();
    loop {
        match scanner.next_token() {
            Some((token, line)) if token == b"facet" => {
                if options.should_stop(triangles.len()) {
                    return Err(ParseError::Cancelled {
                        at: Location::Line(line),
                        decoded: triangles.len(),
                    });
                }
                triangles.push(parse_facet(&mut scanner, line)?);
            },
            Some((token, _)) if token == b"endsolid" => {
                // Trailing name, conventionally repeating the opening one;
                // not verified, real exporters disagree with themselves.
                scanner.rest_of_line();
                break;
            },
            Some((token, line)) => {
                return Err(unexpected(line, "`facet` or `endsolid`", Some(token)));
            },
            None => return Err(unexpected(scanner.line, "`facet` or `endsolid`", None)),
        }
    }

    // Nothing is allowed after the `endsolid` line.
    if let Some((token, line)) = scanner.next_token() {
        return Err(unexpected(line, "end of input", Some(token)));
    }

    Ok(Mesh { name, triangles })
}

/// One `facet … endfacet` block. Every structural error is anchored at
/// `facet_line`, the line of the block's opening keyword.
fn parse_facet(scanner: &mut Scanner<'_>, facet_line: usize) -> Result<Triangle, ParseError> {
    expect_keyword(scanner, "normal", facet_line)?;
    let normal = Vector3::new(
        parse_float(scanner, facet_line)?,
        parse_float(scanner, facet_line)?,
        parse_float(scanner, facet_line)?,
    );
    expect_keyword(scanner, "outer", facet_line)?;
    expect_keyword(scanner, "loop", facet_line)?;

    let mut vertices = [Point3::origin(); 3];
    for vertex in &mut vertices {
        expect_keyword(scanner, "vertex", facet_line)?;
        *vertex = Point3::new(
            parse_float(scanner, facet_line)?,
            parse_float(scanner, facet_line)?,
            parse_float(scanner, facet_line)?,
        );
    }

    // The loop must close after exactly three vertices: a fourth `vertex`
    // shows up here as the wrong keyword.
    expect_keyword(scanner, "endloop", facet_line)?;
    expect_keyword(scanner, "endfacet", facet_line)?;

    Ok(Triangle::new(normal, vertices))
}

fn expect_keyword(
    scanner: &mut Scanner<'_>,
    keyword: &str,
    facet_line: usize,
) -> Result<(), ParseError> {
    match scanner.next_token() {
        Some((token, _)) if token == keyword.as_bytes() => Ok(()),
        Some((token, _)) => Err(ParseError::MalformedFacet {
            at: Location::Line(facet_line),
            reason: format!(
                "expected `{}`, found `{}`",
                keyword,
                String::from_utf8_lossy(token)
            ),
        }),
        None => Err(ParseError::MalformedFacet {
            at: Location::Line(facet_line),
            reason: format!("expected `{}`, found end of input", keyword),
        }),
    }
}

/// A numeric token. Accepts whatever `f32` parsing accepts, then rejects
/// non-finite results, so `nan`, `inf`, and overflowing literals like
/// `1e999` all fail the same way.
fn parse_float(scanner: &mut Scanner<'_>, facet_line: usize) -> Result<Real, ParseError> {
    let Some((token, line)) = scanner.next_token() else {
        return Err(ParseError::MalformedFacet {
            at: Location::Line(facet_line),
            reason: "expected a number, found end of input".to_string(),
        });
    };
    let parsed = std::str::from_utf8(token)
        .ok()
        .and_then(|text| text.parse::<Real>().ok());
    match parsed {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::InvalidFloat {
            at: Location::Line(line),
            value: String::from_utf8_lossy(token).into_owned(),
        }),
    }
}

/// Render the mesh as ASCII STL text: fixed indentation, every component
/// formatted with six decimal places, so equal meshes produce identical
/// bytes. Line breaks in the name would corrupt the grammar and are
/// replaced by spaces.
pub(crate) fn encode(mesh: &Mesh) -> String {
    let name = mesh
        .name
        .as_deref()
        .unwrap_or("")
        .replace(['\r', '\n'], " ");

    let mut out = String::new();
    out.push_str(&solid_line("solid", &name));
    for triangle in mesh.iter() {
        let n = &triangle.normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for vertex in &triangle.vertices {
            out.push_str(&format!(
                "      vertex {:.6} {:.6} {:.6}\n",
                vertex.x, vertex.y, vertex.z
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&solid_line("endsolid", &name));
    out
}

fn solid_line(keyword: &str, name: &str) -> String {
    if name.is_empty() {
        format!("{keyword}\n")
    } else {
        format!("{keyword} {name}\n")
    }
}
