//! Decode, encode, and validate **STL** geometry, the binary and ASCII
//! stereolithography formats spoken by 3D printers, CAD exporters, and
//! model repositories.
//!
//! The crate is a pure codec: bytes in, [`Mesh`] values out, and back.
//! There is no file or network I/O, no logging, and no shared mutable
//! state, so any number of decodes and encodes may run concurrently.
//!
//! # Decoding
//!
//! [`decode`] sniffs the variant from content, never from a file name, and
//! survives the classic trap of binary files whose 80-byte header happens
//! to begin with the word `solid`. Malformed input fails with a
//! [`ParseError`] carrying a byte offset or line number; a partial mesh is
//! never returned.
//!
//! ```rust
//! # use stlcodec::{decode, encode, Format};
//! # fn main() -> Result<(), stlcodec::ParseError> {
//! let text = b"solid wedge
//!   facet normal 0 0 1
//!     outer loop
//!       vertex 0 0 0
//!       vertex 1 0 0
//!       vertex 0 1 0
//!     endloop
//!   endfacet
//! endsolid wedge
//! ";
//! let mesh = decode(text)?;
//! assert_eq!(mesh.name.as_deref(), Some("wedge"));
//! assert_eq!(mesh.len(), 1);
//!
//! // 80-byte header + 4-byte count + one 50-byte record
//! let binary = encode(&mesh, Format::Binary);
//! assert_eq!(binary.len(), 134);
//! # Ok(())
//! # }
//! ```
//!
//! Hostile input is bounded: the declared triangle count of a binary
//! payload is checked against the bytes actually present before any
//! allocation is sized by it, and [`decode_with`] adds a facet budget and
//! a cancellation flag polled between records.
//!
//! # Encoding
//!
//! [`encode`] is infallible and deterministic. Binary output reproduces
//! decoded coordinate bytes exactly; ASCII output writes every component
//! with six decimal places. [`transcode`] converts between the variants.
//!
//! # Validation
//!
//! [`validate`] never rejects: it reports the triangle count, the number
//! of degenerate (zero-area) facets, and the bounding box, leaving policy
//! to the caller.

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod validate;

pub use errors::{Location, ParseError};
pub use io::{DecodeOptions, Format, decode, decode_with, encode, transcode};
pub use mesh::{Aabb, Mesh, Triangle};
pub use validate::{ValidationReport, validate};
