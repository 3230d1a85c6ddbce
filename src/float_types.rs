//! Numeric types and tolerances used throughout the library.

// Our Real scalar type. STL stores every coordinate as a little-endian
// IEEE-754 binary32, so the crate-wide scalar is fixed rather than
// feature-switched.
pub type Real = f32;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used for zero-area facet classification.
/// Defaults to [`DEFAULT_TOLERANCE`], but can be overridden:
///  1) **Build-time**: set env var `STLCODEC_TOLERANCE` (e.g. `STLCODEC_TOLERANCE=1e-9 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Cross-product magnitude below which a facet counts as having no area.
pub const DEFAULT_TOLERANCE: Real = 1e-12;

/// Returns the current tolerance value.
/// If not set yet, it tries `STLCODEC_TOLERANCE` (parsed as [`Real`]) and
/// falls back to [`DEFAULT_TOLERANCE`].
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("STLCODEC_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(0.0);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `stlcodec::float_types::set_tolerance(1e-9);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(0.0));
}
