//! Pure property interpolation
//!
//! Computes the value of a single property at eased progress `t`. Writing
//! the result anywhere is the caller's job; there are no side effects here.

use cue_core::PropertyKind;

/// Interpolate a property value between two endpoints at eased progress `t`
///
/// All supported kinds (scalar, length, angle) interpolate linearly in
/// their native unit; the easing curve has already shaped `t`.
pub fn interpolate(kind: PropertyKind, from: f32, to: f32, t: f32) -> f32 {
    let _ = kind; // every supported kind is numerically linear
    from + (to - from) * t
}
