//! Three-vector helpers on top of [`nalgebra::Vector3`].
//!
//! `mag`, `dot` and `cross` are thin wrappers kept for parity with the rest of the SGP4 tool
//! chain. [`angle`] reports degenerate input through `None` instead of a numeric sentinel.
use nalgebra::Vector3;

use crate::constants::Float;

/// Magnitudes below this are treated as zero.
pub const SMALL: Float = 1e-8;

/// Euclidean norm of `x`.
#[inline]
pub fn mag(x: &Vector3<Float>) -> Float {
    x.norm()
}

#[inline]
pub fn dot(x: &Vector3<Float>, y: &Vector3<Float>) -> Float {
    x.dot(y)
}

#[inline]
pub fn cross(x: &Vector3<Float>, y: &Vector3<Float>) -> Vector3<Float> {
    x.cross(y)
}

/// Angle between two vectors, in radians within [0, π].
///
/// Arguments
/// ---------
/// * `vec1`, `vec2`: input vectors
///
/// Return
/// ------
/// * `None` when the product of the magnitudes is below `SMALL²` (angle undefined)
pub fn angle(vec1: &Vector3<Float>, vec2: &Vector3<Float>) -> Option<Float> {
    let magv1 = mag(vec1);
    let magv2 = mag(vec2);

    if magv1 * magv2 > SMALL * SMALL {
        let temp = (dot(vec1, vec2) / (magv1 * magv2)).clamp(-1.0, 1.0);
        Some(temp.acos())
    } else {
        None
    }
}
