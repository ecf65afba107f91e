//! 4x4 transformation matrix, stored row-major.
//!
//! # Convention
//! - Storage is **row-major**: element `(row, col)` lives at `m[row * 4 + col]`
//! - Vectors are **row vectors** on the left: `v' = v * M`
//! - Translation is stored in the **last row** (elements 12, 13, 14)
//! - Transforms chain **right-to-left**: `a * b` applies `b` first, then `a`
//! - Projection matrices map depth to **[0, 1]** (DirectX-style)
//!
//! The raw array ([`Mat4::as_array`]) is laid out row-major; a graphics API
//! expecting column-major uniform data must upload the transpose.
//!
//! # Example
//! ```ignore
//! let world = translation * rotation * scale; // scale first, then rotation, then translation
//! let p = world.transform_vect(vertex);
//! ```
//!
//! Apart from [`Mat4::inverse`] (and [`Mat4::invert`]), no operation reports
//! failure: degenerate inputs such as a singular matrix fed to
//! [`Mat4::inverse_primitive`] or a look-at whose view direction is parallel
//! to the up vector silently produce undefined values. These are per-frame
//! hot paths; callers validate preconditions upstream.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};

use crate::float::{equals, equals_with, is_zero, is_zero_with};
use crate::vec2::Vec2;
use crate::vec3::Vec3;
use crate::vec4::Vec4;

/// 4x4 row-major transformation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// The all-zero matrix. Also the fallback result of
    /// [`inverse_or_zero`](Self::inverse_or_zero) on a singular input.
    pub const ZERO: Self = Self { m: [0.0; 16] };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a matrix from 16 row-major values.
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Returns the raw row-major element array.
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.m[row * 4 + col]
    }

    /// Sets the element at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> &mut Self {
        self.m[row * 4 + col] = value;
        self
    }

    // ============ Transpose / inverse ============

    /// Returns the transposed matrix.
    ///
    /// Transposing is a pure permutation; `m.transposed().transposed()` is
    /// bit-exact equal to `m`.
    pub fn transposed(&self) -> Self {
        let m = &self.m;
        Self::from_array([
            m[0], m[4], m[8], m[12], //
            m[1], m[5], m[9], m[13], //
            m[2], m[6], m[10], m[14], //
            m[3], m[7], m[11], m[15],
        ])
    }

    /// Computes the inverse via Cramer's rule (expansion by 2x2 minors).
    ///
    /// Returns `None` if the determinant magnitude is at or below
    /// `f32::MIN_POSITIVE`. Valid for any invertible matrix, including
    /// scaled, skewed and projective ones.
    pub fn inverse(&self) -> Option<Self> {
        let at = |r: usize, c: usize| self.m[r * 4 + c];

        let d = (at(0, 0) * at(1, 1) - at(0, 1) * at(1, 0))
            * (at(2, 2) * at(3, 3) - at(2, 3) * at(3, 2))
            - (at(0, 0) * at(1, 2) - at(0, 2) * at(1, 0))
                * (at(2, 1) * at(3, 3) - at(2, 3) * at(3, 1))
            + (at(0, 0) * at(1, 3) - at(0, 3) * at(1, 0))
                * (at(2, 1) * at(3, 2) - at(2, 2) * at(3, 1))
            + (at(0, 1) * at(1, 2) - at(0, 2) * at(1, 1))
                * (at(2, 0) * at(3, 3) - at(2, 3) * at(3, 0))
            - (at(0, 1) * at(1, 3) - at(0, 3) * at(1, 1))
                * (at(2, 0) * at(3, 2) - at(2, 2) * at(3, 0))
            + (at(0, 2) * at(1, 3) - at(0, 3) * at(1, 2))
                * (at(2, 0) * at(3, 1) - at(2, 1) * at(3, 0));

        if is_zero_with(d, f32::MIN_POSITIVE) {
            return None;
        }

        let d = 1.0 / d;
        let mut out = [0.0f32; 16];

        out[0] = d
            * (at(1, 1) * (at(2, 2) * at(3, 3) - at(2, 3) * at(3, 2))
                + at(1, 2) * (at(2, 3) * at(3, 1) - at(2, 1) * at(3, 3))
                + at(1, 3) * (at(2, 1) * at(3, 2) - at(2, 2) * at(3, 1)));
        out[1] = d
            * (at(2, 1) * (at(0, 2) * at(3, 3) - at(0, 3) * at(3, 2))
                + at(2, 2) * (at(0, 3) * at(3, 1) - at(0, 1) * at(3, 3))
                + at(2, 3) * (at(0, 1) * at(3, 2) - at(0, 2) * at(3, 1)));
        out[2] = d
            * (at(3, 1) * (at(0, 2) * at(1, 3) - at(0, 3) * at(1, 2))
                + at(3, 2) * (at(0, 3) * at(1, 1) - at(0, 1) * at(1, 3))
                + at(3, 3) * (at(0, 1) * at(1, 2) - at(0, 2) * at(1, 1)));
        out[3] = d
            * (at(0, 1) * (at(1, 3) * at(2, 2) - at(1, 2) * at(2, 3))
                + at(0, 2) * (at(1, 1) * at(2, 3) - at(1, 3) * at(2, 1))
                + at(0, 3) * (at(1, 2) * at(2, 1) - at(1, 1) * at(2, 2)));
        out[4] = d
            * (at(1, 2) * (at(2, 0) * at(3, 3) - at(2, 3) * at(3, 0))
                + at(1, 3) * (at(2, 2) * at(3, 0) - at(2, 0) * at(3, 2))
                + at(1, 0) * (at(2, 3) * at(3, 2) - at(2, 2) * at(3, 3)));
        out[5] = d
            * (at(2, 2) * (at(0, 0) * at(3, 3) - at(0, 3) * at(3, 0))
                + at(2, 3) * (at(0, 2) * at(3, 0) - at(0, 0) * at(3, 2))
                + at(2, 0) * (at(0, 3) * at(3, 2) - at(0, 2) * at(3, 3)));
        out[6] = d
            * (at(3, 2) * (at(0, 0) * at(1, 3) - at(0, 3) * at(1, 0))
                + at(3, 3) * (at(0, 2) * at(1, 0) - at(0, 0) * at(1, 2))
                + at(3, 0) * (at(0, 3) * at(1, 2) - at(0, 2) * at(1, 3)));
        out[7] = d
            * (at(0, 2) * (at(1, 3) * at(2, 0) - at(1, 0) * at(2, 3))
                + at(0, 3) * (at(1, 0) * at(2, 2) - at(1, 2) * at(2, 0))
                + at(0, 0) * (at(1, 2) * at(2, 3) - at(1, 3) * at(2, 2)));
        out[8] = d
            * (at(1, 3) * (at(2, 0) * at(3, 1) - at(2, 1) * at(3, 0))
                + at(1, 0) * (at(2, 1) * at(3, 3) - at(2, 3) * at(3, 1))
                + at(1, 1) * (at(2, 3) * at(3, 0) - at(2, 0) * at(3, 3)));
        out[9] = d
            * (at(2, 3) * (at(0, 0) * at(3, 1) - at(0, 1) * at(3, 0))
                + at(2, 0) * (at(0, 1) * at(3, 3) - at(0, 3) * at(3, 1))
                + at(2, 1) * (at(0, 3) * at(3, 0) - at(0, 0) * at(3, 3)));
        out[10] = d
            * (at(3, 3) * (at(0, 0) * at(1, 1) - at(0, 1) * at(1, 0))
                + at(3, 0) * (at(0, 1) * at(1, 3) - at(0, 3) * at(1, 1))
                + at(3, 1) * (at(0, 3) * at(1, 0) - at(0, 0) * at(1, 3)));
        out[11] = d
            * (at(0, 3) * (at(1, 1) * at(2, 0) - at(1, 0) * at(2, 1))
                + at(0, 0) * (at(1, 3) * at(2, 1) - at(1, 1) * at(2, 3))
                + at(0, 1) * (at(1, 0) * at(2, 3) - at(1, 3) * at(2, 0)));
        out[12] = d
            * (at(1, 0) * (at(2, 2) * at(3, 1) - at(2, 1) * at(3, 2))
                + at(1, 1) * (at(2, 0) * at(3, 2) - at(2, 2) * at(3, 0))
                + at(1, 2) * (at(2, 1) * at(3, 0) - at(2, 0) * at(3, 1)));
        out[13] = d
            * (at(2, 0) * (at(0, 2) * at(3, 1) - at(0, 1) * at(3, 2))
                + at(2, 1) * (at(0, 0) * at(3, 2) - at(0, 2) * at(3, 0))
                + at(2, 2) * (at(0, 1) * at(3, 0) - at(0, 0) * at(3, 1)));
        out[14] = d
            * (at(3, 0) * (at(0, 2) * at(1, 1) - at(0, 1) * at(1, 2))
                + at(3, 1) * (at(0, 0) * at(1, 2) - at(0, 2) * at(1, 0))
                + at(3, 2) * (at(0, 1) * at(1, 0) - at(0, 0) * at(1, 1)));
        out[15] = d
            * (at(0, 0) * (at(1, 1) * at(2, 2) - at(1, 2) * at(2, 1))
                + at(0, 1) * (at(1, 2) * at(2, 0) - at(1, 0) * at(2, 2))
                + at(0, 2) * (at(1, 0) * at(2, 1) - at(1, 1) * at(2, 0)));

        Some(Self::from_array(out))
    }

    /// Like [`inverse`](Self::inverse), but falls back to [`Mat4::ZERO`] on
    /// a singular input instead of reporting failure. Callers that need the
    /// failure signal use `inverse()` directly.
    pub fn inverse_or_zero(&self) -> Self {
        self.inverse().unwrap_or(Self::ZERO)
    }

    /// Transpose of the inverse, or [`Mat4::ZERO`] on a singular input.
    pub fn inverse_transposed_or_zero(&self) -> Self {
        match self.inverse() {
            Some(inv) => inv.transposed(),
            None => Self::ZERO,
        }
    }

    /// Inverts a rigid transform (rotation + translation only).
    ///
    /// Computes the transposed rotation block and re-derives the translation
    /// as `-dot(translation, rotation column)` per axis. The orthonormality
    /// precondition is never validated: feeding a scaled, skewed or
    /// projective matrix yields a wrong result with no error.
    pub fn inverse_primitive(&self) -> Self {
        let m = &self.m;
        Self::from_array([
            m[0],
            m[4],
            m[8],
            0.0,
            m[1],
            m[5],
            m[9],
            0.0,
            m[2],
            m[6],
            m[10],
            0.0,
            -(m[12] * m[0] + m[13] * m[1] + m[14] * m[2]),
            -(m[12] * m[4] + m[13] * m[5] + m[14] * m[6]),
            -(m[12] * m[8] + m[13] * m[9] + m[14] * m[10]),
            1.0,
        ])
    }

    /// Inverts the matrix in place.
    ///
    /// Returns `false` and leaves `self` untouched if the matrix is singular.
    pub fn invert(&mut self) -> bool {
        match self.inverse() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => false,
        }
    }

    // ============ Predicates ============

    /// Tolerance-based identity check.
    ///
    /// All 16 elements are compared against the identity pattern, so a
    /// matrix with a corrupted homogeneous column is rejected.
    pub fn is_identity(&self) -> bool {
        let m = &self.m;
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                if !equals(m[row * 4 + col], expected) {
                    return false;
                }
            }
        }
        true
    }

    /// Returns true if all pairwise dot products between the four rows are
    /// zero within epsilon.
    ///
    /// Used to validate that a transform is rigid before taking the
    /// [`inverse_primitive`](Self::inverse_primitive) shortcut. Projection
    /// matrices fail this check and must use the full [`inverse`](Self::inverse).
    pub fn is_orthogonal(&self) -> bool {
        let m = &self.m;
        let mut dp = m[0] * m[4] + m[1] * m[5] + m[2] * m[6] + m[3] * m[7];
        if !is_zero(dp) {
            return false;
        }
        dp = m[0] * m[8] + m[1] * m[9] + m[2] * m[10] + m[3] * m[11];
        if !is_zero(dp) {
            return false;
        }
        dp = m[0] * m[12] + m[1] * m[13] + m[2] * m[14] + m[3] * m[15];
        if !is_zero(dp) {
            return false;
        }
        dp = m[4] * m[8] + m[5] * m[9] + m[6] * m[10] + m[7] * m[11];
        if !is_zero(dp) {
            return false;
        }
        dp = m[4] * m[12] + m[5] * m[13] + m[6] * m[14] + m[7] * m[15];
        if !is_zero(dp) {
            return false;
        }
        dp = m[8] * m[12] + m[9] * m[13] + m[10] * m[14] + m[11] * m[15];
        is_zero(dp)
    }

    /// Tolerance-based comparison of all 16 elements.
    ///
    /// `PartialEq` stays exact; this is the separate notion used when
    /// accumulated floating error must be tolerated.
    pub fn equals(&self, other: &Self, tolerance: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| equals_with(*a, *b, tolerance))
    }

    // ============ Translation ============

    /// The translation row (elements 12, 13, 14).
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[12], self.m[13], self.m[14])
    }

    /// Sets the translation row, leaving the rest of the matrix unchanged.
    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.m[12] = translation.x;
        self.m[13] = translation.y;
        self.m[14] = translation.z;
        self
    }

    /// Sets the translation row to the negated vector.
    pub fn set_inverse_translation(&mut self, translation: Vec3) -> &mut Self {
        self.m[12] = -translation.x;
        self.m[13] = -translation.y;
        self.m[14] = -translation.z;
        self
    }

    // ============ Rotation ============

    /// Writes a rotation from Euler angles in radians into the upper-left
    /// 3x3 block. Angles are composed x, then y, then z. The fourth row and
    /// column are left unmodified.
    pub fn set_rotation_radians(&mut self, rotation: Vec3) -> &mut Self {
        let cr = f64::cos(rotation.x as f64);
        let sr = f64::sin(rotation.x as f64);
        let cp = f64::cos(rotation.y as f64);
        let sp = f64::sin(rotation.y as f64);
        let cy = f64::cos(rotation.z as f64);
        let sy = f64::sin(rotation.z as f64);

        self.m[0] = (cp * cy) as f32;
        self.m[1] = (cp * sy) as f32;
        self.m[2] = (-sp) as f32;

        let srsp = sr * sp;
        let crsp = cr * sp;

        self.m[4] = (srsp * cy - cr * sy) as f32;
        self.m[5] = (srsp * sy + cr * cy) as f32;
        self.m[6] = (sr * cp) as f32;

        self.m[8] = (crsp * cy + sr * sy) as f32;
        self.m[9] = (crsp * sy - sr * cy) as f32;
        self.m[10] = (cr * cp) as f32;
        self
    }

    /// [`set_rotation_radians`](Self::set_rotation_radians) with angles in degrees.
    pub fn set_rotation_degrees(&mut self, rotation: Vec3) -> &mut Self {
        self.set_rotation_radians(Vec3::new(
            rotation.x.to_radians(),
            rotation.y.to_radians(),
            rotation.z.to_radians(),
        ))
    }

    /// Writes the inverse (transposed) rotation of the given Euler angles.
    /// The fourth row and column are left unmodified.
    pub fn set_inverse_rotation_radians(&mut self, rotation: Vec3) -> &mut Self {
        let cr = f64::cos(rotation.x as f64);
        let sr = f64::sin(rotation.x as f64);
        let cp = f64::cos(rotation.y as f64);
        let sp = f64::sin(rotation.y as f64);
        let cy = f64::cos(rotation.z as f64);
        let sy = f64::sin(rotation.z as f64);

        self.m[0] = (cp * cy) as f32;
        self.m[4] = (cp * sy) as f32;
        self.m[8] = (-sp) as f32;

        let srsp = sr * sp;
        let crsp = cr * sp;

        self.m[1] = (srsp * cy - cr * sy) as f32;
        self.m[5] = (srsp * sy + cr * cy) as f32;
        self.m[9] = (sr * cp) as f32;

        self.m[2] = (crsp * cy + sr * sy) as f32;
        self.m[6] = (crsp * sy - sr * cy) as f32;
        self.m[10] = (cr * cp) as f32;
        self
    }

    /// [`set_inverse_rotation_radians`](Self::set_inverse_rotation_radians)
    /// with angles in degrees.
    pub fn set_inverse_rotation_degrees(&mut self, rotation: Vec3) -> &mut Self {
        self.set_inverse_rotation_radians(Vec3::new(
            rotation.x.to_radians(),
            rotation.y.to_radians(),
            rotation.z.to_radians(),
        ))
    }

    /// Writes a rotation around `axis` by `angle` radians (Rodrigues'
    /// formula, left-handed). `axis` must be a unit vector. The fourth row
    /// and column are left unmodified.
    pub fn set_rotation_axis_radians(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        let c = f64::cos(angle as f64);
        let s = f64::sin(angle as f64);
        let t = 1.0 - c;

        let tx = t * axis.x as f64;
        let ty = t * axis.y as f64;
        let tz = t * axis.z as f64;

        let sx = s * axis.x as f64;
        let sy = s * axis.y as f64;
        let sz = s * axis.z as f64;

        self.m[0] = (tx * axis.x as f64 + c) as f32;
        self.m[1] = (tx * axis.y as f64 + sz) as f32;
        self.m[2] = (tx * axis.z as f64 - sy) as f32;

        self.m[4] = (ty * axis.x as f64 - sz) as f32;
        self.m[5] = (ty * axis.y as f64 + c) as f32;
        self.m[6] = (ty * axis.z as f64 + sx) as f32;

        self.m[8] = (tz * axis.x as f64 + sy) as f32;
        self.m[9] = (tz * axis.y as f64 - sx) as f32;
        self.m[10] = (tz * axis.z as f64 + c) as f32;
        self
    }

    /// Writes the translation row of a rotation about `center` followed by
    /// `translate`, assuming the rotation block is already in place.
    pub fn set_rotation_center(&mut self, center: Vec3, translate: Vec3) -> &mut Self {
        let m = &mut self.m;
        m[12] = -m[0] * center.x - m[4] * center.y - m[8] * center.z + (center.x - translate.x);
        m[13] = -m[1] * center.x - m[5] * center.y - m[9] * center.z + (center.y - translate.y);
        m[14] = -m[2] * center.x - m[6] * center.y - m[10] * center.z + (center.z - translate.z);
        m[15] = 1.0;
        self
    }

    // ============ Scale ============

    /// Writes `scale` into the three diagonal entries.
    ///
    /// This is destructive with respect to any rotation already present:
    /// it overwrites the diagonal without composing. Set scale before
    /// rotation, or rebuild both together.
    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.m[0] = scale.x;
        self.m[5] = scale.y;
        self.m[10] = scale.z;
        self
    }

    /// Uniform variant of [`set_scale`](Self::set_scale).
    pub fn set_scale_uniform(&mut self, scale: f32) -> &mut Self {
        self.set_scale(Vec3::new(scale, scale, scale))
    }

    /// Extracts the scale of the matrix.
    ///
    /// When the upper-left 3x3 block has no rotation (off-diagonal entries
    /// are zero) the diagonal is returned exactly. Otherwise the row
    /// magnitudes are computed, which loses sign: a mirrored scale comes
    /// back positive.
    pub fn scale(&self) -> Vec3 {
        let m = &self.m;

        // No-rotation fast path: the diagonal is the scale, signs intact.
        if is_zero(m[1])
            && is_zero(m[2])
            && is_zero(m[4])
            && is_zero(m[6])
            && is_zero(m[8])
            && is_zero(m[9])
        {
            return Vec3::new(m[0], m[5], m[10]);
        }

        Vec3::new(
            (m[0] * m[0] + m[1] * m[1] + m[2] * m[2]).sqrt(),
            (m[4] * m[4] + m[5] * m[5] + m[6] * m[6]).sqrt(),
            (m[8] * m[8] + m[9] * m[9] + m[10] * m[10]).sqrt(),
        )
    }

    // ============ Vector transforms ============

    /// Applies only the 3x3 rotation/scale block — for direction vectors.
    pub fn rotate_vect(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0] + v.y * m[4] + v.z * m[8],
            v.x * m[1] + v.y * m[5] + v.z * m[9],
            v.x * m[2] + v.y * m[6] + v.z * m[10],
        )
    }

    /// Applies the transposed 3x3 block.
    ///
    /// Only a valid inverse rotation when the block is orthonormal, the same
    /// precondition as [`inverse_primitive`](Self::inverse_primitive).
    pub fn inverse_rotate_vect(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0] + v.y * m[1] + v.z * m[2],
            v.x * m[4] + v.y * m[5] + v.z * m[6],
            v.x * m[8] + v.y * m[9] + v.z * m[10],
        )
    }

    /// Applies the full affine transform (rotation/scale plus translation) —
    /// for position vectors.
    pub fn transform_vect(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0] + v.y * m[4] + v.z * m[8] + m[12],
            v.x * m[1] + v.y * m[5] + v.z * m[9] + m[13],
            v.x * m[2] + v.y * m[6] + v.z * m[10] + m[14],
        )
    }

    /// Transforms a position keeping the homogeneous component: `(v, 1) * M`
    /// with all four outputs. Useful for projective matrices, where the
    /// result's `w` feeds the perspective divide.
    pub fn transform_vect4(&self, v: Vec3) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            v.x * m[0] + v.y * m[4] + v.z * m[8] + m[12],
            v.x * m[1] + v.y * m[5] + v.z * m[9] + m[13],
            v.x * m[2] + v.y * m[6] + v.z * m[10] + m[14],
            v.x * m[3] + v.y * m[7] + v.z * m[11] + m[15],
        )
    }

    /// Full row-vector product `v * M` for an arbitrary 4-vector.
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            v.x * m[0] + v.y * m[4] + v.z * m[8] + v.w * m[12],
            v.x * m[1] + v.y * m[5] + v.z * m[9] + v.w * m[13],
            v.x * m[2] + v.y * m[6] + v.z * m[10] + v.w * m[14],
            v.x * m[3] + v.y * m[7] + v.z * m[11] + v.w * m[15],
        )
    }

    /// Adds the translation row to the vector.
    pub fn translate_vect(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.x + self.m[12], v.y + self.m[13], v.z + self.m[14])
    }

    /// Subtracts the translation row from the vector.
    pub fn inverse_translate_vect(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.x - self.m[12], v.y - self.m[13], v.z - self.m[14])
    }

    /// Component-wise interpolation between two matrices, `t` in [0, 1].
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = self.m[i] + (other.m[i] - self.m[i]) * t;
        }
        Self::from_array(out)
    }

    // ============ Projection builders ============
    //
    // Depth maps to [0, 1] (DirectX-style). Element (2, 3) is the
    // handedness discriminator: +1 left-handed, -1 right-handed.

    /// Builds a right-handed perspective projection from a vertical field
    /// of view.
    pub fn perspective_fov_rh(
        fov_y_radians: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let h = 1.0 / f64::tan(fov_y_radians as f64 * 0.5);
        let w = (h / aspect_ratio as f64) as f32;
        Self::from_array([
            w,
            0.0,
            0.0,
            0.0,
            0.0,
            h as f32,
            0.0,
            0.0,
            0.0,
            0.0,
            z_far / (z_near - z_far),
            -1.0,
            0.0,
            0.0,
            z_near * z_far / (z_near - z_far),
            0.0,
        ])
    }

    /// Builds a left-handed perspective projection from a vertical field
    /// of view.
    pub fn perspective_fov_lh(
        fov_y_radians: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let h = 1.0 / f64::tan(fov_y_radians as f64 * 0.5);
        let w = (h / aspect_ratio as f64) as f32;
        Self::from_array([
            w,
            0.0,
            0.0,
            0.0,
            0.0,
            h as f32,
            0.0,
            0.0,
            0.0,
            0.0,
            z_far / (z_far - z_near),
            1.0,
            0.0,
            0.0,
            -z_near * z_far / (z_far - z_near),
            0.0,
        ])
    }

    /// Left-handed perspective projection with the far plane at infinity.
    ///
    /// `epsilon` nudges depth slightly inward to avoid far-plane clipping
    /// artifacts; 0.0 is the exact infinite-far matrix.
    pub fn perspective_fov_infinity_lh(
        fov_y_radians: f32,
        aspect_ratio: f32,
        z_near: f32,
        epsilon: f32,
    ) -> Self {
        let h = 1.0 / f64::tan(fov_y_radians as f64 * 0.5);
        let w = (h / aspect_ratio as f64) as f32;
        Self::from_array([
            w,
            0.0,
            0.0,
            0.0,
            0.0,
            h as f32,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0 - epsilon,
            1.0,
            0.0,
            0.0,
            z_near * (epsilon - 1.0),
            0.0,
        ])
    }

    /// Right-handed perspective projection from explicit view-volume
    /// dimensions at the near plane.
    pub fn perspective_rh(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self::from_array([
            2.0 * z_near / width,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * z_near / height,
            0.0,
            0.0,
            0.0,
            0.0,
            z_far / (z_near - z_far),
            -1.0,
            0.0,
            0.0,
            z_near * z_far / (z_near - z_far),
            0.0,
        ])
    }

    /// Left-handed perspective projection from explicit view-volume
    /// dimensions at the near plane.
    pub fn perspective_lh(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self::from_array([
            2.0 * z_near / width,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * z_near / height,
            0.0,
            0.0,
            0.0,
            0.0,
            z_far / (z_far - z_near),
            1.0,
            0.0,
            0.0,
            z_near * z_far / (z_near - z_far),
            0.0,
        ])
    }

    /// Left-handed orthographic projection.
    pub fn ortho_lh(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self::from_array([
            2.0 / width,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / height,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0 / (z_far - z_near),
            0.0,
            0.0,
            0.0,
            z_near / (z_near - z_far),
            1.0,
        ])
    }

    /// Right-handed orthographic projection.
    pub fn ortho_rh(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self::from_array([
            2.0 / width,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / height,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0 / (z_near - z_far),
            0.0,
            0.0,
            0.0,
            z_near / (z_near - z_far),
            1.0,
        ])
    }

    // ============ View builders ============

    /// Builds a left-handed view matrix looking from `position` toward
    /// `target` (camera looks down +z in view space).
    ///
    /// `up` must not be parallel to the view direction: the basis
    /// construction degenerates to a zero cross product and the result is
    /// undefined.
    pub fn look_at_lh(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let zaxis = (target - position).normalize();
        let xaxis = up.cross(zaxis).normalize();
        let yaxis = zaxis.cross(xaxis);
        Self::look_at_from_basis(position, xaxis, yaxis, zaxis)
    }

    /// Builds a right-handed view matrix looking from `position` toward
    /// `target` (camera looks down -z in view space).
    ///
    /// Same degenerate-`up` caveat as [`look_at_lh`](Self::look_at_lh).
    pub fn look_at_rh(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let zaxis = (position - target).normalize();
        let xaxis = up.cross(zaxis).normalize();
        let yaxis = zaxis.cross(xaxis);
        Self::look_at_from_basis(position, xaxis, yaxis, zaxis)
    }

    // A view matrix is the inverse of camera-to-world, so the orthonormal
    // basis goes in transposed and the translation is -dot(axis, position).
    fn look_at_from_basis(position: Vec3, xaxis: Vec3, yaxis: Vec3, zaxis: Vec3) -> Self {
        Self::from_array([
            xaxis.x,
            yaxis.x,
            zaxis.x,
            0.0,
            xaxis.y,
            yaxis.y,
            zaxis.y,
            0.0,
            xaxis.z,
            yaxis.z,
            zaxis.z,
            0.0,
            -xaxis.dot(position),
            -yaxis.dot(position),
            -zaxis.dot(position),
            1.0,
        ])
    }

    // ============ Rotation-between-vectors builders ============

    /// Builds a rotation that takes the direction of `from` onto the
    /// direction of `to`.
    ///
    /// Parallel or anti-parallel inputs leave the rotation axis undefined
    /// (zero cross product) and produce an undefined result.
    pub fn rotate_from_to(from: Vec3, to: Vec3) -> Self {
        let f = from.normalize();
        let t = to.normalize();

        // rotation axis scaled by the sine of the angle
        let vs = t.cross(f);
        let v = vs.normalize();
        let ca = f.dot(t);
        let mut vt = v * (1.0 - ca);

        let mut m = [0.0f32; 16];
        m[0] = vt.x * v.x + ca;
        m[5] = vt.y * v.y + ca;
        m[10] = vt.z * v.z + ca;

        vt.x *= v.y;
        vt.z *= v.x;
        vt.y *= v.z;

        m[1] = vt.x - vs.z;
        m[2] = vt.z + vs.y;

        m[4] = vt.x + vs.z;
        m[6] = vt.y - vs.x;

        m[8] = vt.z - vs.y;
        m[9] = vt.y + vs.x;

        m[15] = 1.0;
        Self::from_array(m)
    }

    /// Builds a billboard rotation about a fixed `axis`: rotates the source
    /// vector `from` onto the direction facing `cam_pos`, pivoting around
    /// `center`, with a final `translation` applied.
    pub fn axis_aligned_billboard(
        cam_pos: Vec3,
        center: Vec3,
        translation: Vec3,
        axis: Vec3,
        from: Vec3,
    ) -> Self {
        let up = axis.normalize();
        let forward = (cam_pos - center).normalize();
        let right = up.cross(forward).normalize();

        // constrained look vector in the plane perpendicular to the axis
        let look = right.cross(up);

        let vs = look.cross(from);
        let ca = from.dot(look);
        let mut vt = up * (1.0 - ca);

        let mut out = Self::ZERO;
        let m = &mut out.m;
        m[0] = vt.x * up.x + ca;
        m[5] = vt.y * up.y + ca;
        m[10] = vt.z * up.z + ca;

        vt.x *= up.y;
        vt.z *= up.x;
        vt.y *= up.z;

        m[1] = vt.x - vs.z;
        m[2] = vt.z + vs.y;

        m[4] = vt.x + vs.z;
        m[6] = vt.y - vs.x;

        m[8] = vt.z - vs.y;
        m[9] = vt.y + vs.x;

        out.set_rotation_center(center, translation);
        out
    }

    // ============ Texture transforms ============
    //
    // Generate texture coordinates as linear functions of the vertex
    // position: u = Ux*x + Uy*y + Uz*z + Uw, v likewise. The rotation pivots
    // about `rotate_center` in texture space.

    /// Builds a complete 2D texture transform: rotate about `rotate_center`,
    /// scale, then translate.
    pub fn texture_transform(
        rotate_radians: f32,
        rotate_center: Vec2,
        translate: Vec2,
        scale: Vec2,
    ) -> Self {
        let c = rotate_radians.cos();
        let s = rotate_radians.sin();
        Self::from_array([
            c * scale.x,
            s * scale.y,
            0.0,
            0.0,
            -s * scale.x,
            c * scale.y,
            0.0,
            0.0,
            c * scale.x * rotate_center.x + -s * rotate_center.y + translate.x,
            s * scale.y * rotate_center.x + c * rotate_center.y + translate.y,
            1.0,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Sets a texture rotation about the z axis, recentered at (0.5, 0.5).
    /// Only the affected elements are written.
    pub fn set_texture_rotation_center(&mut self, rotate_radians: f32) -> &mut Self {
        let c = rotate_radians.cos();
        let s = rotate_radians.sin();
        self.m[0] = c;
        self.m[1] = s;

        self.m[4] = -s;
        self.m[5] = c;

        self.m[8] = 0.5 * (s - c) + 0.5;
        self.m[9] = -0.5 * (s + c) + 0.5;
        self
    }

    /// Sets the texture translation. Only the affected elements are written.
    pub fn set_texture_translate(&mut self, x: f32, y: f32) -> &mut Self {
        self.m[8] = x;
        self.m[9] = y;
        self
    }

    /// Sets the texture translation in the transposed representation.
    /// Only the affected elements are written.
    pub fn set_texture_translate_transposed(&mut self, x: f32, y: f32) -> &mut Self {
        self.m[2] = x;
        self.m[6] = y;
        self
    }

    /// Sets the texture scale. Only the affected elements are written.
    pub fn set_texture_scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.m[0] = sx;
        self.m[5] = sy;
        self
    }

    /// Sets the texture scale, recentered at (0.5, 0.5).
    /// Only the affected elements are written.
    pub fn set_texture_scale_center(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.m[0] = sx;
        self.m[5] = sy;
        self.m[8] = 0.5 - 0.5 * sx;
        self.m[9] = 0.5 - 0.5 * sy;
        self
    }
}

/// Component-wise addition.
impl Add<Mat4> for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Self::Output {
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = self.m[i] + rhs.m[i];
        }
        Mat4::from_array(out)
    }
}

impl AddAssign<Mat4> for Mat4 {
    fn add_assign(&mut self, rhs: Mat4) {
        for i in 0..16 {
            self.m[i] += rhs.m[i];
        }
    }
}

/// Component-wise subtraction.
impl Sub<Mat4> for Mat4 {
    type Output = Mat4;

    fn sub(self, rhs: Mat4) -> Self::Output {
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = self.m[i] - rhs.m[i];
        }
        Mat4::from_array(out)
    }
}

impl SubAssign<Mat4> for Mat4 {
    fn sub_assign(&mut self, rhs: Mat4) {
        for i in 0..16 {
            self.m[i] -= rhs.m[i];
        }
    }
}

/// Scalar multiplication. Every component is scaled, including the
/// translation row — intended for interpolation, not for composing
/// transforms.
impl Mul<f32> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: f32) -> Self::Output {
        let mut out = [0.0f32; 16];
        for i in 0..16 {
            out[i] = self.m[i] * rhs;
        }
        Mat4::from_array(out)
    }
}

/// Scalar-left multiplication, `2.0 * m`.
impl Mul<Mat4> for f32 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        rhs * self
    }
}

/// Matrix product.
///
/// Under the row-vector convention, `a * b` is the transform that applies
/// `b` first, then `a`: `v * (a * b) == (v * b) * a`.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let m1 = &self.m;
        let m2 = &rhs.m;
        Mat4::from_array([
            m1[0] * m2[0] + m1[4] * m2[1] + m1[8] * m2[2] + m1[12] * m2[3],
            m1[1] * m2[0] + m1[5] * m2[1] + m1[9] * m2[2] + m1[13] * m2[3],
            m1[2] * m2[0] + m1[6] * m2[1] + m1[10] * m2[2] + m1[14] * m2[3],
            m1[3] * m2[0] + m1[7] * m2[1] + m1[11] * m2[2] + m1[15] * m2[3],
            m1[0] * m2[4] + m1[4] * m2[5] + m1[8] * m2[6] + m1[12] * m2[7],
            m1[1] * m2[4] + m1[5] * m2[5] + m1[9] * m2[6] + m1[13] * m2[7],
            m1[2] * m2[4] + m1[6] * m2[5] + m1[10] * m2[6] + m1[14] * m2[7],
            m1[3] * m2[4] + m1[7] * m2[5] + m1[11] * m2[6] + m1[15] * m2[7],
            m1[0] * m2[8] + m1[4] * m2[9] + m1[8] * m2[10] + m1[12] * m2[11],
            m1[1] * m2[8] + m1[5] * m2[9] + m1[9] * m2[10] + m1[13] * m2[11],
            m1[2] * m2[8] + m1[6] * m2[9] + m1[10] * m2[10] + m1[14] * m2[11],
            m1[3] * m2[8] + m1[7] * m2[9] + m1[11] * m2[10] + m1[15] * m2[11],
            m1[0] * m2[12] + m1[4] * m2[13] + m1[8] * m2[14] + m1[12] * m2[15],
            m1[1] * m2[12] + m1[5] * m2[13] + m1[9] * m2[14] + m1[13] * m2[15],
            m1[2] * m2[12] + m1[6] * m2[13] + m1[10] * m2[14] + m1[14] * m2[15],
            m1[3] * m2[12] + m1[7] * m2[13] + m1[11] * m2[14] + m1[15] * m2[15],
        ])
    }
}

impl MulAssign<Mat4> for Mat4 {
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = *self * rhs;
    }
}

/// Linear element access in row-major order.
impl Index<usize> for Mat4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

impl IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.m[index]
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn rigid_sample() -> Mat4 {
        let mut m = Mat4::identity();
        m.set_rotation_radians(Vec3::new(0.3, -0.7, 1.2))
            .set_translation(Vec3::new(4.0, -2.0, 9.5));
        m
    }

    fn invertible_sample() -> Mat4 {
        // scaled + rotated + translated, not rigid
        let mut rot = Mat4::identity();
        rot.set_rotation_radians(Vec3::new(0.5, 0.25, -0.9));
        let mut scale = Mat4::identity();
        scale.set_scale(Vec3::new(2.0, 0.5, -3.0));
        let mut out = rot * scale;
        out.set_translation(Vec3::new(1.0, 2.0, 3.0));
        out
    }

    #[test]
    fn identity_is_multiplicative_neutral() {
        let m = invertible_sample();
        assert_abs_diff_eq!(m * Mat4::IDENTITY, m, epsilon = 1e-6);
        assert_abs_diff_eq!(Mat4::IDENTITY * m, m, epsilon = 1e-6);
    }

    #[test]
    fn is_identity_accepts_identity_and_near_identity() {
        assert!(Mat4::IDENTITY.is_identity());

        let mut near = Mat4::identity();
        near[0] = 1.0 + f32::EPSILON / 2.0;
        assert!(near.is_identity());
    }

    #[test]
    fn is_identity_rejects_corrupt_homogeneous_column() {
        // elements 3/7/11 are part of the check
        let mut m = Mat4::identity();
        m[3] = 5.0;
        assert!(!m.is_identity());
        let mut m = Mat4::identity();
        m[11] = -2.0;
        assert!(!m.is_identity());
    }

    #[test]
    fn product_applies_right_operand_first() {
        let mut rot = Mat4::identity();
        rot.set_rotation_radians(Vec3::new(0.0, 0.0, FRAC_PI_2));
        let mut trans = Mat4::identity();
        trans.set_translation(Vec3::new(10.0, 0.0, 0.0));

        // rotate about z first, then translate
        let combined = trans * rot;
        let p = combined.transform_vect(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(10.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn inverse_round_trips_to_identity() {
        let m = invertible_sample();
        let inv = m.inverse().unwrap();
        assert!((m * inv).equals(&Mat4::IDENTITY, 1e-4));
        assert!((inv * m).equals(&Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn inverse_of_singular_matrix_fails() {
        // zero row makes the determinant exactly zero
        let mut m = Mat4::identity();
        m[0] = 0.0;
        m[1] = 0.0;
        m[2] = 0.0;
        m[3] = 0.0;
        assert!(m.inverse().is_none());
        assert_eq!(m.inverse_or_zero(), Mat4::ZERO);
    }

    #[test]
    fn invert_leaves_singular_matrix_untouched() {
        let mut m = Mat4::from_array([
            1.0, 2.0, 3.0, 4.0, //
            2.0, 4.0, 6.0, 8.0, // row 1 = 2 * row 0, singular
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let sentinel = m;
        assert!(!m.invert());
        assert_eq!(m, sentinel);
    }

    #[test]
    fn primitive_inverse_matches_full_inverse_for_rigid_transforms() {
        let m = rigid_sample();
        let full = m.inverse().unwrap();
        let primitive = m.inverse_primitive();
        assert!(full.equals(&primitive, 1e-4));
    }

    #[test]
    fn primitive_inverse_round_trips() {
        let m = rigid_sample();
        assert!((m * m.inverse_primitive()).equals(&Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn inverse_transposed_matches_manual_composition() {
        let m = invertible_sample();
        let expected = m.inverse().unwrap().transposed();
        assert_eq!(m.inverse_transposed_or_zero(), expected);
    }

    #[test]
    fn double_transpose_is_exact() {
        let m = invertible_sample();
        assert_eq!(m.transposed().transposed(), m);
    }

    #[test]
    fn rigid_rotation_is_orthogonal_projection_is_not() {
        let mut rot = Mat4::identity();
        rot.set_rotation_radians(Vec3::new(0.0, 0.0, 0.9));
        assert!(rot.is_orthogonal());

        let proj = Mat4::perspective_fov_lh(FRAC_PI_2, 16.0 / 9.0, 0.5, 200.0);
        assert!(!proj.is_orthogonal());
    }

    #[test]
    fn euler_z_rotation_takes_x_to_y() {
        let mut m = Mat4::identity();
        m.set_rotation_radians(Vec3::new(0.0, 0.0, FRAC_PI_2));
        let v = m.rotate_vect(Vec3::X);
        assert_relative_eq!(v, Vec3::Y, epsilon = 1e-6);
    }

    #[test]
    fn rotation_degrees_matches_radians() {
        let mut deg = Mat4::identity();
        deg.set_rotation_degrees(Vec3::new(30.0, 60.0, 90.0));
        let mut rad = Mat4::identity();
        rad.set_rotation_radians(Vec3::new(
            30f32.to_radians(),
            60f32.to_radians(),
            90f32.to_radians(),
        ));
        assert_abs_diff_eq!(deg, rad, epsilon = 1e-6);
    }

    #[test]
    fn inverse_rotation_undoes_rotation() {
        let mut m = Mat4::identity();
        m.set_rotation_radians(Vec3::new(0.3, -0.6, 1.1));
        let v = Vec3::new(1.0, 2.0, 3.0);
        let back = m.inverse_rotate_vect(m.rotate_vect(v));
        assert_relative_eq!(back, v, epsilon = 1e-5);
    }

    #[test]
    fn inverse_rotation_radians_is_transposed_rotation() {
        let angles = Vec3::new(0.7, 0.1, -0.4);
        let mut fwd = Mat4::identity();
        fwd.set_rotation_radians(angles);
        let mut inv = Mat4::identity();
        inv.set_inverse_rotation_radians(angles);
        assert_abs_diff_eq!(inv, fwd.transposed(), epsilon = 1e-6);
    }

    #[test]
    fn axis_angle_y_quarter_turn_takes_x_to_negative_z() {
        // left-handed: +90 degrees about +y maps +x onto -z
        let mut m = Mat4::identity();
        m.set_rotation_axis_radians(FRAC_PI_2, Vec3::Y);
        let v = m.rotate_vect(Vec3::X);
        assert_relative_eq!(v, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn rotation_center_keeps_pivot_fixed() {
        let center = Vec3::new(1.0, 0.0, 0.0);
        let mut m = Mat4::identity();
        m.set_rotation_axis_radians(FRAC_PI_2, Vec3::Y)
            .set_rotation_center(center, Vec3::ZERO);
        assert_relative_eq!(m.transform_vect(center), center, epsilon = 1e-5);
    }

    #[test]
    fn set_scale_then_get_scale_is_exact() {
        let mut m = Mat4::identity();
        m.set_scale(Vec3::new(2.0, 3.0, 4.0));
        // diagonal fast path, no precision loss
        assert_eq!(m.scale(), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn get_scale_slow_path_recovers_magnitudes() {
        let mut rot = Mat4::identity();
        rot.set_rotation_radians(Vec3::new(0.0, 0.0, FRAC_PI_4));
        let mut scale = Mat4::identity();
        scale.set_scale(Vec3::new(2.0, 3.0, 4.0));

        // scale applied first, then rotation
        let m = rot * scale;
        assert_relative_eq!(m.scale(), Vec3::new(2.0, 3.0, 4.0), epsilon = 1e-5);
    }

    #[test]
    fn transform_vect_adds_translation_rotate_vect_does_not() {
        let mut m = Mat4::identity();
        m.set_translation(Vec3::new(5.0, 6.0, 7.0));
        let v = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(m.rotate_vect(v), v);
        assert_eq!(m.transform_vect(v), Vec3::new(6.0, 7.0, 8.0));
    }

    #[test]
    fn translate_vect_round_trip() {
        let mut m = Mat4::identity();
        m.set_translation(Vec3::new(-1.0, 2.5, 8.0));
        let v = Vec3::new(3.0, 3.0, 3.0);
        assert_eq!(m.inverse_translate_vect(m.translate_vect(v)), v);
    }

    #[test]
    fn set_inverse_translation_negates() {
        let mut m = Mat4::identity();
        m.set_inverse_translation(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(m.translation(), Vec3::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn perspective_fov_rh_maps_near_plane_to_zero_depth() {
        // DirectX-style depth range: z = -near lands on NDC depth 0
        let proj = Mat4::perspective_fov_rh(FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = proj.transform_vect4(Vec3::new(0.0, 0.0, -1.0));
        let ndc = near.to_vec3_perspective();
        assert_relative_eq!(ndc.z, 0.0, epsilon = 1e-6);

        let far = proj.transform_vect4(Vec3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(far.to_vec3_perspective().z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn perspective_fov_lh_maps_depth_range() {
        let proj = Mat4::perspective_fov_lh(FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = proj.transform_vect4(Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(near.to_vec3_perspective().z, 0.0, epsilon = 1e-6);

        let far = proj.transform_vect4(Vec3::new(0.0, 0.0, 100.0));
        assert_relative_eq!(far.to_vec3_perspective().z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn handedness_discriminator_element() {
        // element (2, 3): +1 left-handed, -1 right-handed
        assert_eq!(
            Mat4::perspective_fov_lh(FRAC_PI_2, 1.0, 1.0, 100.0).at(2, 3),
            1.0
        );
        assert_eq!(
            Mat4::perspective_fov_rh(FRAC_PI_2, 1.0, 1.0, 100.0).at(2, 3),
            -1.0
        );
        assert_eq!(Mat4::perspective_lh(2.0, 2.0, 1.0, 100.0).at(2, 3), 1.0);
        assert_eq!(Mat4::perspective_rh(2.0, 2.0, 1.0, 100.0).at(2, 3), -1.0);
    }

    #[test]
    fn infinity_projection_approaches_finite_far_limit() {
        let finite = Mat4::perspective_fov_lh(FRAC_PI_2, 1.0, 0.5, 1e7);
        let infinite = Mat4::perspective_fov_infinity_lh(FRAC_PI_2, 1.0, 0.5, 0.0);
        assert!(finite.equals(&infinite, 1e-3));
    }

    #[test]
    fn ortho_lh_maps_volume_to_ndc() {
        let proj = Mat4::ortho_lh(4.0, 2.0, 1.0, 11.0);
        // corner of the view volume at the near plane
        let p = proj.transform_vect(Vec3::new(2.0, 1.0, 1.0));
        assert_relative_eq!(p, Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
        // far plane center maps to depth 1
        let f = proj.transform_vect(Vec3::new(0.0, 0.0, 11.0));
        assert_relative_eq!(f.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_lh_sees_target_ahead() {
        // camera 5 units behind the origin looking at it: the target sits
        // 5 units down +z in view space
        let view = Mat4::look_at_lh(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Y);
        let p = view.transform_vect(Vec3::ZERO);
        assert_relative_eq!(p, Vec3::new(0.0, 0.0, 5.0), epsilon = 1e-5);
    }

    #[test]
    fn look_at_rh_sees_target_down_negative_z() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let p = view.transform_vect(Vec3::ZERO);
        assert_relative_eq!(p, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-5);
    }

    #[test]
    fn look_at_lh_is_rigid() {
        let view = Mat4::look_at_lh(Vec3::new(3.0, 4.0, -5.0), Vec3::ZERO, Vec3::Y);
        assert!(view.inverse_primitive().equals(&view.inverse().unwrap(), 1e-4));
    }

    #[test]
    fn rotate_from_to_maps_source_onto_target() {
        let m = Mat4::rotate_from_to(Vec3::X, Vec3::Y);
        assert_relative_eq!(m.rotate_vect(Vec3::X), Vec3::Y, epsilon = 1e-6);

        let from = Vec3::new(1.0, 2.0, -0.5).normalize();
        let to = Vec3::new(-3.0, 0.2, 1.0).normalize();
        let m = Mat4::rotate_from_to(from, to);
        assert_relative_eq!(m.rotate_vect(from), to, epsilon = 1e-5);
    }

    #[test]
    fn billboard_already_facing_camera_is_identity() {
        let m = Mat4::axis_aligned_billboard(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::Y,
            Vec3::new(0.0, 0.0, -1.0),
        );
        assert!(m.equals(&Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn scalar_multiply_scales_every_component() {
        let mut m = Mat4::identity();
        m.set_translation(Vec3::new(1.0, 2.0, 3.0));
        let doubled = m * 2.0;
        // translation participates in scalar multiplication by design
        assert_eq!(doubled.translation(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(doubled.at(0, 0), 2.0);
        // scalar-left form agrees
        assert_eq!(2.0 * m, doubled);
    }

    #[test]
    fn add_sub_are_component_wise() {
        let a = invertible_sample();
        let b = rigid_sample();
        let sum = a + b;
        assert_eq!(sum - b, a);
        let mut c = a;
        c += b;
        assert_eq!(c, sum);
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn interpolate_hits_endpoints_and_midpoint() {
        let a = Mat4::ZERO;
        let b = invertible_sample();
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
        assert_abs_diff_eq!(a.interpolate(&b, 0.5), b * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn texture_transform_identity_parameters() {
        let m = Mat4::texture_transform(0.0, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        assert!(m.is_identity());

        let mut centered = Mat4::identity();
        centered.set_texture_rotation_center(0.0);
        assert!(centered.is_identity());
    }

    #[test]
    fn texture_setters_only_touch_their_elements() {
        let mut m = Mat4::identity();
        m.set_texture_translate(0.25, -0.5);
        assert_eq!(m[8], 0.25);
        assert_eq!(m[9], -0.5);
        // diagonal untouched
        assert_eq!(m[0], 1.0);
        assert_eq!(m[5], 1.0);
        assert_eq!(m[15], 1.0);

        let mut m = Mat4::identity();
        m.set_texture_scale_center(2.0, 2.0);
        assert_eq!(m[0], 2.0);
        assert_eq!(m[5], 2.0);
        assert_eq!(m[8], -0.5);
        assert_eq!(m[9], -0.5);
    }

    #[test]
    fn equality_is_exact_equals_is_tolerant() {
        let a = Mat4::IDENTITY;
        let mut b = Mat4::identity();
        b[0] = 1.0 + 1e-6;
        assert_ne!(a, b);
        assert!(a.equals(&b, 1e-5));
        assert!(!a.equals(&b, 1e-7));
    }

    #[test]
    fn element_access_is_row_major() {
        let mut m = Mat4::identity();
        m.set(3, 0, 42.0);
        assert_eq!(m[12], 42.0);
        assert_eq!(m.at(3, 0), 42.0);
        assert_eq!(m.as_array()[12], 42.0);
    }

    #[test]
    fn transform_vec4_direction_ignores_translation() {
        let mut m = Mat4::identity();
        m.set_translation(Vec3::new(7.0, 8.0, 9.0));
        let d = m.transform_vec4(Vec4::direction(1.0, 0.0, 0.0));
        assert_eq!(d, Vec4::direction(1.0, 0.0, 0.0));
        let p = m.transform_vec4(Vec4::point(0.0, 0.0, 0.0));
        assert_eq!(p, Vec4::point(7.0, 8.0, 9.0));
    }
}
