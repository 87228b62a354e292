//! Affine and projective transforms.
//!
//! A `Transform` carries its 4x4 matrix together with the inverse so points,
//! vectors and rays can be mapped either way without re-inverting. The named
//! constructors below all supply the inverse in closed form; only
//! `Transform::new` falls back to numeric inversion.

use std::ops::Mul;

use crate::{Matrix4, Ray, Vec3};

/// Signaling NaN used to poison the inverse of a singular transform.
const SIGNALING_NAN: f32 = f32::from_bits(0x7fa0_0000);

/// Threshold on an absolute component below which a coordinate axis counts as
/// far enough from a vector to serve as the reflection reference in
/// [`Transform::rotate_from_to`].
const REFERENCE_AXIS_THRESHOLD: f32 = 0.72;

/// A 4x4 transform and its inverse.
///
/// When built from a singular matrix the inverse is filled with NaN. Nothing
/// fails eagerly; anything mapped through the inverse afterwards comes out NaN
/// and shows up as corrupt output. Equality only looks at the forward matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    matrix: Matrix4,
    inverse: Matrix4,
}

impl Transform {
    /// Wrap `matrix`, computing its inverse.
    pub fn new(matrix: Matrix4) -> Self {
        let inverse = matrix.inverse().unwrap_or_else(|| {
            log::debug!("Singular transform matrix, inverse poisoned with NaN");
            Matrix4::filled(SIGNALING_NAN)
        });
        Self { matrix, inverse }
    }

    /// Wrap a matrix and an inverse the caller vouches for. Not re-verified.
    pub fn from_parts(matrix: Matrix4, inverse: Matrix4) -> Self {
        Self { matrix, inverse }
    }

    #[inline]
    pub fn matrix(&self) -> Matrix4 {
        self.matrix
    }

    #[inline]
    pub fn inverse_matrix(&self) -> Matrix4 {
        self.inverse
    }

    /// False when the inverse is the NaN poison left by a singular matrix.
    pub fn has_inverse(&self) -> bool {
        !self.inverse.as_slice().iter().any(|v| v.is_nan())
    }

    pub fn is_identity(&self) -> bool {
        self.matrix.is_identity()
    }

    /// The inverse transform. Swaps the two matrices, so inverting twice gives
    /// back exactly the original.
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    /// Map `v` with homogeneous weight `w` (1 for points, 0 for vectors).
    ///
    /// A resulting weight other than 1 triggers the perspective divide. A
    /// resulting weight of exactly 0 means `v` stayed a direction and is
    /// returned undivided.
    pub fn apply(&self, v: Vec3, w: f32) -> Vec3 {
        let [xp, yp, zp, wp] = self.matrix.mul_array([v.x, v.y, v.z, w]);

        let vp = Vec3::new(xp, yp, zp);
        if wp == 1.0 || wp == 0.0 {
            vp
        } else {
            vp / wp
        }
    }

    /// Map a point (w = 1, translation applies).
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.apply(p, 1.0)
    }

    /// Map a direction (w = 0, translation ignored).
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.apply(v, 0.0)
    }

    /// Map a ray: origin as a point, direction as a vector.
    pub fn apply_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.transform_point(ray.origin()),
            self.transform_vector(ray.direction()),
        )
    }

    pub fn apply_inverse(&self, v: Vec3, w: f32) -> Vec3 {
        self.inverse().apply(v, w)
    }

    pub fn apply_inverse_point(&self, p: Vec3) -> Vec3 {
        self.inverse().transform_point(p)
    }

    pub fn apply_inverse_vector(&self, v: Vec3) -> Vec3 {
        self.inverse().transform_vector(v)
    }

    pub fn apply_inverse_ray(&self, ray: &Ray) -> Ray {
        self.inverse().apply_ray(ray)
    }

    /// Translation by `delta`.
    pub fn translate(delta: Vec3) -> Self {
        let m = Matrix4::new([
            [1.0, 0.0, 0.0, delta.x],
            [0.0, 1.0, 0.0, delta.y],
            [0.0, 0.0, 1.0, delta.z],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let inv = Matrix4::new([
            [1.0, 0.0, 0.0, -delta.x],
            [0.0, 1.0, 0.0, -delta.y],
            [0.0, 0.0, 1.0, -delta.z],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Self::from_parts(m, inv)
    }

    /// Non-uniform scale by `factors`.
    pub fn scale(factors: Vec3) -> Self {
        let m = Matrix4::new([
            [factors.x, 0.0, 0.0, 0.0],
            [0.0, factors.y, 0.0, 0.0],
            [0.0, 0.0, factors.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let inv = Matrix4::new([
            [1.0 / factors.x, 0.0, 0.0, 0.0],
            [0.0, 1.0 / factors.y, 0.0, 0.0],
            [0.0, 0.0, 1.0 / factors.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Self::from_parts(m, inv)
    }

    /// Rotation about +X by `degrees`.
    pub fn rotate_x(degrees: f32) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        let m = Matrix4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos_theta, -sin_theta, 0.0],
            [0.0, sin_theta, cos_theta, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Self::from_parts(m, m.transpose())
    }

    /// Rotation about +Y by `degrees`.
    pub fn rotate_y(degrees: f32) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        let m = Matrix4::new([
            [cos_theta, 0.0, sin_theta, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sin_theta, 0.0, cos_theta, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Self::from_parts(m, m.transpose())
    }

    /// Rotation about +Z by `degrees`.
    pub fn rotate_z(degrees: f32) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        let m = Matrix4::new([
            [cos_theta, -sin_theta, 0.0, 0.0],
            [sin_theta, cos_theta, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Self::from_parts(m, m.transpose())
    }

    /// Rotation by `degrees` about an arbitrary `axis` (normalized here).
    pub fn rotate(degrees: f32, axis: Vec3) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        Self::rotate_sin_cos(sin_theta, cos_theta, axis)
    }

    fn rotate_sin_cos(sin_theta: f32, cos_theta: f32, axis: Vec3) -> Self {
        let a = axis.normalize();
        let mut m = Matrix4::identity();

        m[0][0] = a.x * a.x + (1.0 - a.x * a.x) * cos_theta;
        m[0][1] = a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta;
        m[0][2] = a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta;

        m[1][0] = a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta;
        m[1][1] = a.y * a.y + (1.0 - a.y * a.y) * cos_theta;
        m[1][2] = a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta;

        m[2][0] = a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta;
        m[2][1] = a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta;
        m[2][2] = a.z * a.z + (1.0 - a.z * a.z) * cos_theta;

        Self::from_parts(m, m.transpose())
    }

    /// Rotation taking unit vector `from` onto unit vector `to`.
    ///
    /// Built from two reflections through a coordinate axis that is not
    /// nearly parallel to either input.
    pub fn rotate_from_to(from: Vec3, to: Vec3) -> Self {
        let reference = if from.x.abs() < REFERENCE_AXIS_THRESHOLD
            && to.x.abs() < REFERENCE_AXIS_THRESHOLD
        {
            Vec3::X
        } else if from.y.abs() < REFERENCE_AXIS_THRESHOLD && to.y.abs() < REFERENCE_AXIS_THRESHOLD
        {
            Vec3::Y
        } else {
            Vec3::Z
        };

        let u = reference - from;
        let v = reference - to;
        let uu = u.dot(u);
        let vv = v.dot(v);
        let uv = u.dot(v);

        let mut m = Matrix4::identity();
        for i in 0..3 {
            for j in 0..3 {
                let delta = if i == j { 1.0 } else { 0.0 };
                m[i][j] = delta - 2.0 / uu * u[i] * u[j] - 2.0 / vv * v[i] * v[j]
                    + 4.0 * uv / (uu * vv) * v[i] * u[j];
            }
        }
        Self::from_parts(m, m.transpose())
    }

    /// Camera-to-world transform for a camera at `eye` looking at `target`.
    ///
    /// Columns are right, up and view direction; the origin maps to `eye`.
    /// When `up` is parallel to the view direction the basis is undefined and
    /// the identity is returned instead.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let up = up.normalize();
        let dir = (target - eye).normalize();
        let cross_up_dir = up.cross(dir);
        if cross_up_dir.length() == 0.0 {
            log::warn!(
                "look_at: up {:?} is parallel to view direction {:?}, using identity",
                up,
                dir
            );
            return Self::default();
        }

        let right = cross_up_dir.normalize();
        let up = dir.cross(right);

        let m = Matrix4::new([
            [right.x, up.x, dir.x, eye.x],
            [right.y, up.y, dir.y, eye.y],
            [right.z, up.z, dir.z, eye.z],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        // Orthonormal basis: inverse is [R^T | -R^T * eye]
        let inv = Matrix4::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [dir.x, dir.y, dir.z, -dir.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Self::from_parts(m, inv)
    }

    /// Maps view-space z in `[near, far]` to `[0, 1]`, leaving x and y alone.
    pub fn orthographic(near: f32, far: f32) -> Self {
        Self::scale(Vec3::new(1.0, 1.0, 1.0 / (far - near)))
            * Self::translate(Vec3::new(0.0, 0.0, -near))
    }

    /// Perspective projection with a field of view of `fov_degrees`.
    ///
    /// Maps z in `[near, far]` to `[0, 1]` after the divide and scales x/y so
    /// the edges of the field of view land on ±1. The inverse is computed
    /// numerically; this is built once per camera.
    pub fn perspective(fov_degrees: f32, near: f32, far: f32) -> Self {
        let p = Matrix4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, far / (far - near), -far * near / (far - near)],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        let inv_tan_angle = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
        Self::scale(Vec3::new(inv_tan_angle, inv_tan_angle, 1.0)) * Self::new(p)
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// Composition: `(a * b)` applies `b` first. The inverse composes in
    /// reverse order.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
            inverse: rhs.inverse * self.inverse,
        }
    }
}
