//! Vector and matrix math for the transform pipeline
//!
//! Matrices are row-major and applied with the vertex on the left (`v * M`),
//! so `A * B` composes "transform by A, then by B". All value types are
//! immutable; arithmetic produces new values.

use std::ops::{Add, Div, Mul, Sub};

/// Homogeneous 3D vector. `w` defaults to 1 and only becomes meaningful
/// after a projective transform fills it in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::new(0.0, 0.0, 0.0)
    }
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length. A zero-length vector produces non-finite
    /// components; callers guard before normalizing.
    pub fn normalize(self) -> Vec3 {
        self / self.len()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, k: f32) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, k: f32) -> Vec3 {
        Vec3::new(self.x / k, self.y / k, self.z / k)
    }
}

/// Componentwise product.
impl Mul for Vec3 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }
}

/// Componentwise quotient.
impl Div for Vec3 {
    type Output = Vec3;
    fn div(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }
}

/// Texture coordinate. `w` carries the reciprocal of the post-projection
/// homogeneous coordinate for perspective-correct interpolation; it stays 1
/// until the projection stage fills it in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl Default for TexCoord {
    fn default() -> Self {
        TexCoord::new(0.0, 0.0)
    }
}

impl TexCoord {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v, w: 1.0 }
    }
}

/// Row-major 4x4 transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn identity() -> Mat4 {
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = 1.0;
        mat.m[1][1] = 1.0;
        mat.m[2][2] = 1.0;
        mat.m[3][3] = 1.0;
        mat
    }

    /// Rotation about the X axis, angle in radians.
    pub fn rotation_x(angle: f32) -> Mat4 {
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = 1.0;
        mat.m[1][1] = angle.cos();
        mat.m[1][2] = angle.sin();
        mat.m[2][1] = -angle.sin();
        mat.m[2][2] = angle.cos();
        mat.m[3][3] = 1.0;
        mat
    }

    /// Rotation about the Y axis, angle in radians.
    pub fn rotation_y(angle: f32) -> Mat4 {
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = angle.cos();
        mat.m[0][2] = angle.sin();
        mat.m[2][0] = -angle.sin();
        mat.m[1][1] = 1.0;
        mat.m[2][2] = angle.cos();
        mat.m[3][3] = 1.0;
        mat
    }

    /// Rotation about the Z axis, angle in radians.
    pub fn rotation_z(angle: f32) -> Mat4 {
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = angle.cos();
        mat.m[0][1] = angle.sin();
        mat.m[1][0] = -angle.sin();
        mat.m[1][1] = angle.cos();
        mat.m[2][2] = 1.0;
        mat.m[3][3] = 1.0;
        mat
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = 1.0;
        mat.m[1][1] = 1.0;
        mat.m[2][2] = 1.0;
        mat.m[3][3] = 1.0;
        mat.m[3][0] = x;
        mat.m[3][1] = y;
        mat.m[3][2] = z;
        mat
    }

    /// Perspective projection. `fov` is in degrees, `aspect_ratio` is
    /// height over width. `m[2][3] = 1` marks the perspective divide:
    /// transformed vertices carry the view-space depth in `w`.
    pub fn projection(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        let fov_rad = 1.0 / (fov * 0.5).to_radians().tan();
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = aspect_ratio * fov_rad;
        mat.m[1][1] = fov_rad;
        mat.m[2][2] = far / (far - near);
        mat.m[2][3] = 1.0;
        mat.m[3][2] = (-far * near) / (far - near);
        mat
    }

    /// Camera orientation matrix: a right/up/forward basis at `pos` looking
    /// toward `target`, with `up` re-orthonormalized against the forward
    /// direction (Gram-Schmidt).
    pub fn point_at(pos: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - pos).normalize();
        let up = (up - forward * up.dot(forward)).normalize();
        let right = up.cross(forward);

        Mat4 {
            m: [
                [right.x, right.y, right.z, 0.0],
                [up.x, up.y, up.z, 0.0],
                [forward.x, forward.y, forward.z, 0.0],
                [pos.x, pos.y, pos.z, 1.0],
            ],
        }
    }

    /// Closed-form inverse, valid ONLY for pure rotation+translation
    /// matrices: transposes the rotation block and recomputes the
    /// translation row. Feeding it anything non-rigid returns garbage.
    pub fn quick_inverse(self) -> Mat4 {
        let m = &self.m;
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        mat.m[0][0] = m[0][0];
        mat.m[0][1] = m[1][0];
        mat.m[0][2] = m[2][0];
        mat.m[1][0] = m[0][1];
        mat.m[1][1] = m[1][1];
        mat.m[1][2] = m[2][1];
        mat.m[2][0] = m[0][2];
        mat.m[2][1] = m[1][2];
        mat.m[2][2] = m[2][2];
        mat.m[3][0] = -(m[3][0] * mat.m[0][0] + m[3][1] * mat.m[1][0] + m[3][2] * mat.m[2][0]);
        mat.m[3][1] = -(m[3][0] * mat.m[0][1] + m[3][1] * mat.m[1][1] + m[3][2] * mat.m[2][1]);
        mat.m[3][2] = -(m[3][0] * mat.m[0][2] + m[3][1] * mat.m[1][2] + m[3][2] * mat.m[2][2]);
        mat.m[3][3] = 1.0;
        mat
    }
}

/// Matrix composition: `(a * b)` transforms by `a`, then by `b`.
impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut mat = Mat4 { m: [[0.0; 4]; 4] };
        for j in 0..4 {
            for i in 0..4 {
                mat.m[j][i] = self.m[j][0] * other.m[0][i]
                    + self.m[j][1] * other.m[1][i]
                    + self.m[j][2] * other.m[2][i]
                    + self.m[j][3] * other.m[3][i];
            }
        }
        mat
    }
}

/// Row-vector matrix application: `v' = v * M`.
impl Mul<Mat4> for Vec3 {
    type Output = Vec3;
    fn mul(self, mat: Mat4) -> Vec3 {
        let m = &mat.m;
        Vec3 {
            x: self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0] + self.w * m[3][0],
            y: self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1] + self.w * m[3][1],
            z: self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2] + self.w * m[3][2],
            w: self.x * m[0][3] + self.y * m[1][3] + self.z * m[2][3] + self.w * m[3][3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    #[test]
    fn test_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!(approx(a.dot(b), 32.0));
    }

    #[test]
    fn test_cross_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!(approx_vec(x.cross(y), Vec3::new(0.0, 0.0, 1.0)));
        assert!(approx_vec(y.cross(x), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert!(approx(v.len(), 1.0));
    }

    #[test]
    fn test_normalize_zero_vector_is_non_finite() {
        let v = Vec3::ZERO.normalize();
        assert!(!v.x.is_finite() && !v.y.is_finite() && !v.z.is_finite());
    }

    #[test]
    fn test_componentwise_mul_div() {
        let a = Vec3::new(2.0, 6.0, 8.0);
        let b = Vec3::new(1.0, 2.0, 4.0);
        assert!(approx_vec(a * b, Vec3::new(2.0, 12.0, 32.0)));
        assert!(approx_vec(a / b, Vec3::new(2.0, 3.0, 2.0)));
    }

    #[test]
    fn test_arithmetic_resets_w() {
        let mut a = Vec3::new(1.0, 0.0, 0.0);
        a.w = 7.0;
        assert!(approx((a + Vec3::ZERO).w, 1.0));
        assert!(approx((a * 2.0).w, 1.0));
    }

    #[test]
    fn test_translation_moves_point() {
        let p = Vec3::new(1.0, 2.0, 3.0) * Mat4::translation(10.0, 20.0, 30.0);
        assert!(approx_vec(p, Vec3::new(11.0, 22.0, 33.0)));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let p = Vec3::new(0.0, 0.0, 1.0) * Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(approx_vec(p, Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_composition_order() {
        // (A * B) applied to v must equal B applied to (A applied to v).
        let a = Mat4::rotation_x(0.7);
        let b = Mat4::translation(1.0, 2.0, 3.0);
        let v = Vec3::new(4.0, -5.0, 6.0);
        assert!(approx_vec(v * (a * b), (v * a) * b));
    }

    #[test]
    fn test_projection_marks_perspective_divide() {
        let proj = Mat4::projection(90.0, 1.0, 0.1, 1000.0);
        let p = Vec3::new(0.0, 0.0, 5.0) * proj;
        // m[2][3] = 1 copies view-space depth into w.
        assert!(approx(p.w, 5.0));
    }

    #[test]
    fn test_quick_inverse_round_trips_rigid_transform() {
        let m = Mat4::rotation_y(0.9) * Mat4::translation(3.0, -1.0, 7.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx_vec((v * m) * m.quick_inverse(), v));
    }

    #[test]
    fn test_point_at_basis_is_orthonormal() {
        let mat = Mat4::point_at(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 2.0, 9.0),
            Vec3::UP,
        );
        let right = Vec3::new(mat.m[0][0], mat.m[0][1], mat.m[0][2]);
        let up = Vec3::new(mat.m[1][0], mat.m[1][1], mat.m[1][2]);
        let forward = Vec3::new(mat.m[2][0], mat.m[2][1], mat.m[2][2]);
        assert!(approx(right.len(), 1.0));
        assert!(approx(up.len(), 1.0));
        assert!(approx(forward.len(), 1.0));
        assert!(approx(right.dot(up), 0.0));
        assert!(approx(up.dot(forward), 0.0));
        assert!(approx(forward.dot(right), 0.0));
    }
}
