//! Fixed-size square matrices with numerically compensated algebra.
//!
//! `Matrix<N>` is row-major. Products, determinants and inverses for the 3x3
//! and 4x4 cases go through the compensated primitives in
//! [`crate::compensated`], which keeps the relative error close to machine
//! epsilon even for badly conditioned matrices such as thin camera frustums.

use std::ops::{Add, Div, Index, IndexMut, Mul};

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::compensated::{difference_of_products, inner_product};
use crate::error::MathError;

/// An N x N matrix of `f32`, stored row-major.
///
/// The default value is the identity. Ordering is lexicographic over rows then
/// columns; it exists so matrices can key ordered containers and carries no
/// geometric meaning.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Matrix<const N: usize> {
    m: [[f32; N]; N],
}

/// 3x3 matrix.
pub type Matrix3 = Matrix<3>;
/// 4x4 matrix, the storage of every [`crate::Transform`].
pub type Matrix4 = Matrix<4>;

// SAFETY: `Matrix<N>` is a transparent wrapper over `[[f32; N]; N]`, which has
// no padding and for which every bit pattern is valid.
unsafe impl<const N: usize> Zeroable for Matrix<N> {}
unsafe impl<const N: usize> Pod for Matrix<N> {}

impl<const N: usize> Matrix<N> {
    /// The identity matrix.
    pub fn identity() -> Self {
        Self {
            m: std::array::from_fn(|i| std::array::from_fn(|j| if i == j { 1.0 } else { 0.0 })),
        }
    }

    /// The all-zero matrix.
    pub fn zero() -> Self {
        Self::filled(0.0)
    }

    /// A matrix with every entry set to `value`.
    pub fn filled(value: f32) -> Self {
        Self { m: [[value; N]; N] }
    }

    /// Build a matrix from explicit rows.
    pub fn new(rows: [[f32; N]; N]) -> Self {
        Self { m: rows }
    }

    /// Build a matrix from N² values in row-major order.
    ///
    /// Supplying anything other than N² values is a caller bug: it trips a
    /// debug assertion, and in release builds the missing entries keep their
    /// identity value while extra ones are ignored. Use `Matrix::try_from` for
    /// a checked conversion.
    pub fn from_slice(values: &[f32]) -> Self {
        debug_assert_eq!(
            values.len(),
            N * N,
            "Matrix<{}> needs {} values",
            N,
            N * N
        );

        let mut result = Self::identity();
        for (i, &v) in values.iter().take(N * N).enumerate() {
            result.m[i / N][i % N] = v;
        }
        result
    }

    /// Entry at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.m[row][col]
    }

    /// All rows.
    #[inline]
    pub fn rows(&self) -> &[[f32; N]; N] {
        &self.m
    }

    /// View the N² entries in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    /// True if every entry matches the identity exactly.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self {
            m: std::array::from_fn(|i| std::array::from_fn(|j| self.m[j][i])),
        }
    }

    /// Determinant.
    ///
    /// Closed form for N <= 4; larger matrices use cofactor expansion along
    /// the first row.
    pub fn determinant(&self) -> f32 {
        cofactor_determinant(self.as_slice(), N)
    }

    /// Multiply by a column vector of matching arity.
    pub fn mul_array(&self, v: [f32; N]) -> [f32; N] {
        std::array::from_fn(|i| row_dot(&self.m[i], |k| v[k]))
    }
}

impl Matrix<3> {
    /// Inverse via the adjugate, or `None` when the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;
        let m = &self.m;

        let mut r = Self::zero();
        r.m[0][0] = inv_det * difference_of_products(m[1][1], m[2][2], m[1][2], m[2][1]);
        r.m[1][0] = inv_det * difference_of_products(m[1][2], m[2][0], m[1][0], m[2][2]);
        r.m[2][0] = inv_det * difference_of_products(m[1][0], m[2][1], m[1][1], m[2][0]);
        r.m[0][1] = inv_det * difference_of_products(m[0][2], m[2][1], m[0][1], m[2][2]);
        r.m[1][1] = inv_det * difference_of_products(m[0][0], m[2][2], m[0][2], m[2][0]);
        r.m[2][1] = inv_det * difference_of_products(m[0][1], m[2][0], m[0][0], m[2][1]);
        r.m[0][2] = inv_det * difference_of_products(m[0][1], m[1][2], m[0][2], m[1][1]);
        r.m[1][2] = inv_det * difference_of_products(m[0][2], m[1][0], m[0][0], m[1][2]);
        r.m[2][2] = inv_det * difference_of_products(m[0][0], m[1][1], m[0][1], m[1][0]);
        Some(r)
    }
}

impl Matrix<4> {
    /// Inverse via 2x2 sub-determinants (the Laplace expansion used by Google's
    /// Ion library), or `None` when the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.m;
        let s0 = difference_of_products(m[0][0], m[1][1], m[1][0], m[0][1]);
        let s1 = difference_of_products(m[0][0], m[1][2], m[1][0], m[0][2]);
        let s2 = difference_of_products(m[0][0], m[1][3], m[1][0], m[0][3]);
        let s3 = difference_of_products(m[0][1], m[1][2], m[1][1], m[0][2]);
        let s4 = difference_of_products(m[0][1], m[1][3], m[1][1], m[0][3]);
        let s5 = difference_of_products(m[0][2], m[1][3], m[1][2], m[0][3]);
        let c0 = difference_of_products(m[2][0], m[3][1], m[3][0], m[2][1]);
        let c1 = difference_of_products(m[2][0], m[3][2], m[3][0], m[2][2]);
        let c2 = difference_of_products(m[2][0], m[3][3], m[3][0], m[2][3]);
        let c3 = difference_of_products(m[2][1], m[3][2], m[3][1], m[2][2]);
        let c4 = difference_of_products(m[2][1], m[3][3], m[3][1], m[2][3]);
        let c5 = difference_of_products(m[2][2], m[3][3], m[3][2], m[2][3]);

        let det = inner_product(&[s0, c5, -s1, c4, s2, c3, s3, c2, s5, c0, -s4, c1]);
        if det == 0.0 {
            return None;
        }
        let s = 1.0 / det;

        Some(Self::new([
            [
                s * inner_product(&[m[1][1], c5, m[1][3], c3, -m[1][2], c4]),
                s * inner_product(&[-m[0][1], c5, m[0][2], c4, -m[0][3], c3]),
                s * inner_product(&[m[3][1], s5, m[3][3], s3, -m[3][2], s4]),
                s * inner_product(&[-m[2][1], s5, m[2][2], s4, -m[2][3], s3]),
            ],
            [
                s * inner_product(&[-m[1][0], c5, m[1][2], c2, -m[1][3], c1]),
                s * inner_product(&[m[0][0], c5, m[0][3], c1, -m[0][2], c2]),
                s * inner_product(&[-m[3][0], s5, m[3][2], s2, -m[3][3], s1]),
                s * inner_product(&[m[2][0], s5, m[2][3], s1, -m[2][2], s2]),
            ],
            [
                s * inner_product(&[m[1][0], c4, m[1][3], c0, -m[1][1], c2]),
                s * inner_product(&[-m[0][0], c4, m[0][1], c2, -m[0][3], c0]),
                s * inner_product(&[m[3][0], s4, m[3][3], s0, -m[3][1], s2]),
                s * inner_product(&[-m[2][0], s4, m[2][1], s2, -m[2][3], s0]),
            ],
            [
                s * inner_product(&[-m[1][0], c3, m[1][1], c1, -m[1][2], c0]),
                s * inner_product(&[m[0][0], c3, m[0][2], c0, -m[0][1], c1]),
                s * inner_product(&[-m[3][0], s3, m[3][1], s1, -m[3][2], s0]),
                s * inner_product(&[m[2][0], s3, m[2][2], s0, -m[2][1], s1]),
            ],
        ]))
    }
}

/// Dot product of a matrix row with a column produced by `col`.
///
/// Orders 3 and 4 sum with the compensated inner product; other orders
/// accumulate with fused multiply-adds.
#[inline]
fn row_dot<const N: usize>(row: &[f32; N], col: impl Fn(usize) -> f32) -> f32 {
    let r: &[f32] = row;
    match N {
        3 => inner_product(&[r[0], col(0), r[1], col(1), r[2], col(2)]),
        4 => inner_product(&[r[0], col(0), r[1], col(1), r[2], col(2), r[3], col(3)]),
        _ => (0..N).fold(0.0, |acc, k| r[k].mul_add(col(k), acc)),
    }
}

fn rows_from_slice<const M: usize>(values: &[f32]) -> [[f32; M]; M] {
    std::array::from_fn(|i| std::array::from_fn(|j| values[i * M + j]))
}

fn determinant3(m: &[[f32; 3]; 3]) -> f32 {
    let minor12 = difference_of_products(m[1][1], m[2][2], m[1][2], m[2][1]);
    let minor02 = difference_of_products(m[1][0], m[2][2], m[1][2], m[2][0]);
    let minor01 = difference_of_products(m[1][0], m[2][1], m[1][1], m[2][0]);
    m[0][2].mul_add(
        minor01,
        difference_of_products(m[0][0], minor12, m[0][1], minor02),
    )
}

fn determinant4(m: &[[f32; 4]; 4]) -> f32 {
    let s0 = difference_of_products(m[0][0], m[1][1], m[1][0], m[0][1]);
    let s1 = difference_of_products(m[0][0], m[1][2], m[1][0], m[0][2]);
    let s2 = difference_of_products(m[0][0], m[1][3], m[1][0], m[0][3]);
    let s3 = difference_of_products(m[0][1], m[1][2], m[1][1], m[0][2]);
    let s4 = difference_of_products(m[0][1], m[1][3], m[1][1], m[0][3]);
    let s5 = difference_of_products(m[0][2], m[1][3], m[1][2], m[0][3]);
    let c0 = difference_of_products(m[2][0], m[3][1], m[3][0], m[2][1]);
    let c1 = difference_of_products(m[2][0], m[3][2], m[3][0], m[2][2]);
    let c2 = difference_of_products(m[2][0], m[3][3], m[3][0], m[2][3]);
    let c3 = difference_of_products(m[2][1], m[3][2], m[3][1], m[2][2]);
    let c4 = difference_of_products(m[2][1], m[3][3], m[3][1], m[2][3]);
    let c5 = difference_of_products(m[2][2], m[3][3], m[3][2], m[2][3]);
    difference_of_products(s0, c5, s1, c4)
        + difference_of_products(s2, c3, -s3, c2)
        + difference_of_products(s5, c0, s4, c1)
}

/// Determinant of the `n` x `n` row-major matrix in `values`.
fn cofactor_determinant(values: &[f32], n: usize) -> f32 {
    match n {
        0 => 1.0,
        1 => values[0],
        2 => difference_of_products(values[0], values[3], values[1], values[2]),
        3 => determinant3(&rows_from_slice::<3>(values)),
        4 => determinant4(&rows_from_slice::<4>(values)),
        _ => {
            let size = n - 1;
            let mut minor = vec![0.0; size * size];
            let mut det = 0.0;
            for i in 0..n {
                // Drop row 0 and column i
                for j in 0..size {
                    for k in 0..size {
                        let col = if k < i { k } else { k + 1 };
                        minor[j * size + k] = values[(j + 1) * n + col];
                    }
                }
                let sign = if i & 1 == 1 { -1.0 } else { 1.0 };
                det += sign * values[i] * cofactor_determinant(&minor, size);
            }
            det
        }
    }
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> TryFrom<&[f32]> for Matrix<N> {
    type Error = MathError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        if values.len() != N * N {
            return Err(MathError::DimensionMismatch {
                expected: N * N,
                actual: values.len(),
            });
        }
        Ok(Self::from_slice(values))
    }
}

impl<const N: usize> Index<usize> for Matrix<N> {
    type Output = [f32; N];

    #[inline]
    fn index(&self, row: usize) -> &[f32; N] {
        &self.m[row]
    }
}

impl<const N: usize> IndexMut<usize> for Matrix<N> {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut [f32; N] {
        &mut self.m[row]
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            m: std::array::from_fn(|i| std::array::from_fn(|j| self.m[i][j] + rhs.m[i][j])),
        }
    }
}

impl<const N: usize> Mul<f32> for Matrix<N> {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self {
            m: self.m.map(|row| row.map(|v| v * s)),
        }
    }
}

impl<const N: usize> Mul<Matrix<N>> for f32 {
    type Output = Matrix<N>;

    fn mul(self, m: Matrix<N>) -> Matrix<N> {
        m * self
    }
}

impl<const N: usize> Div<f32> for Matrix<N> {
    type Output = Self;

    /// Division by zero follows IEEE semantics (infinities / NaN).
    fn div(self, s: f32) -> Self {
        Self {
            m: self.m.map(|row| row.map(|v| v / s)),
        }
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            m: std::array::from_fn(|i| {
                std::array::from_fn(|j| row_dot(&self.m[i], |k| rhs.m[k][j]))
            }),
        }
    }
}

impl Mul<Vec3> for Matrix<3> {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        Vec3::from_array(self.mul_array(v.to_array()))
    }
}

impl Mul<Vec4> for Matrix<4> {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::from_array(self.mul_array(v.to_array()))
    }
}

// glam stores column-major, so rows and columns swap on the way across.

impl From<Mat4> for Matrix<4> {
    fn from(m: Mat4) -> Self {
        Self::new(m.transpose().to_cols_array_2d())
    }
}

impl From<Matrix<4>> for Mat4 {
    fn from(m: Matrix<4>) -> Self {
        Mat4::from_cols_array_2d(&m.m).transpose()
    }
}

impl From<Mat3> for Matrix<3> {
    fn from(m: Mat3) -> Self {
        Self::new(m.transpose().to_cols_array_2d())
    }
}

impl From<Matrix<3>> for Mat3 {
    fn from(m: Matrix<3>) -> Self {
        Mat3::from_cols_array_2d(&m.m).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_near_identity<const N: usize>(m: &Matrix<N>) {
        let id = Matrix::<N>::identity();
        for i in 0..N {
            for j in 0..N {
                assert!(
                    (m[i][j] - id[i][j]).abs() < EPSILON,
                    "entry ({}, {}) = {} not near identity",
                    i,
                    j,
                    m[i][j]
                );
            }
        }
    }

    fn sample4() -> Matrix4 {
        Matrix4::new([
            [2.0, 0.5, -1.0, 3.0],
            [0.0, 3.0, 1.0, -2.0],
            [1.0, -0.25, 4.0, 0.5],
            [0.5, 1.0, 0.0, 1.0],
        ])
    }

    #[test]
    fn test_default_is_identity() {
        let m: Matrix4 = Matrix::default();
        assert!(m.is_identity());
        assert_eq!(m, Matrix4::identity());
        assert!(!Matrix4::zero().is_identity());
    }

    #[test]
    fn test_from_slice_row_major() {
        let values: Vec<f32> = (0..9).map(|v| v as f32).collect();
        let m = Matrix3::from_slice(&values);

        assert_eq!(m[0], [0.0, 1.0, 2.0]);
        assert_eq!(m[2][1], 7.0);
        assert_eq!(m.at(1, 2), 5.0);
        assert_eq!(m.as_slice(), values.as_slice());
    }

    #[test]
    fn test_try_from_dimension_mismatch() {
        let values = [1.0, 2.0, 3.0];
        let err = Matrix3::try_from(&values[..]).unwrap_err();
        assert_eq!(
            err,
            MathError::DimensionMismatch {
                expected: 9,
                actual: 3
            }
        );

        let ok = Matrix::<2>::try_from(&[1.0, 2.0, 3.0, 4.0][..]).unwrap();
        assert_eq!(ok.rows(), &[[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_elementwise_ops() {
        let a = Matrix::<2>::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::<2>::new([[0.5, 0.5], [0.5, 0.5]]);

        assert_eq!((a + b).rows(), &[[1.5, 2.5], [3.5, 4.5]]);
        assert_eq!((a * 2.0).rows(), &[[2.0, 4.0], [6.0, 8.0]]);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!((a / 2.0).rows(), &[[0.5, 1.0], [1.5, 2.0]]);

        // Division by zero is not an error
        let inf = a / 0.0;
        assert!(inf[0][0].is_infinite());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = Matrix::<2>::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::<2>::new([[1.0, 2.0], [3.0, 5.0]]);
        let c = Matrix::<2>::new([[1.0, 3.0], [0.0, 0.0]]);

        assert!(a < b);
        assert!(b < c);
        let same = a;
        assert_eq!(a.partial_cmp(&same), Some(std::cmp::Ordering::Equal));
        assert!(a != b);
    }

    #[test]
    fn test_transpose() {
        let m = sample4();
        let t = m.transpose();
        assert_eq!(t[0][1], m[1][0]);
        assert_eq!(t[3][2], m[2][3]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_determinant_small_orders() {
        assert_eq!(Matrix::<1>::new([[7.0]]).determinant(), 7.0);
        assert_eq!(
            Matrix::<2>::new([[1.0, 2.0], [3.0, 4.0]]).determinant(),
            -2.0
        );
        let m3 = Matrix3::new([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]);
        assert_eq!(m3.determinant(), 6.0);
        assert_eq!(Matrix4::identity().determinant(), 1.0);
    }

    #[test]
    fn test_determinant_matches_glam() {
        let m = sample4();
        let glam_det = Mat4::from(m).determinant();
        assert!((m.determinant() - glam_det).abs() < EPSILON * glam_det.abs());
    }

    #[test]
    fn test_determinant_of_transpose_integer_matrices() {
        let m3 = Matrix3::new([[3.0, -1.0, 2.0], [0.0, 4.0, 5.0], [7.0, 1.0, -6.0]]);
        assert_eq!(m3.transpose().determinant(), m3.determinant());

        let m4 = Matrix4::new([
            [1.0, 2.0, 0.0, -1.0],
            [3.0, 0.0, 1.0, 2.0],
            [-2.0, 1.0, 4.0, 0.0],
            [0.0, 5.0, -3.0, 1.0],
        ]);
        assert_eq!(m4.transpose().determinant(), m4.determinant());
    }

    #[test]
    fn test_determinant_of_transpose_float_matrix() {
        // The closed forms pair entries differently for A and A^T, so general
        // float inputs only agree to within rounding.
        let m = sample4();
        let d = m.determinant();
        assert!((m.transpose().determinant() - d).abs() < EPSILON * d.abs().max(1.0));
    }

    #[test]
    fn test_determinant_cofactor_expansion() {
        let mut diag = Matrix::<5>::identity();
        for (i, v) in [2.0, 3.0, 4.0, 5.0, 6.0].into_iter().enumerate() {
            diag[i][i] = v;
        }
        assert_eq!(diag.determinant(), 720.0);

        // Swapping two rows flips the sign
        let mut swapped = diag;
        swapped[0] = diag[1];
        swapped[1] = diag[0];
        assert_eq!(swapped.determinant(), -720.0);

        let mut upper = Matrix::<6>::identity();
        upper[0][5] = 9.0;
        upper[2][4] = -3.0;
        upper[5][5] = 2.0;
        assert_eq!(upper.determinant(), 2.0);
    }

    #[test]
    fn test_inverse3() {
        let m = Matrix3::new([[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]]);
        let inv = m.inverse().unwrap();
        assert_near_identity(&(m * inv));
        assert_near_identity(&(inv * m));

        let glam_inv = Mat3::from(m).inverse();
        let ours = Mat3::from(inv);
        assert!(ours.abs_diff_eq(glam_inv, EPSILON));
    }

    #[test]
    fn test_inverse4() {
        let m = sample4();
        let inv = m.inverse().unwrap();
        assert_near_identity(&(m * inv));
        assert_near_identity(&(inv * m));

        let glam_inv = Mat4::from(m).inverse();
        assert!(Mat4::from(inv).abs_diff_eq(glam_inv, EPSILON));
    }

    #[test]
    fn test_inverse_ill_conditioned_frustum() {
        // Perspective matrix with a very thin near plane
        let (near, far) = (0.05f32, 1024.0f32);
        let m = Matrix4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, far / (far - near), -far * near / (far - near)],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        let inv = m.inverse().unwrap();
        assert_near_identity(&(m * inv));
    }

    #[test]
    fn test_singular_inverse_is_none() {
        let m3 = Matrix3::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert_eq!(m3.determinant(), 0.0);
        assert!(m3.inverse().is_none());

        let mut m4 = sample4();
        m4[3] = m4[0];
        assert!(m4.inverse().is_none());
        assert!(Matrix4::zero().inverse().is_none());
    }

    #[test]
    fn test_matrix_vector_product() {
        let m = Matrix3::new([[1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 2.0]]);
        assert_eq!(m * Vec3::new(1.0, 1.0, 1.0), Vec3::new(6.0, 1.0, 1.0));

        let t = Matrix4::new([
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(
            t * Vec4::new(1.0, 2.0, 3.0, 1.0),
            Vec4::new(6.0, 8.0, 10.0, 1.0)
        );

        let m2 = Matrix::<2>::new([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(m2.mul_array([3.0, 4.0]), [4.0, 3.0]);
    }

    #[test]
    fn test_product_matches_glam() {
        let a = sample4();
        let b = sample4().transpose();
        let ours = Mat4::from(a * b);
        let theirs = Mat4::from(a) * Mat4::from(b);
        assert!(ours.abs_diff_eq(theirs, EPSILON));

        // Generic order falls back to fused accumulation
        let m2 = Matrix::<2>::new([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!((m2 * m2).rows(), &[[7.0, 10.0], [15.0, 22.0]]);
    }

    #[test]
    fn test_product_survives_cancellation() {
        let a = Matrix4::new([
            [1.0e8, 1.0, -1.0e8, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let b = Matrix4::new([
            [1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        // Plain left-to-right accumulation loses the 1 entirely
        let naive = (0..4).fold(0.0f32, |acc, k| acc + a[0][k] * b[k][0]);
        assert_eq!(naive, 0.0);

        assert_eq!((a * b)[0][0], 1.0);
        assert_eq!((a * Vec4::new(1.0, 1.0, 1.0, 0.0)).x, 1.0);

        let m3 = Matrix3::new([[1.0e8, 1.0, -1.0e8], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!((m3 * Vec3::ONE).x, 1.0);
    }

    #[test]
    fn test_determinant_survives_cancellation() {
        let e = f32::EPSILON;
        let expected = -(e * e);

        // (1 + e)(1 - e) - 1 rounds to zero when evaluated naively
        let naive = (1.0 + e) * (1.0 - e) - 1.0;
        assert_eq!(naive, 0.0);

        let m3 = Matrix3::new([[1.0 + e, 1.0, 0.0], [1.0, 1.0 - e, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m3.determinant(), expected);
        assert_eq!(m3.transpose().determinant(), expected);

        let m4 = Matrix4::new([
            [1.0 + e, 1.0, 0.0, 0.0],
            [1.0, 1.0 - e, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(m4.determinant(), expected);
        assert!(m4.inverse().is_some());
    }

    #[test]
    fn test_glam_round_trip() {
        let m = sample4();
        let g: Mat4 = m.into();
        // glam column 3, row 0 is our row 0, column 3
        assert_eq!(g.w_axis.x, m[0][3]);
        assert_eq!(Matrix4::from(g), m);
    }
}
