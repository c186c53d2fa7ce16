//! 2-D affine matrices.
//!
//! A matrix holds six coefficients laid out as
//!
//! ```text
//! | a  b  c |
//! | d  e  f |
//! | 0  0  1 |
//! ```
//!
//! and maps a point with `x' = a*x + b*y + c`, `y' = d*x + e*y + f`.

use std::ops::Mul;

/// Determinants with a smaller magnitude are treated as singular.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// An affine map of the plane.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Pure translation by `(dx, dy)`.
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, dx, 0.0, 1.0, dy)
    }

    pub const fn from_coeffs(m: [f64; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }

    /// Coefficients in `[a, b, c, d, e, f]` order.
    pub const fn coeffs(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Map a point through the matrix.
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    /// The matrix that applies `self` first and `next` second.
    ///
    /// `self.then(next).transform_point(p) == next.transform_point(self.transform_point(p))`
    #[inline]
    pub fn then(self, next: AffineMatrix) -> AffineMatrix {
        next * self
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Check whether the matrix has an inverse.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() >= DEGENERATE_EPSILON
    }

    /// The inverse map, or `None` when the determinant is (near) zero.
    pub fn inverse(&self) -> Option<AffineMatrix> {
        if !self.is_invertible() {
            return None;
        }

        let inv_det = 1.0 / self.determinant();
        let a = self.e * inv_det;
        let b = -self.b * inv_det;
        let d = -self.d * inv_det;
        let e = self.a * inv_det;

        Some(AffineMatrix {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    /// Coefficient-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &AffineMatrix, epsilon: f64) -> bool {
        self.coeffs()
            .iter()
            .zip(other.coeffs().iter())
            .all(|(x, y)| (x - y).abs() <= epsilon)
    }

    /// Exact comparison against the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Standard matrix product: `(lhs * rhs)` applies `rhs` first.
impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        AffineMatrix {
            a: self.a * rhs.a + self.b * rhs.d,
            b: self.a * rhs.b + self.b * rhs.e,
            c: self.a * rhs.c + self.b * rhs.f + self.c,
            d: self.d * rhs.a + self.e * rhs.d,
            e: self.d * rhs.b + self.e * rhs.e,
            f: self.d * rhs.c + self.e * rhs.f + self.f,
        }
    }
}
