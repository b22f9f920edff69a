//! 6-parameter affine transform matrices.
//!
//! A matrix (a, b, c, d, e, f) maps content space to device space:
//! `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.

use serde::{Deserialize, Serialize};

/// A 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    /// Horizontal scale component
    pub a: f32,
    /// Vertical shear component
    pub b: f32,
    /// Horizontal shear component
    pub c: f32,
    /// Vertical scale component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Create a matrix from its six parameters.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Concatenate an incoming transform onto this one.
    ///
    /// The incoming matrix is applied in the new coordinate frame, not the
    /// old one: the result maps a point first through `incoming`, then
    /// through `self`.
    pub fn concat(&self, incoming: &Matrix) -> Matrix {
        let (a1, b1, c1, d1, e1, f1) = (self.a, self.b, self.c, self.d, self.e, self.f);
        let (a2, b2, c2, d2, e2, f2) = (
            incoming.a, incoming.b, incoming.c, incoming.d, incoming.e, incoming.f,
        );
        Matrix {
            a: a1 * a2 + c1 * b2,
            b: b1 * a2 + d1 * b2,
            c: a1 * c2 + c1 * d2,
            d: b1 * c2 + d1 * d2,
            e: a1 * e2 + c1 * f2 + e1,
            f: b1 * e2 + d1 * f2 + f1,
        }
    }

    /// Map a point through the transform.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Translation component `(e, f)`.
    pub fn translation(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Magnitude of the horizontal basis vector.
    pub fn horizontal_scale(&self) -> f32 {
        self.a.hypot(self.b)
    }

    /// Magnitude of the vertical basis vector.
    pub fn vertical_scale(&self) -> f32 {
        self.c.hypot(self.d)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
