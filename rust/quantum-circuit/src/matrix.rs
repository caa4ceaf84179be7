//! Dense complex matrices.
//!
//! Gates, bras, kets and register states are all [`Matrix`] values: a bra is
//! a `1 × d` row, a ket a `d × 1` column, a gate `d × d`. Operations that can
//! fail on mismatched shapes return [`CircuitError`] instead of panicking.

use std::fmt;
use std::ops::{Mul, Neg};

use crate::error::CircuitError;

/// Complex number type alias using f64 precision
pub use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Pivots smaller than this are treated as zero during inversion.
const PIVOT_EPSILON: f64 = 1e-12;

/// Row-major dense complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl Matrix {
    /// Create a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<Complex64>) -> Result<Self, CircuitError> {
        if data.len() != rows * cols {
            return Err(CircuitError::DimensionMismatch {
                op: "new",
                lhs: (rows, cols),
                rhs: (data.len(), 1),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![ZERO; rows * cols],
        }
    }

    /// Create an identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = ONE;
        }
        m
    }

    /// Create a matrix from real row-major values.
    pub fn from_real(rows: usize, cols: usize, reals: &[f64]) -> Result<Self, CircuitError> {
        Self::new(rows, cols, reals.iter().map(|&r| Complex64::new(r, 0.0)).collect())
    }

    /// Create a matrix from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<Complex64>]) -> Result<Self, CircuitError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(CircuitError::DimensionMismatch {
                op: "from_rows",
                lhs: (1, cols),
                rhs: (1, bad.len()),
            });
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    /// Square matrix from a fixed-size array of rows.
    pub fn from_array<const N: usize>(rows: [[Complex64; N]; N]) -> Self {
        Self {
            rows: N,
            cols: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Column vector `d × 1`.
    pub fn column(values: &[Complex64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Row vector `1 × d`.
    pub fn row(values: &[Complex64]) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    /// Square matrix with `values` on the diagonal.
    pub fn diag(values: &[Complex64]) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in values.iter().enumerate() {
            m.data[i * n + i] = v;
        }
        m
    }

    /// Real diagonal matrix, e.g. `diag_real(&[1.0, 0.0])` for `|0⟩⟨0|`.
    pub fn diag_real(values: &[f64]) -> Self {
        let values: Vec<Complex64> = values.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        Self::diag(&values)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether this is a `d × 1` column.
    pub fn is_column(&self) -> bool {
        self.cols == 1
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Element at (row, col), `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) -> Result<(), CircuitError> {
        if row >= self.rows || col >= self.cols {
            return Err(CircuitError::DimensionMismatch {
                op: "set",
                lhs: self.shape(),
                rhs: (row, col),
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Diagonal entries of a square (or the leading square part of a) matrix.
    pub fn diagonal(&self) -> Vec<Complex64> {
        (0..self.rows.min(self.cols))
            .map(|i| self.data[i * self.cols + i])
            .collect()
    }

    /// Sum of every entry.
    pub fn element_sum(&self) -> Complex64 {
        self.data.iter().sum()
    }

    /// Tensor (Kronecker) product `self ⊗ other`.
    pub fn kron(&self, other: &Matrix) -> Matrix {
        let rows = self.rows * other.rows;
        let cols = self.cols * other.cols;
        let mut data = vec![ZERO; rows * cols];

        for i in 0..self.rows {
            for j in 0..self.cols {
                let a_ij = self.data[i * self.cols + j];
                if a_ij == ZERO {
                    continue;
                }
                for k in 0..other.rows {
                    let row = i * other.rows + k;
                    for l in 0..other.cols {
                        let col = j * other.cols + l;
                        data[row * cols + col] = a_ij * other.data[k * other.cols + l];
                    }
                }
            }
        }

        Matrix { rows, cols, data }
    }

    /// Direct sum `self ⊕ other`: block diagonal with `self` in the top left.
    pub fn direct_sum(&self, other: &Matrix) -> Matrix {
        let rows = self.rows + other.rows;
        let cols = self.cols + other.cols;
        let mut data = vec![ZERO; rows * cols];
        for i in 0..self.rows {
            data[i * cols..i * cols + self.cols]
                .copy_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
        }
        for k in 0..other.rows {
            let start = (self.rows + k) * cols + self.cols;
            data[start..start + other.cols]
                .copy_from_slice(&other.data[k * other.cols..(k + 1) * other.cols]);
        }
        Matrix { rows, cols, data }
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, CircuitError> {
        if self.cols != other.rows {
            return Err(CircuitError::DimensionMismatch {
                op: "matmul",
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let mut data = vec![ZERO; self.rows * other.cols];
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.data[i * self.cols + k];
                if a_ik == ZERO {
                    continue;
                }
                let out = &mut data[i * other.cols..(i + 1) * other.cols];
                let row = &other.data[k * other.cols..(k + 1) * other.cols];
                for (o, &b) in out.iter_mut().zip(row) {
                    *o += a_ik * b;
                }
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, CircuitError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Entry-wise difference.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix, CircuitError> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    fn zip_with(
        &self,
        other: &Matrix,
        op: &'static str,
        f: impl Fn(Complex64, Complex64) -> Complex64,
    ) -> Result<Matrix, CircuitError> {
        if self.shape() != other.shape() {
            return Err(CircuitError::DimensionMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Sum of a non-empty list of equally shaped matrices.
    pub fn sum<'a>(terms: impl IntoIterator<Item = &'a Matrix>) -> Result<Matrix, CircuitError> {
        let mut terms = terms.into_iter();
        let first = terms.next().ok_or_else(|| {
            CircuitError::InvalidState("cannot sum an empty list of matrices".to_string())
        })?;
        terms.try_fold(first.clone(), |acc, m| acc.add(m))
    }

    /// Multiply every entry by `factor`.
    pub fn scale(&self, factor: Complex64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&c| c * factor).collect(),
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![ZERO; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Conjugate transpose `A†`.
    pub fn adjoint(&self) -> Matrix {
        let mut t = self.transpose();
        for c in &mut t.data {
            *c = c.conj();
        }
        t
    }

    /// `self^exp` by repeated squaring; `exp = 0` gives the identity.
    pub fn pow(&self, exp: u64) -> Result<Matrix, CircuitError> {
        if !self.is_square() {
            return Err(CircuitError::NotSquare {
                op: "pow",
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut result = Matrix::identity(self.rows);
        let mut base = self.clone();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.matmul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.matmul(&base)?;
            }
        }
        Ok(result)
    }

    /// General inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// Deliberately not a conjugate-transpose shortcut: the inverse is valid
    /// for any non-singular matrix, unitary or not.
    pub fn inverse(&self) -> Result<Matrix, CircuitError> {
        if !self.is_square() {
            return Err(CircuitError::NotSquare {
                op: "inverse",
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = Matrix::identity(n).data;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&x, &y| a[x * n + col].norm().total_cmp(&a[y * n + col].norm()))
                .ok_or(CircuitError::SingularMatrix)?;
            if a[pivot * n + col].norm() < PIVOT_EPSILON {
                return Err(CircuitError::SingularMatrix);
            }
            if pivot != col {
                for j in 0..n {
                    a.swap(pivot * n + j, col * n + j);
                    inv.swap(pivot * n + j, col * n + j);
                }
            }

            let scale = ONE / a[col * n + col];
            for j in 0..n {
                a[col * n + j] *= scale;
                inv[col * n + j] *= scale;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row * n + col];
                if factor == ZERO {
                    continue;
                }
                for j in 0..n {
                    let a_cj = a[col * n + j];
                    let inv_cj = inv[col * n + j];
                    a[row * n + j] -= factor * a_cj;
                    inv[row * n + j] -= factor * inv_cj;
                }
            }
        }

        Ok(Matrix {
            rows: n,
            cols: n,
            data: inv,
        })
    }

    /// Entry-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Check `A · A† ≈ I`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        match self.matmul(&self.adjoint()) {
            Ok(product) => product.approx_eq(&Matrix::identity(self.rows), tolerance),
            Err(_) => false,
        }
    }

    /// Copy with every component rounded to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Matrix {
        let scale = 10f64.powi(decimals as i32);
        let round = |x: f64| {
            let r = (x * scale).round() / scale;
            // Avoid printing -0
            if r == 0.0 {
                0.0
            } else {
                r
            }
        };
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|c| Complex64::new(round(c.re), round(c.im)))
                .collect(),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                let c = self.data[i * self.cols + j];
                if c.im == 0.0 {
                    write!(f, "{}", c.re)?;
                } else {
                    write!(f, "{}", c)?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl Mul<Complex64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: Complex64) -> Matrix {
        self.scale(factor)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Matrix {
        self.scale(Complex64::new(factor, 0.0))
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scale(-ONE)
    }
}
