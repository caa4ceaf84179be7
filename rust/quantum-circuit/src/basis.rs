//! Bra and ket construction.
//!
//! A composite bra or ket is the Kronecker product of 2-dimensional
//! primitives. Positional arguments are folded in reverse, each new argument
//! becoming the left factor, so `ket(&[a, b, c], "")` is `a ⊗ b ⊗ c`. A symbol
//! string is folded the other way: each symbol is tensored on the left of the
//! ones before it, so its first symbol is qubit 0 (least significant). When
//! both are given the symbol block is the left factor of the result. An empty
//! positional string contributes `|0⟩`, the same as an empty call.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::CircuitError;
use crate::matrix::{Complex64, Matrix};

/// One positional argument to [`ket`]/[`bra`].
#[derive(Debug, Clone, PartialEq)]
pub enum QubitArg {
    /// `0` or `1` select a single-qubit basis state. Larger values are a
    /// basis index into the smallest `2^k`-dimensional space that holds them.
    Index(u64),
    /// An already-built vector, used as-is.
    Vector(Matrix),
    /// A string over `{0, 1, +, -}`, built as one block.
    Symbols(String),
}

impl From<u64> for QubitArg {
    fn from(value: u64) -> Self {
        QubitArg::Index(value)
    }
}

impl From<&str> for QubitArg {
    fn from(symbols: &str) -> Self {
        QubitArg::Symbols(symbols.to_string())
    }
}

impl From<String> for QubitArg {
    fn from(symbols: String) -> Self {
        QubitArg::Symbols(symbols)
    }
}

impl From<Matrix> for QubitArg {
    fn from(vector: Matrix) -> Self {
        QubitArg::Vector(vector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Bra,
    Ket,
}

impl Orientation {
    fn vector(self, values: &[Complex64]) -> Matrix {
        match self {
            Orientation::Bra => Matrix::row(values),
            Orientation::Ket => Matrix::column(values),
        }
    }
}

fn primitive(symbol: char, orientation: Orientation) -> Result<Matrix, CircuitError> {
    let h = FRAC_1_SQRT_2;
    let values = match symbol {
        '0' => [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        '1' => [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        '+' => [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
        '-' => [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
        other => return Err(CircuitError::UnsupportedSymbol(other)),
    };
    Ok(orientation.vector(&values))
}

/// Basis vector `e_index` in the smallest `2^k` space with `2^k > index`.
fn indexed(index: u64, orientation: Orientation) -> Result<Matrix, CircuitError> {
    let num_qubits = (u64::BITS - index.leading_zeros()).max(1) as usize;
    crate::check_qubits(num_qubits)?;
    let mut values = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
    values[index as usize] = Complex64::new(1.0, 0.0);
    Ok(orientation.vector(&values))
}

fn symbol_block(symbols: &str, orientation: Orientation) -> Result<Option<Matrix>, CircuitError> {
    let mut block: Option<Matrix> = None;
    for symbol in symbols.chars() {
        let q = primitive(symbol, orientation)?;
        block = Some(match block {
            Some(acc) => q.kron(&acc),
            None => q,
        });
    }
    Ok(block)
}

fn build(
    args: &[QubitArg],
    qubit_string: &str,
    orientation: Orientation,
) -> Result<Matrix, CircuitError> {
    let mut positional: Option<Matrix> = None;
    for arg in args.iter().rev() {
        let part = match arg {
            QubitArg::Index(0) => primitive('0', orientation)?,
            QubitArg::Index(1) => primitive('1', orientation)?,
            QubitArg::Index(i) => indexed(*i, orientation)?,
            QubitArg::Vector(v) => v.clone(),
            // An empty positional string is a ket of its own: |0⟩
            QubitArg::Symbols(s) => match symbol_block(s, orientation)? {
                Some(block) => block,
                None => primitive('0', orientation)?,
            },
        };
        positional = Some(match positional {
            Some(acc) => part.kron(&acc),
            None => part,
        });
    }

    let combined = match (symbol_block(qubit_string, orientation)?, positional) {
        (Some(block), Some(acc)) => Some(block.kron(&acc)),
        (block, acc) => block.or(acc),
    };

    match combined {
        Some(v) => Ok(v),
        None => primitive('0', orientation),
    }
}

/// Build a composite ket (column vector). No arguments gives `|0⟩`.
pub fn ket(args: &[QubitArg], qubit_string: &str) -> Result<Matrix, CircuitError> {
    build(args, qubit_string, Orientation::Ket)
}

/// Build a composite bra (row vector). No arguments gives `⟨0|`.
pub fn bra(args: &[QubitArg], qubit_string: &str) -> Result<Matrix, CircuitError> {
    build(args, qubit_string, Orientation::Bra)
}

/// Ket for a symbol string, e.g. `ket_of("0+")`.
pub fn ket_of(symbols: &str) -> Result<Matrix, CircuitError> {
    ket(&[], symbols)
}

/// Bra for a symbol string.
pub fn bra_of(symbols: &str) -> Result<Matrix, CircuitError> {
    bra(&[], symbols)
}

/// Outer product `|k⟩⟨b|`.
pub fn outer(ket: &Matrix, bra: &Matrix) -> Result<Matrix, CircuitError> {
    if !ket.is_column() || bra.rows() != 1 {
        return Err(CircuitError::DimensionMismatch {
            op: "outer",
            lhs: ket.shape(),
            rhs: bra.shape(),
        });
    }
    ket.matmul(bra)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of_one(v: &Matrix) -> Option<usize> {
        v.as_slice()
            .iter()
            .position(|c| (c - Complex64::new(1.0, 0.0)).norm() < 1e-12)
    }

    #[test]
    fn test_default_is_zero_state() {
        let k = ket(&[], "").unwrap();
        assert_eq!(k, Matrix::column(&[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]));
        let b = bra(&[], "").unwrap();
        assert_eq!(b.shape(), (1, 2));
        assert_eq!(b, k.transpose());
    }

    #[test]
    fn test_empty_positional_string_is_zero_qubit() {
        let k = ket(&["".into(), 1.into()], "").unwrap();
        assert_eq!(k, ket_of("0").unwrap().kron(&ket_of("1").unwrap()));
        assert_eq!(index_of_one(&k), Some(1));
        let b = bra(&["".into()], "+").unwrap();
        assert_eq!(b.shape(), (1, 4));
        assert_eq!(b, bra_of("+").unwrap().kron(&bra_of("0").unwrap()));
    }

    #[test]
    fn test_symbol_and_index_encodings_agree() {
        assert_eq!(ket_of("0").unwrap(), ket(&[0.into()], "").unwrap());
        assert_eq!(ket_of("1").unwrap(), ket(&[1.into()], "").unwrap());
        assert_eq!(bra_of("1").unwrap(), bra(&[1.into()], "").unwrap());
        assert_eq!(bra_of("0").unwrap(), bra(&["0".into()], "").unwrap());
    }

    #[test]
    fn test_symbol_string_is_qubit_ordered() {
        // First symbol is qubit 0, the least significant bit
        assert_eq!(index_of_one(&ket_of("01").unwrap()), Some(2));
        assert_eq!(index_of_one(&ket_of("10").unwrap()), Some(1));
        assert_eq!(index_of_one(&ket_of("110").unwrap()), Some(3));
        assert_eq!(ket_of("0011").unwrap().shape(), (16, 1));
    }

    #[test]
    fn test_positional_order() {
        // ket(a, b) = a ⊗ b
        let k = ket(&[1.into(), 0.into()], "").unwrap();
        assert_eq!(index_of_one(&k), Some(2));
        let k = ket(&[0.into(), 1.into()], "").unwrap();
        assert_eq!(index_of_one(&k), Some(1));
    }

    #[test]
    fn test_symbols_combined_with_positional() {
        // Symbol block is the left factor: "1" ⊗ |0⟩ = |10⟩ in Kronecker order
        let k = ket(&[0.into()], "1").unwrap();
        assert_eq!(k.shape(), (4, 1));
        assert_eq!(index_of_one(&k), Some(2));
    }

    #[test]
    fn test_vector_argument_passthrough() {
        let plus = ket_of("+").unwrap();
        let k = ket(&[plus.clone().into(), 1.into()], "").unwrap();
        assert!(k.approx_eq(&plus.kron(&ket_of("1").unwrap()), 1e-12));
    }

    #[test]
    fn test_large_index_sizing() {
        // 2 needs 2 qubits (2^2 > 2), 4 needs 3 (2^3 > 4), 5 needs 3
        let k = ket(&[2.into()], "").unwrap();
        assert_eq!(k.shape(), (4, 1));
        assert_eq!(index_of_one(&k), Some(2));
        let k = ket(&[4.into()], "").unwrap();
        assert_eq!(k.shape(), (8, 1));
        assert_eq!(index_of_one(&k), Some(4));
        let b = bra(&[5.into()], "").unwrap();
        assert_eq!(b.shape(), (1, 8));
    }

    #[test]
    fn test_index_beyond_qubit_cap() {
        assert!(matches!(
            ket(&[(1u64 << 20).into()], ""),
            Err(CircuitError::QubitLimit { .. })
        ));
    }

    #[test]
    fn test_unsupported_symbol() {
        assert_eq!(ket_of("01x"), Err(CircuitError::UnsupportedSymbol('x')));
        assert_eq!(bra(&["2".into()], ""), Err(CircuitError::UnsupportedSymbol('2')));
    }

    #[test]
    fn test_hadamard_basis_normalized() {
        for s in ["+", "-", "+-", "0+1-"] {
            let k = ket_of(s).unwrap();
            let norm: f64 = k.as_slice().iter().map(|c| c.norm_sqr()).sum();
            assert!((norm - 1.0).abs() < 1e-12, "|{s}⟩ should be normalized");
        }
    }

    #[test]
    fn test_tensor_associativity() {
        let a = ket_of("+").unwrap();
        let b = ket_of("1").unwrap();
        let c = ket_of("-0").unwrap();
        let left = a.kron(&b).kron(&c);
        let right = a.kron(&b.kron(&c));
        assert!(left.approx_eq(&right, 1e-12));

        let a = bra_of("0").unwrap();
        let b = bra_of("-").unwrap();
        let c = bra_of("1").unwrap();
        assert!(a.kron(&b).kron(&c).approx_eq(&a.kron(&b.kron(&c)), 1e-12));
    }

    #[test]
    fn test_outer_product() {
        let p = outer(&ket_of("1").unwrap(), &bra_of("0").unwrap()).unwrap();
        assert_eq!(p, Matrix::from_real(2, 2, &[0.0, 0.0, 1.0, 0.0]).unwrap());
        assert!(outer(&bra_of("1").unwrap(), &bra_of("0").unwrap()).is_err());
    }
}
