/// Errors raised while building or combining circuit matrices.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CircuitError {
    #[error("unsupported basis symbol '{0}' (expected one of 0, 1, +, -)")]
    UnsupportedSymbol(char),

    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("{op} needs a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    #[error("{requested} qubits requested, dense simulation is capped at {max}")]
    QubitLimit { requested: usize, max: usize },

    #[error("qubit {qubit} is out of range for a {num_qubits}-qubit register")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    #[error("invalid qubit state: {0}")]
    InvalidState(String),
}
