//! Module `types' provides various building blocks, including
//! some common traits.

/// methods on CNF file
pub mod cnf;
/// methods on flags used in Var
pub mod flags;
/// methods on literals
pub mod lit;

pub use self::{cnf::*, flags::*, lit::*};

pub use crate::config::Config;

use thiserror::Error;

/// Var index, 1-based as in DIMACS.
pub type VarId = usize;

/// Decision Level Representation.
pub type DecisionLevel = u32;

/// Errors raised by the enumerator and the reference host.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A given CNF contains an empty clause.
    #[error("empty clause")]
    EmptyClause,
    /// `0` or a non-integer token where a literal was expected.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A literal or var id out of the range defined by the host.
    #[error("literal {0} is out of range")]
    OutOfRange(i32),
    /// A CNF file without a valid `p cnf` line.
    #[error("no valid DIMACS header")]
    InvalidHeader,
    /// Exceptions caused by file operations and solution sinks.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A host found a model which the propagator rejected without giving a clause.
    #[error("model rejected without an external clause")]
    RejectedWithoutClause,
}

/// A Return type used by solver functions.
pub type MaybeInconsistent = Result<(), SearchError>;
