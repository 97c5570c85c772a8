//! Exhaustive enumeration of the assignments of a set of observed vars.
//!
//! [`ExhaustiveSearch`](`crate::propagator::ExhaustiveSearch`) watches the
//! assignment trail of a host search process through the external propagator
//! callbacks, and blocks every complete assignment of the observed vars as soon
//! as it shows up. The host then runs until its search space is exhausted.
//!
//! ```
//! use allsat::*;
//!
//! let cnf = vec![vec![1, 2], vec![-1, 3]];
//! assert_eq!(enumerate(&cnf, &Config::default().quiet()).unwrap(), 4);
//! assert_eq!(enumerate(&cnf, &Config::default().with_observed([1, 2]).quiet()).unwrap(), 3);
//! ```
#[macro_use]
extern crate bitflags;

/// Assignment trail
pub mod assign;
/// Completion detection and blocking clauses
pub mod block;
/// Config
pub mod config;
/// The external propagator contract and `ExhaustiveSearch`
pub mod propagator;
/// Clause delivery
pub mod queue;
/// Solution counting and records
pub mod record;
/// A reference host search process
pub mod solver;
/// Plumbing layer.
pub mod types;

pub use {
    config::Config,
    propagator::{ExhaustiveSearch, ExternalPropagatorIF, ObserveIF},
    solver::{Certificate, SatSolverIF, SolveIF, Solver},
    types::{Lit, SearchError},
};

use {
    std::{io::Write, path::Path},
    tracing::warn,
};

/// count the assignments of the observed vars which extend to a model of `clauses`.
/// With `config.negative_only`, an assignment is skipped if its true vars
/// include those of an assignment found before.
///
/// # Errors
///
/// * `SearchError::OutOfRange` if an observed var or a literal is out of range.
/// * `SearchError::InvalidLiteral` if a clause contains `0`.
pub fn enumerate<V: AsRef<[i32]>>(clauses: &[V], config: &Config) -> Result<usize, SearchError> {
    run_to_exhaustion(Solver::try_from(clauses), config, None)
}

/// `enumerate` on a DIMACS file. Solution records go to `sink` if
/// `config.record_solutions` is set.
///
/// # Errors
///
/// As `enumerate`, plus `SearchError::Io` and `SearchError::InvalidHeader`
/// on a bad file or a failing sink.
pub fn enumerate_file(
    path: &Path,
    config: &Config,
    sink: Option<Box<dyn Write>>,
) -> Result<usize, SearchError> {
    run_to_exhaustion(Solver::try_from(path), config, sink)
}

/// A CNF holding an empty clause has no solution.
fn run_to_exhaustion(
    built: Result<Solver, SearchError>,
    config: &Config,
    sink: Option<Box<dyn Write>>,
) -> Result<usize, SearchError> {
    let mut solver = match built {
        Ok(s) => s,
        Err(SearchError::EmptyClause) => return Ok(0),
        Err(e) => return Err(e),
    };
    let mut es = ExhaustiveSearch::connect(&mut solver, config, sink)?;
    if let Certificate::SAT(model) = solver.solve_with(&mut es)? {
        warn!("a model {model:?} was accepted");
    }
    es.disconnect(&mut solver)
}
