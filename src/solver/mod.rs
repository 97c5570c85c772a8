/// Module `solver` provides a small host search process driving an external propagator.
/// API to instantiate
mod build;
/// DPLL search engine
mod search;

pub use self::{build::SatSolverIF, search::SolveIF};

use {
    crate::{propagator::ObserveIF, types::*},
    ahash::AHashSet,
    std::fmt,
};

/// Normal results returned by Solver.
#[derive(Debug, Eq, PartialEq)]
pub enum Certificate {
    /// It is satisfiable; `vec` is such an assignment sorted by var order.
    SAT(Vec<i32>),
    /// It is unsatisfiable.
    UNSAT,
}

/// The return type of `Solver::solve_with`.
/// This captures the following three cases:
/// * `Certificate::SAT` -- an external propagator accepted a model,
/// * `Certificate::UNSAT` -- the search space was exhausted, and
/// * `SearchError::*` -- the propagator broke the callback contract.
pub type SolverResult = Result<Certificate, SearchError>;

/// A DPLL solver with unit propagation and chronological backtracking.
/// It calls an [`ExternalPropagatorIF`](`crate::propagator::ExternalPropagatorIF`)
/// in the same order as incremental CDCL solvers do.
///
/// Notifications are lazy by default: observed assignments are reported only
/// when a full model is found, so a propagator sees a complete assignment of
/// the observed vars only if it extends to a model.
/// ```
/// use allsat::{solver::{Certificate, SolveIF, Solver}, types::*};
///
/// let mut s = Solver::try_from(vec![vec![1, 2], vec![-1]].as_slice()).unwrap();
/// assert_eq!(s.solve().ok(), Some(Certificate::SAT(vec![-1, 2])));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Solver {
    pub(crate) num_vars: usize,
    pub(crate) clauses: Vec<Vec<Lit>>,
    /// sorted copies of the clauses for duplicate detection
    pub(crate) clause_set: AHashSet<Vec<i32>>,
    /// current value of each var; index 0 is a dummy.
    pub(crate) assign: Vec<Option<bool>>,
    pub(crate) flags: Vec<FlagVar>,
    pub(crate) trail: Vec<Lit>,
    pub(crate) trail_lim: Vec<usize>,
    /// the trail prefix already reported to the propagator
    pub(crate) q_notified: usize,
    /// the number of levels the propagator knows about
    pub(crate) notified_level: DecisionLevel,
    /// report observed assignments after each propagation instead of at models.
    pub eager_notification: bool,
    /// an empty clause was given.
    pub(crate) inconsistent: bool,
    pub num_decision: usize,
    pub num_conflict: usize,
    pub num_propagation: usize,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Solver(vars: {}, clauses: {}, level: {}, decisions: {}, conflicts: {}, propagations: {})",
            self.num_vars,
            self.clauses.len(),
            self.decision_level(),
            self.num_decision,
            self.num_conflict,
            self.num_propagation,
        )
    }
}

impl Solver {
    /// make an empty solver on `num_vars` vars.
    pub fn new(num_vars: usize) -> Solver {
        Solver {
            num_vars,
            assign: vec![None; num_vars + 1],
            flags: vec![FlagVar::empty(); num_vars + 1],
            ..Solver::default()
        }
    }
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len() as DecisionLevel
    }
    /// return the value of a literal.
    pub fn assigned(&self, l: Lit) -> Option<bool> {
        self.assign[l.vi()].map(|b| b == l.is_positive())
    }
    pub fn is_observed(&self, vi: VarId) -> bool {
        self.flags.get(vi).map_or(false, |f| f.is(FlagVar::OBSERVED))
    }
}

impl ObserveIF for Solver {
    fn num_vars(&self) -> usize {
        self.num_vars
    }
    fn add_observed_var(&mut self, vi: VarId) {
        if let Some(f) = self.flags.get_mut(vi) {
            f.turn_on(FlagVar::OBSERVED);
        }
    }
    fn remove_observed_var(&mut self, vi: VarId) {
        if let Some(f) = self.flags.get_mut(vi) {
            f.turn_off(FlagVar::OBSERVED);
        }
    }
}
