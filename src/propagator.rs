//! Module `propagator` provides the callback contract between a host search
//! process and an external propagator, and `ExhaustiveSearch`, a propagator
//! enumerating every assignment of the observed vars by blocking clauses.
use {
    crate::{
        assign::{AssignIF, AssignStack},
        block::{blocking_clause, Completion},
        queue::ClauseQueue,
        record::SolutionRecorder,
        types::*,
    },
    std::{fmt, io::Write},
    tracing::{debug, error, info},
};

/// API a host exposes to attach a propagator.
pub trait ObserveIF {
    /// return the number of vars.
    fn num_vars(&self) -> usize;
    /// make the host report assignments of var `vi`.
    fn add_observed_var(&mut self, vi: VarId);
    /// stop reporting assignments of var `vi`.
    fn remove_observed_var(&mut self, vi: VarId);
}

/// The callbacks a host search process calls on its external propagator.
///
/// Assignment notifications cover observed vars only. For a given level,
/// `notify_new_decision_level` comes before the assignments made at the level,
/// and those come before the `notify_backtrack` removing it.
pub trait ExternalPropagatorIF {
    /// some observed vars were assigned.
    fn notify_assignment(&mut self, lits: &[Lit]);
    /// the host opened a new decision level.
    fn notify_new_decision_level(&mut self);
    /// the host went back to `new_level`.
    fn notify_backtrack(&mut self, new_level: DecisionLevel);
    /// return `true` to accept a complete model. A propagator rejecting it
    /// must have an external clause ready.
    fn check_found_model(&mut self, model: &[Lit]) -> bool;
    /// return `true` if an external clause is waiting.
    fn has_external_clause(&mut self) -> bool;
    /// return the next literal of the external clause; `None` closes it.
    fn add_external_clause_lit(&mut self) -> Option<Lit>;
    /// return a decision literal, or `None` to let the host choose.
    fn decide(&mut self) -> Option<Lit>;
    /// return a literal to propagate, or `None`.
    fn propagate(&mut self) -> Option<Lit>;
    /// return the next literal of the reason of `propagated`; `None` closes it.
    fn add_reason_clause_lit(&mut self, propagated: Lit) -> Option<Lit>;
}

/// An external propagator which blocks each complete assignment of the
/// observed vars as soon as it appears, so that a host enumerates them all
/// without duplication.
///
/// ```
/// use allsat::{propagator::{ExhaustiveSearch, ExternalPropagatorIF}, solver::Solver, types::*};
///
/// let mut s = Solver::try_from(vec![vec![1, 2]].as_slice()).unwrap();
/// let mut es = ExhaustiveSearch::connect(&mut s, &Config::default().quiet(), None).unwrap();
/// assert!(!es.check_found_model(&[]));
/// assert_eq!(es.decide(), None);
/// assert_eq!(es.disconnect(&mut s).unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct ExhaustiveSearch {
    asg: AssignStack,
    completion: Completion,
    queue: ClauseQueue,
    recorder: SolutionRecorder,
    negative_only: bool,
    quiet_mode: bool,
}

impl fmt::Display for ExhaustiveSearch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ExhaustiveSearch(observed: {}, assigned: {}, level: {}, {}, {}, {})",
            self.asg.num_observed(),
            self.asg.num_assigned(),
            self.asg.decision_level(),
            self.completion,
            self.queue,
            self.recorder,
        )
    }
}

impl ExhaustiveSearch {
    /// attach to `host`, registering every observed var with it.
    /// The observed set defaults to all vars of the host.
    /// Solution records go to `sink` if `config.record_solutions` is set.
    ///
    /// # Errors
    ///
    /// `SearchError::OutOfRange` if an observed var is unknown to the host.
    pub fn connect<H: ObserveIF>(
        host: &mut H,
        config: &Config,
        sink: Option<Box<dyn Write>>,
    ) -> Result<ExhaustiveSearch, SearchError> {
        let nv = host.num_vars();
        let asg = AssignStack::new(nv, &config.observed_vars(nv))?;
        for vi in asg.observed() {
            host.add_observed_var(*vi);
        }
        if !config.quiet_mode {
            info!(
                "Running exhaustive search on {} variables",
                asg.num_observed()
            );
        }
        Ok(ExhaustiveSearch {
            asg,
            completion: Completion::default(),
            queue: ClauseQueue::default(),
            recorder: SolutionRecorder::new(config.record_solutions, sink),
            negative_only: config.negative_only,
            quiet_mode: config.quiet_mode,
        })
    }
    /// detach from `host` and return the number of solutions.
    ///
    /// # Errors
    ///
    /// `SearchError::Io` if a solution record couldn't be written.
    pub fn disconnect<H: ObserveIF>(mut self, host: &mut H) -> Result<usize, SearchError> {
        for vi in self.asg.observed() {
            host.remove_observed_var(*vi);
        }
        let n = self.recorder.num_solutions();
        if !self.quiet_mode {
            info!("Number of solutions: {n}");
        }
        self.recorder.flush()?;
        Ok(n)
    }
    pub fn num_solutions(&self) -> usize {
        self.recorder.num_solutions()
    }
    pub fn observed(&self) -> &[VarId] {
        self.asg.observed()
    }
    /// the assignment trail (for diagnostics).
    pub fn trail(&self) -> &AssignStack {
        &self.asg
    }
    /// the clauses not delivered yet (for diagnostics).
    pub fn pending(&self) -> &ClauseQueue {
        &self.queue
    }
    fn block_current_assignment(&mut self) {
        self.recorder.record(&self.asg);
        let clause = blocking_clause(&self.asg, self.negative_only);
        debug!(
            solution = self.recorder.num_solutions(),
            clause = ?i32s(&clause),
            "block"
        );
        self.queue.push(clause);
    }
}

impl ExternalPropagatorIF for ExhaustiveSearch {
    fn notify_assignment(&mut self, lits: &[Lit]) {
        for lit in lits {
            if let Err(e) = self.asg.assign(*lit) {
                error!(error = %e, "broken assignment notification from host");
                panic!("{e}");
            }
        }
        if self.completion.check_after_assign(&self.asg) {
            self.block_current_assignment();
        }
    }
    fn notify_new_decision_level(&mut self) {
        self.asg.level_up();
    }
    fn notify_backtrack(&mut self, new_level: DecisionLevel) {
        self.asg.cancel_until(new_level);
        self.completion.check_after_backtrack(&self.asg);
    }
    /// Models are never accepted: each one was blocked when it became complete.
    fn check_found_model(&mut self, _model: &[Lit]) -> bool {
        false
    }
    fn has_external_clause(&mut self) -> bool {
        self.queue.has_pending()
    }
    fn add_external_clause_lit(&mut self) -> Option<Lit> {
        let in_progress = self.queue.has_pending();
        let lit = self.queue.next_literal();
        if lit.is_none() && in_progress {
            debug!(delivered = self.queue.num_delivered(), "clause delivered");
        }
        lit
    }
    fn decide(&mut self) -> Option<Lit> {
        None
    }
    fn propagate(&mut self) -> Option<Lit> {
        None
    }
    fn add_reason_clause_lit(&mut self, _propagated: Lit) -> Option<Lit> {
        None
    }
}
