/// DPLL search engine
use {
    super::{Certificate, SatSolverIF, Solver, SolverResult},
    crate::{propagator::ExternalPropagatorIF, types::*},
    tracing::{debug, trace},
};

/// API for searching a model.
pub trait SolveIF {
    /// search a model accepted by `prop`. The solver restarts from level zero
    /// and keeps the clauses given by `prop` afterwards.
    ///
    /// # Errors
    ///
    /// * `SearchError::RejectedWithoutClause` if `prop` rejects a model without giving a clause.
    /// * `SearchError::OutOfRange` if `prop` gives a literal on an unknown var.
    fn solve_with<P: ExternalPropagatorIF>(&mut self, prop: &mut P) -> SolverResult;
    /// search a model without any external propagator.
    ///
    /// # Errors
    ///
    /// never in practice; see `solve_with`.
    fn solve(&mut self) -> SolverResult;
}

/// The outcome of a literal propagated by an external propagator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Propagated {
    Assigned,
    AlreadySatisfied,
    /// the literal is false under the current assignment.
    Conflicting,
}

/// A propagator accepting any model.
struct AcceptAll;

impl ExternalPropagatorIF for AcceptAll {
    fn notify_assignment(&mut self, _: &[Lit]) {}
    fn notify_new_decision_level(&mut self) {}
    fn notify_backtrack(&mut self, _: DecisionLevel) {}
    fn check_found_model(&mut self, _: &[Lit]) -> bool {
        true
    }
    fn has_external_clause(&mut self) -> bool {
        false
    }
    fn add_external_clause_lit(&mut self) -> Option<Lit> {
        None
    }
    fn decide(&mut self) -> Option<Lit> {
        None
    }
    fn propagate(&mut self) -> Option<Lit> {
        None
    }
    fn add_reason_clause_lit(&mut self, _: Lit) -> Option<Lit> {
        None
    }
}

impl SolveIF for Solver {
    fn solve(&mut self) -> SolverResult {
        self.solve_with(&mut AcceptAll)
    }
    fn solve_with<P: ExternalPropagatorIF>(&mut self, prop: &mut P) -> SolverResult {
        self.cancel_until(prop, 0);
        if self.inconsistent {
            return Ok(Certificate::UNSAT);
        }
        loop {
            if let Some(ci) = self.propagate() {
                self.num_conflict += 1;
                trace!(clause = ?i32s(&self.clauses[ci]), level = self.decision_level(), "conflict");
                if !self.flip_last_decision(prop) {
                    debug!("{self}");
                    return Ok(Certificate::UNSAT);
                }
                continue;
            }
            if self.eager_notification {
                self.notify(prop, false);
            }
            if prop.has_external_clause() {
                if !self.add_external_clause(prop)? {
                    debug!("an empty external clause; {self}");
                    return Ok(Certificate::UNSAT);
                }
                continue;
            }
            if let Some(l) = prop.propagate() {
                match self.external_propagation(prop, l)? {
                    Propagated::Assigned => continue,
                    Propagated::Conflicting => {
                        self.num_conflict += 1;
                        trace!(lit = i32::from(l), "external propagation conflict");
                        if !self.flip_last_decision(prop) {
                            debug!("{self}");
                            return Ok(Certificate::UNSAT);
                        }
                        continue;
                    }
                    Propagated::AlreadySatisfied => (),
                }
            }
            if let Some(l) = self.next_decision(prop) {
                self.num_decision += 1;
                self.level_up();
                self.assign_by_decision(l);
                continue;
            }
            self.notify(prop, true);
            let model = (1..=self.num_vars)
                .filter_map(|vi| self.assign[vi].map(|b| Lit::from_assign(vi, b)))
                .collect::<Vec<_>>();
            if prop.check_found_model(&model) {
                return Ok(Certificate::SAT(i32s(&model)));
            }
            if !prop.has_external_clause() {
                return Err(SearchError::RejectedWithoutClause);
            }
        }
    }
}

impl Solver {
    pub(crate) fn level_up(&mut self) {
        self.trail_lim.push(self.trail.len());
    }
    fn assign_by_decision(&mut self, l: Lit) {
        debug_assert!(self.assign[l.vi()].is_none());
        self.assign[l.vi()] = Some(l.is_positive());
        self.flags[l.vi()].turn_on(FlagVar::DECISION);
        self.trail.push(l);
    }
    fn assign_by_implication(&mut self, l: Lit) {
        debug_assert!(self.assign[l.vi()].is_none());
        self.num_propagation += 1;
        self.assign[l.vi()] = Some(l.is_positive());
        self.trail.push(l);
    }
    /// unassign everything above level `lv`, telling `prop` if it knew those levels.
    pub(crate) fn cancel_until<P: ExternalPropagatorIF>(&mut self, prop: &mut P, lv: DecisionLevel) {
        if self.decision_level() <= lv {
            return;
        }
        let lim = self.trail_lim[lv as usize];
        for l in self.trail.drain(lim..) {
            let vi = l.vi();
            self.assign[vi] = None;
            self.flags[vi].turn_off(FlagVar::DECISION | FlagVar::FLIPPED);
        }
        self.trail_lim.truncate(lv as usize);
        self.q_notified = self.q_notified.min(self.trail.len());
        if lv < self.notified_level {
            prop.notify_backtrack(lv);
            self.notified_level = lv;
        }
    }
    /// unit propagation by a plain scan over all clauses.
    /// Returns the index of a falsified clause if any.
    fn propagate(&mut self) -> Option<usize> {
        loop {
            let mut changed = false;
            for ci in 0..self.clauses.len() {
                let mut satisfied = false;
                let mut num_unassigned = 0;
                let mut unassigned: Option<Lit> = None;
                for l in self.clauses[ci].iter() {
                    match self.assigned(*l) {
                        Some(true) => {
                            satisfied = true;
                            break;
                        }
                        Some(false) => (),
                        None => {
                            num_unassigned += 1;
                            unassigned = Some(*l);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                match (num_unassigned, unassigned) {
                    (0, _) => return Some(ci),
                    (1, Some(l)) => {
                        self.assign_by_implication(l);
                        changed = true;
                    }
                    _ => (),
                }
            }
            if !changed {
                return None;
            }
        }
    }
    /// go back to the latest decision not flipped yet and flip it.
    /// Returns `false` if no such decision remains.
    fn flip_last_decision<P: ExternalPropagatorIF>(&mut self, prop: &mut P) -> bool {
        while 0 < self.decision_level() {
            let lv = self.decision_level();
            let decision = self.trail[self.trail_lim[lv as usize - 1]];
            let flipped = self.flags[decision.vi()].is(FlagVar::FLIPPED);
            self.cancel_until(prop, lv - 1);
            if !flipped {
                self.level_up();
                self.assign_by_decision(!decision);
                self.flags[decision.vi()].turn_on(FlagVar::FLIPPED);
                return true;
            }
        }
        false
    }
    /// take the propagator's suggestion if it is usable; otherwise the first
    /// unassigned var, negative phase first.
    fn next_decision<P: ExternalPropagatorIF>(&mut self, prop: &mut P) -> Option<Lit> {
        if let Some(l) = prop.decide() {
            if l.vi() <= self.num_vars && self.assign[l.vi()].is_none() {
                return Some(l);
            }
        }
        (1..=self.num_vars)
            .find(|vi| self.assign[*vi].is_none())
            .map(|vi| Lit::from_assign(vi, false))
    }
    /// report the unreported part of the trail level by level.
    /// With `at_model`, the top level is reported even if it has no observed literal.
    fn notify<P: ExternalPropagatorIF>(&mut self, prop: &mut P, at_model: bool) {
        let mut batch: Vec<Lit> = Vec::new();
        for i in self.q_notified..self.trail.len() {
            while (self.notified_level as usize) < self.trail_lim.len()
                && self.trail_lim[self.notified_level as usize] <= i
            {
                if !batch.is_empty() {
                    prop.notify_assignment(&batch);
                    batch.clear();
                }
                prop.notify_new_decision_level();
                self.notified_level += 1;
            }
            let l = self.trail[i];
            if self.flags[l.vi()].is(FlagVar::OBSERVED) {
                batch.push(l);
            }
        }
        while self.notified_level < self.decision_level() {
            if !batch.is_empty() {
                prop.notify_assignment(&batch);
                batch.clear();
            }
            prop.notify_new_decision_level();
            self.notified_level += 1;
        }
        if !batch.is_empty() || at_model {
            prop.notify_assignment(&batch);
        }
        self.q_notified = self.trail.len();
    }
    /// read an external clause. Returns `false` if it is empty.
    fn add_external_clause<P: ExternalPropagatorIF>(
        &mut self,
        prop: &mut P,
    ) -> Result<bool, SearchError> {
        let mut lits: Vec<i32> = Vec::new();
        while let Some(l) = prop.add_external_clause_lit() {
            lits.push(i32::from(l));
        }
        trace!(clause = ?lits, "external clause");
        match self.add_clause(lits) {
            Ok(_) => Ok(true),
            Err(SearchError::EmptyClause) => Ok(false),
            Err(e) => Err(e),
        }
    }
    /// read the reason of an external propagation, keep it as a clause and
    /// assign the literal at the current level.
    fn external_propagation<P: ExternalPropagatorIF>(
        &mut self,
        prop: &mut P,
        propagated: Lit,
    ) -> Result<Propagated, SearchError> {
        if self.num_vars < propagated.vi() {
            return Err(SearchError::OutOfRange(i32::from(propagated)));
        }
        let value = self.assigned(propagated);
        if value == Some(true) {
            return Ok(Propagated::AlreadySatisfied);
        }
        let mut lits: Vec<i32> = Vec::new();
        while let Some(l) = prop.add_reason_clause_lit(propagated) {
            lits.push(i32::from(l));
        }
        if !lits.contains(&i32::from(propagated)) {
            lits.push(i32::from(propagated));
        }
        trace!(lit = i32::from(propagated), reason = ?lits, "external propagation");
        self.add_clause(lits)?;
        if value == Some(false) {
            return Ok(Propagated::Conflicting);
        }
        self.assign_by_implication(propagated);
        Ok(Propagated::Assigned)
    }
}
