/// main struct AssignStack
use {
    super::AssignIF,
    crate::types::*,
    std::{fmt, slice::Iter},
};

/// A record of assignment, one literal list per decision level.
#[derive(Clone, Debug)]
pub struct AssignStack {
    /// current value of each var; index 0 is a dummy.
    pub(crate) assign: Vec<Option<Lit>>,
    /// OBSERVED marks
    pub(crate) flags: Vec<FlagVar>,
    /// literals recorded at each level; level 0 always exists.
    pub(crate) trail: Vec<Vec<Lit>>,
    /// the observed vars in the given order, without duplicates.
    pub(crate) observed: Vec<VarId>,
    /// the number of assigned observed vars
    pub(crate) num_assigned: usize,
    /// the number of vars of the host.
    pub num_vars: usize,
}

impl Default for AssignStack {
    fn default() -> AssignStack {
        AssignStack {
            assign: vec![None],
            flags: vec![FlagVar::empty()],
            trail: vec![Vec::new()],
            observed: Vec::new(),
            num_assigned: 0,
            num_vars: 0,
        }
    }
}

impl<'a> IntoIterator for &'a AssignStack {
    type Item = &'a Vec<Lit>;
    type IntoIter = Iter<'a, Vec<Lit>>;
    fn into_iter(self) -> Self::IntoIter {
        self.trail.iter()
    }
}

impl From<&AssignStack> for Vec<i32> {
    fn from(asg: &AssignStack) -> Vec<i32> {
        asg.trail
            .iter()
            .flat_map(|level| level.iter().map(|l| i32::from(*l)))
            .collect::<Vec<_>>()
    }
}

impl AssignStack {
    /// build a trail for a host with `num_vars` vars observing `observed`.
    /// Duplicated vars are kept only at their first position.
    ///
    /// # Errors
    ///
    /// `SearchError::OutOfRange` if an observed var isn't in `1..=num_vars`.
    pub fn new(num_vars: usize, observed: &[VarId]) -> Result<AssignStack, SearchError> {
        let mut flags = vec![FlagVar::empty(); num_vars + 1];
        let mut vars: Vec<VarId> = Vec::with_capacity(observed.len());
        for &vi in observed {
            if vi == 0 || num_vars < vi {
                return Err(SearchError::OutOfRange(
                    i32::try_from(vi).unwrap_or(i32::MAX),
                ));
            }
            if !flags[vi].is(FlagVar::OBSERVED) {
                flags[vi].turn_on(FlagVar::OBSERVED);
                vars.push(vi);
            }
        }
        Ok(AssignStack {
            assign: vec![None; num_vars + 1],
            flags,
            observed: vars,
            num_vars,
            ..AssignStack::default()
        })
    }
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
    /// return the observed vars in blocking order.
    pub fn observed(&self) -> &[VarId] {
        &self.observed
    }
    pub fn num_observed(&self) -> usize {
        self.observed.len()
    }
    pub fn is_observed(&self, vi: VarId) -> bool {
        self.flags.get(vi).map_or(false, |f| f.is(FlagVar::OBSERVED))
    }
    /// return the literals recorded at level `lv`.
    pub fn level(&self, lv: DecisionLevel) -> &[Lit] {
        self.trail.get(lv as usize).map_or(&[][..], |v| v.as_slice())
    }
    /// return the total number of literals on the trail.
    pub fn stack_len(&self) -> usize {
        self.trail.iter().map(|v| v.len()).sum()
    }
    #[cfg(feature = "boundary_check")]
    fn check_consistency(&self) {
        assert!(!self.trail.is_empty());
        assert_eq!(self.stack_len(), self.num_assigned);
        assert!(self.num_assigned <= self.observed.len());
    }
}

impl AssignIF for AssignStack {
    fn assign(&mut self, lit: Lit) -> Result<bool, SearchError> {
        let vi = lit.vi();
        if self.num_vars < vi {
            return Err(SearchError::OutOfRange(i32::from(lit)));
        }
        if !self.flags[vi].is(FlagVar::OBSERVED) || self.assign[vi].is_some() {
            return Ok(false);
        }
        self.assign[vi] = Some(lit);
        self.num_assigned += 1;
        if let Some(top) = self.trail.last_mut() {
            top.push(lit);
        }
        #[cfg(feature = "boundary_check")]
        self.check_consistency();
        Ok(true)
    }
    fn level_up(&mut self) {
        self.trail.push(Vec::new());
    }
    fn cancel_until(&mut self, lv: DecisionLevel) {
        while lv as usize + 1 < self.trail.len() {
            let Some(lits) = self.trail.pop() else {
                break;
            };
            for l in lits {
                self.assign[l.vi()] = None;
                self.num_assigned -= 1;
            }
        }
        #[cfg(feature = "boundary_check")]
        self.check_consistency();
    }
    fn decision_level(&self) -> DecisionLevel {
        (self.trail.len() - 1) as DecisionLevel
    }
    fn assigned(&self, vi: VarId) -> Option<Lit> {
        self.assign.get(vi).copied().flatten()
    }
    fn num_assigned(&self) -> usize {
        self.num_assigned
    }
    fn is_complete(&self) -> bool {
        self.num_assigned == self.observed.len()
    }
}

impl fmt::Display for AssignStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let levels = self
            .trail
            .iter()
            .enumerate()
            .map(|(i, v)| (i, i32s(v)))
            .collect::<Vec<_>>();
        write!(
            f,
            "ASG:: trail({}):{:?}\n      stats: level: {}, assigned: {}/{}",
            self.stack_len(),
            levels,
            self.decision_level(),
            self.num_assigned,
            self.observed.len(),
        )
    }
}
