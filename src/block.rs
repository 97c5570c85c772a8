//! Completion detection and blocking clause generation.
use {
    crate::{
        assign::{AssignIF, AssignStack},
        types::*,
    },
    std::fmt,
};

/// Completion detector. It fires once per maximal complete assignment and
/// re-arms when a backtrack unassigns an observed var.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Completion {
    /// a blocking clause was already made for the current assignment.
    fired: bool,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Completion({})", if self.fired { "fired" } else { "armed" })
    }
}

impl Completion {
    /// check the trail after assignments.
    /// Returns `true` exactly when a new complete assignment shows up.
    pub fn check_after_assign<A: AssignIF>(&mut self, asg: &A) -> bool {
        if self.fired || !asg.is_complete() {
            return false;
        }
        self.fired = true;
        true
    }
    /// check the trail after a backtrack.
    pub fn check_after_backtrack<A: AssignIF>(&mut self, asg: &A) {
        if !asg.is_complete() {
            self.fired = false;
        }
    }
    pub fn is_fired(&self) -> bool {
        self.fired
    }
}

/// Build the clause forbidding the current assignment of the observed vars,
/// scanning them in their given order.
/// With `negative_only`, vars assigned to false are left out.
/// An unassigned observed var is skipped.
///
/// # Example
///
/// ```
/// use allsat::{assign::{AssignIF, AssignStack}, block::blocking_clause, types::*};
/// let mut asg = AssignStack::new(3, &[1, 2, 3]).unwrap();
/// for l in [1, 2, -3] {
///     asg.assign(Lit::try_from(l).unwrap()).unwrap();
/// }
/// assert_eq!(i32s(&blocking_clause(&asg, false)), vec![-1, -2, 3]);
/// assert_eq!(i32s(&blocking_clause(&asg, true)), vec![-1, -2]);
/// ```
pub fn blocking_clause(asg: &AssignStack, negative_only: bool) -> Vec<Lit> {
    asg.observed()
        .iter()
        .filter_map(|vi| asg.assigned(*vi))
        .filter(|l| l.is_positive() || !negative_only)
        .map(|l| !l)
        .collect::<Vec<_>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Lit {
        Lit::try_from(i).expect("non-zero")
    }

    #[test]
    fn test_single_block_per_completion() {
        let mut asg = AssignStack::new(3, &[1, 2]).expect("in range");
        let mut det = Completion::default();
        asg.assign(lit(1)).expect("ok");
        assert!(!det.check_after_assign(&asg));
        asg.level_up();
        asg.assign(lit(-2)).expect("ok");
        assert!(det.check_after_assign(&asg));
        // redundant notifications
        asg.assign(lit(-2)).expect("ok");
        asg.assign(lit(3)).expect("ok");
        assert!(!det.check_after_assign(&asg));
        assert!(!det.check_after_assign(&asg));
        // a backtrack keeping everything assigned doesn't re-arm
        asg.cancel_until(1);
        det.check_after_backtrack(&asg);
        assert!(det.is_fired());
        // re-arming
        asg.cancel_until(0);
        det.check_after_backtrack(&asg);
        assert!(!det.is_fired());
        asg.level_up();
        asg.assign(lit(2)).expect("ok");
        assert!(det.check_after_assign(&asg));
        assert!(!det.check_after_assign(&asg));
    }

    #[test]
    fn test_clause_content() {
        let mut asg = AssignStack::new(4, &[3, 1, 2]).expect("in range");
        for l in [1, 2, -3, -4] {
            asg.assign(lit(l)).expect("ok");
        }
        // the order follows the observed set
        assert_eq!(i32s(&blocking_clause(&asg, false)), vec![3, -1, -2]);
        assert_eq!(i32s(&blocking_clause(&asg, true)), vec![-1, -2]);
    }

    #[test]
    fn test_filter_drops_everything() {
        let mut asg = AssignStack::new(2, &[1, 2]).expect("in range");
        asg.assign(lit(-1)).expect("ok");
        asg.assign(lit(-2)).expect("ok");
        assert!(blocking_clause(&asg, true).is_empty());
        assert_eq!(blocking_clause(&asg, false).len(), 2);
    }

    #[test]
    fn test_unassigned_vars_are_skipped() {
        let mut asg = AssignStack::new(3, &[1, 2, 3]).expect("in range");
        asg.assign(lit(-2)).expect("ok");
        assert_eq!(i32s(&blocking_clause(&asg, false)), vec![2]);
    }
}
