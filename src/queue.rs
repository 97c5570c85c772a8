//! Clause delivery queue, drained one literal per call.
use {crate::types::*, std::fmt};

/// Pending blocking clauses. The most recent clause is delivered first and
/// its literals come out back to front, followed by a terminator (`None`,
/// the `0` of DIMACS-style protocols).
#[derive(Clone, Debug, Default)]
pub struct ClauseQueue {
    clauses: Vec<Vec<Lit>>,
    /// the number of clauses delivered completely
    num_delivered: usize,
}

impl fmt::Display for ClauseQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ClauseQueue(pending: {}, delivered: {})",
            self.clauses.len(),
            self.num_delivered
        )
    }
}

impl ClauseQueue {
    /// add a clause. An empty clause is kept and will be delivered as a bare terminator.
    pub fn push(&mut self, clause: Vec<Lit>) {
        self.clauses.push(clause);
    }
    pub fn has_pending(&self) -> bool {
        !self.clauses.is_empty()
    }
    /// the number of clauses not delivered completely.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
    pub fn num_delivered(&self) -> usize {
        self.num_delivered
    }
    /// pop the next literal of the current clause.
    /// Returns `None` when the clause is exhausted, which also removes it,
    /// or when nothing is pending.
    pub fn next_literal(&mut self) -> Option<Lit> {
        let clause = self.clauses.last_mut()?;
        let lit = clause.pop();
        if lit.is_none() {
            self.clauses.pop();
            self.num_delivered += 1;
        }
        lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(v: &[i32]) -> Vec<Lit> {
        v.iter()
            .map(|i| Lit::try_from(*i).expect("non-zero"))
            .collect::<Vec<_>>()
    }

    fn drain(q: &mut ClauseQueue) -> Vec<i32> {
        let mut v = Vec::new();
        loop {
            match q.next_literal() {
                Some(l) => v.push(i32::from(l)),
                None => {
                    v.push(0);
                    return v;
                }
            }
        }
    }

    #[test]
    fn test_delivery_order() {
        let mut q = ClauseQueue::default();
        assert!(!q.has_pending());
        assert_eq!(q.next_literal(), None);
        q.push(clause(&[4, 5]));
        q.push(clause(&[1, -2, 3]));
        assert!(q.has_pending());
        assert_eq!(drain(&mut q), vec![3, -2, 1, 0]);
        assert_eq!(q.len(), 1);
        assert_eq!(drain(&mut q), vec![5, 4, 0]);
        assert!(!q.has_pending());
        assert_eq!(q.next_literal(), None);
        assert_eq!(q.num_delivered(), 2);
    }

    #[test]
    fn test_empty_clause_delivery() {
        let mut q = ClauseQueue::default();
        q.push(Vec::new());
        assert!(q.has_pending());
        assert_eq!(q.next_literal(), None);
        assert!(q.is_empty());
        assert_eq!(q.num_delivered(), 1);
    }
}
