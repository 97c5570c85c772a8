//! Solver Builder
use {
    super::Solver,
    crate::types::*,
    std::{convert::TryFrom, path::Path},
    tracing::debug,
};

/// API for SAT solver creation and modification.
pub trait SatSolverIF {
    /// add a clause to Solver.
    /// Tautologies and duplicates are dropped silently.
    ///
    /// # Errors
    ///
    /// * `SearchError::EmptyClause` if the clause is empty; the solver becomes inconsistent.
    /// * `SearchError::OutOfRange` if a literal in it is out of range for var index.
    ///
    /// # Example
    ///```
    /// use allsat::{solver::{SatSolverIF, Solver}, types::*};
    ///
    /// let mut s = Solver::new(3);
    /// assert!(s.add_clause(vec![1, -2]).is_ok());
    /// assert!(s.add_clause(vec![-2, 1]).is_ok());
    /// assert!(s.add_clause(vec![3, -3]).is_ok());
    /// assert_eq!(s.num_clauses(), 1);
    /// assert!(matches!(s.add_clause(vec![4, 1]), Err(SearchError::OutOfRange(4))));
    /// assert!(matches!(s.add_clause(vec![0, 1]), Err(SearchError::InvalidLiteral)));
    ///```
    fn add_clause<V>(&mut self, vec: V) -> Result<&mut Solver, SearchError>
    where
        V: AsRef<[i32]>;
}

impl SatSolverIF for Solver {
    fn add_clause<V>(&mut self, vec: V) -> Result<&mut Solver, SearchError>
    where
        V: AsRef<[i32]>,
    {
        let mut clause: Vec<Lit> = Vec::with_capacity(vec.as_ref().len());
        for i in vec.as_ref() {
            let l = Lit::try_from(*i)?;
            if self.num_vars < l.vi() {
                return Err(SearchError::OutOfRange(*i));
            }
            if clause.contains(&!l) {
                return Ok(self);
            }
            if !clause.contains(&l) {
                clause.push(l);
            }
        }
        if clause.is_empty() {
            self.inconsistent = true;
            return Err(SearchError::EmptyClause);
        }
        let mut key = i32s(&clause);
        key.sort_unstable();
        if self.clause_set.insert(key) {
            self.clauses.push(clause);
        }
        Ok(self)
    }
}

impl<V: AsRef<[i32]>> TryFrom<&[V]> for Solver {
    type Error = SearchError;
    fn try_from(vec: &[V]) -> Result<Self, Self::Error> {
        let cnf = CNFDescription::from(vec);
        let mut s = Solver::new(cnf.num_of_variables);
        for clause in vec {
            s.add_clause(clause)?;
        }
        debug!("built {s} from {cnf}");
        Ok(s)
    }
}

impl TryFrom<&Path> for Solver {
    type Error = SearchError;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let mut reader = CNFReader::try_from(path)?;
        let clauses = reader.read_clauses()?;
        let mut s = Solver::new(reader.cnf.num_of_variables);
        for clause in &clauses {
            s.add_clause(clause)?;
        }
        debug!("built {s} from {}", reader.cnf);
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_vec() {
        let v = vec![vec![1, 2], vec![2, 1], vec![-3]];
        let s = Solver::try_from(v.as_slice()).expect("valid");
        assert_eq!(s.num_vars, 3);
        assert_eq!(s.num_clauses(), 2);
        let e = Solver::try_from(vec![vec![1], vec![]].as_slice());
        assert!(matches!(e, Err(SearchError::EmptyClause)));
    }
}
