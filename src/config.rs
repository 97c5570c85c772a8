/// Crate `config` provides the enumerator's configuration.
use crate::types::VarId;

/// Configuration of an exhaustive search.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Vars to enumerate over, in blocking clause order.
    /// An empty list means every var the host knows at attach time.
    pub observed: Vec<VarId>,

    /// Block only the vars assigned to true. A blocking clause then
    /// consists of negative literals only.
    pub negative_only: bool,

    /// Emit a record for each solution found.
    pub record_solutions: bool,

    /// Disable the attach/detach summaries
    pub quiet_mode: bool,
}

impl Config {
    pub fn with_observed<V: AsRef<[VarId]>>(mut self, vars: V) -> Self {
        self.observed = vars.as_ref().to_vec();
        self
    }
    pub fn with_negative_only(mut self, b: bool) -> Self {
        self.negative_only = b;
        self
    }
    pub fn with_record_solutions(mut self, b: bool) -> Self {
        self.record_solutions = b;
        self
    }
    pub fn quiet(mut self) -> Self {
        self.quiet_mode = true;
        self
    }
    /// return the observed set, defaulting to `1..=num_vars`.
    pub fn observed_vars(&self, num_vars: usize) -> Vec<VarId> {
        if self.observed.is_empty() {
            (1..=num_vars).collect::<Vec<_>>()
        } else {
            self.observed.clone()
        }
    }
}
