// Module `assign` keeps the level-indexed record of observed assignments.

/// assignment management
mod stack;

pub use self::stack::AssignStack;
use crate::types::*;

/// API for the assignment trail, driven by a host's notifications.
pub trait AssignIF {
    /// record `lit` on the top level if its var is observed and unassigned.
    /// Returns `Ok(true)` if the trail grew.
    ///
    /// # Errors
    ///
    /// `SearchError::OutOfRange` if the var is beyond the host's var count.
    fn assign(&mut self, lit: Lit) -> Result<bool, SearchError>;
    /// open a new empty decision level.
    fn level_up(&mut self);
    /// drop every level above `lv` and unassign the vars recorded in them.
    /// Level 0 is never dropped, and it's a no-op if `lv` isn't below the current level.
    fn cancel_until(&mut self, lv: DecisionLevel);
    /// return the current decision level.
    fn decision_level(&self) -> DecisionLevel;
    /// return the current value of var `vi` as a signed literal.
    fn assigned(&self, vi: VarId) -> Option<Lit>;
    /// return the number of assigned observed vars.
    fn num_assigned(&self) -> usize;
    /// return `true` if every observed var holds a value.
    fn is_complete(&self) -> bool;
}
