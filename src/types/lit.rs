use {
    super::{SearchError, VarId},
    std::{fmt, num::NonZeroI32, ops::Not},
};

/// Literal as a non-zero signed integer in DIMACS convention:
///
/// - `n` is the positive occurrence of variable `n`, and
/// - `-n` is the negative one.
///
/// # Examples
///
/// ```
/// use allsat::types::*;
/// let l = Lit::try_from(-3).unwrap();
/// assert_eq!(l.vi(), 3);
/// assert!(!l.is_positive());
/// assert_eq!(i32::from(!l), 3);
/// assert!(Lit::try_from(0).is_err());
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lit {
    ordinal: NonZeroI32,
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", i32::from(self))
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", i32::from(self))
    }
}

/// convert literals to `[i32]` (for debug).
pub fn i32s(v: &[Lit]) -> Vec<i32> {
    v.iter().map(|l| i32::from(*l)).collect::<Vec<_>>()
}

impl TryFrom<i32> for Lit {
    type Error = SearchError;
    #[inline]
    fn try_from(x: i32) -> Result<Self, Self::Error> {
        NonZeroI32::new(x)
            .map(|ordinal| Lit { ordinal })
            .ok_or(SearchError::InvalidLiteral)
    }
}

impl From<Lit> for i32 {
    #[inline]
    fn from(l: Lit) -> i32 {
        l.ordinal.get()
    }
}

impl From<&Lit> for i32 {
    #[inline]
    fn from(l: &Lit) -> i32 {
        l.ordinal.get()
    }
}

impl From<Lit> for bool {
    /// - positive Lit => true
    /// - negative Lit => false
    #[inline]
    fn from(l: Lit) -> bool {
        l.is_positive()
    }
}

impl Not for Lit {
    type Output = Lit;
    #[inline]
    fn not(self) -> Self {
        Lit {
            ordinal: -self.ordinal,
        }
    }
}

impl Lit {
    /// make a Lit from a 1-based var id and its polarity (`true` for positive).
    ///
    /// # Panics
    ///
    /// if `vi` is zero or doesn't fit in `i32`.
    #[inline]
    pub fn from_assign(vi: VarId, positive: bool) -> Lit {
        let x = i32::try_from(vi).unwrap_or(0);
        match NonZeroI32::new(if positive { x } else { -x }) {
            Some(ordinal) => Lit { ordinal },
            None => panic!("{vi} is not a var id"),
        }
    }
    /// return the 1-based var id.
    #[inline]
    pub fn vi(self) -> VarId {
        self.ordinal.get().unsigned_abs() as VarId
    }
    #[inline]
    pub fn is_positive(self) -> bool {
        0 < self.ordinal.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_conversion() {
        let l = Lit::try_from(5).expect("non-zero");
        assert_eq!(l.vi(), 5);
        assert!(l.is_positive());
        assert_eq!(i32::from(!l), -5);
        assert_eq!(!!l, l);
        assert_eq!(Lit::from_assign(5, false), !l);
        assert!(matches!(Lit::try_from(0), Err(SearchError::InvalidLiteral)));
        assert_eq!(i32s(&[l, !l]), vec![5, -5]);
    }
}
