/// API for object properties.
pub trait FlagIF {
    type FlagType;
    /// return true if the flag in on.
    fn is(&self, flag: Self::FlagType) -> bool;
    /// set the flag.
    fn set(&mut self, f: Self::FlagType, b: bool);
    /// toggle the flag off.
    fn turn_off(&mut self, flag: Self::FlagType);
    /// toggle the flag on.
    fn turn_on(&mut self, flag: Self::FlagType);
}

bitflags! {
    /// Misc flags attached to each var by the trail and the reference host.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagVar: u8 {
        /// a var is in the observed set and its assignments are reported.
        const OBSERVED     = 0b0000_0001;
        /// the var was assigned by a decision (reference host only).
        const DECISION     = 0b0000_0010;
        /// the decision on this var was already flipped (reference host only).
        const FLIPPED      = 0b0000_0100;
    }
}

impl FlagIF for FlagVar {
    type FlagType = FlagVar;
    #[inline]
    fn is(&self, flag: FlagVar) -> bool {
        self.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: FlagVar, b: bool) {
        if b {
            self.insert(f);
        } else {
            self.remove(f);
        }
    }
    #[inline]
    fn turn_off(&mut self, flag: FlagVar) {
        self.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: FlagVar) {
        self.insert(flag);
    }
}
