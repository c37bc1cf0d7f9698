use bitflags::bitflags;

bitflags! {
    /// Caller-supplied hints for a single arena operation.
    ///
    /// At most one of [`Flags::BESTFIT`] / [`Flags::INSTANTFIT`] / [`Flags::NEXTFIT`] should be
    /// set; [`Arena`](crate::arena::Arena) treats an absence of all three as `INSTANTFIT`.
    pub struct Flags: u32 {
        const BESTFIT       = 1 << 0;
        const INSTANTFIT    = 1 << 1;
        const NEXTFIT       = 1 << 2;
        const MAY_WAIT      = 1 << 3;
        const MUST_NOT_WAIT = 1 << 4;
        const BOOTSTRAP     = 1 << 5;
    }
}

impl Flags {
    pub(crate) fn is_bootstrap(self) -> bool {
        self.contains(Flags::BOOTSTRAP)
    }

    /// Whether the segment pool is permitted to refill (the one suspension point a caller's
    /// flags gate, per §5). Permissive by default — callers that say nothing are assumed not
    /// to care; `MUST_NOT_WAIT` is the only bit that withholds permission, overriding `MAY_WAIT`
    /// if both are set.
    pub(crate) fn may_wait(self) -> bool {
        !self.contains(Flags::MUST_NOT_WAIT)
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::INSTANTFIT
    }
}
