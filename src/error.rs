use core::fmt;

/// Failure modes an arena operation can surface to a caller.
///
/// `InvalidArg` and `Unimplemented` indicate a caller contract violation rather than resource
/// exhaustion; callers that hit them repeatedly have a bug, not bad luck. `NoMem` and
/// `PoolExhausted` are ordinary, expected outcomes of a full arena.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArenaError {
    /// No free segment satisfies the request and the arena has no way to grow (no import
    /// source, import failed, or the caller forbade waiting on one).
    NoMem,
    /// The caller passed a combination of size/align/phase/address-range arguments that can
    /// never be satisfied, independent of arena state.
    InvalidArg { reason: &'static str },
    /// The requested behavior is a documented extension point not yet implemented.
    Unimplemented { feature: &'static str },
    /// The process-wide segment-tag budget is exhausted and the caller's flags forbid waiting
    /// for a refill.
    PoolExhausted,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::NoMem => write!(f, "arena has no segment satisfying the request"),
            ArenaError::InvalidArg { reason } => write!(f, "invalid argument: {reason}"),
            ArenaError::Unimplemented { feature } => write!(f, "not implemented: {feature}"),
            ArenaError::PoolExhausted => write!(f, "segment pool exhausted"),
        }
    }
}

impl std::error::Error for ArenaError {}
