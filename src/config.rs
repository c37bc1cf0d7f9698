//! Arena construction parameters.
//!
//! The source's `vmem_create`/`vmem_init` take nine positional parameters (name, base, size,
//! quantum, alloc/free callbacks, source, qcache_max, flags). This crate collects the
//! span/import wiring into one builder instead, keeping `Arena::create` down to
//! `(config, flags)`.

use crate::arena::Source;

/// Construction parameters for a new [`Arena`](crate::arena::Arena).
pub struct ArenaConfig {
    pub(crate) name: String,
    pub(crate) quantum: u64,
    pub(crate) initial_base: Option<u64>,
    pub(crate) initial_size: u64,
    /// Accepted for signature parity with the source's `vmem_create`, which likewise stores
    /// it (`ret->qcache_max = qcache_max`) without validating it anywhere. Quantum caches
    /// themselves are an explicitly out-of-scope fast path here, so this crate never builds
    /// one and never reads this field back; it exists purely so a caller porting a
    /// `vmem_create` call site has somewhere to put the argument.
    pub(crate) qcache_max: u64,
    pub(crate) source: Option<Box<dyn Source>>,
}

impl ArenaConfig {
    pub fn new(name: impl Into<String>, quantum: u64) -> Self {
        ArenaConfig {
            name: name.into(),
            quantum,
            initial_base: None,
            initial_size: 0,
            qcache_max: 0,
            source: None,
        }
    }

    /// Adds an initial, non-imported span covering `[base, base + size)`.
    pub fn with_initial_span(mut self, base: u64, size: u64) -> Self {
        self.initial_base = Some(base);
        self.initial_size = size;
        self
    }

    /// Accepted for `vmem_create` signature parity. Quantum caches are out of scope for this
    /// crate, so the value is stored and otherwise has no effect — the original doesn't
    /// validate or act on it either.
    pub fn with_qcache_max(mut self, qcache_max: u64) -> Self {
        self.qcache_max = qcache_max;
        self
    }

    /// Wires this arena to import spans on demand from `source` instead of (or in addition
    /// to) an initial span.
    pub fn with_source(mut self, source: Box<dyn Source>) -> Self {
        self.source = Some(source);
        self
    }
}
