//! Process-wide segment-tag budget.
//!
//! Allocating a segment record could recurse into allocation (a split needs a fresh record,
//! and producing one might itself need to allocate). The arena breaks that cycle the same way
//! the source does: a pool of record budget is pre-seeded at process start, refills happen in
//! bulk so they amortize to near zero, and a caller can pass [`crate::flags::Flags::BOOTSTRAP`]
//! to forbid refill entirely when it is the refill path itself doing the allocating.
//!
//! Unlike the source's process-wide array of `VmemSegment` tags, the tags themselves live in
//! each arena's own slab (`crate::slab::Slab`) — only the *budget* is shared, mirroring the
//! `Locked<T>` + `lazy_static` shape the teacher uses for its own process-wide allocator state.

use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::error::ArenaError;

/// Number of segment records seeded before any arena does its first allocation.
const BOOTSTRAP_SEGS: usize = 128;
/// Refill kicks in once the budget drops to this many remaining records.
const NFREESEGS_MIN: usize = 8;
/// Size of one refill, chosen so refills are infrequent relative to churn.
const REFILL_CHUNK: usize = 64;

struct SegmentPool {
    budget: usize,
    bootstrapped: bool,
}

impl SegmentPool {
    const fn new() -> Self {
        SegmentPool {
            budget: 0,
            bootstrapped: false,
        }
    }

    fn bootstrap(&mut self) {
        if !self.bootstrapped {
            self.budget += BOOTSTRAP_SEGS;
            self.bootstrapped = true;
            log::debug!("segment pool bootstrapped with {BOOTSTRAP_SEGS} records");
        }
    }

    fn acquire(&mut self, flags: crate::flags::Flags) -> Result<(), ArenaError> {
        if self.budget == 0 {
            if flags.is_bootstrap() {
                log::warn!("segment pool exhausted during bootstrap-flagged allocation");
                return Err(ArenaError::PoolExhausted);
            }
            if !flags.may_wait() {
                log::warn!("segment pool exhausted and caller forbade waiting on a refill");
                return Err(ArenaError::PoolExhausted);
            }
            self.refill()?;
        } else if self.budget <= NFREESEGS_MIN && flags.may_wait() {
            // Top up opportunistically so a burst of splits right after this one doesn't
            // need its own refill round trip. Skipped under MUST_NOT_WAIT since the budget
            // isn't actually exhausted yet; this acquire can still proceed without it.
            let _ = self.refill();
        }
        self.budget -= 1;
        Ok(())
    }

    fn release(&mut self) {
        self.budget += 1;
    }

    fn refill(&mut self) -> Result<(), ArenaError> {
        log::debug!("segment pool refilling by {REFILL_CHUNK} records");
        self.budget += REFILL_CHUNK;
        Ok(())
    }
}

lazy_static! {
    static ref SEGMENT_POOL: Mutex<SegmentPool> = Mutex::new(SegmentPool::new());
}

/// Seeds the global segment-tag budget. Idempotent: a second call is a no-op.
pub fn bootstrap() {
    SEGMENT_POOL
        .lock()
        .expect("segment pool mutex poisoned")
        .bootstrap();
}

pub(crate) fn acquire(flags: crate::flags::Flags) -> Result<(), ArenaError> {
    SEGMENT_POOL
        .lock()
        .expect("segment pool mutex poisoned")
        .acquire(flags)
}

pub(crate) fn release() {
    SEGMENT_POOL
        .lock()
        .expect("segment pool mutex poisoned")
        .release();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_is_idempotent() {
        bootstrap();
        let budget_after_first = SEGMENT_POOL.lock().unwrap().budget;
        bootstrap();
        let budget_after_second = SEGMENT_POOL.lock().unwrap().budget;
        assert_eq!(budget_after_first, budget_after_second);
    }

    #[test]
    fn acquire_and_release_round_trip() {
        bootstrap();
        let before = SEGMENT_POOL.lock().unwrap().budget;
        acquire(crate::flags::Flags::empty()).unwrap();
        release();
        let after = SEGMENT_POOL.lock().unwrap().budget;
        assert_eq!(before, after);
    }

    #[test]
    fn must_not_wait_fails_instead_of_refilling_when_exhausted() {
        let mut pool = SEGMENT_POOL.lock().unwrap();
        pool.bootstrap();
        pool.budget = 0;
        let err = pool
            .acquire(crate::flags::Flags::MUST_NOT_WAIT)
            .unwrap_err();
        assert_eq!(err, ArenaError::PoolExhausted);
        assert_eq!(pool.budget, 0, "a denied acquire must not debit the budget");
        // Leave the pool usable for whichever test runs next.
        pool.refill().unwrap();
    }
}
