//! Arena: the externally visible allocator object.
//!
//! Based on the vmem resource allocator design described in Bonwick & Adams, "Magazines and
//! Vmem: Extending the Slab Allocator to Many CPUs and Arbitrary Resources," USENIX 2001.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::fit::{segment_fit, Policy};
use crate::flags::Flags;
use crate::index::{self, FREELISTS_N, HASHTABLES_N};
use crate::pool;
use crate::segment::{Addr, Kind, Segment, Size};
use crate::slab::Slab;

/// Running totals an arena keeps about its own resource usage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub in_use: u64,
    pub free: u64,
    pub total: u64,
    pub import: u64,
}

/// A parent an arena can import spans from on demand, and return them to once fully drained.
///
/// `Arena` itself implements nothing here directly; wrap a parent arena in [`ArenaHandle`] to
/// use it as a `Source` for a child, or provide any other backing supplier (a page allocator,
/// a device's free-block table, ...).
pub trait Source: Send {
    fn alloc(&mut self, size: Size, flags: Flags) -> Result<Addr, ArenaError>;
    fn free(&mut self, base: Addr, size: Size);
}

/// A thread-safe handle to an `Arena`, usable as a `Source` for child arenas that import from
/// it. Cloning shares the same underlying arena.
pub struct ArenaHandle(Arc<Mutex<Arena>>);

impl ArenaHandle {
    pub fn new(arena: Arena) -> Self {
        ArenaHandle(Arc::new(Mutex::new(arena)))
    }

    pub fn lock(&self) -> MutexGuard<'_, Arena> {
        self.0.lock().expect("arena mutex poisoned")
    }
}

impl Clone for ArenaHandle {
    fn clone(&self) -> Self {
        ArenaHandle(self.0.clone())
    }
}

impl Source for ArenaHandle {
    fn alloc(&mut self, size: Size, flags: Flags) -> Result<Addr, ArenaError> {
        self.lock().alloc(size, flags)
    }

    fn free(&mut self, base: Addr, size: Size) {
        // A source's free callback has no failure mode in the source design; a mismatched
        // size here means the importing arena's own bookkeeping is broken, which `free`
        // already asserts on before we ever get here.
        let _ = self.lock().free(base, size);
    }
}

pub struct Arena {
    name: String,
    quantum: u64,
    slab: Slab,
    list_head: Option<usize>,
    list_tail: Option<usize>,
    freelists: [Option<usize>; FREELISTS_N],
    hashtable: [Option<usize>; HASHTABLES_N],
    source: Option<Box<dyn Source>>,
    stats: Stats,
}

impl Arena {
    pub fn create(config: ArenaConfig, flags: Flags) -> Result<Arena, ArenaError> {
        pool::bootstrap();
        if config.quantum == 0 {
            return Err(ArenaError::InvalidArg {
                reason: "quantum must be nonzero",
            });
        }

        let mut arena = Arena {
            name: config.name,
            quantum: config.quantum,
            slab: Slab::new(),
            list_head: None,
            list_tail: None,
            freelists: [None; FREELISTS_N],
            hashtable: [None; HASHTABLES_N],
            source: config.source,
            stats: Stats::default(),
        };

        if arena.source.is_none() {
            if let Some(base) = config.initial_base {
                if config.initial_size > 0 {
                    arena.add_span(base, config.initial_size, false, flags)?;
                }
            }
        }

        log::debug!("created arena {} (quantum {:#x})", arena.name, arena.quantum);
        Ok(arena)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Adds an additional, non-imported span to the arena. Equivalent to the source's
    /// `vmem_add`.
    pub fn add(&mut self, base: Addr, size: Size, flags: Flags) -> Result<Addr, ArenaError> {
        self.add_span(base, size, false, flags)
    }

    /// Equivalent to `xalloc(size, quantum, 0, 0, 0, u64::MAX, flags)`.
    pub fn alloc(&mut self, size: Size, flags: Flags) -> Result<Addr, ArenaError> {
        self.xalloc(size, 0, 0, 0, 0, u64::MAX, flags)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn xalloc(
        &mut self,
        size: Size,
        align: u64,
        phase: u64,
        nocross: u64,
        minaddr: Addr,
        maxaddr: Addr,
        flags: Flags,
    ) -> Result<Addr, ArenaError> {
        if size == 0 {
            return Err(ArenaError::InvalidArg { reason: "size must be nonzero" });
        }
        let align = if align == 0 { self.quantum } else { align };
        if phase >= align {
            return Err(ArenaError::InvalidArg { reason: "phase must be less than align" });
        }
        if minaddr >= maxaddr {
            return Err(ArenaError::InvalidArg { reason: "minaddr must be less than maxaddr" });
        }
        if nocross != 0 {
            return Err(ArenaError::Unimplemented { feature: "nocross boundary constraint" });
        }
        let policy = Policy::from_flags(flags)
            .ok_or(ArenaError::Unimplemented { feature: "NEXTFIT" })?;

        let mut imported_once = false;
        loop {
            if let Some((seg_idx, fit_addr)) =
                self.find_fit(size, align, phase, minaddr, maxaddr, policy)
            {
                return self.carve(seg_idx, fit_addr, size, flags);
            }
            if imported_once || self.source.is_none() {
                return Err(ArenaError::NoMem);
            }
            self.import(size, flags)?;
            imported_once = true;
        }
    }

    /// Equivalent to the source's `vmem_xfree`. `size` must match the exact size the
    /// corresponding `alloc`/`xalloc` call carved (including any quantum-slack it absorbed
    /// into the allocation rather than splitting off as a separate free segment).
    pub fn free(&mut self, base: Addr, size: Size) -> Result<(), ArenaError> {
        let idx = self.hash_find(base).ok_or(ArenaError::InvalidArg {
            reason: "free of an address not currently allocated",
        })?;
        if self.slab.get(idx).size != size {
            return Err(ArenaError::InvalidArg {
                reason: "free size does not match the allocation's size",
            });
        }
        self.hash_remove(idx);

        if let Some(next_idx) = self.slab.get(idx).list_next {
            if self.slab.get(next_idx).is_free() {
                self.freelist_remove(next_idx);
                let next_size = self.slab.get(next_idx).size;
                self.list_remove(next_idx);
                self.free_segment(next_idx);
                self.slab.get_mut(idx).size += next_size;
                log::trace!("coalesced right at {base:#x}");
            }
        }
        if let Some(prev_idx) = self.slab.get(idx).list_prev {
            if self.slab.get(prev_idx).is_free() {
                self.freelist_remove(prev_idx);
                let prev_base = self.slab.get(prev_idx).base;
                let prev_size = self.slab.get(prev_idx).size;
                self.list_remove(prev_idx);
                self.free_segment(prev_idx);
                let seg = self.slab.get_mut(idx);
                seg.base = prev_base;
                seg.size += prev_size;
                log::trace!("coalesced left into {prev_base:#x}");
            }
        }
        self.slab.get_mut(idx).kind = Kind::Free;

        let mut released = false;
        if let Some(prev_idx) = self.slab.get(idx).list_prev {
            let prev = self.slab.get(prev_idx);
            if matches!(prev.kind, Kind::Span { imported: true }) && prev.size == self.slab.get(idx).size {
                let span_base = prev.base;
                let span_size = prev.size;
                self.list_remove(prev_idx);
                self.free_segment(prev_idx);
                self.list_remove(idx);
                self.free_segment(idx);
                self.stats.total -= span_size;
                self.stats.import -= span_size;
                released = true;
                if let Some(mut source) = self.source.take() {
                    source.free(span_base, span_size);
                    self.source = Some(source);
                }
                log::debug!(
                    "released imported span [{span_base:#x}, {:#x}) back to source",
                    span_base + span_size
                );
            }
        }
        if !released {
            self.freelist_insert(idx);
            self.stats.free += size;
        }
        self.stats.in_use -= size;
        Ok(())
    }

    /// Renders the segment list, hash table, and counters as text; also narrates each line
    /// through the `log` crate at `trace` level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut cur = self.list_head;
        while let Some(idx) = cur {
            let seg = self.slab.get(idx);
            let kind_str = match seg.kind {
                Kind::Allocated => "ALLOC",
                Kind::Free => "FREE",
                Kind::Span { .. } => "SPAN",
            };
            let imported_str = if matches!(seg.kind, Kind::Span { imported: true }) {
                " imported"
            } else {
                ""
            };
            out.push_str(&format!(
                "[{:#x}, {:#x}) ({kind_str}{imported_str})\n",
                seg.base,
                seg.end()
            ));
            cur = seg.list_next;
        }
        for (bucket, head) in self.hashtable.iter().enumerate() {
            let mut cur = *head;
            while let Some(idx) = cur {
                let seg = self.slab.get(idx);
                out.push_str(&format!(
                    "hash[{bucket}] base={:#x} size={:#x} murmur={:#x}\n",
                    seg.base,
                    seg.size,
                    index::murmur64(seg.base)
                ));
                cur = seg.sec_next;
            }
        }
        out.push_str(&format!(
            "in_use={:#x} free={:#x} total={:#x} import={:#x}\n",
            self.stats.in_use, self.stats.free, self.stats.total, self.stats.import
        ));
        for line in out.lines() {
            log::trace!("{line}");
        }
        out
    }

    fn add_span(&mut self, base: Addr, size: Size, imported: bool, flags: Flags) -> Result<Addr, ArenaError> {
        pool::acquire(flags)?;
        let span_idx = self.slab.insert(Segment::new(Kind::Span { imported }, base, size));
        if let Err(e) = pool::acquire(flags) {
            self.slab.remove(span_idx);
            pool::release();
            return Err(e);
        }
        let free_idx = self.slab.insert(Segment::new(Kind::Free, base, size));
        self.list_push_back(span_idx);
        self.list_insert_after(span_idx, free_idx);
        self.freelist_insert(free_idx);

        self.stats.total += size;
        self.stats.free += size;
        if imported {
            self.stats.import += size;
        }
        log::debug!(
            "added {} span [{base:#x}, {:#x}) to arena {}",
            if imported { "imported" } else { "initial" },
            base + size,
            self.name
        );
        Ok(base)
    }

    fn import(&mut self, size: Size, flags: Flags) -> Result<Addr, ArenaError> {
        let mut source = self.source.take().ok_or(ArenaError::NoMem)?;
        let result = source.alloc(size, flags);
        self.source = Some(source);
        let base = result?;
        match self.add_span(base, size, true, flags) {
            Ok(b) => Ok(b),
            Err(e) => {
                if let Some(mut source) = self.source.take() {
                    source.free(base, size);
                    self.source = Some(source);
                }
                Err(e)
            }
        }
    }

    fn find_fit(
        &self,
        size: Size,
        align: u64,
        phase: u64,
        minaddr: Addr,
        maxaddr: Addr,
        policy: Policy,
    ) -> Option<(usize, Addr)> {
        let start = index::freelist_bucket(size);
        match policy {
            Policy::Instant => {
                for bucket in start..FREELISTS_N {
                    if let Some(idx) = self.freelists[bucket] {
                        let seg = self.slab.get(idx);
                        if let Some(addr) =
                            segment_fit(seg.base, seg.size, size, align, phase, minaddr, maxaddr)
                        {
                            return Some((idx, addr));
                        }
                    }
                }
                None
            }
            Policy::Best => {
                for bucket in start..FREELISTS_N {
                    let mut cur = self.freelists[bucket];
                    while let Some(idx) = cur {
                        let seg = self.slab.get(idx);
                        if seg.size >= size {
                            if let Some(addr) = segment_fit(
                                seg.base, seg.size, size, align, phase, minaddr, maxaddr,
                            ) {
                                return Some((idx, addr));
                            }
                        }
                        cur = seg.sec_next;
                    }
                }
                None
            }
        }
    }

    fn carve(&mut self, seg_idx: usize, fit_addr: Addr, size: Size, flags: Flags) -> Result<Addr, ArenaError> {
        let seg_base = self.slab.get(seg_idx).base;
        let seg_size = self.slab.get(seg_idx).size;
        let needs_prefix = fit_addr > seg_base;
        let remaining_after_prefix = seg_size - (fit_addr - seg_base);
        let needs_suffix_split =
            remaining_after_prefix > size && (remaining_after_prefix - size) > self.quantum.saturating_sub(1);

        let mut reserved = 0u8;
        if needs_prefix {
            pool::acquire(flags)?;
            reserved += 1;
        }
        if needs_suffix_split {
            if let Err(e) = pool::acquire(flags) {
                for _ in 0..reserved {
                    pool::release();
                }
                return Err(e);
            }
            reserved += 1;
        }
        let _ = reserved;

        self.freelist_remove(seg_idx);

        if needs_prefix {
            let prefix_idx = self.slab.insert(Segment::new(Kind::Free, seg_base, fit_addr - seg_base));
            self.list_insert_before(seg_idx, prefix_idx);
            self.freelist_insert(prefix_idx);
            let seg = self.slab.get_mut(seg_idx);
            seg.size -= fit_addr - seg_base;
            seg.base = fit_addr;
        }

        let (alloc_idx, chosen_size) = if needs_suffix_split {
            let alloc_idx = self.slab.insert(Segment::new(Kind::Allocated, fit_addr, size));
            self.list_insert_before(seg_idx, alloc_idx);
            let seg = self.slab.get_mut(seg_idx);
            seg.base += size;
            seg.size -= size;
            self.freelist_insert(seg_idx);
            (alloc_idx, size)
        } else {
            let leftover_size = self.slab.get(seg_idx).size;
            self.slab.get_mut(seg_idx).kind = Kind::Allocated;
            (seg_idx, leftover_size)
        };

        self.hash_insert(alloc_idx);
        self.stats.free -= chosen_size;
        self.stats.in_use += chosen_size;
        log::trace!(
            "allocated [{fit_addr:#x}, {:#x}) from arena {}",
            fit_addr + chosen_size,
            self.name
        );
        Ok(fit_addr)
    }

    fn list_push_back(&mut self, idx: usize) {
        self.slab.get_mut(idx).list_prev = self.list_tail;
        self.slab.get_mut(idx).list_next = None;
        if let Some(tail) = self.list_tail {
            self.slab.get_mut(tail).list_next = Some(idx);
        } else {
            self.list_head = Some(idx);
        }
        self.list_tail = Some(idx);
    }

    fn list_insert_after(&mut self, anchor: usize, idx: usize) {
        let next = self.slab.get(anchor).list_next;
        self.slab.get_mut(idx).list_prev = Some(anchor);
        self.slab.get_mut(idx).list_next = next;
        self.slab.get_mut(anchor).list_next = Some(idx);
        match next {
            Some(n) => self.slab.get_mut(n).list_prev = Some(idx),
            None => self.list_tail = Some(idx),
        }
    }

    fn list_insert_before(&mut self, anchor: usize, idx: usize) {
        let prev = self.slab.get(anchor).list_prev;
        self.slab.get_mut(idx).list_next = Some(anchor);
        self.slab.get_mut(idx).list_prev = prev;
        self.slab.get_mut(anchor).list_prev = Some(idx);
        match prev {
            Some(p) => self.slab.get_mut(p).list_next = Some(idx),
            None => self.list_head = Some(idx),
        }
    }

    fn list_remove(&mut self, idx: usize) {
        let prev = self.slab.get(idx).list_prev;
        let next = self.slab.get(idx).list_next;
        match prev {
            Some(p) => self.slab.get_mut(p).list_next = next,
            None => self.list_head = next,
        }
        match next {
            Some(n) => self.slab.get_mut(n).list_prev = prev,
            None => self.list_tail = prev,
        }
    }

    fn freelist_insert(&mut self, idx: usize) {
        let bucket = index::freelist_bucket(self.slab.get(idx).size);
        let head = self.freelists[bucket];
        self.slab.get_mut(idx).sec_prev = None;
        self.slab.get_mut(idx).sec_next = head;
        if let Some(h) = head {
            self.slab.get_mut(h).sec_prev = Some(idx);
        }
        self.freelists[bucket] = Some(idx);
    }

    fn freelist_remove(&mut self, idx: usize) {
        let bucket = index::freelist_bucket(self.slab.get(idx).size);
        let prev = self.slab.get(idx).sec_prev;
        let next = self.slab.get(idx).sec_next;
        match prev {
            Some(p) => self.slab.get_mut(p).sec_next = next,
            None => self.freelists[bucket] = next,
        }
        if let Some(n) = next {
            self.slab.get_mut(n).sec_prev = prev;
        }
        self.slab.get_mut(idx).sec_prev = None;
        self.slab.get_mut(idx).sec_next = None;
    }

    fn hash_insert(&mut self, idx: usize) {
        let bucket = index::hash_bucket(self.slab.get(idx).base);
        let head = self.hashtable[bucket];
        self.slab.get_mut(idx).sec_prev = None;
        self.slab.get_mut(idx).sec_next = head;
        if let Some(h) = head {
            self.slab.get_mut(h).sec_prev = Some(idx);
        }
        self.hashtable[bucket] = Some(idx);
    }

    fn hash_remove(&mut self, idx: usize) {
        let bucket = index::hash_bucket(self.slab.get(idx).base);
        let prev = self.slab.get(idx).sec_prev;
        let next = self.slab.get(idx).sec_next;
        match prev {
            Some(p) => self.slab.get_mut(p).sec_next = next,
            None => self.hashtable[bucket] = next,
        }
        if let Some(n) = next {
            self.slab.get_mut(n).sec_prev = prev;
        }
        self.slab.get_mut(idx).sec_prev = None;
        self.slab.get_mut(idx).sec_next = None;
    }

    fn hash_find(&self, base: Addr) -> Option<usize> {
        let bucket = index::hash_bucket(base);
        let mut cur = self.hashtable[bucket];
        while let Some(idx) = cur {
            let seg = self.slab.get(idx);
            if seg.base == base {
                return Some(idx);
            }
            cur = seg.sec_next;
        }
        None
    }

    fn free_segment(&mut self, idx: usize) {
        self.slab.remove(idx);
        pool::release();
    }

    /// Consumes the arena, asserting it holds no outstanding allocations, and returns every
    /// remaining segment record to the process-wide pool.
    pub fn destroy(mut self) {
        for bucket in &self.hashtable {
            assert!(bucket.is_none(), "destroy: arena still has allocated segments");
        }
        let mut cur = self.list_head;
        while let Some(idx) = cur {
            let next = self.slab.get(idx).list_next;
            self.free_segment(idx);
            cur = next;
        }
        log::debug!("destroyed arena {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantum_arena() -> Arena {
        let _ = env_logger::try_init();
        Arena::create(
            ArenaConfig::new("test", 0x1000).with_initial_span(0x1000, 0x100000),
            Flags::default(),
        )
        .unwrap()
    }

    #[test]
    fn scenario_two_instant_fit_allocations() {
        let mut arena = quantum_arena();
        let a = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let b = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        assert_eq!(a, 0x1000);
        assert_eq!(b, 0x2000);
        assert_eq!(arena.stats().in_use, 0x2000);
    }

    #[test]
    fn scenario_free_in_reverse_order_restores_one_segment() {
        let mut arena = quantum_arena();
        let a = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let b = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        arena.free(b, 0x1000).unwrap();
        arena.free(a, 0x1000).unwrap();
        assert_eq!(arena.stats().in_use, 0);
        assert_eq!(arena.stats().free, 0x100000);
        assert_eq!(arena.list_head, arena.list_tail);
    }

    #[test]
    fn scenario_four_blocks_freed_out_of_order_restores_one_segment() {
        let mut arena = quantum_arena();
        let p1 = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let p2 = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let p3 = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let p4 = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        arena.free(p2, 0x1000).unwrap();
        arena.free(p1, 0x1000).unwrap();
        arena.free(p4, 0x1000).unwrap();
        arena.free(p3, 0x1000).unwrap();
        assert_eq!(arena.stats().free, 0x100000);
        assert_eq!(arena.list_head, arena.list_tail);
    }

    #[test]
    fn scenario_aligned_xalloc() {
        let mut arena = quantum_arena();
        let addr = arena
            .xalloc(0x1000, 0x1000, 0, 0, 0, u64::MAX, Flags::INSTANTFIT)
            .unwrap();
        assert_eq!(addr, 0x1000);
    }

    struct BumpSource {
        next: Addr,
    }
    impl Source for BumpSource {
        fn alloc(&mut self, size: Size, _flags: Flags) -> Result<Addr, ArenaError> {
            let base = self.next;
            self.next += size;
            Ok(base)
        }
        fn free(&mut self, _base: Addr, _size: Size) {}
    }

    #[test]
    fn child_arena_imports_on_demand() {
        let mut child = Arena::create(
            ArenaConfig::new("child", 0x1000).with_source(Box::new(BumpSource { next: 0x1000 })),
            Flags::default(),
        )
        .unwrap();
        let a = child.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let b = child.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        assert_eq!(a, 0x1000);
        assert_eq!(b, 0x2000);
        assert_eq!(child.stats().import, 0x2000);
    }

    #[test]
    fn scenario_child_free_releases_span_to_parent_arena() {
        let parent = Arena::create(
            ArenaConfig::new("parent", 0x1000).with_initial_span(0x1000, 0x100000),
            Flags::default(),
        )
        .unwrap();
        let parent_handle = ArenaHandle::new(parent);

        let mut child = Arena::create(
            ArenaConfig::new("child", 0x1000).with_source(Box::new(parent_handle.clone())),
            Flags::default(),
        )
        .unwrap();

        let a = child.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let b = child.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        assert_eq!(a, 0x1000);
        assert_eq!(b, 0x2000);

        child.free(a, 0x1000).unwrap();
        child.free(b, 0x1000).unwrap();

        assert_eq!(parent_handle.lock().stats().in_use, 0);
    }

    #[test]
    fn scenario_constrained_address_window_xalloc_leaves_three_segments() {
        let mut arena = quantum_arena();
        let addr = arena
            .xalloc(0x1000, 0, 0, 0, 0x10000, 0x11000, Flags::INSTANTFIT)
            .unwrap();
        assert_eq!(addr, 0x10000);

        let mut count = 0;
        let mut cur = arena.list_head;
        while let Some(idx) = cur {
            count += 1;
            cur = arena.slab.get(idx).list_next;
        }
        // span + free-before + allocated + free-after
        assert_eq!(count, 4);
    }

    #[test]
    fn double_free_style_reuse_after_free_reassigns_address() {
        let mut arena = quantum_arena();
        let a = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        arena.free(a, 0x1000).unwrap();
        let b = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        assert_eq!(a, b);
        assert_eq!(arena.stats().in_use, 0x1000);
    }

    #[test]
    fn free_of_unknown_address_is_invalid_arg() {
        let mut arena = quantum_arena();
        let err = arena.free(0xdead_beef, 0x1000).unwrap_err();
        assert_eq!(
            err,
            ArenaError::InvalidArg { reason: "free of an address not currently allocated" }
        );
    }

    #[test]
    fn nocross_is_unimplemented() {
        let mut arena = quantum_arena();
        let err = arena
            .xalloc(0x1000, 0, 0, 0x1000, 0, u64::MAX, Flags::INSTANTFIT)
            .unwrap_err();
        assert_eq!(err, ArenaError::Unimplemented { feature: "nocross boundary constraint" });
    }

    #[test]
    fn nextfit_is_unimplemented() {
        let mut arena = quantum_arena();
        let err = arena.alloc(0x1000, Flags::NEXTFIT).unwrap_err();
        assert_eq!(err, ArenaError::Unimplemented { feature: "NEXTFIT" });
    }

    #[test]
    fn dump_reports_segments_and_counters() {
        let mut arena = quantum_arena();
        let a = arena.alloc(0x1000, Flags::INSTANTFIT).unwrap();
        let text = arena.dump();
        assert!(text.contains(&format!("{a:#x}")));
        assert!(text.contains("in_use=0x1000"));
    }
}
