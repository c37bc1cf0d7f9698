//! A general-purpose resource allocator ("vmem arena") over arbitrary integer resource spaces.
//!
//! Based on the vmem resource allocator design described in Bonwick & Adams, "Magazines and
//! Vmem: Extending the Slab Allocator to Many CPUs and Arbitrary Resources," USENIX 2001. An
//! [`Arena`](arena::Arena) owns one or more contiguous ranges ("spans") of an integer address
//! space and serves allocation requests of variable size with optional alignment, phase, and
//! address-range constraints. Arenas may import spans on demand from a parent
//! ([`Source`](arena::Source)), forming a tree, and release them back once fully drained.

pub mod arena;
pub mod config;
pub mod error;
pub mod flags;
pub mod pool;

mod fit;
mod index;
mod segment;
mod slab;

pub use arena::{Arena, ArenaHandle, Source, Stats};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use flags::Flags;
