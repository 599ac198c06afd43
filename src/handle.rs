//! Identity handles for molecules, reactions, atoms and bonds.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a [`Molecule`](crate::molecule::Molecule). Clones get a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MolId(u64);
impl MolId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Process-unique identity of a [`Reaction`](crate::reaction::Reaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReactionId(u64);
impl ReactionId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Stable handle to an atom. Survives removal of other atoms, and stops resolving once the atom
/// itself is removed, even if its storage slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomId {
    pub(crate) mol: MolId,
    pub(crate) key: usize,
    pub(crate) serial: u64,
}
impl AtomId {
    /// The molecule that owns this atom.
    #[inline(always)]
    pub const fn molecule(self) -> MolId {
        self.mol
    }
}

/// Stable handle to a bond, with the same guarantees as [`AtomId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BondId {
    pub(crate) mol: MolId,
    pub(crate) key: usize,
    pub(crate) serial: u64,
}
impl BondId {
    #[inline(always)]
    pub const fn molecule(self) -> MolId {
        self.mol
    }
}
