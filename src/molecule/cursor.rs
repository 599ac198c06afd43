use crate::handle::MolId;
use std::ops::{Add, AddAssign, Sub, SubAssign};

macro_rules! cursor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            mol: MolId,
            pos: usize,
        }
        impl $name {
            #[inline(always)]
            pub(crate) const fn new(mol: MolId, pos: usize) -> Self {
                Self { mol, pos }
            }
            #[inline(always)]
            pub const fn position(self) -> usize {
                self.pos
            }
            /// The molecule this cursor was created from.
            #[inline(always)]
            pub const fn molecule(self) -> MolId {
                self.mol
            }
            #[inline(always)]
            pub const fn next(self) -> Self {
                Self::new(self.mol, self.pos.wrapping_add(1))
            }
            /// Moving before the start yields a cursor that no molecule accepts.
            #[inline(always)]
            pub const fn prev(self) -> Self {
                Self::new(self.mol, self.pos.wrapping_sub(1))
            }
            /// Signed distance from `other` to `self`.
            #[inline]
            pub const fn distance(self, other: Self) -> isize {
                self.pos.wrapping_sub(other.pos) as isize
            }
        }
        impl Add<usize> for $name {
            type Output = Self;

            fn add(self, rhs: usize) -> Self {
                Self::new(self.mol, self.pos.wrapping_add(rhs))
            }
        }
        impl Sub<usize> for $name {
            type Output = Self;

            fn sub(self, rhs: usize) -> Self {
                Self::new(self.mol, self.pos.wrapping_sub(rhs))
            }
        }
        impl AddAssign<usize> for $name {
            fn add_assign(&mut self, rhs: usize) {
                *self = *self + rhs;
            }
        }
        impl SubAssign<usize> for $name {
            fn sub_assign(&mut self, rhs: usize) {
                *self = *self - rhs;
            }
        }
        impl Sub for $name {
            type Output = isize;

            fn sub(self, rhs: Self) -> isize {
                self.distance(rhs)
            }
        }
    };
}

cursor!(
    /// Position in a molecule's atom sequence. Cursors are plain positions, so they stay valid
    /// across removals and can be checked against a molecule with
    /// [`Molecule::atom_at`](super::Molecule::atom_at).
    AtomCursor
);
cursor!(
    /// Position in a molecule's bond sequence.
    BondCursor
);
