//! Molecular graph model: atoms, bonds, molecules, fragments and reactions, with typed property
//! storage and on-demand derived properties.

pub mod atom;
pub mod bond;
pub mod derived;
#[rustfmt::skip]
pub mod element;
pub mod error;
pub mod fragment;
pub mod graph;
pub mod handle;
pub mod molecule;
pub mod property;
#[cfg(feature = "rand")]
pub mod rand;
pub mod reaction;

pub mod prelude {
    pub use crate::atom::{Atom, AtomMut};
    pub use crate::bond::{Bond, BondMut};
    pub use crate::derived::{AtomHashFlags, BondHashFlags};
    pub use crate::element::Element;
    pub use crate::error::*;
    pub use crate::fragment::Fragment;
    pub use crate::graph::MolecularGraph;
    pub use crate::handle::*;
    pub use crate::molecule::{AtomCursor, BondCursor, Molecule};
    pub use crate::property::*;
    pub use crate::reaction::{ComponentMut, Reaction, ReactionRole};
}

#[cfg(test)]
mod tests;
