//! The read interface shared by molecules and fragments, and the algorithms written against it.

use crate::atom::{Atom, AtomId};
use crate::bond::{Bond, BondId};
use crate::derived;
use crate::error::*;
use crate::fragment::Fragment;
use crate::property::*;
use std::any::Any;
use std::iter::FusedIterator;
use std::ops::Range;

pub mod connect;

pub use connect::*;

/// A read-only molecular graph: either a [`Molecule`](crate::molecule::Molecule) that owns its
/// atoms and bonds, or a [`Fragment`] that selects them from other molecules.
///
/// Indices are dense, `0..num_atoms()` and `0..num_bonds()`.
pub trait MolecularGraph {
    fn num_atoms(&self) -> usize;
    fn num_bonds(&self) -> usize;
    fn get_atom(&self, index: usize) -> Option<Atom<'_>>;
    fn get_bond(&self, index: usize) -> Option<Bond<'_>>;
    /// Index of an atom in this graph, [`GraphError::NotFound`] if it isn't part of it.
    fn atom_index(&self, atom: AtomId) -> Result<usize, GraphError>;
    fn bond_index(&self, bond: BondId) -> Result<usize, GraphError>;
    fn properties(&self) -> &PropertyMap;
    /// Parameters for derived properties. Graphs without any use the defaults.
    fn control_params(&self) -> Option<&PropertyMap> {
        None
    }

    fn atom(&self, index: usize) -> Result<Atom<'_>, GraphError> {
        self.get_atom(index).ok_or(GraphError::IndexOutOfRange {
            kind: ElementKind::Atom,
            index,
            len: self.num_atoms(),
        })
    }
    fn bond(&self, index: usize) -> Result<Bond<'_>, GraphError> {
        self.get_bond(index).ok_or(GraphError::IndexOutOfRange {
            kind: ElementKind::Bond,
            index,
            len: self.num_bonds(),
        })
    }
    fn atoms(&self) -> Atoms<'_, Self> {
        Atoms::new(self)
    }
    fn bonds(&self) -> Bonds<'_, Self> {
        Bonds::new(self)
    }
    fn contains_atom(&self, atom: AtomId) -> bool {
        self.atom_index(atom).is_ok()
    }
    fn contains_bond(&self, bond: BondId) -> bool {
        self.bond_index(bond).is_ok()
    }
    fn num_properties(&self) -> usize {
        self.properties().len()
    }

    /// Get a property of the whole graph. Stored values take precedence, otherwise keys with a
    /// known derivation are computed from the current structure.
    fn property<T: Any + Clone>(&self, key: PropertyKey) -> Result<T, PropertyError>
    where
        Self: Sized,
    {
        match self.properties().get::<T>(key) {
            Ok(value) => Ok(value.clone()),
            Err(PropertyError::Missing(_)) => downcast(key, derived::compute(self, key)?),
            Err(err) => Err(err),
        }
    }
    /// Connected components, as fragments of this graph.
    fn components(&self) -> Vec<Fragment<'_>>
    where
        Self: Sized,
    {
        ComponentIter::new(self).collect()
    }
    /// Structural hash, equal for graphs that only differ in atom and bond order.
    fn hash_code(&self) -> Result<u64, PropertyError>
    where
        Self: Sized,
    {
        derived::hash_code(self)
    }
}

/// Bonds of `atom` that are part of `graph`, each paired with the atom on the other side.
pub fn incident_bonds<'g, G: MolecularGraph + ?Sized>(
    graph: &'g G,
    atom: Atom<'g>,
) -> impl Iterator<Item = (Bond<'g>, Atom<'g>)> + 'g {
    atom.bonds()
        .zip(atom.atoms())
        .filter(move |(bond, _)| graph.contains_bond(bond.id()))
}

macro_rules! index_iter {
    ($(#[$meta:meta])* $name:ident, $item:ident, $len:ident, $get:ident) => {
        $(#[$meta])*
        pub struct $name<'g, G: ?Sized> {
            graph: &'g G,
            range: Range<usize>,
        }
        impl<'g, G: MolecularGraph + ?Sized> $name<'g, G> {
            pub(crate) fn new(graph: &'g G) -> Self {
                Self {
                    graph,
                    range: 0..graph.$len(),
                }
            }
        }
        impl<'g, G: ?Sized> Clone for $name<'g, G> {
            fn clone(&self) -> Self {
                Self {
                    graph: self.graph,
                    range: self.range.clone(),
                }
            }
        }
        impl<'g, G: MolecularGraph + ?Sized> Iterator for $name<'g, G> {
            type Item = $item<'g>;

            fn next(&mut self) -> Option<$item<'g>> {
                self.range.next().and_then(|i| self.graph.$get(i))
            }
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.range.size_hint()
            }
            fn nth(&mut self, n: usize) -> Option<$item<'g>> {
                self.range.nth(n).and_then(|i| self.graph.$get(i))
            }
        }
        impl<'g, G: MolecularGraph + ?Sized> DoubleEndedIterator for $name<'g, G> {
            fn next_back(&mut self) -> Option<$item<'g>> {
                self.range.next_back().and_then(|i| self.graph.$get(i))
            }
        }
        impl<'g, G: MolecularGraph + ?Sized> ExactSizeIterator for $name<'g, G> {}
        impl<'g, G: MolecularGraph + ?Sized> FusedIterator for $name<'g, G> {}
    };
}

index_iter!(
    /// Iterator over the atoms of a graph, in index order.
    Atoms, Atom, num_atoms, get_atom
);
index_iter!(
    /// Iterator over the bonds of a graph, in index order.
    Bonds, Bond, num_bonds, get_bond
);
