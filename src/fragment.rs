//! Non-owning selections of atoms and bonds.

use crate::atom::{Atom, AtomId};
use crate::bond::{Bond, BondId};
use crate::error::*;
use crate::graph::MolecularGraph;
use crate::molecule::Molecule;
use crate::property::*;
use ahash::HashMap;
use std::ops::AddAssign;
use tracing::*;

/// An ordered selection of atoms and bonds, possibly taken from several molecules.
///
/// Every selected bond has both endpoints selected. A fragment holds shared borrows of the
/// molecules it selects from, so those molecules can't change while it's alive.
#[derive(Debug, Clone, Default)]
pub struct Fragment<'a> {
    atoms: Vec<Atom<'a>>,
    bonds: Vec<Bond<'a>>,
    atom_pos: HashMap<AtomId, usize>,
    bond_pos: HashMap<BondId, usize>,
    props: PropertyMap,
}
impl<'a> Fragment<'a> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Select every atom and bond of a graph. Its properties aren't copied.
    pub fn from_graph<G: MolecularGraph + ?Sized>(graph: &'a G) -> Self {
        let mut out = Self::new();
        out.append(graph);
        out
    }

    /// Select an atom. Returns `false` if it was already selected.
    pub fn add_atom(&mut self, atom: Atom<'a>) -> bool {
        let id = atom.id();
        if self.atom_pos.contains_key(&id) {
            return false;
        }
        self.atom_pos.insert(id, self.atoms.len());
        self.atoms.push(atom);
        true
    }
    /// Select a bond along with any of its endpoints that aren't selected yet. Returns `false`
    /// if the bond was already selected.
    pub fn add_bond(&mut self, bond: Bond<'a>) -> bool {
        let id = bond.id();
        if self.bond_pos.contains_key(&id) {
            return false;
        }
        self.add_atom(bond.begin());
        self.add_atom(bond.end());
        self.bond_pos.insert(id, self.bonds.len());
        self.bonds.push(bond);
        true
    }

    fn reindex_bonds(&mut self, from: usize) {
        for (i, bond) in self.bonds.iter().enumerate().skip(from) {
            self.bond_pos.insert(bond.id(), i);
        }
    }
    pub fn remove_bond(&mut self, index: usize) -> Result<(), GraphError> {
        if index >= self.bonds.len() {
            return Err(GraphError::IndexOutOfRange {
                kind: ElementKind::Bond,
                index,
                len: self.bonds.len(),
            });
        }
        let bond = self.bonds.remove(index);
        self.bond_pos.remove(&bond.id());
        self.reindex_bonds(index);
        Ok(())
    }
    /// Deselect an atom and every selected bond to it.
    pub fn remove_atom(&mut self, index: usize) -> Result<(), GraphError> {
        let atom = *self.atoms.get(index).ok_or(GraphError::IndexOutOfRange {
            kind: ElementKind::Atom,
            index,
            len: self.atoms.len(),
        })?;
        let before = self.bonds.len();
        let bond_pos = &mut self.bond_pos;
        self.bonds.retain(|bond| {
            let keep = !bond.contains_atom(&atom);
            if !keep {
                bond_pos.remove(&bond.id());
            }
            keep
        });
        if self.bonds.len() != before {
            trace!(atom = index, bonds = before - self.bonds.len(), "deselected incident bonds");
            self.reindex_bonds(0);
        }
        self.atoms.remove(index);
        self.atom_pos.remove(&atom.id());
        for (i, atom) in self.atoms.iter().enumerate().skip(index) {
            self.atom_pos.insert(atom.id(), i);
        }
        Ok(())
    }
    /// Deselect everything. Properties are kept.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
        self.atom_pos.clear();
        self.bond_pos.clear();
    }

    /// Select every atom and bond of another graph.
    pub fn append<G: MolecularGraph + ?Sized>(&mut self, graph: &'a G) {
        let atoms = graph.atoms().filter(|&a| self.add_atom(a)).count();
        let bonds = graph.bonds().filter(|&b| self.add_bond(b)).count();
        trace!(atoms, bonds, "extended selection");
    }
    /// Replace the selection with every atom and bond of another graph. Properties are
    /// untouched.
    pub fn assign<G: MolecularGraph + ?Sized>(&mut self, graph: &'a G) {
        self.clear();
        self.append(graph);
    }

    #[inline(always)]
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.props
    }
    pub fn set_property<T: PropertyValue>(&mut self, key: PropertyKey, value: T) -> &mut Self {
        self.props.set(key, value);
        self
    }
    pub fn remove_property(&mut self, key: PropertyKey) -> bool {
        self.props.remove(key)
    }

    /// Copy the selection into a new molecule.
    pub fn to_molecule(&self) -> Molecule {
        Molecule::from_fragment(self)
    }
}
impl MolecularGraph for Fragment<'_> {
    #[inline(always)]
    fn num_atoms(&self) -> usize {
        self.atoms.len()
    }
    #[inline(always)]
    fn num_bonds(&self) -> usize {
        self.bonds.len()
    }
    fn get_atom(&self, index: usize) -> Option<Atom<'_>> {
        self.atoms.get(index).copied()
    }
    fn get_bond(&self, index: usize) -> Option<Bond<'_>> {
        self.bonds.get(index).copied()
    }
    fn atom_index(&self, atom: AtomId) -> Result<usize, GraphError> {
        self.atom_pos
            .get(&atom)
            .copied()
            .ok_or(GraphError::NotFound(ElementKind::Atom))
    }
    fn bond_index(&self, bond: BondId) -> Result<usize, GraphError> {
        self.bond_pos
            .get(&bond)
            .copied()
            .ok_or(GraphError::NotFound(ElementKind::Bond))
    }
    fn contains_atom(&self, atom: AtomId) -> bool {
        self.atom_pos.contains_key(&atom)
    }
    fn contains_bond(&self, bond: BondId) -> bool {
        self.bond_pos.contains_key(&bond)
    }
    #[inline(always)]
    fn properties(&self) -> &PropertyMap {
        &self.props
    }
}
impl<'a, G: MolecularGraph + ?Sized> AddAssign<&'a G> for Fragment<'a> {
    fn add_assign(&mut self, rhs: &'a G) {
        self.append(rhs);
    }
}
impl<'a> From<&'a Molecule> for Fragment<'a> {
    fn from(mol: &'a Molecule) -> Self {
        Self::from_graph(mol)
    }
}
