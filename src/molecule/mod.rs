//! The owning container. Atoms and bonds live in a per-molecule [`Slab`], so their storage keys
//! never move, while the dense `*_order` vectors give them their public indices.

use crate::atom::{Atom, AtomMut};
use crate::bond::{Bond, BondMut};
use crate::error::*;
use crate::fragment::Fragment;
use crate::graph::{Atoms, Bonds, MolecularGraph};
use crate::handle::*;
use crate::property::*;
use crate::reaction::ReactionRole;
use ahash::HashMap;
use slab::Slab;
use smallvec::SmallVec;
use std::ops::AddAssign;
use tracing::*;

mod cursor;
mod graph_traits;

pub use cursor::*;
pub use graph_traits::*;

#[derive(Debug, Clone)]
pub(crate) struct AtomEntry {
    pub index: usize,
    pub serial: u64,
    /// `(bond key, neighbor key)` pairs in bonding order
    pub adjacency: SmallVec<(usize, usize), 4>,
    pub props: PropertyMap,
}

#[derive(Debug, Clone)]
pub(crate) struct BondEntry {
    pub index: usize,
    pub serial: u64,
    pub begin: usize,
    pub end: usize,
    pub props: PropertyMap,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Membership {
    pub reaction: ReactionId,
    pub role: ReactionRole,
}

/// An owning molecular graph.
///
/// Indices are dense: after any mutation, the atoms are numbered `0..num_atoms()` and the bonds
/// `0..num_bonds()`, in insertion order. Use [`AtomId`] and [`BondId`] to refer to elements
/// across mutations.
#[derive(Debug)]
pub struct Molecule {
    id: MolId,
    pub(crate) atoms: Slab<AtomEntry>,
    pub(crate) bonds: Slab<BondEntry>,
    pub(crate) atom_order: Vec<usize>,
    pub(crate) bond_order: Vec<usize>,
    serial: u64,
    multi_edges: bool,
    props: PropertyMap,
    params: PropertyMap,
    membership: Option<Membership>,
}
impl Molecule {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }
    pub fn with_capacity(atoms: usize, bonds: usize) -> Self {
        Self {
            id: MolId::next(),
            atoms: Slab::with_capacity(atoms),
            bonds: Slab::with_capacity(bonds),
            atom_order: Vec::with_capacity(atoms),
            bond_order: Vec::with_capacity(bonds),
            serial: 0,
            multi_edges: false,
            props: PropertyMap::new(),
            params: PropertyMap::new(),
            membership: None,
        }
    }
    /// Builder form of [`set_multi_edges`](Self::set_multi_edges).
    pub fn with_multi_edges(mut self, multi_edges: bool) -> Self {
        self.multi_edges = multi_edges;
        self
    }
    /// Allow more than one bond between the same pair of atoms. When disabled (the default),
    /// adding a bond between already bonded atoms returns the existing bond.
    pub fn set_multi_edges(&mut self, multi_edges: bool) -> &mut Self {
        self.multi_edges = multi_edges;
        self
    }
    #[inline(always)]
    pub fn allows_multi_edges(&self) -> bool {
        self.multi_edges
    }
    #[inline(always)]
    pub fn id(&self) -> MolId {
        self.id
    }

    pub fn reserve(&mut self, atoms: usize, bonds: usize) {
        self.atoms.reserve(atoms);
        self.atom_order.reserve(atoms);
        self.bonds.reserve(bonds);
        self.bond_order.reserve(bonds);
    }

    fn next_serial(&mut self) -> u64 {
        self.serial += 1;
        self.serial
    }

    pub(crate) fn atom_key(&self, index: usize) -> Result<usize, GraphError> {
        self.atom_order
            .get(index)
            .copied()
            .ok_or(GraphError::IndexOutOfRange {
                kind: ElementKind::Atom,
                index,
                len: self.atom_order.len(),
            })
    }
    pub(crate) fn bond_key(&self, index: usize) -> Result<usize, GraphError> {
        self.bond_order
            .get(index)
            .copied()
            .ok_or(GraphError::IndexOutOfRange {
                kind: ElementKind::Bond,
                index,
                len: self.bond_order.len(),
            })
    }
    /// Storage key for a handle, if it still refers to a live atom of this molecule.
    fn resolve_atom(&self, id: AtomId) -> Option<usize> {
        (id.mol == self.id && self.atoms.get(id.key)?.serial == id.serial).then_some(id.key)
    }
    fn resolve_bond(&self, id: BondId) -> Option<usize> {
        (id.mol == self.id && self.bonds.get(id.key)?.serial == id.serial).then_some(id.key)
    }

    #[inline(always)]
    pub fn num_atoms(&self) -> usize {
        self.atom_order.len()
    }
    #[inline(always)]
    pub fn num_bonds(&self) -> usize {
        self.bond_order.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.atom_order.is_empty()
    }

    pub fn get_atom(&self, index: usize) -> Option<Atom<'_>> {
        self.atom_order.get(index).map(|&key| Atom::new(self, key))
    }
    pub fn get_bond(&self, index: usize) -> Option<Bond<'_>> {
        self.bond_order.get(index).map(|&key| Bond::new(self, key))
    }
    pub fn atom(&self, index: usize) -> Result<Atom<'_>, GraphError> {
        self.atom_key(index).map(|key| Atom::new(self, key))
    }
    pub fn bond(&self, index: usize) -> Result<Bond<'_>, GraphError> {
        self.bond_key(index).map(|key| Bond::new(self, key))
    }
    pub fn atom_mut(&mut self, index: usize) -> Result<AtomMut<'_>, GraphError> {
        let key = self.atom_key(index)?;
        Ok(AtomMut::new(self, key))
    }
    pub fn bond_mut(&mut self, index: usize) -> Result<BondMut<'_>, GraphError> {
        let key = self.bond_key(index)?;
        Ok(BondMut::new(self, key))
    }
    pub fn atoms(&self) -> Atoms<'_, Self> {
        Atoms::new(self)
    }
    pub fn bonds(&self) -> Bonds<'_, Self> {
        Bonds::new(self)
    }

    pub fn atom_by_id(&self, id: AtomId) -> Result<Atom<'_>, GraphError> {
        self.resolve_atom(id)
            .map(|key| Atom::new(self, key))
            .ok_or(GraphError::NotFound(ElementKind::Atom))
    }
    pub fn atom_by_id_mut(&mut self, id: AtomId) -> Result<AtomMut<'_>, GraphError> {
        let key = self
            .resolve_atom(id)
            .ok_or(GraphError::NotFound(ElementKind::Atom))?;
        Ok(AtomMut::new(self, key))
    }
    pub fn bond_by_id(&self, id: BondId) -> Result<Bond<'_>, GraphError> {
        self.resolve_bond(id)
            .map(|key| Bond::new(self, key))
            .ok_or(GraphError::NotFound(ElementKind::Bond))
    }
    pub fn bond_by_id_mut(&mut self, id: BondId) -> Result<BondMut<'_>, GraphError> {
        let key = self
            .resolve_bond(id)
            .ok_or(GraphError::NotFound(ElementKind::Bond))?;
        Ok(BondMut::new(self, key))
    }
    #[inline]
    pub fn contains_atom(&self, id: AtomId) -> bool {
        self.resolve_atom(id).is_some()
    }
    #[inline]
    pub fn contains_bond(&self, id: BondId) -> bool {
        self.resolve_bond(id).is_some()
    }
    pub fn atom_index(&self, id: AtomId) -> Result<usize, GraphError> {
        self.resolve_atom(id)
            .map(|key| self.atoms[key].index)
            .ok_or(GraphError::NotFound(ElementKind::Atom))
    }
    pub fn bond_index(&self, id: BondId) -> Result<usize, GraphError> {
        self.resolve_bond(id)
            .map(|key| self.bonds[key].index)
            .ok_or(GraphError::NotFound(ElementKind::Bond))
    }

    fn find_bond_key(&self, a: usize, b: usize) -> Option<usize> {
        self.atoms[a]
            .adjacency
            .iter()
            .find(|&&(_, n)| n == b)
            .map(|&(bond, _)| bond)
    }
    /// Find the bond between the atoms at two indices, if there is one. With multi-edges, this
    /// is the first such bond.
    pub fn find_bond(&self, a: usize, b: usize) -> Result<Option<Bond<'_>>, GraphError> {
        let a = self.atom_key(a)?;
        let b = self.atom_key(b)?;
        Ok(self.find_bond_key(a, b).map(|key| Bond::new(self, key)))
    }

    #[inline(always)]
    pub fn properties(&self) -> &PropertyMap {
        &self.props
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
    /// Parameters consulted by derived property computations, see [`ControlParam`].
    #[inline(always)]
    pub fn control_params(&self) -> &PropertyMap {
        &self.params
    }
    #[inline(always)]
    pub fn control_params_mut(&mut self) -> &mut PropertyMap {
        &mut self.params
    }

    pub fn atoms_begin(&self) -> AtomCursor {
        AtomCursor::new(self.id, 0)
    }
    pub fn atoms_end(&self) -> AtomCursor {
        AtomCursor::new(self.id, self.num_atoms())
    }
    pub fn bonds_begin(&self) -> BondCursor {
        BondCursor::new(self.id, 0)
    }
    pub fn bonds_end(&self) -> BondCursor {
        BondCursor::new(self.id, self.num_bonds())
    }
    fn check_cursor(
        &self,
        kind: ElementKind,
        mol: MolId,
        position: usize,
        len: usize,
    ) -> Result<usize, GraphError> {
        if mol == self.id && position < len {
            Ok(position)
        } else {
            Err(GraphError::InvalidCursor {
                kind,
                position,
                len,
            })
        }
    }
    pub fn atom_at(&self, cursor: AtomCursor) -> Result<Atom<'_>, GraphError> {
        let pos = self.check_cursor(
            ElementKind::Atom,
            cursor.molecule(),
            cursor.position(),
            self.num_atoms(),
        )?;
        self.atom(pos)
    }
    pub fn bond_at(&self, cursor: BondCursor) -> Result<Bond<'_>, GraphError> {
        let pos = self.check_cursor(
            ElementKind::Bond,
            cursor.molecule(),
            cursor.position(),
            self.num_bonds(),
        )?;
        self.bond(pos)
    }

    fn insert_atom(&mut self, props: PropertyMap) -> usize {
        let serial = self.next_serial();
        let index = self.atom_order.len();
        let key = self.atoms.insert(AtomEntry {
            index,
            serial,
            adjacency: SmallVec::new(),
            props,
        });
        self.atom_order.push(key);
        trace!(atom = index, "added atom");
        key
    }
    /// Insert a bond between two live atom keys without any checks.
    fn push_bond(&mut self, begin: usize, end: usize, props: PropertyMap) -> usize {
        let serial = self.next_serial();
        let index = self.bond_order.len();
        let key = self.bonds.insert(BondEntry {
            index,
            serial,
            begin,
            end,
            props,
        });
        self.bond_order.push(key);
        self.atoms[begin].adjacency.push((key, end));
        self.atoms[end].adjacency.push((key, begin));
        trace!(
            bond = index,
            begin = self.atoms[begin].index,
            end = self.atoms[end].index,
            "added bond"
        );
        key
    }
    /// Validated bond insertion. `props` is only used if a new bond is created.
    fn insert_bond(
        &mut self,
        begin: usize,
        end: usize,
        props: impl FnOnce(&Self) -> PropertyMap,
    ) -> Result<usize, GraphError> {
        let b = self.atom_key(begin)?;
        let e = self.atom_key(end)?;
        if b == e {
            return Err(GraphError::InvalidOperation("can't bond an atom to itself"));
        }
        if !self.multi_edges {
            if let Some(existing) = self.find_bond_key(b, e) {
                debug!(begin, end, bond = self.bonds[existing].index, "atoms are already bonded");
                return Ok(existing);
            }
        }
        let props = props(self);
        Ok(self.push_bond(b, e, props))
    }

    /// Add an atom with no properties at index `num_atoms()`.
    pub fn add_atom(&mut self) -> AtomMut<'_> {
        self.add_atom_with(PropertyMap::new())
    }
    pub fn add_atom_with(&mut self, props: PropertyMap) -> AtomMut<'_> {
        let key = self.insert_atom(props);
        AtomMut::new(self, key)
    }
    /// Add an atom carrying a copy of `template`'s properties. Its bonds are not copied.
    pub fn add_atom_from(&mut self, template: &Atom<'_>) -> AtomMut<'_> {
        self.add_atom_with(template.properties().clone())
    }
    /// Like [`add_atom_from`](Self::add_atom_from), with a template from this molecule.
    pub fn add_atom_copy(&mut self, template: usize) -> Result<AtomMut<'_>, GraphError> {
        let props = self.atoms[self.atom_key(template)?].props.clone();
        Ok(self.add_atom_with(props))
    }

    /// Bond the atoms at `begin` and `end`.
    ///
    /// If they're already bonded and multi-edges are disabled, the existing bond is returned
    /// unchanged.
    pub fn add_bond(&mut self, begin: usize, end: usize) -> Result<BondMut<'_>, GraphError> {
        self.add_bond_with(begin, end, PropertyMap::new())
    }
    pub fn add_bond_with(
        &mut self,
        begin: usize,
        end: usize,
        props: PropertyMap,
    ) -> Result<BondMut<'_>, GraphError> {
        let key = self.insert_bond(begin, end, |_| props)?;
        Ok(BondMut::new(self, key))
    }
    /// Add a bond carrying a copy of `template`'s properties.
    pub fn add_bond_from(
        &mut self,
        begin: usize,
        end: usize,
        template: &Bond<'_>,
    ) -> Result<BondMut<'_>, GraphError> {
        self.add_bond_with(begin, end, template.properties().clone())
    }
    /// Like [`add_bond_from`](Self::add_bond_from), with a template from this molecule.
    pub fn add_bond_copy(
        &mut self,
        begin: usize,
        end: usize,
        template: usize,
    ) -> Result<BondMut<'_>, GraphError> {
        let tkey = self.bond_key(template)?;
        let key = self.insert_bond(begin, end, |this| this.bonds[tkey].props.clone())?;
        Ok(BondMut::new(self, key))
    }

    /// Remove a set of bonds by key, then compact the bond order in one pass.
    fn unlink_bonds(&mut self, keys: &[usize]) {
        let Some(first) = keys.iter().map(|&k| self.bonds[k].index).min() else {
            return;
        };
        for &key in keys {
            let entry = self.bonds.remove(key);
            for atom in [entry.begin, entry.end] {
                let adj = &mut self.atoms[atom].adjacency;
                if let Some(pos) = adj.iter().position(|&(b, _)| b == key) {
                    adj.remove(pos);
                }
            }
            trace!(bond = entry.index, "removed bond");
        }
        let bonds = &self.bonds;
        self.bond_order.retain(|&k| bonds.contains(k));
        for (index, &key) in self.bond_order.iter().enumerate().skip(first) {
            self.bonds[key].index = index;
        }
    }

    /// Remove the bond at `index`. Later bonds shift down by one.
    pub fn remove_bond(&mut self, index: usize) -> Result<(), GraphError> {
        let key = self.bond_key(index)?;
        self.unlink_bonds(&[key]);
        Ok(())
    }
    /// Remove the atom at `index` along with every bond to it. Later atoms shift down by one.
    pub fn remove_atom(&mut self, index: usize) -> Result<(), GraphError> {
        let key = self.atom_key(index)?;
        let incident = self.atoms[key]
            .adjacency
            .iter()
            .map(|&(b, _)| b)
            .collect::<SmallVec<usize, 4>>();
        if !incident.is_empty() {
            debug!(atom = index, bonds = incident.len(), "removing incident bonds");
        }
        self.unlink_bonds(&incident);
        self.atoms.remove(key);
        self.atom_order.remove(index);
        for (i, &key) in self.atom_order.iter().enumerate().skip(index) {
            self.atoms[key].index = i;
        }
        trace!(atom = index, "removed atom");
        Ok(())
    }
    pub fn remove_atom_by_id(&mut self, id: AtomId) -> Result<(), GraphError> {
        let index = self.atom_index(id)?;
        self.remove_atom(index)
    }
    pub fn remove_bond_by_id(&mut self, id: BondId) -> Result<(), GraphError> {
        let index = self.bond_index(id)?;
        self.remove_bond(index)
    }
    /// Remove the atom under a cursor, returning a cursor to whatever now occupies its position.
    pub fn remove_atom_at(&mut self, cursor: AtomCursor) -> Result<AtomCursor, GraphError> {
        let pos = self.check_cursor(
            ElementKind::Atom,
            cursor.molecule(),
            cursor.position(),
            self.num_atoms(),
        )?;
        self.remove_atom(pos)?;
        Ok(cursor)
    }
    pub fn remove_bond_at(&mut self, cursor: BondCursor) -> Result<BondCursor, GraphError> {
        let pos = self.check_cursor(
            ElementKind::Bond,
            cursor.molecule(),
            cursor.position(),
            self.num_bonds(),
        )?;
        self.remove_bond(pos)?;
        Ok(cursor)
    }

    /// Remove every atom, bond and property. Control parameters, the multi-edge option and
    /// reaction membership are kept.
    pub fn clear(&mut self) {
        debug!(
            atoms = self.num_atoms(),
            bonds = self.num_bonds(),
            "clearing molecule"
        );
        self.atoms.clear();
        self.bonds.clear();
        self.atom_order.clear();
        self.bond_order.clear();
        self.props.clear();
    }

    /// Make this molecule a deep copy of `other`, keeping its own identity and reaction
    /// membership. Handles into the old contents stop resolving.
    pub fn assign(&mut self, other: &Molecule) {
        let base = self.serial;
        self.atoms = other.atoms.clone();
        self.bonds = other.bonds.clone();
        for (_, atom) in self.atoms.iter_mut() {
            atom.serial += base;
        }
        for (_, bond) in self.bonds.iter_mut() {
            bond.serial += base;
        }
        self.serial = base + other.serial;
        self.atom_order.clone_from(&other.atom_order);
        self.bond_order.clone_from(&other.bond_order);
        self.multi_edges = other.multi_edges;
        self.props.clone_from(&other.props);
        self.params.clone_from(&other.params);
        debug!(
            atoms = self.num_atoms(),
            bonds = self.num_bonds(),
            "assigned molecule"
        );
    }

    /// Append copies of `other`'s atoms and bonds. Molecule-level properties are not merged.
    pub fn append(&mut self, other: &Molecule) {
        if other.is_empty() {
            return;
        }
        self.reserve(other.num_atoms(), other.num_bonds());
        let keys = other
            .atom_order
            .iter()
            .map(|&k| self.insert_atom(other.atoms[k].props.clone()))
            .collect::<Vec<_>>();
        for &k in &other.bond_order {
            let bond = &other.bonds[k];
            let begin = keys[other.atoms[bond.begin].index];
            let end = keys[other.atoms[bond.end].index];
            self.push_bond(begin, end, bond.props.clone());
        }
        debug!(
            atoms = other.num_atoms(),
            bonds = other.num_bonds(),
            "appended molecule"
        );
    }
    /// Append a copy of this molecule to itself, doubling every atom and bond.
    pub fn append_self(&mut self) {
        let snapshot = self.clone();
        self.append(&snapshot);
    }

    /// Append copies of a fragment's atoms and bonds. Fragment properties are not copied.
    pub fn append_fragment(&mut self, frag: &Fragment<'_>) {
        self.reserve(frag.num_atoms(), frag.num_bonds());
        let keys = frag
            .atoms()
            .map(|atom| (atom.id(), self.insert_atom(atom.properties().clone())))
            .collect::<HashMap<_, _>>();
        for bond in frag.bonds() {
            let begin = keys.get(&bond.begin().id());
            let end = keys.get(&bond.end().id());
            let (Some(&begin), Some(&end)) = (begin, end) else {
                debug!(bond = bond.index(), "skipping bond with unselected endpoint");
                continue;
            };
            self.push_bond(begin, end, bond.properties().clone());
        }
    }
    /// Replace this molecule's atoms, bonds and properties with copies of a fragment's atoms and
    /// bonds.
    pub fn assign_fragment(&mut self, frag: &Fragment<'_>) {
        self.clear();
        self.append_fragment(frag);
    }
    pub fn from_fragment(frag: &Fragment<'_>) -> Self {
        let mut out = Self::new();
        out.append_fragment(frag);
        out
    }

    #[inline(always)]
    pub fn is_reaction_component(&self) -> bool {
        self.membership.is_some()
    }
    /// The reaction this molecule is a component of.
    pub fn reaction(&self) -> Result<ReactionId, GraphError> {
        self.membership
            .map(|m| m.reaction)
            .ok_or(GraphError::InvalidOperation(
                "molecule is not a reaction component",
            ))
    }
    /// Role in the owning reaction, [`ReactionRole::None`] for free molecules.
    pub fn reaction_role(&self) -> ReactionRole {
        self.membership.map_or(ReactionRole::None, |m| m.role)
    }
    pub(crate) fn set_membership(&mut self, membership: Option<Membership>) {
        self.membership = membership;
    }
}
impl Default for Molecule {
    fn default() -> Self {
        Self::new()
    }
}
impl Clone for Molecule {
    fn clone(&self) -> Self {
        Self {
            id: MolId::next(),
            atoms: self.atoms.clone(),
            bonds: self.bonds.clone(),
            atom_order: self.atom_order.clone(),
            bond_order: self.bond_order.clone(),
            serial: self.serial,
            multi_edges: self.multi_edges,
            props: self.props.clone(),
            params: self.params.clone(),
            membership: None,
        }
    }
    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}
impl AddAssign<&Molecule> for Molecule {
    fn add_assign(&mut self, rhs: &Molecule) {
        self.append(rhs);
    }
}
impl AddAssign<&Fragment<'_>> for Molecule {
    fn add_assign(&mut self, rhs: &Fragment<'_>) {
        self.append_fragment(rhs);
    }
}
impl From<&Fragment<'_>> for Molecule {
    fn from(frag: &Fragment<'_>) -> Self {
        Self::from_fragment(frag)
    }
}
impl MolecularGraph for Molecule {
    #[inline(always)]
    fn num_atoms(&self) -> usize {
        self.atom_order.len()
    }
    #[inline(always)]
    fn num_bonds(&self) -> usize {
        self.bond_order.len()
    }
    fn get_atom(&self, index: usize) -> Option<Atom<'_>> {
        Molecule::get_atom(self, index)
    }
    fn get_bond(&self, index: usize) -> Option<Bond<'_>> {
        Molecule::get_bond(self, index)
    }
    fn atom_index(&self, atom: AtomId) -> Result<usize, GraphError> {
        Molecule::atom_index(self, atom)
    }
    fn bond_index(&self, bond: BondId) -> Result<usize, GraphError> {
        Molecule::bond_index(self, bond)
    }
    fn contains_atom(&self, atom: AtomId) -> bool {
        self.resolve_atom(atom).is_some()
    }
    fn contains_bond(&self, bond: BondId) -> bool {
        self.resolve_bond(bond).is_some()
    }
    #[inline(always)]
    fn properties(&self) -> &PropertyMap {
        &self.props
    }
    #[inline(always)]
    fn control_params(&self) -> Option<&PropertyMap> {
        Some(&self.params)
    }
}
