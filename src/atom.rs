//! Atom views. An [`Atom`] borrows its molecule immutably, an [`AtomMut`] borrows it mutably
//! but can only touch the atom's properties.

use crate::bond::Bond;
use crate::derived;
use crate::element::Element;
use crate::error::*;
use crate::molecule::{AtomEntry, Molecule};
use crate::property::*;
use fmtastic::Superscript;
use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

pub use crate::handle::AtomId;

#[derive(Clone, Copy)]
pub struct Atom<'m> {
    mol: &'m Molecule,
    key: usize,
}
impl<'m> Atom<'m> {
    #[inline(always)]
    pub(crate) fn new(mol: &'m Molecule, key: usize) -> Self {
        Self { mol, key }
    }
    #[inline(always)]
    fn entry(&self) -> &'m AtomEntry {
        &self.mol.atoms[self.key]
    }
    #[inline(always)]
    pub(crate) fn key(&self) -> usize {
        self.key
    }

    #[inline(always)]
    pub fn molecule(&self) -> &'m Molecule {
        self.mol
    }
    pub fn id(&self) -> AtomId {
        AtomId {
            mol: self.mol.id(),
            key: self.key,
            serial: self.entry().serial,
        }
    }
    /// Current position in the molecule's atom sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.entry().index
    }

    /// Number of bonds to this atom.
    #[inline]
    pub fn num_bonds(&self) -> usize {
        self.entry().adjacency.len()
    }
    /// Number of bonded neighbors, the same as [`num_bonds`](Self::num_bonds).
    #[inline]
    pub fn num_atoms(&self) -> usize {
        self.entry().adjacency.len()
    }
    pub fn bonds(&self) -> impl ExactSizeIterator<Item = Bond<'m>> + 'm {
        let mol = self.mol;
        self.entry()
            .adjacency
            .iter()
            .map(move |&(b, _)| Bond::new(mol, b))
    }
    /// Bonded neighbors, in the same order as [`bonds`](Self::bonds).
    pub fn atoms(&self) -> impl ExactSizeIterator<Item = Atom<'m>> + 'm {
        let mol = self.mol;
        self.entry()
            .adjacency
            .iter()
            .map(move |&(_, a)| Atom::new(mol, a))
    }
    pub fn bond(&self, i: usize) -> Result<Bond<'m>, GraphError> {
        let adj = &self.entry().adjacency;
        adj.get(i)
            .map(|&(b, _)| Bond::new(self.mol, b))
            .ok_or(GraphError::IndexOutOfRange {
                kind: ElementKind::Bond,
                index: i,
                len: adj.len(),
            })
    }
    pub fn neighbor(&self, i: usize) -> Result<Atom<'m>, GraphError> {
        let adj = &self.entry().adjacency;
        adj.get(i)
            .map(|&(_, a)| Atom::new(self.mol, a))
            .ok_or(GraphError::IndexOutOfRange {
                kind: ElementKind::Atom,
                index: i,
                len: adj.len(),
            })
    }
    /// The bond joining this atom to `other`, if any.
    pub fn find_bond_to_atom(&self, other: &Atom<'_>) -> Option<Bond<'m>> {
        if self.mol.id() != other.mol.id() || self.key == other.key {
            return None;
        }
        self.entry()
            .adjacency
            .iter()
            .find(|&&(_, a)| a == other.key)
            .map(|&(b, _)| Bond::new(self.mol, b))
    }

    #[inline(always)]
    pub fn properties(&self) -> &'m PropertyMap {
        &self.entry().props
    }
    #[inline]
    pub fn property<T: Any>(&self, key: PropertyKey) -> Result<&'m T, PropertyError> {
        self.properties().get(key)
    }
    #[inline]
    pub fn num_properties(&self) -> usize {
        self.properties().len()
    }

    /// Atomic number from [`AtomProperty::ATOMIC_NUMBER`], falling back to the element symbol.
    /// Unrecognized symbols resolve to 0.
    pub fn atomic_number(&self) -> Result<u8, PropertyError> {
        derived::atomic_number(self)
    }
    /// Stored implicit hydrogen count, or one computed from standard valences.
    pub fn implicit_hydrogen_count(&self) -> Result<usize, PropertyError> {
        derived::implicit_hydrogen_count(self)
    }
}
impl PartialEq for Atom<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.mol.id() == other.mol.id() && self.key == other.key
    }
}
impl Eq for Atom<'_> {}
impl Hash for Atom<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mol.id().hash(state);
        self.key.hash(state);
    }
}
impl Debug for Atom<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Atom")
            .field("mol", &self.mol.id())
            .field("index", &self.index())
            .field("properties", self.properties())
            .finish()
    }
}
impl Display for Atom<'_> {
    /// Element symbol with isotope and charge superscripts. The alternate form prints the
    /// element name instead.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let props = self.properties();
        let number = props.get::<u8>(AtomProperty::ATOMIC_NUMBER).ok().copied();
        let element = number.and_then(Element::get);
        if let Some(&isotope) = props.get::<u16>(AtomProperty::ISOTOPE).ok() {
            if !f.alternate() {
                write!(f, "{}", Superscript(isotope))?;
            }
        }
        match (element, props.get::<String>(AtomProperty::SYMBOL).ok()) {
            (Some(elem), _) if f.alternate() => f.write_str(elem.name)?,
            (Some(elem), _) => f.write_str(elem.symbol)?,
            (None, Some(sym)) => f.write_str(sym)?,
            (None, None) => f.write_str("*")?,
        }
        if let Some(&charge) = props.get::<i8>(AtomProperty::FORMAL_CHARGE).ok() {
            if charge != 0 {
                write!(f, "{:+}", Superscript(charge))?;
            }
        }
        Ok(())
    }
}

/// Mutable access to one atom's properties.
pub struct AtomMut<'m> {
    mol: &'m mut Molecule,
    key: usize,
}
impl<'m> AtomMut<'m> {
    #[inline(always)]
    pub(crate) fn new(mol: &'m mut Molecule, key: usize) -> Self {
        Self { mol, key }
    }
    #[inline]
    pub fn as_atom(&self) -> Atom<'_> {
        Atom::new(self.mol, self.key)
    }
    /// Give up mutable access, keeping the borrow.
    #[inline]
    pub fn into_atom(self) -> Atom<'m> {
        Atom::new(self.mol, self.key)
    }
    pub fn id(&self) -> AtomId {
        self.as_atom().id()
    }
    pub fn index(&self) -> usize {
        self.as_atom().index()
    }
    #[inline]
    pub fn properties(&self) -> &PropertyMap {
        &self.mol.atoms[self.key].props
    }
    #[inline]
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.mol.atoms[self.key].props
    }
    pub fn set_property<T: PropertyValue>(&mut self, key: PropertyKey, value: T) -> &mut Self {
        self.properties_mut().set(key, value);
        self
    }
    /// Builder form of [`set_property`](Self::set_property).
    pub fn with_property<T: PropertyValue>(mut self, key: PropertyKey, value: T) -> Self {
        self.properties_mut().set(key, value);
        self
    }
    pub fn remove_property(&mut self, key: PropertyKey) -> bool {
        self.properties_mut().remove(key)
    }
}
impl Debug for AtomMut<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.as_atom(), f)
    }
}
