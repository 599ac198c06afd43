//! Bond views, mirroring the atom views.

use crate::atom::Atom;
use crate::molecule::{BondEntry, Molecule};
use crate::property::*;
use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

pub use crate::handle::BondId;

#[derive(Clone, Copy)]
pub struct Bond<'m> {
    mol: &'m Molecule,
    key: usize,
}
impl<'m> Bond<'m> {
    #[inline(always)]
    pub(crate) fn new(mol: &'m Molecule, key: usize) -> Self {
        Self { mol, key }
    }
    #[inline(always)]
    fn entry(&self) -> &'m BondEntry {
        &self.mol.bonds[self.key]
    }

    #[inline(always)]
    pub fn molecule(&self) -> &'m Molecule {
        self.mol
    }
    pub fn id(&self) -> BondId {
        BondId {
            mol: self.mol.id(),
            key: self.key,
            serial: self.entry().serial,
        }
    }
    #[inline]
    pub fn index(&self) -> usize {
        self.entry().index
    }
    #[inline]
    pub fn begin(&self) -> Atom<'m> {
        Atom::new(self.mol, self.entry().begin)
    }
    #[inline]
    pub fn end(&self) -> Atom<'m> {
        Atom::new(self.mol, self.entry().end)
    }
    /// Both endpoints, in creation order.
    #[inline]
    pub fn atoms(&self) -> [Atom<'m>; 2] {
        [self.begin(), self.end()]
    }
    pub fn contains_atom(&self, atom: &Atom<'_>) -> bool {
        let entry = self.entry();
        self.mol.id() == atom.molecule().id()
            && (entry.begin == atom.key() || entry.end == atom.key())
    }
    /// The endpoint opposite to `atom`, or `None` if `atom` isn't an endpoint.
    pub fn neighbor(&self, atom: &Atom<'_>) -> Option<Atom<'m>> {
        if !self.contains_atom(atom) {
            return None;
        }
        let entry = self.entry();
        let other = if entry.begin == atom.key() {
            entry.end
        } else {
            entry.begin
        };
        Some(Atom::new(self.mol, other))
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
    /// Bond order, counting a missing order as a single bond.
    pub fn order(&self) -> Result<usize, PropertyError> {
        self.properties()
            .get_or(BondProperty::ORDER, &1)
            .copied()
    }
}
impl PartialEq for Bond<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.mol.id() == other.mol.id() && self.key == other.key
    }
}
impl Eq for Bond<'_> {}
impl Hash for Bond<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mol.id().hash(state);
        self.key.hash(state);
    }
}
impl Debug for Bond<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Bond")
            .field("mol", &self.mol.id())
            .field("index", &self.index())
            .field("begin", &self.begin().index())
            .field("end", &self.end().index())
            .field("properties", self.properties())
            .finish()
    }
}
impl Display for Bond<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let sym = match self.order() {
            Ok(2) => '=',
            Ok(3) => '#',
            Ok(4) => '$',
            _ => '-',
        };
        write!(f, "{}{sym}{}", self.begin().index(), self.end().index())
    }
}

/// Mutable access to one bond's properties.
pub struct BondMut<'m> {
    mol: &'m mut Molecule,
    key: usize,
}
impl<'m> BondMut<'m> {
    #[inline(always)]
    pub(crate) fn new(mol: &'m mut Molecule, key: usize) -> Self {
        Self { mol, key }
    }
    #[inline]
    pub fn as_bond(&self) -> Bond<'_> {
        Bond::new(self.mol, self.key)
    }
    #[inline]
    pub fn into_bond(self) -> Bond<'m> {
        Bond::new(self.mol, self.key)
    }
    pub fn id(&self) -> BondId {
        self.as_bond().id()
    }
    pub fn index(&self) -> usize {
        self.as_bond().index()
    }
    #[inline]
    pub fn properties(&self) -> &PropertyMap {
        &self.mol.bonds[self.key].props
    }
    #[inline]
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.mol.bonds[self.key].props
    }
    pub fn set_property<T: PropertyValue>(&mut self, key: PropertyKey, value: T) -> &mut Self {
        self.properties_mut().set(key, value);
        self
    }
    pub fn with_property<T: PropertyValue>(mut self, key: PropertyKey, value: T) -> Self {
        self.properties_mut().set(key, value);
        self
    }
    pub fn remove_property(&mut self, key: PropertyKey) -> bool {
        self.properties_mut().remove(key)
    }
}
impl Debug for BondMut<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.as_bond(), f)
    }
}
