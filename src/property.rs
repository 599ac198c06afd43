//! Typed, extensible key/value storage attached to atoms, bonds, molecules and reactions.

use smallvec::SmallVec;
use std::any::{type_name, Any};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Ids below this are reserved for the built-in keys.
const FIRST_USER_KEY: u32 = 1024;

/// Identifier for a property. Two keys are equal iff their ids are equal, the name is only
/// carried along for diagnostics.
#[derive(Clone, Copy)]
pub struct PropertyKey {
    id: u32,
    name: &'static str,
}
impl PropertyKey {
    const fn builtin(id: u32, name: &'static str) -> Self {
        Self { id, name }
    }
    /// Allocate a fresh key, distinct from every built-in and every previously allocated key.
    pub fn alloc(name: &'static str) -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(FIRST_USER_KEY);
        Self {
            id: NEXT.fetch_add(1, Ordering::Relaxed),
            name,
        }
    }
    #[inline(always)]
    pub const fn id(self) -> u32 {
        self.id
    }
    #[inline(always)]
    pub const fn name(self) -> &'static str {
        self.name
    }
}
impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for PropertyKey {}
impl Hash for PropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
impl Debug for PropertyKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Keys stored on atoms.
pub struct AtomProperty;
impl AtomProperty {
    /// Element symbol, `String`
    pub const SYMBOL: PropertyKey = PropertyKey::builtin(1, "symbol");
    /// Atomic number, `u8`. Takes precedence over [`SYMBOL`](Self::SYMBOL).
    pub const ATOMIC_NUMBER: PropertyKey = PropertyKey::builtin(2, "atomic number");
    /// Formal charge, `i8`
    pub const FORMAL_CHARGE: PropertyKey = PropertyKey::builtin(3, "formal charge");
    /// Mass number, `u16`
    pub const ISOTOPE: PropertyKey = PropertyKey::builtin(4, "isotope");
    /// Implicit hydrogens, `usize`. Computed from standard valences if absent.
    pub const IMPLICIT_HYDROGEN_COUNT: PropertyKey =
        PropertyKey::builtin(5, "implicit hydrogen count");
    /// Free-form label, `String`
    pub const NAME: PropertyKey = PropertyKey::builtin(6, "atom name");
}

/// Keys stored on bonds.
pub struct BondProperty;
impl BondProperty {
    /// Bond order, `usize`. Missing orders count as single bonds.
    pub const ORDER: PropertyKey = PropertyKey::builtin(16, "order");
}

pub struct AtomContainerProperty;
impl AtomContainerProperty {
    /// Number of atoms, `usize`
    pub const ATOM_COUNT: PropertyKey = PropertyKey::builtin(32, "atom count");
}

pub struct BondContainerProperty;
impl BondContainerProperty {
    /// Number of bonds, `usize`
    pub const BOND_COUNT: PropertyKey = PropertyKey::builtin(48, "bond count");
}

/// Keys stored on whole graphs. Everything except [`NAME`](Self::NAME) can be derived when it
/// isn't stored.
pub struct MolecularGraphProperty;
impl MolecularGraphProperty {
    /// `String`
    pub const NAME: PropertyKey = PropertyKey::builtin(64, "name");
    /// Atoms including implicit hydrogens, `usize`
    pub const TOTAL_ATOM_COUNT: PropertyKey = PropertyKey::builtin(65, "total atom count");
    /// Bonds including those to implicit hydrogens, `usize`
    pub const TOTAL_BOND_COUNT: PropertyKey = PropertyKey::builtin(66, "total bond count");
    /// `usize`
    pub const H_DONOR_ATOM_COUNT: PropertyKey = PropertyKey::builtin(67, "H-donor atom count");
    /// `usize`
    pub const H_ACCEPTOR_ATOM_COUNT: PropertyKey =
        PropertyKey::builtin(68, "H-acceptor atom count");
    /// Structure hash, `u64`
    pub const HASH_CODE: PropertyKey = PropertyKey::builtin(69, "hash code");
}

/// Keys for the control parameters that tune derived properties.
pub struct ControlParam;
impl ControlParam {
    /// Atomic numbers that can donate hydrogen bonds, `Vec<u8>`
    pub const H_DONOR_ELEMENTS: PropertyKey = PropertyKey::builtin(96, "H-donor elements");
    /// Atomic numbers that can accept hydrogen bonds, `Vec<u8>`
    pub const H_ACCEPTOR_ELEMENTS: PropertyKey = PropertyKey::builtin(97, "H-acceptor elements");
    /// [`AtomHashFlags`](crate::derived::AtomHashFlags)
    pub const HASH_CODE_ATOM_FLAGS: PropertyKey = PropertyKey::builtin(98, "hash atom flags");
    /// [`BondHashFlags`](crate::derived::BondHashFlags)
    pub const HASH_CODE_BOND_FLAGS: PropertyKey = PropertyKey::builtin(99, "hash bond flags");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("property {0} is not set")]
    Missing(PropertyKey),
    #[error("property {key} holds a {found}, not a {expected}")]
    TypeMismatch {
        key: PropertyKey,
        expected: &'static str,
        found: &'static str,
    },
}

/// Anything that can be stored in a [`PropertyMap`].
pub trait PropertyValue: Any + Debug + Send + Sync {
    fn clone_value(&self) -> Box<dyn PropertyValue>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn type_name(&self) -> &'static str;
}
impl<T: Any + Clone + Debug + Send + Sync> PropertyValue for T {
    fn clone_value(&self) -> Box<dyn PropertyValue> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Downcast a boxed value, reporting the stored type on mismatch.
pub(crate) fn downcast<T: Any>(
    key: PropertyKey,
    value: Box<dyn PropertyValue>,
) -> Result<T, PropertyError> {
    let found = value.type_name();
    value
        .into_any()
        .downcast::<T>()
        .map(|v| *v)
        .map_err(|_| PropertyError::TypeMismatch {
            key,
            expected: type_name::<T>(),
            found,
        })
}

/// Insertion-ordered map from [`PropertyKey`]s to values of any type.
///
/// Maps are small in practice, so entries live inline and lookups are linear.
#[derive(Debug)]
pub struct PropertyMap {
    entries: SmallVec<(PropertyKey, Box<dyn PropertyValue>), 4>,
}
impl PropertyMap {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    fn position(&self, key: PropertyKey) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    /// Set a value, replacing whatever was stored under the key. Returns `true` if an old value
    /// was replaced.
    pub fn set<T: PropertyValue>(&mut self, key: PropertyKey, value: T) -> bool {
        self.set_boxed(key, Box::new(value))
    }
    pub fn set_boxed(&mut self, key: PropertyKey, value: Box<dyn PropertyValue>) -> bool {
        if let Some(idx) = self.position(key) {
            self.entries[idx].1 = value;
            true
        } else {
            self.entries.push((key, value));
            false
        }
    }

    pub fn get<T: Any>(&self, key: PropertyKey) -> Result<&T, PropertyError> {
        let value = self.get_dyn(key).ok_or(PropertyError::Missing(key))?;
        value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| PropertyError::TypeMismatch {
                key,
                expected: type_name::<T>(),
                found: value.type_name(),
            })
    }
    pub fn get_mut<T: Any>(&mut self, key: PropertyKey) -> Result<&mut T, PropertyError> {
        let idx = self.position(key).ok_or(PropertyError::Missing(key))?;
        let value = &mut *self.entries[idx].1;
        let found = value.type_name();
        value
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(PropertyError::TypeMismatch {
                key,
                expected: type_name::<T>(),
                found,
            })
    }
    /// Get a value, falling back to `default` only if the key is unset. A value of the wrong type
    /// is still an error.
    pub fn get_or<'a, T: Any>(
        &'a self,
        key: PropertyKey,
        default: &'a T,
    ) -> Result<&'a T, PropertyError> {
        match self.get(key) {
            Err(PropertyError::Missing(_)) => Ok(default),
            res => res,
        }
    }
    pub fn get_dyn(&self, key: PropertyKey) -> Option<&dyn PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| &**v)
    }

    #[inline]
    pub fn contains(&self, key: PropertyKey) -> bool {
        self.position(key).is_some()
    }
    /// Remove a value, returning whether one was present.
    pub fn remove(&mut self, key: PropertyKey) -> bool {
        if let Some(idx) = self.position(key) {
            self.entries.remove(idx);
            true
        } else {
            false
        }
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn clear(&mut self) {
        self.entries.clear();
    }
    pub fn keys(&self) -> impl ExactSizeIterator<Item = PropertyKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (PropertyKey, &dyn PropertyValue)> {
        self.entries.iter().map(|(k, v)| (*k, &**v))
    }
    /// Copy every entry of `other` into this map, overwriting values under shared keys.
    pub fn merge(&mut self, other: &PropertyMap) {
        for (key, value) in other.iter() {
            self.set_boxed(key, value.clone_value());
        }
    }
}
impl Default for PropertyMap {
    fn default() -> Self {
        Self::new()
    }
}
impl Clone for PropertyMap {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (*k, (**v).clone_value()))
                .collect(),
        }
    }
}
