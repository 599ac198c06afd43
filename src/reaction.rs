//! Reactions: molecules grouped by the role they play.

use crate::error::*;
use crate::handle::*;
use crate::molecule::{Membership, Molecule};
use crate::property::*;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Deref, DerefMut};
use tracing::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReactionRole {
    /// Not part of a reaction
    #[default]
    None,
    Reactant,
    Agent,
    Product,
}
impl ReactionRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Reactant => "reactant",
            Self::Agent => "agent",
            Self::Product => "product",
        }
    }
}
impl Display for ReactionRole {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of component molecules, each tagged with a [`ReactionRole`].
///
/// Roles are owned by the reaction. Components also carry their membership so a molecule can
/// report it, and mutable access goes through [`ComponentMut`], which restores that membership
/// when it's dropped.
#[derive(Debug)]
pub struct Reaction {
    id: ReactionId,
    components: Vec<(ReactionRole, Molecule)>,
    props: PropertyMap,
}
impl Reaction {
    pub fn new() -> Self {
        Self {
            id: ReactionId::next(),
            components: Vec::new(),
            props: PropertyMap::new(),
        }
    }
    #[inline(always)]
    pub fn id(&self) -> ReactionId {
        self.id
    }

    fn check_role(role: ReactionRole) -> Result<(), GraphError> {
        if role == ReactionRole::None {
            Err(GraphError::InvalidOperation(
                "reaction components need a role",
            ))
        } else {
            Ok(())
        }
    }
    fn check_index(&self, index: usize) -> Result<(), GraphError> {
        if index < self.components.len() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                kind: ElementKind::Component,
                index,
                len: self.components.len(),
            })
        }
    }

    /// Add an empty component.
    pub fn add_component(&mut self, role: ReactionRole) -> Result<ComponentMut<'_>, GraphError> {
        self.add_molecule(role, Molecule::new())
    }
    /// Take ownership of a molecule as a new component.
    pub fn add_molecule(
        &mut self,
        role: ReactionRole,
        mol: Molecule,
    ) -> Result<ComponentMut<'_>, GraphError> {
        Self::check_role(role)?;
        debug!(%role, index = self.components.len(), "added reaction component");
        let index = self.components.len();
        self.components.push((role, mol));
        Ok(ComponentMut::new(self.id, &mut self.components[index]))
    }

    #[inline(always)]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }
    pub fn num_components_with_role(&self, role: ReactionRole) -> usize {
        self.components_with_role(role).count()
    }
    pub fn component(&self, index: usize) -> Result<&Molecule, GraphError> {
        self.check_index(index)?;
        Ok(&self.components[index].1)
    }
    /// Mutable access to a component. The component keeps its role and membership even if the
    /// molecule is replaced through the guard.
    pub fn component_mut(&mut self, index: usize) -> Result<ComponentMut<'_>, GraphError> {
        self.check_index(index)?;
        Ok(ComponentMut::new(self.id, &mut self.components[index]))
    }
    pub fn component_role(&self, index: usize) -> Result<ReactionRole, GraphError> {
        self.check_index(index)?;
        Ok(self.components[index].0)
    }
    pub fn components(&self) -> impl ExactSizeIterator<Item = &Molecule> {
        self.components.iter().map(|(_, mol)| mol)
    }
    pub fn components_with_role(&self, role: ReactionRole) -> impl Iterator<Item = &Molecule> {
        self.components
            .iter()
            .filter(move |(r, _)| *r == role)
            .map(|(_, mol)| mol)
    }
    /// Detach a component, which becomes a free molecule. Later components shift down by one.
    pub fn remove_component(&mut self, index: usize) -> Result<Molecule, GraphError> {
        self.check_index(index)?;
        let (_, mut mol) = self.components.remove(index);
        mol.set_membership(None);
        debug!(index, "removed reaction component");
        Ok(mol)
    }
    pub fn set_component_role(
        &mut self,
        index: usize,
        role: ReactionRole,
    ) -> Result<(), GraphError> {
        Self::check_role(role)?;
        self.check_index(index)?;
        self.components[index].0 = role;
        stamp(self.id, &mut self.components[index]);
        Ok(())
    }
    /// Remove every component. Properties are kept.
    pub fn clear(&mut self) {
        self.components.clear();
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
}
impl Default for Reaction {
    fn default() -> Self {
        Self::new()
    }
}
impl Clone for Reaction {
    /// Deep copy under a new identity. The copied components belong to the copy.
    fn clone(&self) -> Self {
        let mut out = Self {
            id: ReactionId::next(),
            components: self.components.clone(),
            props: self.props.clone(),
        };
        for entry in &mut out.components {
            stamp(out.id, entry);
        }
        out
    }
}

/// Write the reaction's membership onto a component.
fn stamp(reaction: ReactionId, entry: &mut (ReactionRole, Molecule)) {
    let (role, mol) = entry;
    mol.set_membership(Some(Membership {
        reaction,
        role: *role,
    }));
}

/// Mutable access to one reaction component. Dereferences to the [`Molecule`], and stamps the
/// reaction's membership back onto it when dropped, so replacing or swapping the molecule can't
/// detach it from the reaction.
pub struct ComponentMut<'r> {
    reaction: ReactionId,
    entry: &'r mut (ReactionRole, Molecule),
}
impl<'r> ComponentMut<'r> {
    fn new(reaction: ReactionId, entry: &'r mut (ReactionRole, Molecule)) -> Self {
        stamp(reaction, entry);
        Self { reaction, entry }
    }
    #[inline(always)]
    pub fn role(&self) -> ReactionRole {
        self.entry.0
    }
}
impl Deref for ComponentMut<'_> {
    type Target = Molecule;

    fn deref(&self) -> &Molecule {
        &self.entry.1
    }
}
impl DerefMut for ComponentMut<'_> {
    fn deref_mut(&mut self) -> &mut Molecule {
        &mut self.entry.1
    }
}
impl Drop for ComponentMut<'_> {
    fn drop(&mut self) {
        stamp(self.reaction, self.entry);
    }
}
impl Debug for ComponentMut<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("ComponentMut")
            .field("reaction", &self.reaction)
            .field("role", &self.entry.0)
            .field("molecule", &self.entry.1)
            .finish()
    }
}
