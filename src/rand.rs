//! Random molecules and edits, for exercising the mutation protocol.

use crate::prelude::*;
use rand::prelude::*;

const ELEMENTS: &[&str] = &["C", "C", "C", "C", "N", "O", "O", "S", "Cl", "H"];

/// Distribution of connected molecules with up to `max_atoms` atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomMolecule {
    pub max_atoms: usize,
    /// Chance for each atom past the first few to close a ring
    pub ring_chance: f64,
    /// Chance for a bond to be a double bond
    pub double_chance: f64,
}
impl Default for RandomMolecule {
    fn default() -> Self {
        Self {
            max_atoms: 20,
            ring_chance: 0.1,
            double_chance: 0.1,
        }
    }
}
impl RandomMolecule {
    fn order<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if rng.gen_bool(self.double_chance) {
            2
        } else {
            1
        }
    }
}
impl Distribution<Molecule> for RandomMolecule {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Molecule {
        let count = rng.gen_range(1..=self.max_atoms.max(1));
        let mut mol = Molecule::with_capacity(count, count + count / 4);
        for i in 0..count {
            let symbol = ELEMENTS.choose(rng).copied().unwrap_or("C");
            mol.add_atom()
                .set_property(AtomProperty::SYMBOL, symbol.to_string());
            if i == 0 {
                continue;
            }
            let parent = rng.gen_range(0..i);
            let order = self.order(rng);
            // indices are in range and distinct, so this can't fail
            if let Ok(mut bond) = mol.add_bond(parent, i) {
                bond.set_property(BondProperty::ORDER, order);
            }
            if i > 2 && rng.gen_bool(self.ring_chance) {
                let other = rng.gen_range(0..i - 1);
                // skipping the parent keeps this a new bond, which can't fail either
                if other != parent {
                    if let Ok(mut bond) = mol.add_bond(other, i) {
                        bond.set_property(BondProperty::ORDER, 1usize);
                    }
                }
            }
        }
        mol
    }
}

/// A single structural edit. Indices are reduced modulo the current counts when applied, so any
/// mutation can be applied to any molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddAtom(&'static str),
    AddBond(usize, usize),
    RemoveAtom(usize),
    RemoveBond(usize),
    Clear,
}
impl Mutation {
    /// Apply this edit. Edits that don't make sense for the molecule's current shape, like
    /// removing a bond from a molecule without bonds, do nothing.
    pub fn apply(self, mol: &mut Molecule) -> Result<(), GraphError> {
        let atoms = mol.num_atoms();
        let bonds = mol.num_bonds();
        match self {
            Self::AddAtom(symbol) => {
                mol.add_atom()
                    .set_property(AtomProperty::SYMBOL, symbol.to_string());
            }
            Self::AddBond(a, b) if atoms > 1 => {
                let a = a % atoms;
                let b = b % atoms;
                if a != b {
                    mol.add_bond(a, b)?;
                }
            }
            Self::RemoveAtom(a) if atoms > 0 => mol.remove_atom(a % atoms)?,
            Self::RemoveBond(b) if bonds > 0 => mol.remove_bond(b % bonds)?,
            Self::Clear => mol.clear(),
            _ => {}
        }
        Ok(())
    }
}

/// Distribution of [`Mutation`]s, weighted towards growth so molecules don't stay empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomMutation;
impl Distribution<Mutation> for RandomMutation {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Mutation {
        match rng.gen_range(0..100) {
            0..=34 => Mutation::AddAtom(ELEMENTS.choose(rng).copied().unwrap_or("C")),
            35..=69 => Mutation::AddBond(rng.gen(), rng.gen()),
            70..=84 => Mutation::RemoveAtom(rng.gen()),
            85..=98 => Mutation::RemoveBond(rng.gen()),
            _ => Mutation::Clear,
        }
    }
}
