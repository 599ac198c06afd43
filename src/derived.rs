//! Properties computed on demand from the current structure.
//!
//! These back [`MolecularGraph::property`] for keys that aren't stored, and can also be called
//! directly.

use crate::atom::Atom;
use crate::element::Element;
use crate::graph::{incident_bonds, MolecularGraph};
use crate::property::*;
use itertools::Itertools;
use modular_bitfield::prelude::*;
use smallvec::SmallVec;
use std::any::Any;
use std::hash::BuildHasher;
use tracing::*;

/// N, O and S
const DEFAULT_H_DONORS: &[u8] = &[7, 8, 16];
/// N and O
const DEFAULT_H_ACCEPTORS: &[u8] = &[7, 8];

/// Atom invariants that go into a [hash code](hash_code).
#[allow(clippy::identity_op)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomHashFlags {
    pub element: bool,
    pub charge: bool,
    pub isotope: bool,
    pub degree: bool,
    pub hydrogen_count: bool,
    #[skip]
    __: B3,
}
impl Default for AtomHashFlags {
    fn default() -> Self {
        Self::new()
            .with_element(true)
            .with_charge(true)
            .with_isotope(true)
            .with_degree(true)
            .with_hydrogen_count(true)
    }
}

/// Bond invariants that go into a [hash code](hash_code).
#[allow(clippy::identity_op)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondHashFlags {
    pub order: bool,
    #[skip]
    __: B7,
}
impl Default for BondHashFlags {
    fn default() -> Self {
        Self::new().with_order(true)
    }
}

/// Compute a derived graph property. Keys without a derivation are reported as missing.
pub(crate) fn compute<G: MolecularGraph + ?Sized>(
    graph: &G,
    key: PropertyKey,
) -> Result<Box<dyn PropertyValue>, PropertyError> {
    let value: Box<dyn PropertyValue> = if key == AtomContainerProperty::ATOM_COUNT {
        Box::new(graph.num_atoms())
    } else if key == BondContainerProperty::BOND_COUNT {
        Box::new(graph.num_bonds())
    } else if key == MolecularGraphProperty::TOTAL_ATOM_COUNT {
        Box::new(total_atom_count(graph)?)
    } else if key == MolecularGraphProperty::TOTAL_BOND_COUNT {
        Box::new(total_bond_count(graph)?)
    } else if key == MolecularGraphProperty::H_DONOR_ATOM_COUNT {
        Box::new(h_donor_atom_count(graph)?)
    } else if key == MolecularGraphProperty::H_ACCEPTOR_ATOM_COUNT {
        Box::new(h_acceptor_atom_count(graph)?)
    } else if key == MolecularGraphProperty::HASH_CODE {
        Box::new(hash_code(graph)?)
    } else {
        return Err(PropertyError::Missing(key));
    };
    trace!(%key, ?value, "derived property");
    Ok(value)
}

/// Look up a control parameter, using `default` if the graph has none or it isn't set.
fn param_or<'g, G: MolecularGraph + ?Sized, T: Any>(
    graph: &'g G,
    key: PropertyKey,
    default: &'g T,
) -> Result<&'g T, PropertyError> {
    match graph.control_params() {
        Some(params) => params.get_or(key, default),
        None => Ok(default),
    }
}

/// Atomic number of an atom, from [`AtomProperty::ATOMIC_NUMBER`] or else
/// [`AtomProperty::SYMBOL`]. Unknown symbols map to 0.
pub fn atomic_number(atom: &Atom<'_>) -> Result<u8, PropertyError> {
    let props = atom.properties();
    match props.get::<u8>(AtomProperty::ATOMIC_NUMBER) {
        Ok(&num) => return Ok(num),
        Err(PropertyError::Missing(_)) => {}
        Err(err) => return Err(err),
    }
    let symbol = props.get::<String>(AtomProperty::SYMBOL)?;
    Ok(Element::atomic_number(symbol).unwrap_or(0))
}

/// Implicit hydrogens on an atom. A stored count wins, otherwise this is the gap between the
/// bond order sum and the smallest standard valence that fits it.
pub fn implicit_hydrogen_count(atom: &Atom<'_>) -> Result<usize, PropertyError> {
    let props = atom.properties();
    match props.get::<usize>(AtomProperty::IMPLICIT_HYDROGEN_COUNT) {
        Ok(&count) => return Ok(count),
        Err(PropertyError::Missing(_)) => {}
        Err(err) => return Err(err),
    }
    let number = atomic_number(atom)?;
    let charge = *props.get_or::<i8>(AtomProperty::FORMAL_CHARGE, &0)?;
    let order_sum = atom.bonds().map(|b| b.order()).sum::<Result<usize, _>>()?;
    Ok(Element::charged_valences(number, charge as i32)
        .map(usize::from)
        .find(|&v| v >= order_sum)
        .map_or(0, |v| v - order_sum))
}

/// Number of bonded hydrogen atoms.
pub fn explicit_hydrogen_count(atom: &Atom<'_>) -> Result<usize, PropertyError> {
    atom.atoms()
        .map(|n| atomic_number(&n))
        .filter_ok(|&n| n == 1)
        .fold_ok(0, |count, _| count + 1)
}

pub fn total_atom_count<G: MolecularGraph + ?Sized>(graph: &G) -> Result<usize, PropertyError> {
    let implicit = graph
        .atoms()
        .map(|a| implicit_hydrogen_count(&a))
        .sum::<Result<usize, _>>()?;
    Ok(graph.num_atoms() + implicit)
}

pub fn total_bond_count<G: MolecularGraph + ?Sized>(graph: &G) -> Result<usize, PropertyError> {
    let implicit = graph
        .atoms()
        .map(|a| implicit_hydrogen_count(&a))
        .sum::<Result<usize, _>>()?;
    Ok(graph.num_bonds() + implicit)
}

/// Atoms of a donor element with at least one hydrogen, implicit or bonded.
pub fn h_donor_atom_count<G: MolecularGraph + ?Sized>(graph: &G) -> Result<usize, PropertyError> {
    let default = DEFAULT_H_DONORS.to_vec();
    let donors = param_or(graph, ControlParam::H_DONOR_ELEMENTS, &default)?;
    let mut count = 0;
    for atom in graph.atoms() {
        if donors.contains(&atomic_number(&atom)?)
            && implicit_hydrogen_count(&atom)? + explicit_hydrogen_count(&atom)? > 0
        {
            count += 1;
        }
    }
    Ok(count)
}

/// Atoms of an acceptor element.
pub fn h_acceptor_atom_count<G: MolecularGraph + ?Sized>(
    graph: &G,
) -> Result<usize, PropertyError> {
    let default = DEFAULT_H_ACCEPTORS.to_vec();
    let acceptors = param_or(graph, ControlParam::H_ACCEPTOR_ELEMENTS, &default)?;
    graph
        .atoms()
        .map(|a| atomic_number(&a))
        .filter_ok(|n| acceptors.contains(n))
        .fold_ok(0, |count, _| count + 1)
}

fn hasher() -> ahash::RandomState {
    ahash::RandomState::with_seeds(
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    )
}

/// Hash of a graph's structure that doesn't depend on the order of its atoms and bonds.
///
/// Atoms start out labeled by the invariants selected with
/// [`ControlParam::HASH_CODE_ATOM_FLAGS`], then labels are refined with their neighbors' labels
/// and the bond invariants selected with [`ControlParam::HASH_CODE_BOND_FLAGS`] until the
/// partition stops getting finer. Hashes are deterministic across runs of the same build.
#[instrument(
    level = "debug",
    skip_all,
    fields(atoms = graph.num_atoms(), bonds = graph.num_bonds())
)]
pub fn hash_code<G: MolecularGraph + ?Sized>(graph: &G) -> Result<u64, PropertyError> {
    let default_atom = AtomHashFlags::default();
    let default_bond = BondHashFlags::default();
    let atom_flags = *param_or(graph, ControlParam::HASH_CODE_ATOM_FLAGS, &default_atom)?;
    let bond_flags = *param_or(graph, ControlParam::HASH_CODE_BOND_FLAGS, &default_bond)?;
    let state = hasher();

    let mut labels = Vec::with_capacity(graph.num_atoms());
    let mut neighbors = Vec::with_capacity(graph.num_atoms());
    for atom in graph.atoms() {
        let props = atom.properties();
        let element = if atom_flags.element() {
            atomic_number(&atom)?
        } else {
            0
        };
        let charge = if atom_flags.charge() {
            *props.get_or::<i8>(AtomProperty::FORMAL_CHARGE, &0)?
        } else {
            0
        };
        let isotope = if atom_flags.isotope() {
            *props.get_or::<u16>(AtomProperty::ISOTOPE, &0)?
        } else {
            0
        };
        let hydrogens = if atom_flags.hydrogen_count() {
            implicit_hydrogen_count(&atom)?
        } else {
            0
        };
        let mut adj = SmallVec::<(u64, usize), 4>::new();
        for (bond, other) in incident_bonds(graph, atom) {
            let order = if bond_flags.order() { bond.order()? } else { 0 };
            if let Ok(idx) = graph.atom_index(other.id()) {
                adj.push((state.hash_one(order), idx));
            }
        }
        let degree = if atom_flags.degree() { adj.len() } else { 0 };
        labels.push(state.hash_one((element, charge, isotope, degree, hydrogens)));
        neighbors.push(adj);
    }

    let mut classes = labels.iter().unique().count();
    for round in 0..graph.num_atoms() {
        let next = neighbors
            .iter()
            .zip(&labels)
            .map(|(adj, &label)| {
                let env = adj
                    .iter()
                    .map(|&(bond, idx)| state.hash_one((bond, labels[idx])))
                    .sorted_unstable()
                    .collect::<SmallVec<u64, 4>>();
                state.hash_one((label, env.as_slice()))
            })
            .collect::<Vec<_>>();
        labels = next;
        let count = labels.iter().unique().count();
        trace!(round, classes = count, "refined atom labels");
        if count <= classes {
            break;
        }
        classes = count;
    }

    let bonds = neighbors
        .iter()
        .enumerate()
        .flat_map(|(i, adj)| {
            adj.iter()
                .filter(move |&&(_, j)| i < j)
                .map(move |&(bond, j)| (i, j, bond))
        })
        .map(|(i, j, bond)| {
            let (a, b) = (labels[i].min(labels[j]), labels[i].max(labels[j]));
            state.hash_one((bond, a, b))
        })
        .sorted_unstable()
        .collect::<Vec<_>>();
    labels.sort_unstable();
    Ok(state.hash_one((graph.num_atoms(), graph.num_bonds(), labels, bonds)))
}
