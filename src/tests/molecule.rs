use super::macros::*;
use crate::prelude::*;

fn symbols(mol: &Molecule) -> Vec<String> {
    mol.atoms()
        .map(|a| a.property::<String>(AtomProperty::SYMBOL).unwrap().clone())
        .collect()
}
fn bond_pairs(mol: &Molecule) -> Vec<(usize, usize)> {
    mol.bonds()
        .map(|b| (b.begin().index(), b.end().index()))
        .collect()
}

#[test]
fn build_and_query() {
    trace_capture!();
    let mol = molecule!["C", "O", "O"; (0, 1, 2), (0, 2)];
    assert_eq!(mol.num_atoms(), 3);
    assert_eq!(mol.num_bonds(), 2);
    let c = mol.atom(0).unwrap();
    assert_eq!(c.num_bonds(), 2);
    assert_eq!(c.atoms().map(|a| a.index()).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(c.neighbor(1).unwrap().index(), 2);
    assert!(c.neighbor(2).is_err());
    let o = mol.atom(1).unwrap();
    let bond = c.find_bond_to_atom(&o).unwrap();
    assert_eq!(bond.index(), 0);
    assert_eq!(bond.order(), Ok(2));
    assert_eq!(mol.bond(1).unwrap().order(), Ok(1));
    assert_eq!(bond.neighbor(&c), Some(o));
    assert_eq!(bond.neighbor(&mol.atom(2).unwrap()), None);
    assert_eq!(bond.to_string(), "0=1");
    assert_eq!(mol.find_bond(2, 0).unwrap().map(|b| b.index()), Some(1));
    assert_eq!(mol.find_bond(1, 2).unwrap(), None);
    assert!(c.find_bond_to_atom(&c).is_none());
}

#[test]
fn out_of_range() {
    let mut mol = molecule!["C", "C"; (0, 1)];
    assert_eq!(
        mol.atom(2).unwrap_err(),
        GraphError::IndexOutOfRange {
            kind: ElementKind::Atom,
            index: 2,
            len: 2,
        }
    );
    assert!(mol.get_bond(1).is_none());
    assert!(mol.add_bond(0, 5).is_err());
    assert!(mol.remove_bond(1).is_err());
    assert!(mol.remove_atom(2).is_err());
    assert_eq!(mol.num_bonds(), 1);
}

#[test]
fn duplicate_bonds() {
    trace_capture!();
    let mut mol = molecule!["C", "C"; (0, 1, 2)];
    let bond = mol.add_bond(1, 0).unwrap();
    assert_eq!(bond.index(), 0);
    assert_eq!(bond.as_bond().order(), Ok(2));
    assert_eq!(mol.num_bonds(), 1);

    mol.set_multi_edges(true);
    let second = mol.add_bond(1, 0).unwrap().index();
    assert_eq!(second, 1);
    assert_eq!(mol.num_bonds(), 2);
    assert_eq!(mol.atom(0).unwrap().num_bonds(), 2);
}

#[test]
fn self_loops() {
    let mut mol = molecule!["C"; ];
    assert!(matches!(
        mol.add_bond(0, 0),
        Err(GraphError::InvalidOperation(_))
    ));
    assert_eq!(mol.num_bonds(), 0);
}

#[test]
fn copy_templates() {
    let mut mol = molecule!["N", "C"; (0, 1, 3)];
    mol.atom_mut(0)
        .unwrap()
        .set_property(AtomProperty::FORMAL_CHARGE, 1i8);
    let copy = mol.add_atom_copy(0).unwrap().index();
    assert_eq!(copy, 2);
    mol.add_bond_copy(1, 2, 0).unwrap();
    let atom = mol.atom(2).unwrap();
    assert_eq!(atom.num_bonds(), 1);
    assert_eq!(atom.property::<i8>(AtomProperty::FORMAL_CHARGE), Ok(&1));
    assert_eq!(mol.bond(1).unwrap().order(), Ok(3));

    let other = molecule!["O"; ];
    let idx = mol
        .add_atom_from(&other.atom(0).unwrap())
        .with_property(AtomProperty::ISOTOPE, 17u16)
        .index();
    assert_eq!(symbols(&mol), ["N", "C", "N", "O"]);
    assert_eq!(
        mol.atom(idx).unwrap().property::<u16>(AtomProperty::ISOTOPE),
        Ok(&17)
    );
    // the template is untouched
    assert_eq!(other.atom(0).unwrap().num_properties(), 1);
}

/// Removals shift later indices down while handles keep pointing at the same elements.
#[test]
fn removal_reindexes() {
    trace_capture!();
    let mut mol = molecule!["C", "H", "H", "O", "H"; (0, 1), (2, 0), (0, 3), (4, 0)];
    let oxygen = mol.atom(3).unwrap().id();
    let last = mol.bond(3).unwrap().id();

    mol.remove_bond(2).unwrap();
    assert_eq!(bond_pairs(&mol), [(0, 1), (2, 0), (4, 0)]);
    assert_eq!(mol.bond_index(last), Ok(2));
    assert_eq!(mol.atom_by_id(oxygen).unwrap().num_bonds(), 0);

    mol.remove_atom(0).unwrap();
    assert_eq!(mol.num_atoms(), 4);
    assert_eq!(mol.num_bonds(), 0);
    assert!(!mol.contains_bond(last));
    assert_eq!(mol.atom_index(oxygen), Ok(2));
    assert_eq!(symbols(&mol), ["H", "H", "O", "H"]);
    for (i, atom) in mol.atoms().enumerate() {
        assert_eq!(atom.index(), i);
    }

    mol.remove_atom_by_id(oxygen).unwrap();
    assert_eq!(symbols(&mol), ["H", "H", "H"]);
    assert_eq!(
        mol.atom_index(oxygen),
        Err(GraphError::NotFound(ElementKind::Atom))
    );
    // the freed slot gets reused, but the old handle stays dead
    let fresh = mol.add_atom().id();
    assert_ne!(fresh, oxygen);
    assert!(!mol.contains_atom(oxygen));
}

#[test]
fn cascade_keeps_other_bonds() {
    let mut mol = molecule!["C", "C", "C", "C"; (0, 1), (1, 2), (2, 3), (3, 0)];
    mol.remove_atom(1).unwrap();
    assert_eq!(bond_pairs(&mol), [(1, 2), (2, 0)]);
    for (i, bond) in mol.bonds().enumerate() {
        assert_eq!(bond.index(), i);
    }
}

#[test]
fn cursors() {
    let mut mol = molecule!["C", "N", "O", "S"; (0, 1), (1, 2), (2, 3)];
    let begin = mol.atoms_begin();
    let end = mol.atoms_end();
    assert_eq!(end - begin, 4);
    assert_eq!(begin.distance(end), -4);
    let mut cursor = begin + 1;
    assert_eq!(mol.atom_at(cursor).unwrap().index(), 1);
    cursor += 2;
    assert_eq!(cursor.next(), end);
    assert!(matches!(
        mol.atom_at(end),
        Err(GraphError::InvalidCursor {
            kind: ElementKind::Atom,
            position: 4,
            len: 4,
        })
    ));
    assert!(mol.atom_at(begin.prev()).is_err());

    let mut cursor = mol.atoms_begin() + 1;
    cursor = mol.remove_atom_at(cursor).unwrap();
    assert_eq!(symbols(&mol), ["C", "O", "S"]);
    assert_eq!(mol.atom_at(cursor).unwrap().index(), 1);
    assert_eq!(mol.bonds_end() - mol.bonds_begin(), 1);

    let bond = mol.remove_bond_at(mol.bonds_begin()).unwrap();
    assert_eq!(bond, mol.bonds_end());
    assert!(mol.bond_at(bond).is_err());

    let other = molecule!["C"; ];
    assert!(mol.atom_at(other.atoms_begin()).is_err());
    assert!(mol.remove_atom_at(other.atoms_begin()).is_err());
    assert_eq!(mol.num_atoms(), 3);
}

#[test]
fn clone_is_independent() {
    trace_capture!();
    let mut mol = molecule!["C", "O"; (0, 1, 2)];
    mol.set_property(MolecularGraphProperty::NAME, String::from("formaldehyde"));
    let atom = mol.atom(0).unwrap().id();
    let copy = mol.clone();
    assert_ne!(copy.id(), mol.id());
    assert!(!copy.contains_atom(atom));
    assert_eq!(copy.atom(0).unwrap().molecule().id(), copy.id());
    assert_eq!(symbols(&copy), symbols(&mol));
    assert_eq!(bond_pairs(&copy), bond_pairs(&mol));
    assert_eq!(
        copy.properties()
            .get::<String>(MolecularGraphProperty::NAME)
            .unwrap(),
        "formaldehyde"
    );

    mol.remove_atom(1).unwrap();
    assert_eq!(copy.num_atoms(), 2);
    assert_eq!(copy.bond(0).unwrap().order(), Ok(2));
}

#[test]
fn assign() {
    let source = molecule!["N", "N"; (0, 1, 3)];
    let mut mol = molecule!["C", "C", "C"; (0, 1), (1, 2)];
    let id = mol.id();
    let stale = mol.atom(0).unwrap().id();
    mol.assign(&source);
    assert_eq!(mol.id(), id);
    assert_eq!(symbols(&mol), ["N", "N"]);
    assert_eq!(bond_pairs(&mol), [(0, 1)]);
    assert!(!mol.contains_atom(stale));

    // assigning twice gives the same result
    mol.assign(&source);
    assert_eq!(symbols(&mol), ["N", "N"]);
    assert_eq!(mol.num_bonds(), 1);

    mol.set_property(MolecularGraphProperty::NAME, String::from("nitrogen"));
    let snapshot = mol.clone();
    mol.assign(&snapshot);
    assert_eq!(symbols(&mol), ["N", "N"]);
    assert_eq!(bond_pairs(&mol), [(0, 1)]);
    assert_eq!(mol.num_properties(), 1);
    assert_eq!(mol.bond(0).unwrap().order(), Ok(3));

    let mut other = Molecule::new();
    other.clone_from(&mol);
    assert_eq!(symbols(&other), ["N", "N"]);
    assert_ne!(other.id(), mol.id());
}

#[test]
fn append() {
    trace_capture!();
    let mut mol = molecule!["C", "O"; (0, 1)];
    mol.set_property(MolecularGraphProperty::NAME, String::from("base"));
    let mut other = molecule!["N", "N"; (0, 1, 3)];
    other.set_property(MolecularGraphProperty::NAME, String::from("other"));
    mol += &other;
    assert_eq!(symbols(&mol), ["C", "O", "N", "N"]);
    assert_eq!(bond_pairs(&mol), [(0, 1), (2, 3)]);
    assert_eq!(mol.bond(1).unwrap().order(), Ok(3));
    assert_eq!(
        mol.properties()
            .get::<String>(MolecularGraphProperty::NAME)
            .unwrap(),
        "base"
    );

    mol.append(&Molecule::new());
    assert_eq!(mol.num_atoms(), 4);
    assert_eq!(mol.num_bonds(), 2);

    mol += &Fragment::new();
    assert_eq!(mol.num_atoms(), 4);
    assert_eq!(mol.num_bonds(), 2);
    assert_eq!(mol.num_properties(), 1);
    assert_eq!(
        mol.properties()
            .get::<String>(MolecularGraphProperty::NAME)
            .unwrap(),
        "base"
    );

    let first = mol.atom(0).unwrap().id();
    mol.append_self();
    assert_eq!(mol.num_atoms(), 8);
    assert_eq!(mol.atom_index(first), Ok(0));
    assert_eq!(symbols(&mol), ["C", "O", "N", "N", "C", "O", "N", "N"]);
    assert_eq!(bond_pairs(&mol), [(0, 1), (2, 3), (4, 5), (6, 7)]);
    assert_eq!(mol.bond(3).unwrap().order(), Ok(3));
}

#[test]
fn clear() {
    let mut mol = molecule!["C", "C"; (0, 1)].with_multi_edges(true);
    mol.set_property(MolecularGraphProperty::NAME, String::from("ethane"));
    mol.control_params_mut()
        .set(ControlParam::H_ACCEPTOR_ELEMENTS, vec![9u8]);
    let atom = mol.atom(0).unwrap().id();
    mol.clear();
    assert!(mol.is_empty());
    assert_eq!(mol.num_bonds(), 0);
    assert_eq!(mol.num_properties(), 0);
    assert!(!mol.contains_atom(atom));
    assert!(mol.allows_multi_edges());
    assert_eq!(mol.control_params().len(), 1);
}

#[test]
fn property_views() {
    let mut mol = molecule!["C"; ];
    let mut atom = mol.atom_mut(0).unwrap();
    atom.set_property(AtomProperty::FORMAL_CHARGE, -1i8);
    assert!(atom.remove_property(AtomProperty::SYMBOL));
    assert!(!atom.remove_property(AtomProperty::SYMBOL));
    assert_eq!(atom.properties().len(), 1);
    let atom = atom.into_atom();
    assert_eq!(
        atom.property::<String>(AtomProperty::SYMBOL),
        Err(PropertyError::Missing(AtomProperty::SYMBOL))
    );

    let mut mol = molecule!["C", "C"; (0, 1)];
    let id = mol.bond(0).unwrap().id();
    mol.bond_by_id_mut(id)
        .unwrap()
        .set_property(BondProperty::ORDER, 2usize);
    assert_eq!(mol.bond_by_id(id).unwrap().order(), Ok(2));
    mol.bond_mut(0)
        .unwrap()
        .set_property(BondProperty::ORDER, 2.5f64);
    assert!(matches!(
        mol.bond(0).unwrap().order(),
        Err(PropertyError::TypeMismatch { .. })
    ));
}
