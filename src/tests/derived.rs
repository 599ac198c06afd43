use super::macros::*;
use crate::derived;
use crate::prelude::*;

fn counts(mol: &Molecule) -> (usize, usize) {
    (
        mol.property(MolecularGraphProperty::TOTAL_ATOM_COUNT).unwrap(),
        mol.property(MolecularGraphProperty::TOTAL_BOND_COUNT).unwrap(),
    )
}

#[test]
fn implicit_hydrogens() {
    trace_capture!();
    // methanol with every hydrogen but one implicit
    let mut mol = molecule!["C", "O", "H"; (0, 1), (1, 2)];
    let hs = mol
        .atoms()
        .map(|a| a.implicit_hydrogen_count().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(hs, [3, 0, 0]);

    // a stored count wins
    mol.atom_mut(0)
        .unwrap()
        .set_property(AtomProperty::IMPLICIT_HYDROGEN_COUNT, 1usize);
    assert_eq!(mol.atom(0).unwrap().implicit_hydrogen_count(), Ok(1));

    // ammonium
    let mut mol = molecule!["N"; ];
    mol.atom_mut(0)
        .unwrap()
        .set_property(AtomProperty::FORMAL_CHARGE, 1i8);
    assert_eq!(mol.atom(0).unwrap().implicit_hydrogen_count(), Ok(4));

    // sulfur picks the smallest valence that fits
    let mol = molecule!["S", "O", "O"; (0, 1, 2), (0, 2, 2)];
    assert_eq!(mol.atom(0).unwrap().implicit_hydrogen_count(), Ok(0));
    let mol = molecule!["S", "O"; (0, 1, 2)];
    assert_eq!(mol.atom(0).unwrap().implicit_hydrogen_count(), Ok(0));
    let mol = molecule!["S", "C"; (0, 1)];
    assert_eq!(mol.atom(0).unwrap().implicit_hydrogen_count(), Ok(1));

    // no symbol means no element
    let mut mol = Molecule::new();
    mol.add_atom();
    assert_eq!(
        mol.atom(0).unwrap().implicit_hydrogen_count(),
        Err(PropertyError::Missing(AtomProperty::SYMBOL))
    );
}

/// Counts follow the structure through every edit.
#[test]
fn counts_track_edits() {
    trace_capture!();
    let mut mol = molecule!["C", "H", "H", "O", "H"; (0, 1), (2, 0), (0, 3), (4, 0)];
    assert_eq!(counts(&mol), (6, 5));
    assert_eq!(
        mol.property::<usize>(MolecularGraphProperty::H_DONOR_ATOM_COUNT),
        Ok(1)
    );
    assert_eq!(
        mol.property::<usize>(MolecularGraphProperty::H_ACCEPTOR_ATOM_COUNT),
        Ok(1)
    );

    mol.remove_bond(2).unwrap();
    assert_eq!(counts(&mol), (8, 6));

    mol.remove_atom(0).unwrap();
    assert_eq!(counts(&mol), (9, 5));
    mol.remove_atom(1).unwrap();
    assert_eq!(counts(&mol), (7, 4));
    mol.remove_atom(2).unwrap();
    assert_eq!(counts(&mol), (5, 3));
    assert_eq!(
        mol.property::<usize>(MolecularGraphProperty::H_DONOR_ATOM_COUNT),
        Ok(1)
    );
}

#[test]
fn container_counts() {
    let mol = molecule!["C", "C", "O"; (0, 1), (1, 2)];
    assert_eq!(mol.property::<usize>(AtomContainerProperty::ATOM_COUNT), Ok(3));
    assert_eq!(mol.property::<usize>(BondContainerProperty::BOND_COUNT), Ok(2));
    assert!(matches!(
        mol.property::<u32>(AtomContainerProperty::ATOM_COUNT),
        Err(PropertyError::TypeMismatch { .. })
    ));
    let empty = Molecule::new();
    assert_eq!(counts(&empty), (0, 0));
    assert_eq!(
        empty.property::<usize>(MolecularGraphProperty::H_ACCEPTOR_ATOM_COUNT),
        Ok(0)
    );
}

#[test]
fn stored_values_win() {
    let mut mol = molecule!["O"; ];
    assert_eq!(
        mol.property::<usize>(MolecularGraphProperty::TOTAL_ATOM_COUNT),
        Ok(3)
    );
    mol.set_property(MolecularGraphProperty::TOTAL_ATOM_COUNT, 42usize);
    assert_eq!(
        mol.property::<usize>(MolecularGraphProperty::TOTAL_ATOM_COUNT),
        Ok(42)
    );
    assert_eq!(
        mol.property::<String>(MolecularGraphProperty::NAME),
        Err(PropertyError::Missing(MolecularGraphProperty::NAME))
    );
}

#[test]
fn donor_acceptor_params() {
    // water, ammonia, methane, and an ether oxygen
    let mol = molecule!["O", "N", "C", "O", "C", "C"; (3, 4), (3, 5)];
    assert_eq!(derived::h_donor_atom_count(&mol), Ok(2));
    assert_eq!(derived::h_acceptor_atom_count(&mol), Ok(3));

    let mut mol = mol;
    mol.control_params_mut()
        .set(ControlParam::H_DONOR_ELEMENTS, vec![6u8]);
    mol.control_params_mut()
        .set(ControlParam::H_ACCEPTOR_ELEMENTS, vec![8u8]);
    assert_eq!(derived::h_donor_atom_count(&mol), Ok(3));
    assert_eq!(derived::h_acceptor_atom_count(&mol), Ok(2));

    // explicit hydrogens count for donors too
    let mut mol = molecule!["O", "H", "C"; (0, 1), (0, 2)];
    mol.atom_mut(0)
        .unwrap()
        .set_property(AtomProperty::IMPLICIT_HYDROGEN_COUNT, 0usize);
    assert_eq!(derived::explicit_hydrogen_count(&mol.atom(0).unwrap()), Ok(1));
    assert_eq!(derived::h_donor_atom_count(&mol), Ok(1));
}

#[test]
fn hash_ignores_order() {
    trace_capture!();
    let ethanol = molecule!["C", "C", "O"; (0, 1), (1, 2)];
    let shuffled = molecule!["O", "C", "C"; (2, 1), (0, 1)];
    let methoxy = molecule!["C", "O", "C"; (0, 1), (1, 2)];
    let hash = ethanol.hash_code().unwrap();
    assert_eq!(shuffled.hash_code(), Ok(hash));
    assert_ne!(methoxy.hash_code(), Ok(hash));
    assert_eq!(
        ethanol.property::<u64>(MolecularGraphProperty::HASH_CODE),
        Ok(hash)
    );
    // hashes are stable for the same structure
    assert_eq!(ethanol.clone().hash_code(), Ok(hash));
}

#[test]
fn hash_flags() {
    let single = molecule!["C", "C"; (0, 1)];
    let double = molecule!["C", "C"; (0, 1, 2)];
    assert_ne!(single.hash_code(), double.hash_code());

    let mut single = single;
    let mut double = double;
    // hydrogen counts follow the bond order, so they have to go too
    let atom_flags = AtomHashFlags::default().with_hydrogen_count(false);
    let bond_flags = BondHashFlags::default().with_order(false);
    for mol in [&mut single, &mut double] {
        mol.control_params_mut()
            .set(ControlParam::HASH_CODE_ATOM_FLAGS, atom_flags);
        mol.control_params_mut()
            .set(ControlParam::HASH_CODE_BOND_FLAGS, bond_flags);
    }
    assert_eq!(single.hash_code(), double.hash_code());

    let mut charged = molecule!["C", "C"; (0, 1)];
    charged
        .atom_mut(0)
        .unwrap()
        .set_property(AtomProperty::FORMAL_CHARGE, 1i8);
    let neutral = molecule!["C", "C"; (0, 1)];
    assert_ne!(charged.hash_code(), neutral.hash_code());
}
