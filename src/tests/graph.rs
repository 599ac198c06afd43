use super::macros::*;
use crate::graph::ComponentIter;
use crate::prelude::*;
use petgraph::visit::{EdgeRef, IntoEdges, IntoNeighbors, IntoNodeReferences, NodeRef};

#[test]
fn components() {
    trace_capture!();
    // a salt: sodium, chloride and a water molecule
    let mol = molecule!["Na", "O", "Cl", "H", "H"; (1, 3), (4, 1)];
    let comps = mol.components();
    assert_eq!(comps.len(), 3);
    let sizes = comps
        .iter()
        .map(|c| (c.num_atoms(), c.num_bonds()))
        .collect::<Vec<_>>();
    assert_eq!(sizes, [(1, 0), (3, 2), (1, 0)]);
    assert!(comps[1].contains_atom(mol.atom(4).unwrap().id()));
    assert_eq!(
        petgraph::algo::connected_components(&mol),
        comps.len()
    );

    assert_eq!(Molecule::new().components().len(), 0);
    let lazy = ComponentIter::new(&mol).next().unwrap();
    assert_eq!(lazy.atom(0).unwrap().index(), 0);
}

#[test]
fn components_of_fragments() {
    let mol = molecule!["C", "C", "C", "C"; (0, 1), (1, 2), (2, 3)];
    let mut frag = Fragment::from_graph(&mol);
    frag.remove_bond(1).unwrap();
    let comps = frag.components();
    assert_eq!(comps.len(), 2);
    assert_eq!(comps[0].num_bonds(), 1);
    assert!(comps[1].contains_bond(mol.bond(2).unwrap().id()));
}

#[test]
fn iterators() {
    let mol = molecule!["C", "N", "O"; (0, 1), (1, 2)];
    let mut atoms = mol.atoms();
    assert_eq!(atoms.len(), 3);
    assert_eq!(atoms.next_back().unwrap().index(), 2);
    assert_eq!(atoms.nth(1).unwrap().index(), 1);
    assert!(atoms.next().is_none());
    assert!(atoms.next().is_none());
    assert_eq!(mol.bonds().rev().map(|b| b.index()).collect::<Vec<_>>(), [1, 0]);
}

#[test]
fn petgraph_views() {
    trace_capture!();
    let mol = molecule!["C", "N", "O"; (0, 1, 2), (2, 1)];
    let weights = mol
        .node_references()
        .map(|r| {
            (
                r.id(),
                r.weight()
                    .get::<String>(AtomProperty::SYMBOL)
                    .unwrap()
                    .clone(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        weights,
        [
            (0, String::from("C")),
            (1, String::from("N")),
            (2, String::from("O"))
        ]
    );

    let mut neighbors = mol.neighbors(1).collect::<Vec<_>>();
    neighbors.sort();
    assert_eq!(neighbors, [0, 2]);

    // edges always start at the atom they were requested for
    for edge in mol.edges(1) {
        assert_eq!(edge.source(), 1);
        assert_ne!(edge.target(), 1);
    }
    let orders = mol
        .edges(1)
        .map(|e| (e.id(), *e.weight().get_or(BondProperty::ORDER, &1usize).unwrap()))
        .collect::<Vec<_>>();
    assert_eq!(orders, [(0, 2), (1, 1)]);

    let mut dfs = petgraph::visit::Dfs::new(&mol, 0);
    let mut order = Vec::new();
    while let Some(n) = dfs.next(&mol) {
        order.push(n);
    }
    assert_eq!(order, [0, 1, 2]);
}
