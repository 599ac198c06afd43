//! `petgraph` visit traits, so petgraph's algorithms run directly on molecules. Nodes and edges
//! are identified by their current dense indices, and weighted by their property maps.

use super::*;
use ahash::HashSet;
use petgraph::visit::*;
use petgraph::{Direction, Undirected};
use std::iter::Map;
use std::ops::Range;
use std::slice;

impl GraphBase for Molecule {
    type NodeId = usize;
    type EdgeId = usize;
}
impl GraphProp for Molecule {
    type EdgeType = Undirected;
}
impl NodeCount for Molecule {
    fn node_count(&self) -> usize {
        self.num_atoms()
    }
}
impl NodeIndexable for Molecule {
    fn node_bound(&self) -> usize {
        self.num_atoms()
    }
    fn to_index(&self, a: usize) -> usize {
        a
    }
    fn from_index(&self, i: usize) -> usize {
        i
    }
}
impl NodeCompactIndexable for Molecule {}
impl EdgeCount for Molecule {
    fn edge_count(&self) -> usize {
        self.num_bonds()
    }
}
impl Data for Molecule {
    type NodeWeight = PropertyMap;
    type EdgeWeight = PropertyMap;
}
impl Visitable for Molecule {
    type Map = HashSet<usize>;

    fn visit_map(&self) -> Self::Map {
        HashSet::with_capacity_and_hasher(self.num_atoms(), Default::default())
    }
    fn reset_map(&self, map: &mut Self::Map) {
        map.clear();
    }
}

/// Node reference yielded by [`IntoNodeReferences`].
#[derive(Debug, Clone, Copy)]
pub struct AtomReference<'a>(pub Atom<'a>);
impl NodeRef for AtomReference<'_> {
    type NodeId = usize;
    type Weight = PropertyMap;

    fn id(&self) -> usize {
        self.0.index()
    }
    fn weight(&self) -> &PropertyMap {
        self.0.properties()
    }
}

/// Edge reference yielded by the edge iterators. The source is the atom the traversal came from,
/// which isn't necessarily the bond's begin atom.
#[derive(Debug, Clone, Copy)]
pub struct BondReference<'a> {
    source: usize,
    target: usize,
    bond: Bond<'a>,
}
impl<'a> BondReference<'a> {
    #[inline(always)]
    pub fn bond(&self) -> Bond<'a> {
        self.bond
    }
}
impl EdgeRef for BondReference<'_> {
    type NodeId = usize;
    type EdgeId = usize;
    type Weight = PropertyMap;

    fn source(&self) -> usize {
        self.source
    }
    fn target(&self) -> usize {
        self.target
    }
    fn weight(&self) -> &PropertyMap {
        self.bond.properties()
    }
    fn id(&self) -> usize {
        self.bond.index()
    }
}

impl<'a> IntoNodeIdentifiers for &'a Molecule {
    type NodeIdentifiers = Range<usize>;

    fn node_identifiers(self) -> Range<usize> {
        0..self.num_atoms()
    }
}
impl<'a> IntoNodeReferences for &'a Molecule {
    type NodeRef = AtomReference<'a>;
    type NodeReferences = Map<Atoms<'a, Molecule>, fn(Atom<'a>) -> AtomReference<'a>>;

    fn node_references(self) -> Self::NodeReferences {
        self.atoms().map(AtomReference as fn(Atom<'a>) -> AtomReference<'a>)
    }
}
impl<'a> IntoEdgeReferences for &'a Molecule {
    type EdgeRef = BondReference<'a>;
    type EdgeReferences = Map<Bonds<'a, Molecule>, fn(Bond<'a>) -> BondReference<'a>>;

    fn edge_references(self) -> Self::EdgeReferences {
        let to_ref: fn(Bond<'a>) -> BondReference<'a> = |bond| BondReference {
            source: bond.begin().index(),
            target: bond.end().index(),
            bond,
        };
        self.bonds().map(to_ref)
    }
}
impl<'a> IntoNeighbors for &'a Molecule {
    type Neighbors = Neighbors<'a>;

    fn neighbors(self, a: usize) -> Neighbors<'a> {
        Neighbors {
            mol: self,
            iter: self.atoms[self.atom_order[a]].adjacency.iter(),
        }
    }
}
impl<'a> IntoNeighborsDirected for &'a Molecule {
    type NeighborsDirected = Neighbors<'a>;

    fn neighbors_directed(self, a: usize, _dir: Direction) -> Neighbors<'a> {
        self.neighbors(a)
    }
}
impl<'a> IntoEdges for &'a Molecule {
    type Edges = Edges<'a>;

    fn edges(self, a: usize) -> Edges<'a> {
        self.edges_directed(a, Direction::Outgoing)
    }
}
impl<'a> IntoEdgesDirected for &'a Molecule {
    type EdgesDirected = Edges<'a>;

    fn edges_directed(self, a: usize, dir: Direction) -> Edges<'a> {
        Edges {
            mol: self,
            atom: a,
            dir,
            iter: self.atoms[self.atom_order[a]].adjacency.iter(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    mol: &'a Molecule,
    iter: slice::Iter<'a, (usize, usize)>,
}
impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.iter.next().map(|&(_, a)| self.mol.atoms[a].index)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
impl ExactSizeIterator for Neighbors<'_> {}

/// Bonds around one atom. Outgoing edges have that atom as their source, incoming ones as their
/// target.
#[derive(Debug, Clone)]
pub struct Edges<'a> {
    mol: &'a Molecule,
    atom: usize,
    dir: Direction,
    iter: slice::Iter<'a, (usize, usize)>,
}
impl<'a> Iterator for Edges<'a> {
    type Item = BondReference<'a>;

    fn next(&mut self) -> Option<BondReference<'a>> {
        let &(bond, other) = self.iter.next()?;
        let other = self.mol.atoms[other].index;
        let (source, target) = match self.dir {
            Direction::Outgoing => (self.atom, other),
            Direction::Incoming => (other, self.atom),
        };
        Some(BondReference {
            source,
            target,
            bond: Bond::new(self.mol, bond),
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
impl ExactSizeIterator for Edges<'_> {}
