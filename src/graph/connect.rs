use super::*;
use smallvec::{smallvec, SmallVec};
use std::fmt::{self, Debug, Formatter};
use tracing::*;

/// Iterate over the connected components of a graph, yielding each as a fragment.
///
/// Components come out in the order of their lowest atom index.
pub struct ComponentIter<'g, G: ?Sized> {
    graph: &'g G,
    seen: Vec<bool>,
    start: usize,
}
impl<'g, G: MolecularGraph + ?Sized> ComponentIter<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            seen: vec![false; graph.num_atoms()],
            start: 0,
        }
    }
}
impl<G: ?Sized> Debug for ComponentIter<'_, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentIter")
            .field("seen", &self.seen)
            .field("start", &self.start)
            .finish()
    }
}
impl<'g, G: MolecularGraph + ?Sized> Iterator for ComponentIter<'g, G> {
    type Item = Fragment<'g>;

    #[instrument(level = "trace", skip_all, fields(start = self.start))]
    fn next(&mut self) -> Option<Fragment<'g>> {
        let start = (self.start..self.seen.len()).find(|&i| !self.seen[i])?;
        self.start = start + 1;
        self.seen[start] = true;
        let mut out = Fragment::new();
        let mut stack: SmallVec<usize, 8> = smallvec![start];
        while let Some(idx) = stack.pop() {
            let Some(atom) = self.graph.get_atom(idx) else {
                continue;
            };
            out.add_atom(atom);
            for (bond, neighbor) in incident_bonds(self.graph, atom) {
                out.add_bond(bond);
                let Ok(n) = self.graph.atom_index(neighbor.id()) else {
                    continue;
                };
                if !self.seen[n] {
                    self.seen[n] = true;
                    stack.push(n);
                }
            }
        }
        trace!(
            atoms = out.num_atoms(),
            bonds = out.num_bonds(),
            "found component"
        );
        Some(out)
    }
}
