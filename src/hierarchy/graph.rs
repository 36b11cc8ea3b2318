//! Conversions between hierarchies and `petgraph` graphs.

use core::fmt;

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

use super::builder::{sample, HierarchyBuilder};
use super::tree::Hierarchy;
use crate::error::{Error, Result};

impl<N: Ord + Clone> Hierarchy<N> {
    /// Directed parent → child graph.
    ///
    /// Graph node `i` carries the identifier at relation index `i`, so graph
    /// indices and matrix rows line up.
    pub fn to_digraph(&self) -> DiGraph<N, ()> {
        let n = self.len();
        let mut graph = DiGraph::with_capacity(n, n.saturating_sub(1));
        let nodes: Vec<NodeIndex> = self.nodes().map(|id| graph.add_node(id.clone())).collect();

        for (i, id) in self.index().iter() {
            let Some(kids) = self.children(id) else {
                continue;
            };
            for kid in kids {
                if let Some(j) = self.index().index_of(kid) {
                    let _ = graph.add_edge(nodes[i], nodes[j], ());
                }
            }
        }
        graph
    }
}

impl<N: Ord + Clone + fmt::Debug> HierarchyBuilder<N> {
    /// Orient an undirected graph from the root. Edge weights are ignored.
    ///
    /// Graph nodes without any edge (other than the root) cannot be reached
    /// and are rejected like any other unreachable node.
    pub fn build_from_graph<E>(self, graph: &UnGraph<N, E>) -> Result<Hierarchy<N>> {
        let isolated: Vec<&N> = graph
            .node_indices()
            .filter(|&i| graph.neighbors(i).next().is_none())
            .map(|i| &graph[i])
            .filter(|id| *id != self.root())
            .collect();
        if !isolated.is_empty() {
            return Err(Error::UnreachableNodes {
                count: isolated.len(),
                sample: sample(&isolated),
            });
        }

        let edges: Vec<(N, N)> = graph
            .edge_indices()
            .filter_map(|e| graph.edge_endpoints(e))
            .map(|(a, b)| (graph[a].clone(), graph[b].clone()))
            .collect();
        self.build(edges)
    }
}
