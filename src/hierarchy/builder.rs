//! Orienting an undirected edge list into a rooted hierarchy.
//!
//! Edges arrive without direction: `(a, b)` only says that `a` and `b` are
//! adjacent. Direction comes from the root. Walking outward from it, every
//! neighbor of a node except the one we arrived from is a child:
//!
//! ```text
//!   edges           undirected             oriented from 1
//!   1,2             1: {2, 3}              1: {2, 3}
//!   1,3     ──▶     2: {1}          ──▶    2: {}
//!   3,4             3: {1, 4, 5}           3: {4, 5}
//!   5,3             4: {3}                 4: {}
//!                   5: {3}                 5: {}
//! ```
//!
//! The walk uses an explicit stack and writes into a fresh map, so deep
//! hierarchies cannot overflow the call stack and the undirected adjacency is
//! only ever read.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::tree::Hierarchy;
use super::validate::EdgeReport;
use crate::error::Result;
use crate::relations::{ClosureStrategy, RelationConfig};
use crate::source::EdgeSource;

/// Undirected adjacency collected from an edge list.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency<N> {
    pub(crate) neighbors: BTreeMap<N, BTreeSet<N>>,
    pub(crate) self_loops: Vec<N>,
    pub(crate) edge_count: usize,
    pub(crate) duplicate_edges: usize,
}

impl<N: Ord + Clone> Adjacency<N> {
    /// Collect edges. The root is always present, even with no edges.
    pub(crate) fn from_edges<I>(edges: I, root: &N) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut neighbors: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
        let _ = neighbors.entry(root.clone()).or_default();
        let mut self_loops = Vec::new();
        let mut edge_count = 0;
        let mut duplicate_edges = 0;

        for (a, b) in edges {
            edge_count += 1;
            if a == b {
                let _ = neighbors.entry(a.clone()).or_default();
                self_loops.push(a);
                continue;
            }
            let fresh = neighbors.entry(a.clone()).or_default().insert(b.clone());
            let _ = neighbors.entry(b).or_default().insert(a);
            if !fresh {
                duplicate_edges += 1;
            }
        }

        Self {
            neighbors,
            self_loops,
            edge_count,
            duplicate_edges,
        }
    }
}

/// A node reached a second time, through a non-tree edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Conflict<N> {
    pub(crate) node: N,
    pub(crate) first_parent: N,
    pub(crate) second_parent: N,
}

/// Result of walking the adjacency from the root.
#[derive(Debug, Clone)]
pub(crate) struct Orientation<N> {
    pub(crate) children: BTreeMap<N, BTreeSet<N>>,
    pub(crate) parents: BTreeMap<N, N>,
    pub(crate) conflicts: Vec<Conflict<N>>,
    pub(crate) unreachable: Vec<N>,
}

impl<N: Ord + Clone> Orientation<N> {
    /// Depth-first walk from `root`, recording every structural violation.
    pub(crate) fn walk(adjacency: &Adjacency<N>, root: &N) -> Self {
        let mut children: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
        let mut parents: BTreeMap<N, N> = BTreeMap::new();
        let mut conflicts = Vec::new();
        let mut reported: BTreeSet<(N, N)> = BTreeSet::new();
        let mut discovered: BTreeSet<N> = BTreeSet::new();
        let _ = discovered.insert(root.clone());

        let mut stack: Vec<(N, Option<N>)> = vec![(root.clone(), None)];
        while let Some((node, parent)) = stack.pop() {
            let mut kids = BTreeSet::new();

            if let Some(neighbors) = adjacency.neighbors.get(&node) {
                for next in neighbors {
                    if parent.as_ref() == Some(next) {
                        continue;
                    }
                    if discovered.insert(next.clone()) {
                        let _ = parents.insert(next.clone(), node.clone());
                        let _ = kids.insert(next.clone());
                        stack.push((next.clone(), Some(node.clone())));
                        continue;
                    }

                    let Some(first_parent) = parents.get(next) else {
                        continue;
                    };
                    // Each non-tree edge is seen from both ends; report it once.
                    let key = if node < *next {
                        (node.clone(), next.clone())
                    } else {
                        (next.clone(), node.clone())
                    };
                    if reported.insert(key) {
                        conflicts.push(Conflict {
                            node: next.clone(),
                            first_parent: first_parent.clone(),
                            second_parent: node.clone(),
                        });
                    }
                }
            }

            let _ = children.insert(node, kids);
        }

        let unreachable = adjacency
            .neighbors
            .keys()
            .filter(|id| !discovered.contains(*id))
            .cloned()
            .collect();

        Self {
            children,
            parents,
            conflicts,
            unreachable,
        }
    }
}

/// Debug rendering of the first few items.
pub(crate) fn sample<N: fmt::Debug>(items: &[N]) -> String {
    format!("{:?}", &items[..items.len().min(5)])
}

/// Builder for [`Hierarchy`].
///
/// ```rust
/// use hierel::{ClosureStrategy, HierarchyBuilder};
///
/// let h = HierarchyBuilder::new("ceo")
///     .with_closure(ClosureStrategy::FixedPowers)
///     .build([("ceo", "cto"), ("cto", "dev")])
///     .unwrap();
/// assert!(h.manages(&"ceo", &"dev"));
/// ```
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<N> {
    root: N,
    config: RelationConfig,
}

impl<N: Ord + Clone + fmt::Debug> HierarchyBuilder<N> {
    /// Create a builder for a hierarchy rooted at `root`.
    pub fn new(root: N) -> Self {
        Self {
            root,
            config: RelationConfig::default(),
        }
    }

    /// Replace the relation configuration.
    pub fn with_config(mut self, config: RelationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the closure strategy.
    pub fn with_closure(mut self, closure: ClosureStrategy) -> Self {
        self.config.closure = closure;
        self
    }

    /// Get the root.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// Get the relation configuration.
    pub fn config(&self) -> &RelationConfig {
        &self.config
    }

    /// Orient `edges` from the root.
    ///
    /// Fails when the edges do not form a single tree under the root: a
    /// self-loop, a node reachable through two parents, or a node the root
    /// cannot reach.
    pub fn build<I>(self, edges: I) -> Result<Hierarchy<N>>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let adjacency = Adjacency::from_edges(edges, &self.root);
        let orientation = Orientation::walk(&adjacency, &self.root);

        if let Some(err) = EdgeReport::collect(&adjacency, &orientation).first_error() {
            debug!(root = ?self.root, error = %err, "rejected edge list");
            return Err(err);
        }

        debug!(
            root = ?self.root,
            nodes = orientation.children.len(),
            edges = adjacency.edge_count,
            "built hierarchy"
        );

        Ok(Hierarchy::from_parts(
            self.root,
            orientation.children,
            orientation.parents,
            self.config,
        ))
    }

    /// Pull edges from `source` and build.
    pub fn build_from<S>(self, source: &S) -> Result<Hierarchy<N>>
    where
        S: EdgeSource<Id = N> + ?Sized,
    {
        let edges = source.edges()?;
        self.build(edges)
    }
}

/// Orient `edges` from `root` with the default configuration.
pub fn build_hierarchy<N, I>(edges: I, root: N) -> Result<Hierarchy<N>>
where
    N: Ord + Clone + fmt::Debug,
    I: IntoIterator<Item = (N, N)>,
{
    HierarchyBuilder::new(root).build(edges)
}
