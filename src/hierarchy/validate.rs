//! Edge-list validation and hierarchy shape statistics.
//!
//! [`build_hierarchy`](super::build_hierarchy) stops at the first structural
//! problem. [`validate_edges`] walks the same edges and lists all of them, in
//! the order building would hit them:
//!
//! 1. self-loops
//! 2. nodes reached through a second parent (cycles)
//! 3. nodes the root cannot reach
//!
//! Duplicate edges follow as a warning; building ignores them.
//!
//! ```rust
//! use hierel::{validate_edges, EdgeIssue};
//!
//! let report = validate_edges([(1, 2), (2, 3), (3, 1), (4, 5)], 1);
//! assert!(!report.is_valid());
//! assert!(matches!(report.issues[0], EdgeIssue::MultipleParents { .. }));
//! assert_eq!(report.issues[1], EdgeIssue::Unreachable(vec![4, 5]));
//! ```

use core::fmt;

use super::builder::{sample, Adjacency, Orientation};
use super::tree::Hierarchy;
use crate::error::Error;

/// One problem in an edge list oriented from a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeIssue<N> {
    /// An edge from a node to itself.
    SelfLoop(N),
    /// `node` hangs under `first` and is reached again from `second`.
    MultipleParents {
        /// The node with two parents.
        node: N,
        /// Parent found first.
        first: N,
        /// Parent found second.
        second: N,
    },
    /// Nodes named by the edges that the root cannot reach, sorted.
    Unreachable(Vec<N>),
    /// Number of edges repeated in either direction.
    DuplicateEdges(usize),
}

impl<N> EdgeIssue<N> {
    /// False only for issues building tolerates.
    pub fn is_error(&self) -> bool {
        !matches!(self, EdgeIssue::DuplicateEdges(_))
    }
}

impl<N: fmt::Debug> EdgeIssue<N> {
    /// The error [`HierarchyBuilder::build`](super::HierarchyBuilder::build)
    /// reports for this issue, if it rejects it.
    pub fn to_error(&self) -> Option<Error> {
        match self {
            EdgeIssue::SelfLoop(node) => Some(Error::SelfLoop {
                node: format!("{node:?}"),
            }),
            EdgeIssue::MultipleParents {
                node,
                first,
                second,
            } => Some(Error::MultipleParents {
                node: format!("{node:?}"),
                first: format!("{first:?}"),
                second: format!("{second:?}"),
            }),
            EdgeIssue::Unreachable(nodes) => Some(Error::UnreachableNodes {
                count: nodes.len(),
                sample: sample(nodes),
            }),
            EdgeIssue::DuplicateEdges(_) => None,
        }
    }
}

impl<N: fmt::Debug> fmt::Display for EdgeIssue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeIssue::SelfLoop(node) => write!(f, "error: self-loop on {node:?}"),
            EdgeIssue::MultipleParents {
                node,
                first,
                second,
            } => write!(f, "error: {node:?} under both {first:?} and {second:?}"),
            EdgeIssue::Unreachable(nodes) => write!(
                f,
                "error: {} nodes not reachable from root (first few: {})",
                nodes.len(),
                sample(nodes)
            ),
            EdgeIssue::DuplicateEdges(n) => write!(f, "warning: {n} duplicate edges ignored"),
        }
    }
}

/// Everything [`validate_edges`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeReport<N> {
    /// Edges read, duplicates and self-loops included.
    pub edge_count: usize,
    /// Issues, errors first in the order building checks them.
    pub issues: Vec<EdgeIssue<N>>,
}

impl<N: Ord + Clone> EdgeReport<N> {
    pub(crate) fn collect(adjacency: &Adjacency<N>, orientation: &Orientation<N>) -> Self {
        let mut issues: Vec<EdgeIssue<N>> = adjacency
            .self_loops
            .iter()
            .cloned()
            .map(EdgeIssue::SelfLoop)
            .collect();

        issues.extend(
            orientation
                .conflicts
                .iter()
                .map(|c| EdgeIssue::MultipleParents {
                    node: c.node.clone(),
                    first: c.first_parent.clone(),
                    second: c.second_parent.clone(),
                }),
        );

        if !orientation.unreachable.is_empty() {
            issues.push(EdgeIssue::Unreachable(orientation.unreachable.clone()));
        }
        if adjacency.duplicate_edges > 0 {
            issues.push(EdgeIssue::DuplicateEdges(adjacency.duplicate_edges));
        }

        Self {
            edge_count: adjacency.edge_count,
            issues,
        }
    }
}

impl<N> EdgeReport<N> {
    /// True when the edges build into a hierarchy.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(EdgeIssue::is_error)
    }

    /// True when there is nothing to report, not even a warning.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Error-level issues only.
    pub fn errors(&self) -> impl Iterator<Item = &EdgeIssue<N>> {
        self.issues.iter().filter(|i| i.is_error())
    }
}

impl<N: fmt::Debug> EdgeReport<N> {
    /// The error building fails with, if any.
    pub fn first_error(&self) -> Option<Error> {
        self.issues.iter().find_map(EdgeIssue::to_error)
    }
}

impl<N: fmt::Debug> fmt::Display for EdgeReport<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors().count();
        let warnings = self.issues.len() - errors;
        write!(
            f,
            "{} edges: {errors} errors, {warnings} warnings",
            self.edge_count
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

/// Report every structural problem in `edges` when oriented from `root`.
pub fn validate_edges<N, I>(edges: I, root: N) -> EdgeReport<N>
where
    N: Ord + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    let adjacency = Adjacency::from_edges(edges, &root);
    let orientation = Orientation::walk(&adjacency, &root);
    EdgeReport::collect(&adjacency, &orientation)
}

/// Shape statistics of a hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of nodes without children.
    pub leaf_count: usize,
    /// Maximum depth below the root.
    pub max_depth: usize,
    /// Average number of children over non-leaf nodes.
    pub avg_branching_factor: f64,
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes ({} leaves), max depth {}, avg branching {:.2}",
            self.node_count, self.leaf_count, self.max_depth, self.avg_branching_factor
        )
    }
}

impl<N: Ord + Clone> Hierarchy<N> {
    /// Node, leaf and depth statistics.
    pub fn health_report(&self) -> HealthReport {
        let node_count = self.len();
        let leaf_count = self.leaves().len();
        let internal = node_count - leaf_count;
        let avg_branching_factor = if internal == 0 {
            0.0
        } else {
            // Every non-root node is exactly one parent's child.
            (node_count - 1) as f64 / internal as f64
        };

        HealthReport {
            node_count,
            leaf_count,
            max_depth: self.max_depth(),
            avg_branching_factor,
        }
    }
}
