//! Rooted management hierarchies.
//!
//! # From edges to a tree
//!
//! An organization chart arrives as undirected pairs plus a designated root.
//! [`build_hierarchy`] orients every pair away from the root and rejects
//! anything that is not a single tree:
//!
//! ```text
//! "1,2"  "1,3"  "3,4"  "3,5"     root = 1
//!
//!            1
//!           / \
//!          2   3
//!             / \
//!            4   5
//! ```
//!
//! # Module Overview
//!
//! - [`HierarchyBuilder`] / [`build_hierarchy`]: orientation from the root
//! - [`Hierarchy`]: the tree plus its five memoized relation matrices
//! - [`RelationIndex`]: the node ↔ row/column assignment every matrix shares
//! - [`validate_edges`]: every structural problem in an edge list, not just the first
//! - [`HealthReport`]: node, leaf and depth statistics of a built hierarchy
//!
//! # Matrix layout
//!
//! Rows and columns follow the sorted order of the identifiers, not the order
//! they appear in the edges. With string identifiers that is lexicographic
//! order (`"10"` sorts before `"9"`).

mod builder;
#[cfg(feature = "petgraph")]
mod graph;
mod index;
mod tree;
mod validate;

pub use builder::{build_hierarchy, HierarchyBuilder};
pub use index::RelationIndex;
pub use tree::Hierarchy;
pub use validate::{validate_edges, EdgeIssue, EdgeReport, HealthReport};
