//! # hierel
//!
//! Management-hierarchy relations: from an undirected edge list and a root,
//! derive who manages whom (directly and transitively), who reports to whom,
//! and who are peers, as boolean relation matrices; then summarize the shape
//! of the hierarchy with a normalized Shannon entropy.
//!
//! ```rust
//! use hierel::{build_hierarchy, summarize_entropy};
//!
//! let h = build_hierarchy([("1", "2"), ("1", "3"), ("3", "4"), ("3", "5")], "1")?;
//!
//! assert!(h.manages(&"1", &"5"));
//! assert!(h.is_peer(&"4", &"5"));
//!
//! let (entropy, normalized) = summarize_entropy(h.relations())?.as_pair();
//! assert_eq!((entropy, normalized), (6.5, 0.5));
//! # Ok::<(), hierel::Error>(())
//! ```
//!
//! **Default build** is single-threaded with no graph-library dependency.
//! `parallel` computes matrix products with rayon; `petgraph` adds
//! conversions to and from `petgraph` graphs.

/// Error types used across `hierel`.
pub mod error;
pub mod hierarchy;
pub mod matrix;
pub mod metrics;
pub mod relations;
pub mod source;

#[cfg(test)]
mod relations_tests;

pub use error::{Error, Result};
pub use hierarchy::{
    build_hierarchy, validate_edges, EdgeIssue, EdgeReport, HealthReport, Hierarchy,
    HierarchyBuilder, RelationIndex,
};
pub use matrix::BoolMatrix;
pub use metrics::{
    summarize_entropy, summarize_entropy_with, ConnectionTable, EntropyConfig, EntropySummary,
    REFERENCE_CONSTANT,
};
pub use relations::{transitive_closure, ClosureStrategy, Relation, RelationConfig};
pub use source::{DelimitedEdges, EdgeSource};
