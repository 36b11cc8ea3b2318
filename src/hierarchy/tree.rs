//! Rooted hierarchy with memoized relation matrices.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use tracing::debug;

use super::index::RelationIndex;
use crate::error::Result;
use crate::matrix::BoolMatrix;
use crate::metrics::{ConnectionTable, EntropyConfig, EntropySummary};
use crate::relations::{self, Relation, RelationConfig};

/// One memo cell per relation. A cell is written once and never replaced.
#[derive(Debug, Clone, Default)]
struct RelationCache {
    direct_management: OnceLock<BoolMatrix>,
    direct_subordination: OnceLock<BoolMatrix>,
    transitive_management: OnceLock<BoolMatrix>,
    transitive_subordination: OnceLock<BoolMatrix>,
    peer: OnceLock<BoolMatrix>,
}

/// A rooted tree of nodes: every node except the root has exactly one parent.
///
/// Built by [`HierarchyBuilder`](super::HierarchyBuilder) or
/// [`build_hierarchy`](super::build_hierarchy). The five relation matrices
/// are computed on first request and reused afterwards; concurrent callers
/// wait for the single computation instead of repeating it.
#[derive(Debug, Clone)]
pub struct Hierarchy<N> {
    root: N,
    /// Parent → children. Every node is a key; leaves map to an empty set.
    children: BTreeMap<N, BTreeSet<N>>,
    /// Child → parent. The root has no entry.
    parents: BTreeMap<N, N>,
    index: RelationIndex<N>,
    config: RelationConfig,
    cache: RelationCache,
}

impl<N: Ord + Clone> Hierarchy<N> {
    pub(crate) fn from_parts(
        root: N,
        children: BTreeMap<N, BTreeSet<N>>,
        parents: BTreeMap<N, N>,
        config: RelationConfig,
    ) -> Self {
        let index = RelationIndex::new(children.keys().cloned());
        Self {
            root,
            children,
            parents,
            index,
            config,
            cache: RelationCache::default(),
        }
    }

    /// The root node.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// Number of nodes (including the root).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the hierarchy has no nodes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// True when `id` is a node of this hierarchy.
    pub fn contains(&self, id: &N) -> bool {
        self.children.contains_key(id)
    }

    /// Node ↔ matrix index assignment shared by all relation matrices.
    pub fn index(&self) -> &RelationIndex<N> {
        &self.index
    }

    /// Relation configuration.
    pub fn config(&self) -> &RelationConfig {
        &self.config
    }

    /// Nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.index.ids().iter()
    }

    /// Immediate children of `id`.
    pub fn children(&self, id: &N) -> Option<&BTreeSet<N>> {
        self.children.get(id)
    }

    /// Immediate parent of `id` (`None` for the root and unknown nodes).
    pub fn parent(&self, id: &N) -> Option<&N> {
        self.parents.get(id)
    }

    /// Nodes without children, in index order.
    pub fn leaves(&self) -> Vec<&N> {
        self.children
            .iter()
            .filter(|(_, kids)| kids.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Distance from the root (root = 0).
    pub fn depth(&self, id: &N) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parents.get(current) {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Largest depth of any node.
    pub fn max_depth(&self) -> usize {
        let mut depth = 0;
        let mut level: Vec<&N> = vec![&self.root];
        loop {
            let next: Vec<&N> = level
                .iter()
                .filter_map(|id| self.children.get(*id))
                .flatten()
                .collect();
            if next.is_empty() {
                return depth;
            }
            depth += 1;
            level = next;
        }
    }

    /// R1: `[i][j]` is set when `i` is the immediate parent of `j`.
    pub fn direct_management(&self) -> &BoolMatrix {
        self.cache.direct_management.get_or_init(|| {
            computed(
                Relation::DirectManagement,
                relations::direct_management(&self.children, &self.index),
            )
        })
    }

    /// R2: transpose of R1.
    pub fn direct_subordination(&self) -> &BoolMatrix {
        self.cache.direct_subordination.get_or_init(|| {
            computed(
                Relation::DirectSubordination,
                self.direct_management().transpose(),
            )
        })
    }

    /// R3: `[i][j]` is set when `i` is an ancestor of `j`.
    pub fn transitive_management(&self) -> &BoolMatrix {
        self.cache.transitive_management.get_or_init(|| {
            computed(
                Relation::TransitiveManagement,
                relations::transitive_closure(self.direct_management(), self.config.closure),
            )
        })
    }

    /// R4: transpose of R3.
    pub fn transitive_subordination(&self) -> &BoolMatrix {
        self.cache.transitive_subordination.get_or_init(|| {
            computed(
                Relation::TransitiveSubordination,
                self.transitive_management().transpose(),
            )
        })
    }

    /// R5: `[i][j]` is set when `i ≠ j` share an immediate parent.
    pub fn peer_relation(&self) -> &BoolMatrix {
        self.cache.peer.get_or_init(|| {
            let composed = self
                .direct_subordination()
                .compose_unchecked(self.direct_management());
            computed(Relation::Peer, composed.without_diagonal())
        })
    }

    /// Matrix for `relation`.
    pub fn relation(&self, relation: Relation) -> &BoolMatrix {
        match relation {
            Relation::DirectManagement => self.direct_management(),
            Relation::DirectSubordination => self.direct_subordination(),
            Relation::TransitiveManagement => self.transitive_management(),
            Relation::TransitiveSubordination => self.transitive_subordination(),
            Relation::Peer => self.peer_relation(),
        }
    }

    /// All five matrices in [`Relation::ALL`] order.
    pub fn relations(&self) -> [&BoolMatrix; 5] {
        Relation::ALL.map(|r| self.relation(r))
    }

    /// True when `a` relates to `b` under `relation`. Unknown nodes relate to nothing.
    pub fn related(&self, relation: Relation, a: &N, b: &N) -> bool {
        match (self.index.index_of(a), self.index.index_of(b)) {
            (Some(i), Some(j)) => self.relation(relation).get(i, j),
            _ => false,
        }
    }

    /// True when `a` is an ancestor of `b`.
    pub fn manages(&self, a: &N, b: &N) -> bool {
        self.related(Relation::TransitiveManagement, a, b)
    }

    /// True when `a` and `b` are distinct siblings.
    pub fn is_peer(&self, a: &N, b: &N) -> bool {
        self.related(Relation::Peer, a, b)
    }

    /// Per-node relation counts.
    pub fn connection_table(&self) -> ConnectionTable {
        ConnectionTable::from_hierarchy(self)
    }

    /// Structural entropy of this hierarchy.
    pub fn entropy(&self, config: &EntropyConfig) -> Result<EntropySummary> {
        self.connection_table().entropy(config)
    }
}

fn computed(relation: Relation, matrix: BoolMatrix) -> BoolMatrix {
    debug!(
        relation = %relation,
        n = matrix.dim(),
        pairs = matrix.count(),
        "computed relation matrix"
    );
    matrix
}

impl<N: fmt::Display> fmt::Display for Hierarchy<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hierarchy[root {}]:", self.root)?;
        for (parent, kids) in &self.children {
            if kids.is_empty() {
                continue;
            }
            write!(f, " {parent}→{{")?;
            for (i, kid) in kids.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{kid}")?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}
