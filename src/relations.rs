//! The five management relations derived from a hierarchy.
//!
//! ```text
//!         1            R1  direct management        1→2, 1→3, 3→4, 3→5
//!        / \           R2  direct subordination     2→1, 3→1, 4→3, 5→3
//!       2   3          R3  transitive management    R1 ∪ {1→4, 1→5}
//!          / \         R4  transitive subordination R3 inverted
//!         4   5        R5  peers                    2↔3, 4↔5
//! ```
//!
//! R1 is read off the tree; everything else is boolean algebra on R1:
//!
//! - `R2 = R1ᵀ`
//! - `R3 = R1 ∪ R1² ∪ … ∪ R1ᴺ` (transitive closure)
//! - `R4 = R3ᵀ`
//! - `R5 = (R2 ∘ R1) \ I` (some `k` is the parent of both `i` and `j`, `i ≠ j`)

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::error::Result;
use crate::hierarchy::RelationIndex;
use crate::matrix::BoolMatrix;

/// One of the five relations, in their fixed summary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// `i` is the immediate parent of `j`.
    DirectManagement,
    /// `i` is an immediate child of `j`.
    DirectSubordination,
    /// `i` is an ancestor of `j`.
    TransitiveManagement,
    /// `i` is a descendant of `j`.
    TransitiveSubordination,
    /// `i` and `j` are distinct and share an immediate parent.
    Peer,
}

impl Relation {
    /// All relations in summary order (R1..R5).
    pub const ALL: [Relation; 5] = [
        Relation::DirectManagement,
        Relation::DirectSubordination,
        Relation::TransitiveManagement,
        Relation::TransitiveSubordination,
        Relation::Peer,
    ];

    /// Zero-based position in [`Relation::ALL`].
    pub fn position(self) -> usize {
        match self {
            Relation::DirectManagement => 0,
            Relation::DirectSubordination => 1,
            Relation::TransitiveManagement => 2,
            Relation::TransitiveSubordination => 3,
            Relation::Peer => 4,
        }
    }

    /// Short name.
    pub fn name(self) -> &'static str {
        match self {
            Relation::DirectManagement => "direct_management",
            Relation::DirectSubordination => "direct_subordination",
            Relation::TransitiveManagement => "transitive_management",
            Relation::TransitiveSubordination => "transitive_subordination",
            Relation::Peer => "peer",
        }
    }

    /// For transitive relations, the direct relation they extend.
    pub fn direct_part(self) -> Option<Relation> {
        match self {
            Relation::TransitiveManagement => Some(Relation::DirectManagement),
            Relation::TransitiveSubordination => Some(Relation::DirectSubordination),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the transitive closure is iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosureStrategy {
    /// Accumulate exactly `N` powers of the direct relation.
    FixedPowers,
    /// Accumulate powers until the next one adds nothing (at most `N`).
    #[default]
    UntilStable,
}

/// Configuration for relation derivation.
#[derive(Debug, Clone, Default)]
pub struct RelationConfig {
    /// Closure iteration strategy.
    pub closure: ClosureStrategy,
}

impl RelationConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the closure strategy.
    pub fn with_closure(mut self, closure: ClosureStrategy) -> Self {
        self.closure = closure;
        self
    }
}

/// Direct management matrix of a parent → children map under `index`.
pub(crate) fn direct_management<N: Ord + Clone>(
    children: &BTreeMap<N, BTreeSet<N>>,
    index: &RelationIndex<N>,
) -> BoolMatrix {
    let mut m = BoolMatrix::zeros(index.len());
    for (parent, kids) in children {
        let Some(p) = index.index_of(parent) else {
            continue;
        };
        for child in kids {
            if let Some(c) = index.index_of(child) {
                m.set(p, c, true);
            }
        }
    }
    m
}

/// Transitive closure `R ∪ R² ∪ … ∪ Rᴺ` of a direct relation.
///
/// Both strategies return the same matrix; [`ClosureStrategy::UntilStable`]
/// stops once a power is already contained in the accumulated result, since no
/// later power can add anything after that.
pub fn transitive_closure(direct: &BoolMatrix, strategy: ClosureStrategy) -> BoolMatrix {
    let n = direct.dim();
    let mut result = direct.clone();
    let mut power = direct.clone();

    for step in 0..n {
        let next = result.union_unchecked(&power);
        if strategy == ClosureStrategy::UntilStable && step > 0 && next == result {
            trace!(step, n, "closure reached fixed point");
            break;
        }
        result = next;
        power = power.compose_unchecked(direct);
    }

    result
}

/// Peer relation `(subordination ∘ management)` with the diagonal cleared.
pub fn peer_relation(subordination: &BoolMatrix, management: &BoolMatrix) -> Result<BoolMatrix> {
    Ok(subordination.multiply(management)?.without_diagonal())
}
