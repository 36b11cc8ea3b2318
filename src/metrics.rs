//! Structural entropy of a hierarchy.
//!
//! Each node has an out-degree under each of the five relations. Treating
//! `degree / (N - 1)` as the probability that the node is connected to a given
//! other node under that relation, the hierarchy's entropy is the sum of the
//! elementary Shannon terms over all `5·N` cells:
//!
//! ```text
//! H = Σ_relations Σ_nodes  -p · log₂ p        p = degree / (N - 1)
//! ```
//!
//! Transitive degrees count only the connections the direct relation does not
//! already account for (`R3 - R1`, `R4 - R2`), so nothing is counted twice.
//!
//! The score is normalized by a reference value `5·N·c`, with
//! `c = 1 / (e · ln 2)`, the largest value `-p · log₂ p` can take:
//!
//! ```text
//! H_norm = H / (5 · N · c)
//! ```
//!
//! # Example
//!
//! ```rust
//! use hierel::{build_hierarchy, summarize_entropy};
//!
//! let h = build_hierarchy([(1, 2), (1, 3), (3, 4), (3, 5)], 1).unwrap();
//! let summary = summarize_entropy(h.relations()).unwrap();
//! assert_eq!(summary.as_pair(), (6.5, 0.5));
//! ```

use std::f64::consts::{E, LN_2};

use ndarray::{Array2, ArrayView1, ArrayView2};
use tracing::debug;

use crate::error::{Error, Result};
use crate::hierarchy::Hierarchy;
use crate::matrix::BoolMatrix;
use crate::relations::Relation;

/// Maximum of `-p · log₂ p` over `p ∈ [0, 1]`, reached at `p = 1/e`.
pub const REFERENCE_CONSTANT: f64 = 1.0 / (E * LN_2);

/// Configuration for [`summarize_entropy_with`].
#[derive(Debug, Clone)]
pub struct EntropyConfig {
    /// Per-cell reference entropy `c` in `h_ref = 5 · N · c`.
    pub reference_constant: f64,
    /// Decimal places to round both reported values to (`None` keeps full precision).
    pub decimals: Option<u32>,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            reference_constant: REFERENCE_CONSTANT,
            decimals: Some(1),
        }
    }
}

impl EntropyConfig {
    /// Default configuration: `c = 1/(e·ln 2)`, one decimal place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference constant.
    pub fn with_reference_constant(mut self, c: f64) -> Self {
        self.reference_constant = c;
        self
    }

    /// Round results to `decimals` places.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Report unrounded values.
    pub fn unrounded(mut self) -> Self {
        self.decimals = None;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.reference_constant.is_finite() || self.reference_constant <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "reference_constant",
                message: "must be finite and positive",
            });
        }
        if matches!(self.decimals, Some(d) if d > 15) {
            return Err(Error::InvalidParameter {
                name: "decimals",
                message: "must be at most 15",
            });
        }
        Ok(())
    }
}

/// Entropy of a hierarchy's relation structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropySummary {
    /// Sum of elementary entropies over all relations and nodes.
    pub entropy_sum: f64,
    /// `entropy_sum` divided by the reference value.
    pub normalized: f64,
    /// Unrounded entropy contributed by each relation, in [`Relation::ALL`] order.
    pub per_relation: [f64; 5],
}

impl EntropySummary {
    /// Neutral result for hierarchies with at most one node.
    pub fn zero() -> Self {
        Self {
            entropy_sum: 0.0,
            normalized: 0.0,
            per_relation: [0.0; 5],
        }
    }

    /// `(entropy_sum, normalized)`.
    pub fn as_pair(&self) -> (f64, f64) {
        (self.entropy_sum, self.normalized)
    }

    /// Entropy contributed by one relation.
    pub fn relation_entropy(&self, relation: Relation) -> f64 {
        self.per_relation[relation.position()]
    }
}

/// Per-node connection counts under each relation.
///
/// Rows are nodes (in relation-index order), columns are relations (in
/// [`Relation::ALL`] order). The transitive columns hold only the connections
/// beyond the direct ones.
///
/// ```text
///            R1  R2  R3' R4' R5
///   node 0 [  2   0   2   0   0 ]
///   node 1 [  0   1   0   0   1 ]
///   ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTable {
    counts: Array2<i64>,
}

impl ConnectionTable {
    /// Count connections in five relation matrices given in [`Relation::ALL`] order.
    pub fn from_relations(matrices: [&BoolMatrix; 5]) -> Result<Self> {
        let n = matrices[0].dim();
        for m in &matrices[1..] {
            if m.dim() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: m.dim(),
                });
            }
        }
        Ok(Self::count(matrices))
    }

    /// Count connections in a hierarchy's relations.
    pub fn from_hierarchy<N: Ord + Clone>(hierarchy: &Hierarchy<N>) -> Self {
        Self::count(hierarchy.relations())
    }

    fn count(matrices: [&BoolMatrix; 5]) -> Self {
        let n = matrices[0].dim();
        let mut counts = Array2::<i64>::zeros((n, 5));

        for relation in Relation::ALL {
            let sums = matrices[relation.position()].row_sums();
            for (i, s) in sums.into_iter().enumerate() {
                counts[(i, relation.position())] = s as i64;
            }
        }

        for relation in Relation::ALL {
            if let Some(direct) = relation.direct_part() {
                for i in 0..n {
                    counts[(i, relation.position())] -= counts[(i, direct.position())];
                }
            }
        }

        Self { counts }
    }

    /// Number of nodes (rows).
    pub fn n_nodes(&self) -> usize {
        self.counts.nrows()
    }

    /// Count for node `i` under `relation`.
    pub fn get(&self, i: usize, relation: Relation) -> Option<i64> {
        self.counts.get((i, relation.position())).copied()
    }

    /// Counts of every node under `relation`.
    pub fn column(&self, relation: Relation) -> ArrayView1<'_, i64> {
        self.counts.column(relation.position())
    }

    /// Counts of node `i` under every relation.
    pub fn node(&self, i: usize) -> Option<ArrayView1<'_, i64>> {
        (i < self.n_nodes()).then(|| self.counts.row(i))
    }

    /// The whole table.
    pub fn view(&self) -> ArrayView2<'_, i64> {
        self.counts.view()
    }

    /// Entropy of the counts.
    ///
    /// With at most one node there is no other node to connect to, and the
    /// result is [`EntropySummary::zero`].
    pub fn entropy(&self, config: &EntropyConfig) -> Result<EntropySummary> {
        config.validate()?;

        let n = self.n_nodes();
        if n <= 1 {
            return Ok(EntropySummary::zero());
        }

        let max_connections = (n - 1) as f64;
        let mut per_relation = [0.0; 5];
        for relation in Relation::ALL {
            per_relation[relation.position()] = self
                .column(relation)
                .iter()
                .map(|&v| cell_entropy(v as f64 / max_connections))
                .sum();
        }

        let entropy_sum: f64 = per_relation.iter().sum();
        let h_ref = (n * Relation::ALL.len()) as f64 * config.reference_constant;
        let normalized = entropy_sum / h_ref;

        debug!(n, entropy_sum, normalized, "summarized hierarchy entropy");

        Ok(EntropySummary {
            entropy_sum: round_to(entropy_sum, config.decimals),
            normalized: round_to(normalized, config.decimals),
            per_relation,
        })
    }
}

/// Entropy summary of five relation matrices (R1..R5), rounded to one decimal.
pub fn summarize_entropy(matrices: [&BoolMatrix; 5]) -> Result<EntropySummary> {
    summarize_entropy_with(matrices, &EntropyConfig::default())
}

/// Entropy summary of five relation matrices (R1..R5) under `config`.
pub fn summarize_entropy_with(
    matrices: [&BoolMatrix; 5],
    config: &EntropyConfig,
) -> Result<EntropySummary> {
    ConnectionTable::from_relations(matrices)?.entropy(config)
}

// Counts outside `0..=N-1` only come from matrices no hierarchy produces;
// their `p` falls outside `(0, 1)` and contributes nothing.
fn cell_entropy(p: f64) -> f64 {
    if p > 0.0 && p < 1.0 {
        -p * p.log2()
    } else {
        0.0
    }
}

fn round_to(x: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(d) => {
            let scale = 10f64.powi(d as i32);
            (x * scale).round() / scale
        }
        None => x,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hierarchy::build_hierarchy;

    #[test]
    fn test_reference_constant() {
        assert!((REFERENCE_CONSTANT - 0.5307).abs() < 1e-4);
        // -p log2 p peaks at p = 1/e.
        let peak = cell_entropy(1.0 / E);
        assert!((peak - REFERENCE_CONSTANT).abs() < 1e-12);
    }

    #[test]
    fn test_cell_entropy_edges() {
        assert_eq!(cell_entropy(0.0), 0.0);
        assert_eq!(cell_entropy(-0.5), 0.0);
        assert_eq!(cell_entropy(1.0), 0.0);
        assert_eq!(cell_entropy(1.5), 0.0);
        assert!((cell_entropy(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_saturated_matrices_are_not_negative() {
        // Every cell set, diagonal included: row sums of 3 exceed N - 1 = 2.
        let full = BoolMatrix::from_rows(&[vec![true; 3], vec![true; 3], vec![true; 3]]).unwrap();
        let s = summarize_entropy([&full, &full, &full, &full, &full]).unwrap();
        assert_eq!(s.as_pair(), (0.0, 0.0));
        assert!(s.per_relation.iter().all(|&h| h >= 0.0));

        let mut with_loops = BoolMatrix::identity(3);
        with_loops.set(0, 1, true);
        let z = BoolMatrix::zeros(3);
        let s = summarize_entropy_with(
            [&with_loops, &z, &z, &z, &with_loops],
            &EntropyConfig::new().unrounded(),
        )
        .unwrap();
        assert!(s.entropy_sum >= 0.0);
        assert!(s.normalized >= 0.0 && s.normalized <= 1.0);
    }

    #[test]
    fn test_connection_table_corrects_transitive_columns() {
        let h = build_hierarchy([(1, 2), (1, 3), (3, 4), (3, 5)], 1).unwrap();
        let t = h.connection_table();
        assert_eq!(t.n_nodes(), 5);
        assert_eq!(t.column(Relation::DirectManagement).to_vec(), vec![2, 0, 2, 0, 0]);
        assert_eq!(t.column(Relation::DirectSubordination).to_vec(), vec![0, 1, 1, 1, 1]);
        assert_eq!(t.column(Relation::TransitiveManagement).to_vec(), vec![2, 0, 0, 0, 0]);
        assert_eq!(t.column(Relation::TransitiveSubordination).to_vec(), vec![0, 0, 0, 1, 1]);
        assert_eq!(t.column(Relation::Peer).to_vec(), vec![0, 1, 1, 1, 1]);
        assert_eq!(t.node(0).unwrap().to_vec(), vec![2, 0, 2, 0, 0]);
        assert_eq!(t.get(4, Relation::Peer), Some(1));
        assert!(t.node(5).is_none());
    }

    #[test]
    fn test_per_relation_breakdown() {
        let h = build_hierarchy([(1, 2), (1, 3), (3, 4), (3, 5)], 1).unwrap();
        let s = h.entropy(&EntropyConfig::new().unrounded()).unwrap();
        let expected = [1.0, 2.0, 0.5, 1.0, 2.0];
        for r in Relation::ALL {
            assert!((s.relation_entropy(r) - expected[r.position()]).abs() < 1e-12);
        }
        assert!((s.entropy_sum - 6.5).abs() < 1e-12);
        assert!((s.normalized - 6.5 / (25.0 * REFERENCE_CONSTANT)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_and_one_node() {
        let e = BoolMatrix::zeros(0);
        let s = summarize_entropy([&e, &e, &e, &e, &e]).unwrap();
        assert_eq!(s, EntropySummary::zero());

        let h = build_hierarchy(Vec::<(u8, u8)>::new(), 1).unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!(summarize_entropy(h.relations()).unwrap().as_pair(), (0.0, 0.0));
    }

    #[test]
    fn test_mismatched_inputs() {
        let a = BoolMatrix::zeros(3);
        let b = BoolMatrix::zeros(4);
        let err = summarize_entropy([&a, &a, &b, &a, &a]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn test_config_validation() {
        let a = BoolMatrix::zeros(3);
        let bad = EntropyConfig::new().with_reference_constant(0.0);
        assert!(summarize_entropy_with([&a, &a, &a, &a, &a], &bad).is_err());

        let bad = EntropyConfig::new().with_reference_constant(f64::NAN);
        assert!(bad.validate().is_err());

        let bad = EntropyConfig::new().with_decimals(40);
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidParameter { name: "decimals", .. })
        ));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(0.489_9, Some(1)), 0.5);
        assert_eq!(round_to(0.25, Some(1)), 0.3);
        assert_eq!(round_to(1.234_56, Some(3)), 1.235);
        assert_eq!(round_to(1.234_56, None), 1.234_56);
    }
}
