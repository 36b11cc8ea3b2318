//! Square boolean matrices as binary relations.
//!
//! A [`BoolMatrix`] of size `N×N` encodes a relation over `N` indexed nodes:
//! `m.get(i, j)` is true when node `i` relates to node `j`.
//!
//! # Operations
//!
//! | Operation | Definition | Relational meaning |
//! |-----------|------------|--------------------|
//! | [`BoolMatrix::transpose`] | `T[i][j] = A[j][i]` | Inverse relation |
//! | [`BoolMatrix::sum`] | `S[i][j] = A[i][j] ∨ B[i][j]` | Union |
//! | [`BoolMatrix::multiply`] | `P[i][j] = ∨ₖ (A[i][k] ∧ B[k][j])` | Composition |
//!
//! Multiplication is matrix multiplication over the boolean semiring
//! (∨ as addition, ∧ as multiplication):
//!
//! ```text
//!   A = 1→2, 2→3        A ∘ A = 1→3
//!
//!       1 2 3               1 2 3
//!   1 [ 0 1 0 ]         1 [ 0 0 1 ]
//!   2 [ 0 0 1 ]         2 [ 0 0 0 ]
//!   3 [ 0 0 0 ]         3 [ 0 0 0 ]
//! ```
//!
//! Every operation returns a new matrix; operands are never modified, so a
//! matrix cached elsewhere can be passed in without copying first.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, Zip};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A square boolean matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolMatrix {
    inner: Array2<bool>,
}

impl BoolMatrix {
    /// All-false `n×n` matrix (the empty relation).
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: Array2::from_elem((n, n), false),
        }
    }

    /// `n×n` identity (the equality relation).
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.inner[(i, i)] = true;
        }
        m
    }

    /// Build from row vectors. Every row must have as many columns as there are rows.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let n = rows.len();
        let mut inner = Array2::from_elem((n, n), false);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::ShapeMismatch {
                    expected: format!("{n}x{n}"),
                    actual: format!("row {i} with {} columns", row.len()),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                inner[(i, j)] = value;
            }
        }
        Ok(Self { inner })
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    /// Cell `(i, j)`. Out-of-range coordinates read as `false`.
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.inner.get((i, j)).copied().unwrap_or(false)
    }

    /// Set cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.inner[(i, j)] = value;
    }

    /// Borrow the underlying array.
    pub fn view(&self) -> ArrayView2<'_, bool> {
        self.inner.view()
    }

    /// The inverse relation.
    pub fn transpose(&self) -> Self {
        Self {
            inner: self.inner.t().as_standard_layout().into_owned(),
        }
    }

    /// Elementwise OR (relation union).
    pub fn sum(&self, other: &Self) -> Result<Self> {
        self.check_dim(other)?;
        Ok(self.union_unchecked(other))
    }

    /// Boolean matrix product (relation composition).
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.check_dim(other)?;
        Ok(self.compose_unchecked(other))
    }

    /// Copy with every diagonal cell cleared (irreflexive part of the relation).
    pub fn without_diagonal(&self) -> Self {
        let mut out = self.clone();
        for k in 0..out.dim() {
            out.inner[(k, k)] = false;
        }
        out
    }

    /// Number of true cells in each row (out-degree per node).
    pub fn row_sums(&self) -> Vec<usize> {
        self.inner
            .rows()
            .into_iter()
            .map(|row| row.iter().filter(|&&v| v).count())
            .collect()
    }

    /// Total number of true cells.
    pub fn count(&self) -> usize {
        self.inner.iter().filter(|&&v| v).count()
    }

    /// True when no cell is set.
    pub fn is_zero(&self) -> bool {
        !self.inner.iter().any(|&v| v)
    }

    /// True when `self == transpose(self)`.
    pub fn is_symmetric(&self) -> bool {
        self.inner == self.inner.t()
    }

    /// True when every cell set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Self) -> Result<bool> {
        self.check_dim(other)?;
        Ok(Zip::from(&self.inner)
            .and(&other.inner)
            .all(|&a, &b| !a || b))
    }

    /// Coordinates of the true cells, row-major.
    pub fn iter_true(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inner
            .indexed_iter()
            .filter_map(|(ij, &v)| v.then_some(ij))
    }

    /// Copy out as nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.inner.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    fn check_dim(&self, other: &Self) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(())
    }

    pub(crate) fn union_unchecked(&self, other: &Self) -> Self {
        Self {
            inner: Zip::from(&self.inner)
                .and(&other.inner)
                .map_collect(|&a, &b| a || b),
        }
    }

    pub(crate) fn compose_unchecked(&self, other: &Self) -> Self {
        let n = self.dim();

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<bool>> = (0..n)
            .into_par_iter()
            .map(|i| self.compose_row(other, i))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<bool>> = (0..n).map(|i| self.compose_row(other, i)).collect();

        let mut inner = Array2::from_elem((n, n), false);
        for (i, row) in rows.into_iter().enumerate() {
            for (j, value) in row.into_iter().enumerate() {
                inner[(i, j)] = value;
            }
        }
        Self { inner }
    }

    // Row i of A∘B is the OR of the rows k of B for which A[i][k] is set.
    fn compose_row(&self, other: &Self, i: usize) -> Vec<bool> {
        let mut out = vec![false; other.dim()];
        for (k, &a) in self.inner.row(i).iter().enumerate() {
            if !a {
                continue;
            }
            for (j, &b) in other.inner.row(k).iter().enumerate() {
                out[j] |= b;
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain3() -> BoolMatrix {
        BoolMatrix::from_rows(&[
            vec![false, true, false],
            vec![false, false, true],
            vec![false, false, false],
        ])
        .unwrap()
    }

    fn square(max: usize) -> impl Strategy<Value = BoolMatrix> {
        (0..max).prop_flat_map(|n| {
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n)
                .prop_map(|rows| BoolMatrix::from_rows(&rows).unwrap())
        })
    }

    #[test]
    fn test_compose_chain() -> Result<()> {
        let a = chain3();
        let a2 = a.multiply(&a)?;
        assert!(a2.get(0, 2));
        assert_eq!(a2.count(), 1);

        let a3 = a2.multiply(&a)?;
        assert!(a3.is_zero());
        Ok(())
    }

    #[test]
    fn test_sum_is_union() -> Result<()> {
        let a = chain3();
        let b = a.multiply(&a)?;
        let s = a.sum(&b)?;
        assert_eq!(s.iter_true().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (1, 2)]);
        // Operands untouched.
        assert_eq!(a, chain3());
        assert_eq!(b.count(), 1);
        Ok(())
    }

    #[test]
    fn test_transpose_moves_cells() {
        let t = chain3().transpose();
        assert!(t.get(1, 0));
        assert!(t.get(2, 1));
        assert!(!t.get(0, 1));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = BoolMatrix::zeros(2);
        let b = BoolMatrix::zeros(3);
        assert_eq!(
            a.sum(&b),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        assert!(matches!(
            a.multiply(&b),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(a.is_subset_of(&b).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = BoolMatrix::from_rows(&[vec![true, false], vec![true]]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_matrix_ops() -> Result<()> {
        let e = BoolMatrix::zeros(0);
        assert_eq!(e.multiply(&e)?.dim(), 0);
        assert_eq!(e.sum(&e)?.dim(), 0);
        assert!(e.row_sums().is_empty());
        assert!(e.is_symmetric());
        Ok(())
    }

    #[test]
    fn test_row_sums_and_diagonal() {
        let mut m = BoolMatrix::identity(3);
        m.set(0, 2, true);
        assert_eq!(m.row_sums(), vec![2, 1, 1]);
        assert_eq!(m.without_diagonal().row_sums(), vec![1, 0, 0]);
        assert!(!m.get(7, 7));
    }

    proptest! {
        #[test]
        fn transpose_is_involution(a in square(9)) {
            prop_assert_eq!(a.transpose().transpose(), a);
        }

        #[test]
        fn identity_is_neutral(a in square(9)) {
            let id = BoolMatrix::identity(a.dim());
            prop_assert_eq!(a.multiply(&id).unwrap(), a.clone());
            prop_assert_eq!(id.multiply(&a).unwrap(), a);
        }

        #[test]
        fn transpose_reverses_composition(a in square(7)) {
            let b = a.transpose().sum(&a).unwrap();
            let lhs = a.multiply(&b).unwrap().transpose();
            let rhs = b.transpose().multiply(&a.transpose()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn sum_contains_both(a in square(9)) {
            let b = a.transpose();
            let s = a.sum(&b).unwrap();
            prop_assert!(a.is_subset_of(&s).unwrap());
            prop_assert!(b.is_subset_of(&s).unwrap());
            prop_assert!(s.is_symmetric());
        }
    }
}
