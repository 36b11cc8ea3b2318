#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use crate::hierarchy::{build_hierarchy, Hierarchy, HierarchyBuilder};
    use crate::metrics::{summarize_entropy, EntropyConfig};
    use crate::relations::{ClosureStrategy, Relation};
    use crate::source::DelimitedEdges;
    use crate::Result;
    use proptest::prelude::*;

    fn from_text(text: &str, root: &str) -> Result<Hierarchy<String>> {
        HierarchyBuilder::new(root.to_string()).build_from(&DelimitedEdges::new(text))
    }

    fn pairs(h: &Hierarchy<String>, relation: Relation) -> Vec<(String, String)> {
        let index = h.index();
        h.relation(relation)
            .iter_true()
            .map(|(i, j)| {
                (
                    index.id_at(i).unwrap().clone(),
                    index.id_at(j).unwrap().clone(),
                )
            })
            .collect()
    }

    fn owned(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_two_level_tree() -> Result<()> {
        let h = from_text("1,2\n1,3\n3,4\n3,5", "1")?;

        assert_eq!(
            pairs(&h, Relation::DirectManagement),
            owned(&[("1", "2"), ("1", "3"), ("3", "4"), ("3", "5")])
        );
        assert_eq!(
            pairs(&h, Relation::TransitiveManagement),
            owned(&[
                ("1", "2"),
                ("1", "3"),
                ("1", "4"),
                ("1", "5"),
                ("3", "4"),
                ("3", "5")
            ])
        );
        assert_eq!(
            pairs(&h, Relation::Peer),
            owned(&[("2", "3"), ("3", "2"), ("4", "5"), ("5", "4")])
        );

        let summary = summarize_entropy(h.relations())?;
        assert_eq!(summary.as_pair(), (6.5, 0.5));
        Ok(())
    }

    #[test]
    fn test_single_edge() -> Result<()> {
        let h = from_text("1,2", "1")?;
        assert_eq!(h.len(), 2);
        assert!(h.direct_management().get(0, 1));
        assert!(!h.direct_management().get(1, 0));
        assert!(h.peer_relation().is_zero());
        assert_eq!(summarize_entropy(h.relations())?.as_pair(), (0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_star_peers() -> Result<()> {
        let h = from_text("1,2\n1,3\n1,4", "1")?;
        let ids = ["1", "2", "3", "4"].map(String::from);

        for a in &ids {
            for b in &ids {
                let expected = a != b && a != "1" && b != "1";
                assert_eq!(h.is_peer(a, b), expected, "{a} ~ {b}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_chain_closure() -> Result<()> {
        let h = build_hierarchy([("root", "a"), ("a", "b"), ("b", "c")], "root")?;
        assert!(h.manages(&"root", &"c"));
        assert!(!h.related(Relation::DirectManagement, &"root", &"c"));
        assert!(h.related(Relation::TransitiveSubordination, &"c", &"root"));
        assert!(!h.manages(&"c", &"root"));
        assert!(h.peer_relation().is_zero());
        Ok(())
    }

    #[test]
    fn test_root_only() -> Result<()> {
        let h = from_text("", "1")?;
        assert_eq!(h.len(), 1);
        for m in h.relations() {
            assert_eq!(m.dim(), 1);
            assert!(m.is_zero());
        }
        assert_eq!(summarize_entropy(h.relations())?.as_pair(), (0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_index_is_lexicographic_for_strings() -> Result<()> {
        let h = from_text("1,2\n1,10", "1")?;
        // "1" < "10" < "2"
        assert_eq!(h.index().ids(), &["1", "10", "2"].map(String::from));
        assert!(h.direct_management().get(0, 1));
        assert!(h.direct_management().get(0, 2));
        Ok(())
    }

    #[test]
    fn test_deeper_tree_entropy() -> Result<()> {
        let h = from_text("1,2\n1,3\n3,4\n3,5\n5,6\n6,7", "1")?;
        let table = h.connection_table();
        // Node "1" manages 2 directly and 4 more transitively.
        assert_eq!(table.get(0, Relation::DirectManagement), Some(2));
        assert_eq!(table.get(0, Relation::TransitiveManagement), Some(4));
        // Node "7" has one parent and three further ancestors.
        assert_eq!(table.get(6, Relation::DirectSubordination), Some(1));
        assert_eq!(table.get(6, Relation::TransitiveSubordination), Some(3));

        let s = h.entropy(&EntropyConfig::new())?;
        assert!(s.entropy_sum > 0.0);
        assert!(s.normalized > 0.0 && s.normalized < 1.0);
        Ok(())
    }

    #[test]
    fn test_structural_error_from_text() {
        let err = from_text("1,2\n2,3\n3,1", "1").unwrap_err();
        assert!(err.is_structural());
    }

    /// Random tree on `0..=parents.len()`: node `i + 1` hangs under a node in `0..=i`.
    fn random_tree() -> impl Strategy<Value = Vec<(usize, usize)>> {
        proptest::collection::vec(any::<usize>(), 0..30).prop_map(|parents| {
            parents
                .iter()
                .enumerate()
                .map(|(i, &p)| (p % (i + 1), i + 1))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn subordination_is_transposed_management(edges in random_tree()) {
            let h = build_hierarchy(edges, 0).unwrap();
            prop_assert_eq!(h.direct_subordination(), &h.direct_management().transpose());
            prop_assert_eq!(h.transitive_subordination(), &h.transitive_management().transpose());
            let n = h.len();
            for i in 0..n {
                for j in 0..n {
                    prop_assert_eq!(h.direct_management().get(i, j), h.direct_subordination().get(j, i));
                }
            }
        }

        #[test]
        fn closure_contains_direct_and_is_transitive(edges in random_tree()) {
            let h = build_hierarchy(edges, 0).unwrap();
            let r1 = h.direct_management();
            let r3 = h.transitive_management();
            prop_assert!(r1.is_subset_of(r3).unwrap());
            prop_assert!(r3.multiply(r3).unwrap().is_subset_of(r3).unwrap());
            // Every non-root node has exactly its depth's worth of ancestors.
            let ancestors = h.transitive_subordination().row_sums();
            for (i, id) in h.index().iter() {
                prop_assert_eq!(ancestors[i], h.depth(id).unwrap());
            }
        }

        #[test]
        fn closure_strategies_agree(edges in random_tree()) {
            let fixed = HierarchyBuilder::new(0)
                .with_closure(ClosureStrategy::FixedPowers)
                .build(edges.clone())
                .unwrap();
            let stable = HierarchyBuilder::new(0)
                .with_closure(ClosureStrategy::UntilStable)
                .build(edges)
                .unwrap();
            prop_assert_eq!(fixed.transitive_management(), stable.transitive_management());
        }

        #[test]
        fn peers_are_symmetric_irreflexive_siblings(edges in random_tree()) {
            let h = build_hierarchy(edges, 0).unwrap();
            let r5 = h.peer_relation();
            prop_assert!(r5.is_symmetric());
            for (i, a) in h.index().iter() {
                prop_assert!(!r5.get(i, i));
                for (j, b) in h.index().iter() {
                    let siblings = a != b && h.parent(a).is_some() && h.parent(a) == h.parent(b);
                    prop_assert_eq!(r5.get(i, j), siblings);
                }
            }
        }

        #[test]
        fn normalized_entropy_is_finite_and_non_negative(edges in random_tree()) {
            let h = build_hierarchy(edges, 0).unwrap();
            let s = h.entropy(&EntropyConfig::new().unrounded()).unwrap();
            prop_assert!(s.entropy_sum.is_finite() && s.entropy_sum >= 0.0);
            prop_assert!(s.normalized.is_finite() && s.normalized >= 0.0);
            prop_assert!(s.normalized <= 1.0);
            let total: f64 = s.per_relation.iter().sum();
            prop_assert!((total - s.entropy_sum).abs() < 1e-9);
        }
    }
}
