//! Relations and entropy of a small organization chart.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example org_entropy
//! ```

use hierel::{
    validate_edges, DelimitedEdges, EdgeSource, EntropyConfig, HierarchyBuilder, Relation,
};

const CHART: &str = "\
ceo, cto
ceo, cfo
cto, platform
cto, product
platform, sre
platform, infra
cfo, accounting
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let source = DelimitedEdges::new(CHART);

    // 1. Check the chart before building anything from it
    let report = validate_edges(source.edges()?, "ceo".to_string());
    println!("{report}");

    // 2. Orient from the root and derive the relations
    let h = HierarchyBuilder::new("ceo".to_string()).build_from(&source)?;
    println!("{h}\n");

    for relation in Relation::ALL {
        println!("{relation} ({} pairs):", h.relation(relation).count());
        let index = h.index();
        for (i, j) in h.relation(relation).iter_true() {
            if let (Some(a), Some(b)) = (index.id_at(i), index.id_at(j)) {
                println!("  {a} -> {b}");
            }
        }
    }

    // 3. Per-node connection counts and the entropy summary
    let table = h.connection_table();
    println!("\n{:<12} {:>4} {:>4} {:>4} {:>4} {:>4}", "node", "R1", "R2", "R3", "R4", "R5");
    for (i, id) in h.index().iter() {
        if let Some(row) = table.node(i) {
            println!(
                "{:<12} {:>4} {:>4} {:>4} {:>4} {:>4}",
                id, row[0], row[1], row[2], row[3], row[4]
            );
        }
    }

    let summary = h.entropy(&EntropyConfig::default())?;
    let (entropy, normalized) = summary.as_pair();
    println!("\nentropy = {entropy}, normalized = {normalized}");

    let exact = h.entropy(&EntropyConfig::new().unrounded())?;
    println!("unrounded: {:.4}, {:.4}", exact.entropy_sum, exact.normalized);

    println!("\n{}", h.health_report());
    Ok(())
}
