//! DBSCAN on a simple 2D dataset.
//!
//! Run with `RUST_LOG=dbclust=debug` to see per-phase timings.

use dbclust::{Clustering, Dbscan, Manhattan, PointKind};

fn main() -> dbclust::Result<()> {
    pretty_env_logger::init();

    // Three well-separated clusters in 2D, plus two outliers.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
        // Outliers
        vec![2.5, 7.5],
        vec![7.5, -5.0],
    ];

    let dbscan = Dbscan::new(0.5, 3)?;
    let result = dbscan.fit(&data)?;
    println!("=== DBSCAN (eps=0.5, min_samples=3, euclidean) ===");
    for (i, label) in result.labels().iter().enumerate() {
        let kind = match result.point_kind(i) {
            Some(PointKind::Core) => "core",
            Some(PointKind::Border) => "border",
            _ => "noise",
        };
        println!(
            "  point {:2} ({:5.1}, {:5.1}) => label {:2} ({})",
            i, data[i][0], data[i][1], label, kind
        );
    }
    println!(
        "  {} clusters, {} noise, core samples {:?}",
        result.n_clusters(),
        result.n_noise(),
        result.core_sample_indices()
    );

    let labels = dbscan.with_metric(Manhattan).fit_predict(&data)?;
    println!("\n=== DBSCAN (eps=0.5, min_samples=3, manhattan) ===");
    println!("  labels {:?}", labels);

    Ok(())
}
