//! Parquet file handling for edge lists

use anyhow::{anyhow, Result};
use polars::prelude::*;
use crate::graph::{GraphBuilder, LoadedGraph};
use log;

/// Column layout of an edge-list Parquet file
#[derive(Debug, Clone)]
pub struct EdgeColumns {
    pub source: String,
    pub target: String,
    /// Read edge weights from this column when set
    pub weight: Option<String>,
}

impl Default for EdgeColumns {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
            weight: None,
        }
    }
}

/// Load an edge list from a Parquet file.
///
/// Endpoints are read as strings whatever their stored type, so integer and
/// string vertex ids both work. Rows with a null endpoint are skipped; a null
/// weight is an error.
pub fn load_edge_list(path: &str, directed: bool, columns: &EdgeColumns) -> Result<LoadedGraph> {
    log::info!("Reading parquet file: {}", path);

    // Check if the file exists
    if !std::path::Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?.collect()?;

    log::info!("File schema: {:?}", df.schema());
    log::info!("Loaded {} edge rows", df.height());

    let source_col = df.column(&columns.source)?.cast(&DataType::String)?;
    let target_col = df.column(&columns.target)?.cast(&DataType::String)?;
    let sources = source_col.str()?;
    let targets = target_col.str()?;

    let weight_col = match &columns.weight {
        Some(name) => Some(df.column(name)?.cast(&DataType::Float64)?),
        None => None,
    };
    let weights = match &weight_col {
        Some(col) => Some(col.f64()?),
        None => None,
    };

    let mut builder = GraphBuilder::with_capacity(directed, df.height());
    let mut skipped = 0usize;

    for i in 0..df.height() {
        let (src, dst) = match (sources.get(i), targets.get(i)) {
            (Some(src), Some(dst)) => (src, dst),
            _ => {
                skipped += 1;
                continue;
            }
        };

        match weights {
            Some(weights) => {
                let weight = weights
                    .get(i)
                    .ok_or_else(|| anyhow!("Row {} has no weight", i))?;
                builder.add_weighted_edge(src, dst, weight);
            }
            None => builder.add_edge(src, dst),
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with a missing endpoint", skipped);
    }

    let loaded = builder.build()?;
    log::info!(
        "Built graph with {} nodes and {} edges",
        loaded.graph.node_count,
        loaded.graph.edge_count()
    );

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    /// source=[1, 2, null], target=[2, 3, 1], weight=[0.5, 1.5, 2.0]
    fn write_edges(dir: &std::path::Path) -> String {
        let mut df = df!(
            "source" => [Some(1i64), Some(2), None],
            "target" => [Some(2i64), Some(3), Some(1)],
            "weight" => [0.5f64, 1.5, 2.0],
        )
        .unwrap();

        let path = dir.join("edges.parquet");
        let file = File::create(&path).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn skips_rows_with_null_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_edges(dir.path());

        let loaded = load_edge_list(&path, true, &EdgeColumns::default()).unwrap();
        assert_eq!(loaded.graph.node_count, 3);
        assert_eq!(loaded.graph.edge_count(), 2);
        assert!(loaded.weights.is_none());
    }

    #[test]
    fn integer_ids_become_labels_and_weights_follow_edges() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_edges(dir.path());
        let columns = EdgeColumns {
            weight: Some("weight".to_string()),
            ..EdgeColumns::default()
        };

        let loaded = load_edge_list(&path, true, &columns).unwrap();
        assert_eq!(loaded.weights, Some(vec![0.5, 1.5]));
        assert_eq!(loaded.graph.node_label(0), "1");
        assert_eq!(loaded.graph.node_label(2), "3");
        assert_eq!(loaded.graph.endpoints(1), (1, 2));
    }

    #[test]
    fn missing_columns_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_edges(dir.path());

        let no_weight = EdgeColumns {
            weight: Some("cost".to_string()),
            ..EdgeColumns::default()
        };
        assert!(load_edge_list(&path, true, &no_weight).is_err());

        let no_source = EdgeColumns {
            source: "from".to_string(),
            ..EdgeColumns::default()
        };
        assert!(load_edge_list(&path, true, &no_source).is_err());

        let missing = dir.path().join("absent.parquet");
        assert!(load_edge_list(missing.to_str().unwrap(), true, &EdgeColumns::default()).is_err());
    }
}
