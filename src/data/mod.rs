//! Input loading module

pub mod edgelist;
pub mod parquet;

use anyhow::Result;
use crate::graph::LoadedGraph;
use std::path::Path;

/// Load a graph, picking the reader from the file extension
pub fn load_graph(
    path: &str,
    directed: bool,
    columns: &parquet::EdgeColumns,
) -> Result<LoadedGraph> {
    let is_parquet = Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        parquet::load_edge_list(path, directed, columns)
    } else {
        edgelist::load_edge_list(path, directed)
    }
}
