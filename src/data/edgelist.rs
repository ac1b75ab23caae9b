//! Plain-text edge list loading

use anyhow::{anyhow, Context, Result};
use crate::graph::{GraphBuilder, LoadedGraph};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};

/// Load a text edge list from a file.
///
/// One edge per line: `source target [weight]`, separated by whitespace or
/// commas. Blank lines and lines starting with `#` are ignored.
pub fn load_edge_list(path: &str, directed: bool) -> Result<LoadedGraph> {
    log::info!("Reading edge list: {}", path);

    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let loaded = parse_edge_list(BufReader::new(file), directed)?;

    log::info!(
        "Built graph with {} nodes and {} edges",
        loaded.graph.node_count,
        loaded.graph.edge_count()
    );

    Ok(loaded)
}

/// Parse an edge list from any reader
pub fn parse_edge_list<R: Read>(reader: BufReader<R>, directed: bool) -> Result<LoadedGraph> {
    let mut builder = GraphBuilder::with_capacity(directed, 1024);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        match fields.as_slice() {
            [src, dst] => builder.add_edge(src, dst),
            [src, dst, weight] => {
                let weight: f64 = weight.parse().map_err(|_| {
                    anyhow!("Line {}: invalid weight '{}'", line_no + 1, weight)
                })?;
                builder.add_weighted_edge(src, dst, weight);
            }
            _ => {
                return Err(anyhow!(
                    "Line {}: expected 'source target [weight]', got '{}'",
                    line_no + 1,
                    line
                ))
            }
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphProvider;
    use std::io::Write;

    fn parse(text: &str, directed: bool) -> Result<LoadedGraph> {
        parse_edge_list(BufReader::new(text.as_bytes()), directed)
    }

    #[test]
    fn parses_unweighted_lines() {
        let loaded = parse("# comment\na b\n\nb c\nc,a\n", true).unwrap();
        assert_eq!(loaded.graph.vertex_count(), 3);
        assert_eq!(loaded.graph.edge_count(), 3);
        assert!(loaded.graph.is_directed());
        assert!(loaded.weights.is_none());
        assert_eq!(loaded.graph.endpoints(2), (2, 0));
    }

    #[test]
    fn parses_weights() {
        let loaded = parse("1 2 0.5\n2 3 1.5\n", false).unwrap();
        assert_eq!(loaded.weights, Some(vec![0.5, 1.5]));
        assert_eq!(loaded.graph.node_label(0), "1");
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse("a b x\n", false).is_err());
        assert!(parse("a\n", false).is_err());
        assert!(parse("a b 1.0\nb c\n", false).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x y").unwrap();
        writeln!(file, "y z").unwrap();

        let loaded = load_edge_list(file.path().to_str().unwrap(), false).unwrap();
        assert_eq!(loaded.graph.vertex_count(), 3);
    }
}
