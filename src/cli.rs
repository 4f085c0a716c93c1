///! CLI commands for butterfly-partition

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use crate::bisection::{BisectionConfig, RecursiveBisection};
use crate::border::write_border_geojson;
use crate::formats::{CnbgEdge, CnbgFile, CompressedNodeBasedGraph, NbgEbgMapFile, PartitionIdsFile};
use crate::geo::Coordinate;
use crate::graph::BisectionGraph;
use crate::mapping::NbgEbgMapping;

#[derive(Parser)]
#[command(name = "butterfly-partition")]
#[command(about = "Recursive bisection partitioner for node-based graphs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Partition a compressed node-based graph into hierarchical cells
    Partition {
        /// Input compressed node-based graph (cnbg)
        #[arg(long)]
        graph: PathBuf,

        /// Node-based to edge-based mapping file (nbg_ebg_map)
        #[arg(long)]
        mapping: Option<PathBuf>,

        /// Output file for per-node bisection IDs
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write border vertices per level as GeoJSON
        #[arg(long)]
        border_geojson: Option<PathBuf>,

        /// Stop splitting cells at or below this node count
        #[arg(long, default_value = "4096")]
        max_cell_size: u32,

        /// Tolerated deviation from an exact halving, strictly in (0, 1)
        #[arg(long, default_value = "0.25")]
        balance: f64,

        /// Weight of balance deviation against cut size between candidates
        #[arg(long, default_value = "0.25")]
        boundary_factor: f64,

        /// Boundary-refinement passes per candidate split
        #[arg(long, default_value = "10")]
        optimizing_cuts: u32,

        /// Worker threads (0 = one per core)
        #[arg(short, long, default_value = "0")]
        threads: usize,
    },

    /// Write a synthetic grid graph as a cnbg file (for demos and tests)
    GenerateGrid {
        /// Grid rows
        #[arg(long, default_value = "16")]
        rows: u32,

        /// Grid columns
        #[arg(long, default_value = "16")]
        cols: u32,

        /// Output cnbg file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[allow(clippy::too_many_arguments)]
pub fn run_partition(
    graph_path: PathBuf,
    mapping_path: Option<PathBuf>,
    output: Option<PathBuf>,
    border_geojson: Option<PathBuf>,
    config: BisectionConfig,
    threads: usize,
) -> Result<()> {
    let start_time = Instant::now();

    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    println!("🦋 Starting partition");
    println!("📂 cnbg: {}", graph_path.display());

    let compressed = CnbgFile::read(&graph_path)
        .with_context(|| format!("failed to load {}", graph_path.display()))?;
    println!(
        "  ✓ Loaded compressed node based graph: {} edges, {} nodes",
        compressed.edges.len(),
        compressed.coordinates.len()
    );

    let graph = BisectionGraph::from_cnbg(compressed);

    let bisection = RecursiveBisection::new(config, &graph)
        .context("recursive bisection failed")?;
    println!(
        "  ✓ Partitioned {} nodes in {:.2}s",
        graph.number_of_nodes(),
        start_time.elapsed().as_secs_f64()
    );

    if let Some(path) = border_geojson {
        write_border_geojson(&path, &graph, bisection.bisection_ids())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  ✓ Wrote border vertices to {}", path.display());
    }

    if let Some(path) = mapping_path {
        let records = NbgEbgMapFile::read(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let mapping = NbgEbgMapping::from_records(&records);
        println!(
            "  ✓ Loaded node based graph to edge based graph mapping: {} records",
            records.len()
        );

        // Every ID the mapping declares must resolve; anything else is a
        // contract breach with the edge-based graph builder.
        for record in &records {
            mapping.lookup(record.head)?;
            mapping.lookup(record.tail)?;
        }
    }

    if let Some(path) = output {
        PartitionIdsFile::write(&path, bisection.bisection_ids())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  ✓ Wrote bisection IDs to {}", path.display());
    }

    println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

pub fn run_generate_grid(rows: u32, cols: u32, output: PathBuf) -> Result<()> {
    let graph = make_grid_graph(rows, cols);
    CnbgFile::write(&output, &graph)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "✓ Wrote {}x{} grid ({} nodes, {} edges) to {}",
        rows,
        cols,
        graph.coordinates.len(),
        graph.edges.len(),
        output.display()
    );
    Ok(())
}

/// 4-connected grid with both directions of every edge, nodes laid out
/// row-major on a 0.001 degree raster.
pub fn make_grid_graph(rows: u32, cols: u32) -> CompressedNodeBasedGraph {
    let node_id = |r: u32, c: u32| r * cols + c;

    let mut coordinates = Vec::with_capacity((rows * cols) as usize);
    for r in 0..rows {
        for c in 0..cols {
            coordinates.push(Coordinate::from_degrees(
                f64::from(c) * 0.001,
                f64::from(r) * 0.001,
            ));
        }
    }

    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let id = node_id(r, c);
            if c > 0 {
                edges.push(CnbgEdge { source: id, target: node_id(r, c - 1) });
            }
            if c + 1 < cols {
                edges.push(CnbgEdge { source: id, target: node_id(r, c + 1) });
            }
            if r > 0 {
                edges.push(CnbgEdge { source: id, target: node_id(r - 1, c) });
            }
            if r + 1 < rows {
                edges.push(CnbgEdge { source: id, target: node_id(r + 1, c) });
            }
        }
    }

    CompressedNodeBasedGraph { edges, coordinates }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_edge_count() {
        // 4x4 grid: 24 undirected edges, both directions stored.
        let graph = make_grid_graph(4, 4);
        assert_eq!(graph.coordinates.len(), 16);
        assert_eq!(graph.edges.len(), 48);
    }

    #[test]
    fn test_grid_degenerate_sizes() {
        let single = make_grid_graph(1, 1);
        assert_eq!(single.coordinates.len(), 1);
        assert!(single.edges.is_empty());

        let row = make_grid_graph(1, 5);
        assert_eq!(row.edges.len(), 8);
    }
}
