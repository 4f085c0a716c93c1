//! Border-vertex GeoJSON export
//!
//! Diagnostic view of the partition: every edge whose endpoints carry
//! different bisection IDs contributes both endpoint coordinates to the
//! level at which the IDs diverge. Per level the vertices are sorted
//! lexicographically by (lon, lat) and deduplicated, then emitted as one
//! MultiPoint feature per non-empty level, coarse to fine.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::json;

use crate::error::FormatError;
use crate::geo::Coordinate;
use crate::graph::BisectionGraph;
use crate::level::divergence_level;
use crate::{BisectionID, NUM_BISECTION_BITS};

/// Border vertices keyed by divergence level.
pub fn collect_border_vertices(
    graph: &BisectionGraph,
    bisection_ids: &[BisectionID],
) -> Vec<Vec<Coordinate>> {
    let mut border_vertices: Vec<Vec<Coordinate>> =
        vec![Vec::new(); NUM_BISECTION_BITS as usize];

    for node in 0..graph.number_of_nodes() {
        let source_id = bisection_ids[node as usize];
        for edge in graph.edges(node) {
            let target_id = bisection_ids[edge.target as usize];
            if let Some(level) = divergence_level(source_id, target_id) {
                border_vertices[level as usize].push(graph.node(node));
                border_vertices[level as usize].push(graph.node(edge.target));
            }
        }
    }

    for vertices in &mut border_vertices {
        vertices.sort_unstable();
        vertices.dedup();
    }

    border_vertices
}

/// Write the per-level border vertices as a GeoJSON FeatureCollection.
pub fn write_border_geojson<P: AsRef<Path>>(
    path: P,
    graph: &BisectionGraph,
    bisection_ids: &[BisectionID],
) -> Result<(), FormatError> {
    let border_vertices = collect_border_vertices(graph, bisection_ids);

    let features: Vec<serde_json::Value> = border_vertices
        .iter()
        .enumerate()
        .filter(|(_, vertices)| !vertices.is_empty())
        .map(|(level, vertices)| {
            let coordinates: Vec<[f64; 2]> = vertices
                .iter()
                .map(|c| [c.lon_degrees(), c.lat_degrees()])
                .collect();
            json!({
                "type": "Feature",
                "properties": { "level": level },
                "geometry": {
                    "type": "MultiPoint",
                    "coordinates": coordinates,
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer(writer, &collection)
        .map_err(|e| FormatError::Io(e.into()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::CnbgEdge;

    // Two nodes split at the root, two more split from the first pair at
    // depth 1, all on one line of longitude.
    fn two_level_graph() -> (BisectionGraph, Vec<BisectionID>) {
        let coordinates = vec![
            Coordinate::new(0, 0),
            Coordinate::new(1, 0),
            Coordinate::new(2, 0),
        ];
        let edges = vec![
            CnbgEdge { source: 0, target: 1 },
            CnbgEdge { source: 1, target: 0 },
            CnbgEdge { source: 1, target: 2 },
            CnbgEdge { source: 2, target: 1 },
        ];
        let graph = BisectionGraph::new(coordinates, edges);
        let ids = vec![0, 1 << 30, 1 << 31];
        (graph, ids)
    }

    #[test]
    fn test_border_vertices_grouped_by_level() {
        let (graph, ids) = two_level_graph();

        let border_vertices = collect_border_vertices(&graph, &ids);
        // Edge 1-2 crosses the root boundary, edge 0-1 only a depth-1 one.
        assert_eq!(border_vertices[0].len(), 2);
        assert_eq!(border_vertices[1].len(), 2);
        assert!(border_vertices[2].is_empty());
    }

    #[test]
    fn test_uniform_ids_produce_no_borders() {
        let coordinates = vec![Coordinate::new(0, 0), Coordinate::new(1, 0)];
        let edges = vec![
            CnbgEdge { source: 0, target: 1 },
            CnbgEdge { source: 1, target: 0 },
        ];
        let graph = BisectionGraph::new(coordinates, edges);
        let border_vertices = collect_border_vertices(&graph, &[7, 7]);
        assert!(border_vertices.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_geojson_one_multipoint_feature_per_level() {
        let (graph, ids) = two_level_graph();

        let tmpfile = tempfile::NamedTempFile::new().unwrap();
        write_border_geojson(tmpfile.path(), &graph, &ids).unwrap();

        let value: serde_json::Value =
            serde_json::from_reader(File::open(tmpfile.path()).unwrap()).unwrap();
        assert_eq!(value["type"], "FeatureCollection");

        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);

        for (feature, level) in features.iter().zip([0, 1]) {
            assert_eq!(feature["type"], "Feature");
            assert_eq!(feature["properties"]["level"], level);
            assert_eq!(feature["geometry"]["type"], "MultiPoint");
            assert_eq!(
                feature["geometry"]["coordinates"].as_array().unwrap().len(),
                2
            );
        }

        // Level 0 holds the root-boundary endpoints (nodes 1 and 2),
        // converted back to degrees, lexicographic by (lon, lat).
        let coordinates = features[0]["geometry"]["coordinates"].as_array().unwrap();
        let lon = coordinates[0][0].as_f64().unwrap();
        let lat = coordinates[0][1].as_f64().unwrap();
        assert!((lon - 1e-6).abs() < 1e-12);
        assert!(lat.abs() < 1e-12);
        assert!((coordinates[1][0].as_f64().unwrap() - 2e-6).abs() < 1e-12);
    }
}
