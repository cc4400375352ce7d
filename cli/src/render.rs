//! Result rendering
//!
//! Text output keeps the classic two-table layout; JSON output carries the
//! same rows plus the engine metrics.

use serde::Serialize;
use waypoint_core::prelude::*;
use waypoint_core::AlgorithmMetrics;

const PATH_RULE: &str = "----------------------------------------";
const TREE_RULE: &str = "----------------------";

/// One row of the shortest-path table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRow {
    pub target: String,
    pub distance: Distance,
    pub path: Option<Vec<String>>,
}

/// One row of the spanning tree table; the root has no parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub parent: Option<String>,
    pub child: String,
    pub key: Distance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningReport {
    pub edges: Vec<TreeRow>,
    pub total_weight: Weight,
    pub spanning: bool,
    pub metrics: AlgorithmMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPathReport {
    pub rows: Vec<PathRow>,
    pub metrics: AlgorithmMetrics,
}

/// Everything a run produces, with vertices as labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub source: String,
    pub random_source: bool,
    pub edge_class: EdgeClass,
    pub shortest_paths: ShortestPathReport,
    pub spanning_tree: Option<SpanningReport>,
}

/// Formats engine results using one label codec
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    codec: &'a LabelCodec,
}

impl<'a> Renderer<'a> {
    pub fn new(codec: &'a LabelCodec) -> Self {
        Self { codec }
    }

    #[inline]
    pub fn label(&self, node: NodeId) -> String {
        self.codec.encode(node)
    }

    pub fn path_rows(&self, tree: &ShortestPathTree) -> Vec<PathRow> {
        tree.paths()
            .into_iter()
            .map(|entry| PathRow {
                target: self.label(entry.target),
                distance: entry.distance,
                path: entry
                    .path
                    .map(|path| path.into_iter().map(|n| self.label(n)).collect()),
            })
            .collect()
    }

    pub fn tree_rows(&self, tree: &SpanningTree) -> Vec<TreeRow> {
        (0..tree.keys().len())
            .map(NodeId)
            .map(|node| TreeRow {
                parent: tree.parent(node).map(|p| self.label(p)),
                child: self.label(node),
                key: tree.key(node),
            })
            .collect()
    }

    pub fn report(
        &self,
        shortest: &ShortestPathTree,
        spanning: Option<&SpanningTree>,
        random_source: bool,
    ) -> Report {
        Report {
            source: self.label(shortest.source()),
            random_source,
            edge_class: shortest.edge_class(),
            shortest_paths: ShortestPathReport {
                rows: self.path_rows(shortest),
                metrics: shortest.metrics().clone(),
            },
            spanning_tree: spanning.map(|tree| SpanningReport {
                edges: self.tree_rows(tree),
                total_weight: tree.total_weight(),
                spanning: tree.is_spanning(),
                metrics: tree.metrics().clone(),
            }),
        }
    }

    /// Preamble naming the source vertex
    pub fn source_line(&self, source: NodeId, random: bool) -> String {
        let mut out = String::new();
        if random {
            out.push_str("Source node isn't mentioned!!! Choosing source node randomly ");
        }
        out.push_str(&format!("src: {}\n\n", self.label(source)));
        out
    }

    /// Shortest-path table; the source row reads `A - A`
    pub fn shortest_paths(&self, tree: &ShortestPathTree) -> String {
        let mut out = String::new();
        out.push_str("Shortest Paths (Dijkstra's Algorithm)\n");
        out.push_str("Path Cost\t\tPath \n");
        out.push_str(PATH_RULE);
        out.push('\n');

        let source = self.label(tree.source());
        for row in self.path_rows(tree) {
            let path = match row.path {
                Some(_) if row.target == source => format!("{source} - {source}"),
                Some(path) => path.join(" - "),
                None => "no path".to_string(),
            };
            out.push_str(&format!("   {}\t\t\t{}\n", row.distance, path));
        }
        out
    }

    /// Spanning tree table; the root row reads `A - A` with key 0
    pub fn spanning_tree(&self, tree: &SpanningTree) -> String {
        let mut out = String::new();
        out.push_str("\nPrims Algorithm\n");
        out.push_str("Edges        Distances\n");
        out.push_str(TREE_RULE);
        out.push('\n');

        let root = self.label(tree.root());
        for row in self.tree_rows(tree) {
            let parent = match row.parent {
                Some(parent) => parent,
                None if row.child == root => root.clone(),
                None => "none".to_string(),
            };
            out.push_str(&format!("{} - {}\t\t{}\n", parent, row.child, row.key));
        }
        out.push_str(&format!("Total Cost: {}\n", tree.total_weight()));
        out
    }

    pub fn text(&self, shortest: &ShortestPathTree, spanning: Option<&SpanningTree>) -> String {
        let mut out = self.shortest_paths(shortest);
        if let Some(tree) = spanning {
            out.push_str(&self.spanning_tree(tree));
        }
        out
    }

    pub fn json(
        &self,
        shortest: &ShortestPathTree,
        spanning: Option<&SpanningTree>,
        random_source: bool,
    ) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report(shortest, spanning, random_source))
    }
}
