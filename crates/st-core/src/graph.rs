//! Asset dependency graph
//!
//! The graph owns the resolved upstream/downstream edges between assets of
//! one pipeline. It is built in a single pass after the pipeline is loaded
//! and is read-only afterwards. Declared dependency names that do not
//! resolve to a pipeline asset are skipped; whether that is a mistake is a
//! lint concern, not a graph concern.

use crate::pipeline::Pipeline;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Directed dependency graph over the asset names of one pipeline.
///
/// Edges point from an upstream asset to its dependents, so outgoing
/// edges lead downstream and incoming edges lead upstream. Duplicate
/// edges are permitted; traversals de-duplicate by name at query time.
#[derive(Debug)]
pub struct AssetGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl AssetGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build the graph from a pipeline's declared upstream names.
    ///
    /// One post-construction pass: every asset becomes a node, and each
    /// declared upstream that resolves to another asset in the pipeline
    /// becomes an edge. Unresolved names are skipped silently.
    pub fn build(pipeline: &Pipeline) -> Self {
        let mut graph = Self::new();

        for asset in &pipeline.assets {
            graph.add_node(&asset.name);
        }

        for asset in &pipeline.assets {
            for upstream in &asset.upstreams {
                if !pipeline.contains_asset(upstream) {
                    log::debug!(
                        "skipping unresolved dependency `{}` of asset `{}`",
                        upstream,
                        asset.name
                    );
                    continue;
                }
                graph.add_upstream(&asset.name, upstream);
            }
        }

        graph
    }

    fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), idx);
            idx
        }
    }

    /// Record that `upstream` is a dependency of `asset`.
    pub fn add_upstream(&mut self, asset: &str, upstream: &str) {
        let asset_idx = self.add_node(asset);
        let upstream_idx = self.add_node(upstream);
        self.graph.add_edge(upstream_idx, asset_idx, ());
    }

    /// Record that `downstream` depends on `asset`.
    pub fn add_downstream(&mut self, asset: &str, downstream: &str) {
        self.add_upstream(downstream, asset);
    }

    /// Direct dependencies of an asset, in edge-declaration order.
    pub fn direct_upstream(&self, asset: &str) -> Vec<&str> {
        self.neighbors(asset, Direction::Incoming)
    }

    /// Direct dependents of an asset, in edge-declaration order.
    pub fn direct_downstream(&self, asset: &str) -> Vec<&str> {
        self.neighbors(asset, Direction::Outgoing)
    }

    /// Transitive closure of dependencies, each asset once, first
    /// occurrence wins.
    pub fn full_upstream(&self, asset: &str) -> Vec<&str> {
        self.collect_reachable(asset, Direction::Incoming)
    }

    /// Transitive closure of dependents, each asset once, first
    /// occurrence wins.
    pub fn full_downstream(&self, asset: &str) -> Vec<&str> {
        self.collect_reachable(asset, Direction::Outgoing)
    }

    /// True when the asset is a node of this graph.
    pub fn contains(&self, asset: &str) -> bool {
        self.node_map.contains_key(asset)
    }

    fn neighbors(&self, asset: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(asset) else {
            return Vec::new();
        };
        let mut result: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| self.endpoint(e, direction))
            .collect();
        // petgraph yields most-recently-added edges first
        result.reverse();
        result
    }

    /// Depth-first traversal with an explicit work list and visited set.
    ///
    /// Iterative on purpose: deep pipelines must not overflow the stack,
    /// and a cyclic graph (which upstream validation should have caught)
    /// must terminate rather than recurse forever.
    fn collect_reachable(&self, asset: &str, direction: Direction) -> Vec<&str> {
        let Some(&start) = self.node_map.get(asset) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        visited.insert(start);
        let mut stack = self.neighbor_indices(start, direction);
        stack.reverse();

        while let Some(idx) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            result.push(self.graph[idx].as_str());
            let mut next = self.neighbor_indices(idx, direction);
            next.reverse();
            stack.extend(next);
        }

        result
    }

    fn neighbor_indices(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| match direction {
                Direction::Incoming => e.source(),
                Direction::Outgoing => e.target(),
            })
            .collect();
        neighbors.reverse();
        neighbors
    }

    fn endpoint(
        &self,
        edge: petgraph::graph::EdgeReference<'_, ()>,
        direction: Direction,
    ) -> &str {
        let idx = match direction {
            Direction::Incoming => edge.source(),
            Direction::Outgoing => edge.target(),
        };
        self.graph[idx].as_str()
    }
}

impl Default for AssetGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
