//! Advisory pipeline checks
//!
//! Cycle detection reports issues instead of failing hard so callers can
//! aggregate every problem in a pipeline before aborting a build. The
//! materialization compiler assumes the caller has already run these
//! checks; it never re-validates the graph itself.

use crate::pipeline::Pipeline;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

const PIPELINE_CONTAINS_CYCLE: &str =
    "The pipeline has a cycle with dependencies, make sure there are no cyclic dependencies";

/// A single advisory finding, with human-readable context lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// What is wrong
    pub description: String,
    /// Supporting detail, e.g. the edges participating in a cycle
    pub context: Vec<String>,
}

/// Check the pipeline for dependency cycles.
///
/// Two passes, in order: direct self-dependencies are reported
/// individually per occurrence, then the pipeline is decomposed into
/// strongly connected components and every component of size > 1 is
/// reported as one cycle. The context of an SCC issue lists only the
/// edges that stay inside the offending component. Runs in O(V+E).
pub fn ensure_no_cycles(pipeline: &Pipeline) -> Vec<Issue> {
    let mut issues = Vec::new();

    for asset in &pipeline.assets {
        for upstream in &asset.upstreams {
            if *upstream == asset.name {
                issues.push(Issue {
                    description: PIPELINE_CONTAINS_CYCLE.to_string(),
                    context: vec![format!("Asset `{}` depends on itself", asset.name)],
                });
            }
        }
    }

    let mut name_to_node: HashMap<&str, NodeIndex> =
        HashMap::with_capacity(pipeline.assets.len());
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    for asset in &pipeline.assets {
        let idx = graph.add_node(asset.name.as_str());
        name_to_node.insert(asset.name.as_str(), idx);
    }
    for asset in &pipeline.assets {
        let Some(&from) = name_to_node.get(asset.name.as_str()) else {
            continue;
        };
        for upstream in &asset.upstreams {
            if let Some(&to) = name_to_node.get(upstream.as_str()) {
                graph.add_edge(from, to, ());
            }
        }
    }

    for component in tarjan_scc(&graph) {
        if component.len() == 1 {
            continue;
        }

        let names_in_cycle: HashSet<&str> =
            component.iter().map(|&idx| graph[idx]).collect();

        let mut context = Vec::with_capacity(component.len());
        for &idx in &component {
            let name = graph[idx];
            let asset = match pipeline.get_asset_by_name(name) {
                Some(asset) => asset,
                None => continue,
            };
            for upstream in &asset.upstreams {
                if names_in_cycle.contains(upstream.as_str()) {
                    context.push(format!("{} -> {}", name, upstream));
                }
            }
        }

        issues.push(Issue {
            description: PIPELINE_CONTAINS_CYCLE.to_string(),
            context,
        });
    }

    issues
}

#[cfg(test)]
#[path = "lint_test.rs"]
mod tests;
