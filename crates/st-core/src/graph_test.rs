use super::*;
use crate::asset::Asset;

fn asset(name: &str, upstreams: &[&str]) -> Asset {
    Asset {
        name: name.to_string(),
        upstreams: upstreams.iter().map(|s| s.to_string()).collect(),
        ..Asset::default()
    }
}

fn pipeline(assets: Vec<Asset>) -> Pipeline {
    Pipeline::new("test", assets).unwrap()
}

#[test]
fn test_build_resolves_declared_upstreams() {
    let p = pipeline(vec![
        asset("raw.orders", &[]),
        asset("staging.orders", &["raw.orders"]),
        asset("mart.orders", &["staging.orders"]),
    ]);
    let graph = AssetGraph::build(&p);

    assert_eq!(graph.direct_upstream("staging.orders"), vec!["raw.orders"]);
    assert_eq!(
        graph.direct_downstream("staging.orders"),
        vec!["mart.orders"]
    );
}

#[test]
fn test_build_skips_unresolved_dependencies() {
    let p = pipeline(vec![asset("mart.orders", &["external.feed"])]);
    let graph = AssetGraph::build(&p);

    assert!(graph.direct_upstream("mart.orders").is_empty());
    assert!(!graph.contains("external.feed"));
}

#[test]
fn test_full_upstream_transitive() {
    let p = pipeline(vec![
        asset("raw.orders", &[]),
        asset("raw.customers", &[]),
        asset("staging.orders", &["raw.orders"]),
        asset("mart.orders", &["staging.orders", "raw.customers"]),
    ]);
    let graph = AssetGraph::build(&p);

    assert_eq!(
        graph.full_upstream("mart.orders"),
        vec!["staging.orders", "raw.orders", "raw.customers"]
    );
}

#[test]
fn test_full_downstream_transitive() {
    let p = pipeline(vec![
        asset("raw.orders", &[]),
        asset("staging.orders", &["raw.orders"]),
        asset("mart.orders", &["staging.orders"]),
        asset("mart.revenue", &["staging.orders"]),
    ]);
    let graph = AssetGraph::build(&p);

    assert_eq!(
        graph.full_downstream("raw.orders"),
        vec!["staging.orders", "mart.orders", "mart.revenue"]
    );
}

#[test]
fn test_full_upstream_deduplicates_diamond() {
    // mart depends on two staging assets sharing one raw upstream
    let p = pipeline(vec![
        asset("raw.events", &[]),
        asset("staging.a", &["raw.events"]),
        asset("staging.b", &["raw.events"]),
        asset("mart.summary", &["staging.a", "staging.b"]),
    ]);
    let graph = AssetGraph::build(&p);

    let upstream = graph.full_upstream("mart.summary");
    assert_eq!(upstream, vec!["staging.a", "raw.events", "staging.b"]);
}

#[test]
fn test_duplicate_edges_deduplicated_in_traversal() {
    let mut graph = AssetGraph::new();
    graph.add_upstream("b", "a");
    graph.add_upstream("b", "a");

    assert_eq!(graph.full_upstream("b"), vec!["a"]);
    // direct neighbors keep duplicates; dedup happens in closure queries
    assert_eq!(graph.direct_upstream("b"), vec!["a", "a"]);
}

#[test]
fn test_traversal_terminates_on_cyclic_graph() {
    // cycles should be rejected upstream, but traversal must not hang
    let mut graph = AssetGraph::new();
    graph.add_upstream("b", "a");
    graph.add_upstream("c", "b");
    graph.add_upstream("a", "c");

    let upstream = graph.full_upstream("a");
    assert_eq!(upstream.len(), 2);
    assert!(upstream.contains(&"b"));
    assert!(upstream.contains(&"c"));
}

#[test]
fn test_unknown_asset_returns_empty() {
    let graph = AssetGraph::new();
    assert!(graph.full_upstream("nope").is_empty());
    assert!(graph.direct_downstream("nope").is_empty());
}

#[test]
fn test_add_downstream_mirrors_add_upstream() {
    let mut graph = AssetGraph::new();
    graph.add_downstream("a", "b");

    assert_eq!(graph.direct_upstream("b"), vec!["a"]);
    assert_eq!(graph.direct_downstream("a"), vec!["b"]);
}
