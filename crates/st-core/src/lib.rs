//! st-core - Core library for Strata
//!
//! This crate provides the asset data model, pipeline container, the
//! asset dependency graph with advisory cycle detection, hook wrapping,
//! and shared SQL text utilities used by the dialect compilers.

pub mod asset;
pub mod error;
pub mod graph;
pub mod hooks;
pub mod lint;
pub mod pipeline;
pub mod sql_utils;

pub use asset::{
    Asset, Column, DefaultConnections, Hook, Hooks, Materialization, MaterializationStrategy,
    MaterializationType, TimeGranularity, RESERVED_SCD2_COLUMNS,
};
pub use error::{CoreError, CoreResult};
pub use graph::AssetGraph;
pub use hooks::{wrap_hook_statements, wrap_hooks};
pub use lint::{ensure_no_cycles, Issue};
pub use pipeline::Pipeline;
