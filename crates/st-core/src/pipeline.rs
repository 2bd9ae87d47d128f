//! Pipeline container and asset lookup
//!
//! A pipeline is an ordered collection of assets plus default-connection
//! mapping. It owns the name index; the resolved dependency edges live in
//! [`AssetGraph`](crate::graph::AssetGraph), built once after loading.

use crate::asset::{Asset, DefaultConnections};
use crate::error::{CoreError, CoreResult};
use crate::graph::AssetGraph;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// An ordered collection of assets with their shared configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pipeline {
    /// Pipeline name
    #[serde(default)]
    pub name: String,

    /// Assets in declaration order
    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Default connection per asset type tag
    #[serde(default)]
    pub default_connections: DefaultConnections,

    /// Lazily built name -> asset index
    #[serde(skip)]
    name_index: OnceCell<HashMap<String, usize>>,
}

impl Pipeline {
    /// Create a pipeline from a list of assets, rejecting duplicate names.
    pub fn new(name: impl Into<String>, assets: Vec<Asset>) -> CoreResult<Self> {
        let mut seen = HashMap::with_capacity(assets.len());
        for (i, asset) in assets.iter().enumerate() {
            if asset.name.is_empty() {
                return Err(CoreError::EmptyName {
                    context: format!("asset at position {i}"),
                });
            }
            if seen.insert(asset.name.clone(), i).is_some() {
                return Err(CoreError::DuplicateAsset {
                    name: asset.name.clone(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            assets,
            default_connections: DefaultConnections::new(),
            name_index: OnceCell::new(),
        })
    }

    /// Load a pipeline definition from a YAML file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::PipelineNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a pipeline definition from YAML text.
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let pipeline: Pipeline =
            serde_yaml::from_str(content).map_err(|e| CoreError::PipelineParseError {
                message: e.to_string(),
            })?;
        // Re-run construction checks on deserialized input
        Pipeline::new(pipeline.name, pipeline.assets).map(|mut p| {
            p.default_connections = pipeline.default_connections;
            p
        })
    }

    fn index(&self) -> &HashMap<String, usize> {
        self.name_index.get_or_init(|| {
            self.assets
                .iter()
                .enumerate()
                .map(|(i, a)| (a.name.clone(), i))
                .collect()
        })
    }

    /// Look up an asset by exact name.
    pub fn get_asset_by_name(&self, name: &str) -> Option<&Asset> {
        self.index().get(name).map(|&i| &self.assets[i])
    }

    /// Look up an asset by name, ignoring ASCII case.
    pub fn get_asset_by_name_case_insensitive(&self, name: &str) -> Option<&Asset> {
        if let Some(asset) = self.get_asset_by_name(name) {
            return Some(asset);
        }
        self.assets
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// True when the pipeline declares an asset with this exact name.
    pub fn contains_asset(&self, name: &str) -> bool {
        self.index().contains_key(name)
    }

    /// Asset names in declaration order.
    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.name.as_str()).collect()
    }

    /// Transitive dependencies of an asset, resolved back to assets.
    ///
    /// Traversal order follows [`AssetGraph::full_upstream`]; names the
    /// graph knows but the pipeline does not are dropped.
    pub fn full_upstream(&self, graph: &AssetGraph, asset: &str) -> Vec<&Asset> {
        self.resolve_names(graph.full_upstream(asset))
    }

    /// Transitive dependents of an asset, resolved back to assets.
    pub fn full_downstream(&self, graph: &AssetGraph, asset: &str) -> Vec<&Asset> {
        self.resolve_names(graph.full_downstream(asset))
    }

    fn resolve_names(&self, names: Vec<&str>) -> Vec<&Asset> {
        names
            .into_iter()
            .filter_map(|name| self.get_asset_by_name(name))
            .collect()
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
