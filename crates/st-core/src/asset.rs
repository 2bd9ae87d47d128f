//! Asset model: transformation units, columns, and materialization policy
//!
//! An asset is a single named transformation (a table or view) with a
//! declared query, column metadata, and a materialization policy that the
//! dialect compilers turn into executable SQL.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column names reserved by the SCD2 strategies. Assets using
/// `scd2_by_column` or `scd2_by_time` must not declare these themselves.
pub const RESERVED_SCD2_COLUMNS: [&str; 3] = ["_valid_from", "_valid_until", "_is_current"];

/// How an asset is realized in the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterializationType {
    /// No materialization: the query runs as-is
    #[default]
    None,
    /// Materialize as a view
    View,
    /// Materialize as a table
    Table,
}

impl std::fmt::Display for MaterializationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterializationType::None => write!(f, "none"),
            MaterializationType::View => write!(f, "view"),
            MaterializationType::Table => write!(f, "table"),
        }
    }
}

/// The algorithm used to populate or update a materialized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MaterializationStrategy {
    /// No explicit strategy. For tables this is an alias for
    /// `create+replace`.
    #[default]
    #[serde(rename = "none")]
    None,
    /// `INSERT INTO` the target with the query results
    #[serde(rename = "append")]
    Append,
    /// Rebuild the target from scratch
    #[serde(rename = "create+replace")]
    CreateReplace,
    /// Delete rows matching the incremental key, then insert
    #[serde(rename = "delete+insert")]
    DeleteInsert,
    /// Truncate the target, then insert
    #[serde(rename = "truncate+insert")]
    TruncateInsert,
    /// Upsert keyed on the primary-key columns
    #[serde(rename = "merge")]
    Merge,
    /// Replace a time window bounded by template placeholders
    #[serde(rename = "time_interval")]
    TimeInterval,
    /// Emit DDL from the declared columns, ignoring the query
    #[serde(rename = "ddl")]
    Ddl,
    /// Type-2 slowly changing dimension, change detection by column diff
    #[serde(rename = "scd2_by_column")]
    Scd2ByColumn,
    /// Type-2 slowly changing dimension, change detection by time column
    #[serde(rename = "scd2_by_time")]
    Scd2ByTime,
}

impl std::fmt::Display for MaterializationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MaterializationStrategy::None => "none",
            MaterializationStrategy::Append => "append",
            MaterializationStrategy::CreateReplace => "create+replace",
            MaterializationStrategy::DeleteInsert => "delete+insert",
            MaterializationStrategy::TruncateInsert => "truncate+insert",
            MaterializationStrategy::Merge => "merge",
            MaterializationStrategy::TimeInterval => "time_interval",
            MaterializationStrategy::Ddl => "ddl",
            MaterializationStrategy::Scd2ByColumn => "scd2_by_column",
            MaterializationStrategy::Scd2ByTime => "scd2_by_time",
        };
        write!(f, "{s}")
    }
}

/// Granularity of the incremental key for time-windowed strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGranularity {
    Date,
    Timestamp,
}

impl std::fmt::Display for TimeGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeGranularity::Date => write!(f, "date"),
            TimeGranularity::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// Materialization policy declared on an asset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Materialization {
    /// Whether the asset becomes a view, a table, or nothing
    #[serde(default, rename = "type")]
    pub kind: MaterializationType,

    /// How the table is populated on each run
    #[serde(default)]
    pub strategy: MaterializationStrategy,

    /// Column driving incremental strategies (`delete+insert`,
    /// `time_interval`, `scd2_by_time`)
    #[serde(default)]
    pub incremental_key: Option<String>,

    /// Partitioning expression for dialects that support it
    #[serde(default)]
    pub partition_by: Option<String>,

    /// Clustering columns for dialects that support them
    #[serde(default)]
    pub cluster_by: Vec<String>,

    /// Granularity of the time window for `time_interval`
    #[serde(default)]
    pub time_granularity: Option<TimeGranularity>,
}

/// A single column declared on an asset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Warehouse type (e.g. `VARCHAR`, `TIMESTAMP`)
    #[serde(default, rename = "type")]
    pub data_type: String,

    /// Human-readable description, emitted as a COMMENT in DDL
    #[serde(default)]
    pub description: String,

    /// Column participates in the merge/SCD2 key
    #[serde(default)]
    pub primary_key: bool,

    /// Column is overwritten on merge match
    #[serde(default)]
    pub update_on_merge: bool,

    /// Raw SQL expression overriding the default `source.col` update
    /// expression on merge match
    #[serde(default)]
    pub merge_sql: Option<String>,
}

/// A single pre- or post-hook statement.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hook {
    /// The SQL to run
    pub query: String,
}

/// Ordered pre/post hook lists wrapped around a compiled query.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hooks {
    #[serde(default)]
    pub pre: Vec<Hook>,

    #[serde(default)]
    pub post: Vec<Hook>,
}

impl Hooks {
    /// True when there are no hooks in either list.
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }
}

/// A named transformation unit within a pipeline.
///
/// `name` is the warehouse-qualified identifier (`schema.table` or
/// `database.schema.table` depending on the dialect). Upstream edges are
/// declared here by name; the [`AssetGraph`](crate::graph::AssetGraph)
/// owns the resolved edges.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Asset {
    /// Warehouse-qualified name, `.`-separated
    pub name: String,

    /// Dialect/engine tag (e.g. `sf.sql`, `databricks.sql`)
    #[serde(default, rename = "type")]
    pub asset_type: String,

    /// The logical query, before materialization compilation
    #[serde(default)]
    pub query: String,

    /// Declared columns, in order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Materialization policy
    #[serde(default)]
    pub materialization: Materialization,

    /// Pre/post hook statements
    #[serde(default)]
    pub hooks: Hooks,

    /// Names of assets this asset depends on
    #[serde(default)]
    pub upstreams: Vec<String>,
}

impl Asset {
    /// All column names, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of columns flagged as primary key, in declaration order.
    pub fn column_names_with_primary_key(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of columns overwritten on merge match, in declaration order.
    pub fn column_names_with_update_on_merge(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.update_on_merge)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Find a declared column by exact name.
    pub fn get_column_with_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// First declared column whose name collides with an SCD2 reserved
    /// name, if any.
    pub fn reserved_scd2_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .find(|name| RESERVED_SCD2_COLUMNS.contains(name))
    }
}

/// Default connection names per asset type tag.
pub type DefaultConnections = HashMap<String, String>;

#[cfg(test)]
#[path = "asset_test.rs"]
mod tests;
