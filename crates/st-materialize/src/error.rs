//! Error types for st-materialize
//!
//! All of these are terminal compile-time validation failures: the
//! compiler surfaces the first error it hits and produces no partial
//! statement list. Nothing here is retryable.

use st_core::asset::{MaterializationStrategy, MaterializationType};
use thiserror::Error;

/// Errors raised while compiling an asset's materialization into SQL.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The strategy exists but the dialect or type cannot express it
    #[error("materialization strategy {strategy} is not supported for materialization type {kind} and asset type {asset_type}")]
    StrategyNotSupportedForType {
        strategy: MaterializationStrategy,
        kind: MaterializationType,
        asset_type: String,
    },

    /// The (type, strategy) pair is not a recognized combination
    #[error("unsupported materialization type - strategy combination: (`{kind}` - `{strategy}`)")]
    UnsupportedCombination {
        kind: MaterializationType,
        strategy: MaterializationStrategy,
    },

    #[error("materialization strategy {strategy} requires the `incremental_key` field to be set")]
    MissingIncrementalKey { strategy: MaterializationStrategy },

    #[error("materialization strategy {strategy} requires the `columns` field to be set")]
    MissingColumns { strategy: MaterializationStrategy },

    #[error("materialization strategy {strategy} requires the `primary_key` field to be set on at least one column")]
    MissingPrimaryKey { strategy: MaterializationStrategy },

    /// SCD2-by-column has nothing to diff when every column is a key
    #[error("materialization strategy {strategy} requires at least one non primary-key column to compare")]
    MissingComparisonColumns { strategy: MaterializationStrategy },

    #[error("time_granularity is required for the time_interval strategy and must be either 'date' or 'timestamp'")]
    MissingTimeGranularity,

    #[error("column name {name} is reserved for SCD-2 and cannot be used")]
    ReservedColumnName { name: String },

    #[error("incremental_key must be TIMESTAMP or DATE in the scd2_by_time strategy")]
    InvalidScd2TimeKey,

    #[error("{dialect} asset names must be in the format `schema.table`")]
    MalformedAssetName { dialect: &'static str },

    #[error("{dialect} assets do not support `cluster_by`")]
    ClusterByNotSupported { dialect: &'static str },
}

/// Result type alias for RenderError
pub type RenderResult<T> = Result<T, RenderError>;
