//! Trino adapter.
//!
//! Identifiers are quoted per `.`-segment. There is no session temp
//! table that survives across statements, so incremental strategies
//! inline the query as a subselect instead of staging it. TRUNCATE is
//! not available on every connector, MERGE is not synthesized, and
//! tables are created as Parquet with optional Iceberg partitioning.

use st_core::asset::{Materialization, TimeGranularity};
use st_core::sql_utils::quote_qualified;

use crate::dialect::{DdlPrimaryKey, DialectAdapter, ReplaceShape, TempRelation};
use crate::error::{RenderError, RenderResult};

pub struct Trino;

fn with_clause(mat: &Materialization) -> String {
    let mut props = vec!["format = 'PARQUET'".to_string()];
    if let Some(partition_by) = &mat.partition_by {
        props.push(format!("partitioning = ARRAY['{partition_by}']"));
    }
    format!(" WITH ({})", props.join(", "))
}

impl DialectAdapter for Trino {
    fn name(&self) -> &'static str {
        "trino"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_qualified(name)
    }

    fn begin_statement(&self) -> Option<&'static str> {
        Some("BEGIN")
    }

    fn transactional_time_interval(&self) -> bool {
        false
    }

    fn transactional_delete_insert(&self) -> bool {
        false
    }

    fn replace_shape(&self) -> ReplaceShape {
        ReplaceShape::DropCreate
    }

    fn supports_truncate(&self) -> bool {
        false
    }

    fn ddl_primary_key(&self) -> DdlPrimaryKey {
        DdlPrimaryKey::Unsupported
    }

    fn temp_relation(&self, _name: &str, _query: &str) -> Option<TempRelation> {
        None
    }

    fn table_properties(&self, mat: &Materialization) -> RenderResult<String> {
        if !mat.cluster_by.is_empty() {
            return Err(RenderError::ClusterByNotSupported {
                dialect: self.name(),
            });
        }
        Ok(with_clause(mat))
    }

    fn ddl_suffix(&self, mat: &Materialization) -> RenderResult<String> {
        self.table_properties(mat)
    }

    fn time_literal(&self, granularity: TimeGranularity, placeholder: &str) -> String {
        match granularity {
            TimeGranularity::Date => format!("DATE '{placeholder}'"),
            TimeGranularity::Timestamp => format!("TIMESTAMP '{placeholder}'"),
        }
    }

    fn max_timestamp(&self) -> &'static str {
        "TIMESTAMP '9999-12-31'"
    }
}
