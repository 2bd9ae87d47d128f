//! Databricks adapter.
//!
//! No explicit transactions, so multi-statement strategies come back as
//! bare statement lists the executor runs one by one. Replace uses the
//! temp-table-swap shape, staged results live in a session temporary
//! view, and table names must be exactly `schema.table` so the temp
//! table can land in the same schema.

use st_core::asset::Materialization;

use crate::dialect::{DdlPrimaryKey, DialectAdapter, ReplaceShape, TempRelation};
use crate::error::{RenderError, RenderResult};

pub struct Databricks;

impl DialectAdapter for Databricks {
    fn name(&self) -> &'static str {
        "databricks"
    }

    fn replace_shape(&self) -> ReplaceShape {
        ReplaceShape::TempSwap
    }

    fn supports_merge(&self) -> bool {
        true
    }

    fn supports_scd2(&self) -> bool {
        true
    }

    fn drops_table_before_view(&self) -> bool {
        true
    }

    fn ddl_primary_key(&self) -> DdlPrimaryKey {
        DdlPrimaryKey::Inline
    }

    fn temp_relation(&self, name: &str, query: &str) -> Option<TempRelation> {
        Some(TempRelation {
            create: format!("CREATE TEMPORARY VIEW {name} AS {query}"),
            drop: format!("DROP VIEW IF EXISTS {name}"),
        })
    }

    fn validate_table_name(&self, name: &str) -> RenderResult<()> {
        if name.split('.').count() != 2 {
            return Err(RenderError::MalformedAssetName {
                dialect: self.name(),
            });
        }
        Ok(())
    }

    // CTAS keeps the default cluster_by rejection; plain DDL does take
    // PARTITIONED BY and CLUSTER BY clauses.
    fn ddl_suffix(&self, mat: &Materialization) -> RenderResult<String> {
        let mut clause = String::new();
        if let Some(partition_by) = &mat.partition_by {
            clause.push_str(&format!("\nPARTITIONED BY ({partition_by})"));
        }
        if !mat.cluster_by.is_empty() {
            clause.push_str(&format!("\nCLUSTER BY ({})", mat.cluster_by.join(", ")));
        }
        Ok(clause)
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP()"
    }

    fn max_timestamp(&self) -> &'static str {
        "TIMESTAMP '9999-12-31 00:00:00'"
    }
}
