//! Snowflake adapter.
//!
//! Multi-statement strategies come back as a single `BEGIN TRANSACTION
//! ... COMMIT` script. Replace uses the temp-table-swap shape, staged
//! results live in a session temp table inside the transaction, and
//! CLUSTER BY is supported both on CTAS and in DDL.

use st_core::asset::Materialization;

use crate::dialect::{DialectAdapter, ReplaceShape, TempRelation};
use crate::error::RenderResult;

pub struct Snowflake;

impl DialectAdapter for Snowflake {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn begin_statement(&self) -> Option<&'static str> {
        Some("BEGIN TRANSACTION")
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

    fn temp_relation(&self, name: &str, query: &str) -> Option<TempRelation> {
        Some(TempRelation {
            create: format!("CREATE TEMP TABLE {name} AS {query}"),
            drop: format!("DROP TABLE IF EXISTS {name}"),
        })
    }

    fn table_properties(&self, mat: &Materialization) -> RenderResult<String> {
        if mat.cluster_by.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(" CLUSTER BY ({})", mat.cluster_by.join(", ")))
    }

    fn ddl_prefix(&self, mat: &Materialization) -> RenderResult<String> {
        self.table_properties(mat)
    }

    fn ddl_suffix(&self, _mat: &Materialization) -> RenderResult<String> {
        Ok(String::new())
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP()"
    }

    fn max_timestamp(&self) -> &'static str {
        "TO_TIMESTAMP('9999-12-31')"
    }

    // DATE keys do not compare against TIMESTAMP validity bounds
    // implicitly.
    fn scd2_time_expr(&self, expr: &str) -> String {
        format!("CAST({expr} AS TIMESTAMP)")
    }

    fn scd2_full_refresh_properties(
        &self,
        _mat: &Materialization,
        primary_keys: &[&str],
    ) -> RenderResult<String> {
        Ok(format!(
            "\nCLUSTER BY (_is_current, {})",
            primary_keys.join(", ")
        ))
    }
}
