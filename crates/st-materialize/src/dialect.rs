//! Dialect adapter contract
//!
//! Every warehouse dialect satisfies the same small capability set:
//! identifier quoting, transaction idiom, replace-table shape,
//! temp-relation lifecycle, table property clauses, and the timestamp
//! expressions SCD2 synthesis needs. The compiler itself stays generic;
//! only these capabilities differ per warehouse.

use crate::error::{RenderError, RenderResult};
use st_core::asset::{Materialization, TimeGranularity};

/// How a dialect rebuilds a table for `create+replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceShape {
    /// Create a uniquely named table, drop the target, rename into place
    TempSwap,
    /// `DROP TABLE IF EXISTS` followed by `CREATE TABLE ... AS`
    DropCreate,
}

/// How column primary keys are expressed in DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlPrimaryKey {
    /// `PRIMARY KEY` appended to the column definition
    Inline,
    /// A trailing `PRIMARY KEY (a, b)` table constraint
    TableConstraint,
    /// The dialect's DDL does not declare primary keys
    Unsupported,
}

/// Statements bracketing a session temp relation that holds the staged
/// query results.
#[derive(Debug, Clone)]
pub struct TempRelation {
    /// Statement creating the relation from the query
    pub create: String,
    /// Statement dropping the relation once the batch is done
    pub drop: String,
}

/// Per-warehouse formatting capabilities consumed by the generic
/// materialization compiler. All methods are pure.
pub trait DialectAdapter: Send + Sync {
    /// Dialect name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Quote a possibly `.`-qualified identifier. Dialects that accept
    /// bare identifiers leave the name untouched.
    fn quote_identifier(&self, name: &str) -> String {
        name.to_string()
    }

    /// The statement opening an explicit transaction, if the dialect
    /// supports one. Dialects without transactions get their
    /// multi-statement strategies as bare statement lists; dialects with
    /// transactions get a single `;`-joined script per strategy.
    fn begin_statement(&self) -> Option<&'static str> {
        None
    }

    /// Whether the temp-relation create/drop statements sit inside the
    /// transaction (Snowflake) or must bracket it (Vertica, whose temp
    /// tables cannot be created mid-transaction).
    fn transaction_includes_temp(&self) -> bool {
        true
    }

    /// Whether `time_interval` DML is wrapped in a transaction. Defaults
    /// to "whenever the dialect has transactions".
    fn transactional_time_interval(&self) -> bool {
        self.begin_statement().is_some()
    }

    /// Whether `delete+insert` DML is wrapped in a transaction.
    fn transactional_delete_insert(&self) -> bool {
        self.begin_statement().is_some()
    }

    /// How `create+replace` rebuilds the target.
    fn replace_shape(&self) -> ReplaceShape;

    /// Suffix for the drop statement in the drop-and-create shape
    /// (Vertica needs `CASCADE`).
    fn drop_suffix(&self) -> &'static str {
        ""
    }

    /// Whether the drop-and-create shape parenthesizes the query, as in
    /// `CREATE TABLE t AS (SELECT ...)`.
    fn wraps_ctas_query(&self) -> bool {
        false
    }

    /// Whether `TRUNCATE TABLE` exists; otherwise `DELETE FROM` is used.
    fn supports_truncate(&self) -> bool {
        true
    }

    /// Whether the dialect can express `MERGE INTO`.
    fn supports_merge(&self) -> bool {
        false
    }

    /// Whether the dialect's MERGE can express the SCD2 close-out arm
    /// (`WHEN NOT MATCHED BY SOURCE`).
    fn supports_scd2(&self) -> bool {
        false
    }

    /// Whether a `DROP TABLE IF EXISTS` must precede view creation when
    /// an asset converts from a table to a view.
    fn drops_table_before_view(&self) -> bool {
        false
    }

    /// How DDL expresses primary keys.
    fn ddl_primary_key(&self) -> DdlPrimaryKey {
        DdlPrimaryKey::TableConstraint
    }

    /// Create/drop statements for a temp relation holding the query
    /// results, or `None` when the dialect inlines the query as a
    /// subselect instead.
    fn temp_relation(&self, name: &str, query: &str) -> Option<TempRelation>;

    /// Validate the asset name shape for operations that must split off
    /// its schema components.
    fn validate_table_name(&self, name: &str) -> RenderResult<()> {
        if name.split('.').count() < 2 {
            return Err(RenderError::MalformedAssetName {
                dialect: self.name(),
            });
        }
        Ok(())
    }

    /// Clause injected between the table name and `AS` on
    /// `CREATE TABLE ... AS` statements, with a leading space when
    /// non-empty (clustering, storage format). Errors when the asset
    /// declares a property the dialect cannot honor.
    fn table_properties(&self, mat: &Materialization) -> RenderResult<String> {
        if !mat.cluster_by.is_empty() {
            return Err(RenderError::ClusterByNotSupported {
                dialect: self.name(),
            });
        }
        Ok(String::new())
    }

    /// Clause injected between the table name and the column list in
    /// DDL, with a leading space when non-empty. Snowflake puts
    /// `CLUSTER BY` here.
    fn ddl_prefix(&self, _mat: &Materialization) -> RenderResult<String> {
        Ok(String::new())
    }

    /// Clause appended after the closing parenthesis in DDL
    /// (partitioning, clustering, storage format). Same
    /// unsupported-property policy as
    /// [`table_properties`](Self::table_properties).
    fn ddl_suffix(&self, mat: &Materialization) -> RenderResult<String> {
        if !mat.cluster_by.is_empty() {
            return Err(RenderError::ClusterByNotSupported {
                dialect: self.name(),
            });
        }
        Ok(String::new())
    }

    /// Format a time-window bound for `time_interval`. The placeholder
    /// is left for a later rendering pass; only the literal typing
    /// differs per dialect.
    fn time_literal(&self, _granularity: TimeGranularity, placeholder: &str) -> String {
        format!("'{placeholder}'")
    }

    /// Expression yielding the current timestamp.
    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// Expression yielding the open-ended `_valid_until` bound in SCD2
    /// MERGE statements.
    fn max_timestamp(&self) -> &'static str;

    /// Expression yielding the open-ended `_valid_until` bound in the
    /// SCD2 full-refresh rebuild. Defaults to the MERGE form.
    fn max_timestamp_full_refresh(&self) -> &'static str {
        self.max_timestamp()
    }

    /// Coerce the SCD2 time key to a timestamp where the warehouse does
    /// not compare `DATE` and `TIMESTAMP` implicitly.
    fn scd2_time_expr(&self, expr: &str) -> String {
        expr.to_string()
    }

    /// Table properties for the SCD2 full-refresh rebuild, with a
    /// leading newline when non-empty. Dialects with clustering cluster
    /// on the current-row flag plus the primary keys.
    fn scd2_full_refresh_properties(
        &self,
        mat: &Materialization,
        primary_keys: &[&str],
    ) -> RenderResult<String> {
        let _ = primary_keys;
        self.table_properties(mat)
    }
}
