//! Vertica adapter.
//!
//! Identifiers are quoted per `.`-segment and multi-statement strategies
//! come back as a single transactional script. Replace drops the target
//! with CASCADE and recreates it with a parenthesized CTAS. Local temp
//! tables cannot be created inside a transaction, so the staging
//! create/drop statements bracket the `BEGIN ... COMMIT` block. MERGE is
//! available, but it cannot express the SCD2 close-out arm.

use st_core::sql_utils::quote_qualified;

use crate::dialect::{DialectAdapter, ReplaceShape, TempRelation};

pub struct Vertica;

impl DialectAdapter for Vertica {
    fn name(&self) -> &'static str {
        "vertica"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_qualified(name)
    }

    fn begin_statement(&self) -> Option<&'static str> {
        Some("BEGIN TRANSACTION")
    }

    fn transaction_includes_temp(&self) -> bool {
        false
    }

    fn replace_shape(&self) -> ReplaceShape {
        ReplaceShape::DropCreate
    }

    fn drop_suffix(&self) -> &'static str {
        " CASCADE"
    }

    fn wraps_ctas_query(&self) -> bool {
        true
    }

    fn supports_merge(&self) -> bool {
        true
    }

    fn temp_relation(&self, name: &str, query: &str) -> Option<TempRelation> {
        Some(TempRelation {
            create: format!(
                "CREATE LOCAL TEMPORARY TABLE {name} ON COMMIT PRESERVE ROWS AS ({query})"
            ),
            drop: format!("DROP TABLE IF EXISTS {name}"),
        })
    }

    fn max_timestamp(&self) -> &'static str {
        "TIMESTAMP '9999-12-31'"
    }
}
