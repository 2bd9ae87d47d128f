//! Type-2 slowly changing dimension synthesis.
//!
//! Both variants compile to a single MERGE whose USING clause unions the
//! fresh source rows (tagged current) with the source rows that expire
//! an existing current target row (tagged not current). The close-out
//! arms set `_valid_until` and flip `_is_current`; rows absent from the
//! source are closed out via `WHEN NOT MATCHED BY SOURCE`. The variants
//! differ only in the change predicate: `scd2_by_column` diffs every
//! non-key column, `scd2_by_time` compares `_valid_from` against the
//! incremental time key and takes validity bounds from it.
//!
//! Under full refresh the history is rebuilt from scratch: a single
//! `CREATE OR REPLACE TABLE` seeding every row as current.

use st_core::asset::{Asset, MaterializationStrategy};

use crate::dialect::DialectAdapter;
use crate::error::{RenderError, RenderResult};
use crate::strategies::{terminate, unsupported};

struct Scd2Columns<'a> {
    primary_keys: Vec<&'a str>,
    all: Vec<&'a str>,
}

fn validate<'a>(
    adapter: &dyn DialectAdapter,
    asset: &'a Asset,
    strategy: MaterializationStrategy,
) -> RenderResult<Scd2Columns<'a>> {
    if !adapter.supports_scd2() {
        return Err(unsupported(asset, strategy));
    }
    if let Some(name) = asset.reserved_scd2_column() {
        return Err(RenderError::ReservedColumnName {
            name: name.to_string(),
        });
    }
    if asset.columns.is_empty() {
        return Err(RenderError::MissingColumns { strategy });
    }
    let primary_keys = asset.column_names_with_primary_key();
    if primary_keys.is_empty() {
        return Err(RenderError::MissingPrimaryKey { strategy });
    }
    Ok(Scd2Columns {
        primary_keys,
        all: asset.column_names(),
    })
}

/// The incremental key of `scd2_by_time` must name a declared column
/// with a time type, since it feeds `_valid_from`/`_valid_until`.
fn time_key(asset: &Asset) -> RenderResult<&str> {
    let key = asset
        .materialization
        .incremental_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(RenderError::MissingIncrementalKey {
            strategy: MaterializationStrategy::Scd2ByTime,
        })?;
    let column = asset
        .get_column_with_name(key)
        .ok_or(RenderError::InvalidScd2TimeKey)?;
    let data_type = column.data_type.to_ascii_uppercase();
    if data_type != "DATE" && !data_type.starts_with("TIMESTAMP") {
        return Err(RenderError::InvalidScd2TimeKey);
    }
    Ok(key)
}

fn on_clause(primary_keys: &[&str]) -> String {
    primary_keys
        .iter()
        .map(|key| format!("target.{key} = source.{key}"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn insert_arm(columns: &[&str], valid_from: &str, max_timestamp: &str) -> String {
    let names = columns.join(", ");
    let values = columns
        .iter()
        .map(|col| format!("source.{col}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "WHEN NOT MATCHED THEN\n  INSERT ({names}, _valid_from, _valid_until, _is_current)\n  VALUES ({values}, {valid_from}, {max_timestamp}, TRUE)"
    )
}

pub(crate) fn by_column(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> RenderResult<Vec<String>> {
    let columns = validate(adapter, asset, MaterializationStrategy::Scd2ByColumn)?;
    let compared = asset
        .columns
        .iter()
        .filter(|col| !col.primary_key)
        .map(|col| col.name.as_str())
        .collect::<Vec<_>>();
    if compared.is_empty() {
        return Err(RenderError::MissingComparisonColumns {
            strategy: MaterializationStrategy::Scd2ByColumn,
        });
    }

    let name = adapter.quote_identifier(&asset.name);
    let now = adapter.current_timestamp();
    let key_list = columns.primary_keys.join(", ");
    let source_diff = compared
        .iter()
        .map(|col| format!("t1.{col} != s1.{col}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let target_diff = compared
        .iter()
        .map(|col| format!("target.{col} != source.{col}"))
        .collect::<Vec<_>>()
        .join(" OR ");

    let statement = format!(
        "MERGE INTO {name} AS target
USING (
  WITH s1 AS (
    {query}
  )
  SELECT s1.*, TRUE AS _is_current
  FROM s1
  UNION ALL
  SELECT s1.*, FALSE AS _is_current
  FROM s1
  JOIN {name} AS t1 USING ({key_list})
  WHERE ({source_diff}) AND t1._is_current
) AS source
ON {on} AND target._is_current AND source._is_current
WHEN MATCHED AND ({target_diff}) THEN
  UPDATE SET
    target._valid_until = {now},
    target._is_current = FALSE
WHEN NOT MATCHED BY SOURCE AND target._is_current = TRUE THEN
  UPDATE SET
    target._valid_until = {now},
    target._is_current = FALSE
{insert}",
        on = on_clause(&columns.primary_keys),
        insert = insert_arm(&columns.all, now, adapter.max_timestamp()),
    );

    Ok(vec![terminate(adapter, statement)])
}

pub(crate) fn by_time(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> RenderResult<Vec<String>> {
    let columns = validate(adapter, asset, MaterializationStrategy::Scd2ByTime)?;
    let key = time_key(asset)?;

    let name = adapter.quote_identifier(&asset.name);
    let key_list = columns.primary_keys.join(", ");
    let staged_key = adapter.scd2_time_expr(&format!("s1.{key}"));
    let source_key = adapter.scd2_time_expr(&format!("source.{key}"));

    let statement = format!(
        "MERGE INTO {name} AS target
USING (
  WITH s1 AS (
    {query}
  )
  SELECT s1.*, TRUE AS _is_current
  FROM s1
  UNION ALL
  SELECT s1.*, FALSE AS _is_current
  FROM s1
  JOIN {name} AS t1 USING ({key_list})
  WHERE t1._valid_from < {staged_key} AND t1._is_current
) AS source
ON {on} AND target._is_current AND source._is_current
WHEN MATCHED AND (target._valid_from < {source_key}) THEN
  UPDATE SET
    target._valid_until = {source_key},
    target._is_current = FALSE
WHEN NOT MATCHED BY SOURCE AND target._is_current = TRUE THEN
  UPDATE SET
    target._valid_until = {now},
    target._is_current = FALSE
{insert}",
        on = on_clause(&columns.primary_keys),
        now = adapter.current_timestamp(),
        insert = insert_arm(&columns.all, &source_key, adapter.max_timestamp()),
    );

    Ok(vec![terminate(adapter, statement)])
}

fn full_refresh(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
    primary_keys: &[&str],
    valid_from: &str,
) -> RenderResult<Vec<String>> {
    let props = adapter.scd2_full_refresh_properties(&asset.materialization, primary_keys)?;
    let name = adapter.quote_identifier(&asset.name);
    let statement = format!(
        "CREATE OR REPLACE TABLE {name}{props} AS
SELECT
  {valid_from} AS _valid_from,
  src.*,
  {max_timestamp} AS _valid_until,
  TRUE AS _is_current
FROM (
{query}
) AS src",
        max_timestamp = adapter.max_timestamp_full_refresh(),
    );
    Ok(vec![terminate(adapter, statement)])
}

pub(crate) fn by_column_full_refresh(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> RenderResult<Vec<String>> {
    let columns = validate(adapter, asset, MaterializationStrategy::Scd2ByColumn)?;
    full_refresh(
        adapter,
        asset,
        query,
        &columns.primary_keys,
        adapter.current_timestamp(),
    )
}

pub(crate) fn by_time_full_refresh(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> RenderResult<Vec<String>> {
    let columns = validate(adapter, asset, MaterializationStrategy::Scd2ByTime)?;
    let key = time_key(asset)?;
    full_refresh(
        adapter,
        asset,
        query,
        &columns.primary_keys,
        &adapter.scd2_time_expr(key),
    )
}

#[cfg(test)]
#[path = "scd2_test.rs"]
mod tests;
