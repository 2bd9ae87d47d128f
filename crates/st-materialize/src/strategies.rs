//! Per-strategy SQL synthesis.
//!
//! Each function is a pure string builder over `(adapter, asset, query)`.
//! The incoming query has already had its trailing semicolon trimmed.
//! Dialects without transactions get their multi-statement strategies as
//! bare statement lists; transactional dialects get a single `;`-joined
//! script per strategy.

use st_core::asset::{Asset, MaterializationStrategy, TimeGranularity};
use st_core::sql_utils::escape_sql_string;

use crate::dialect::{DdlPrimaryKey, DialectAdapter, ReplaceShape};
use crate::error::{RenderError, RenderResult};

/// Prefix for uniquely named staging objects.
pub const TEMP_PREFIX: &str = "__bruin_tmp_";

/// Join a statement sequence into one executable script.
fn script(statements: &[String]) -> String {
    format!("{};", statements.join(";\n"))
}

/// Terminate a single statement per the dialect's script convention.
pub(crate) fn terminate(adapter: &dyn DialectAdapter, mut statement: String) -> String {
    if adapter.begin_statement().is_some() {
        statement.push(';');
    }
    statement
}

pub(crate) fn unsupported(asset: &Asset, strategy: MaterializationStrategy) -> RenderError {
    RenderError::StrategyNotSupportedForType {
        strategy,
        kind: asset.materialization.kind,
        asset_type: asset.asset_type.clone(),
    }
}

pub(crate) fn view(adapter: &dyn DialectAdapter, asset: &Asset, query: &str) -> Vec<String> {
    let name = adapter.quote_identifier(&asset.name);
    if adapter.drops_table_before_view() {
        vec![
            format!("DROP TABLE IF EXISTS {name}"),
            format!("CREATE OR REPLACE VIEW {name} AS {query}"),
        ]
    } else {
        vec![format!("CREATE OR REPLACE VIEW {name} AS\n{query}")]
    }
}

pub(crate) fn append(adapter: &dyn DialectAdapter, asset: &Asset, query: &str) -> Vec<String> {
    let name = adapter.quote_identifier(&asset.name);
    vec![format!("INSERT INTO {name} {query}")]
}

pub(crate) fn create_replace(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
    suffix: &str,
) -> RenderResult<Vec<String>> {
    let mat = &asset.materialization;
    let props = adapter.table_properties(mat)?;
    let name = adapter.quote_identifier(&asset.name);

    match adapter.replace_shape() {
        ReplaceShape::TempSwap => {
            adapter.validate_table_name(&asset.name)?;
            let schema = match asset.name.rsplit_once('.') {
                Some((schema, _)) => schema,
                None => {
                    return Err(RenderError::MalformedAssetName {
                        dialect: adapter.name(),
                    })
                }
            };
            let temp = format!("{schema}.{TEMP_PREFIX}{suffix}");
            Ok(vec![
                format!("CREATE TABLE {temp}{props} AS {query};"),
                format!("DROP TABLE IF EXISTS {name};"),
                format!("ALTER TABLE {temp} RENAME TO {name};"),
            ])
        }
        ReplaceShape::DropCreate => {
            let drop = format!("DROP TABLE IF EXISTS {name}{}", adapter.drop_suffix());
            let create = if adapter.wraps_ctas_query() {
                format!("CREATE TABLE {name}{props} AS ({query})")
            } else {
                format!("CREATE TABLE {name}{props} AS\n{query}")
            };
            Ok(vec![script(&[drop, create])])
        }
    }
}

pub(crate) fn delete_insert(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
    suffix: &str,
) -> RenderResult<Vec<String>> {
    let key = incremental_key(asset, MaterializationStrategy::DeleteInsert)?;
    let name = adapter.quote_identifier(&asset.name);
    let temp = format!("{TEMP_PREFIX}{suffix}");

    if let Some(relation) = adapter.temp_relation(&temp, query) {
        let delete =
            format!("DELETE FROM {name} WHERE {key} IN (SELECT DISTINCT {key} FROM {temp})");
        let insert = format!("INSERT INTO {name} SELECT * FROM {temp}");

        let Some(begin) = adapter.begin_statement() else {
            return Ok(vec![relation.create, delete, insert, relation.drop]);
        };
        let statements = if adapter.transaction_includes_temp() {
            vec![
                begin.to_string(),
                relation.create,
                delete,
                insert,
                relation.drop,
                "COMMIT".to_string(),
            ]
        } else {
            vec![
                relation.create,
                begin.to_string(),
                delete,
                insert,
                "COMMIT".to_string(),
                relation.drop,
            ]
        };
        return Ok(vec![script(&statements)]);
    }

    // No staging relation: embed the query as a subselect twice.
    let delete = format!(
        "DELETE FROM {name} WHERE {key} IN (SELECT DISTINCT {key} FROM ({query}) AS new_data)"
    );
    let insert = format!("INSERT INTO {name} SELECT * FROM ({query}) AS new_data");
    let mut statements = vec![delete, insert];
    if adapter.transactional_delete_insert() {
        if let Some(begin) = adapter.begin_statement() {
            statements.insert(0, begin.to_string());
            statements.push("COMMIT".to_string());
        }
    }
    Ok(vec![script(&statements)])
}

pub(crate) fn truncate_insert(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> Vec<String> {
    let name = adapter.quote_identifier(&asset.name);
    let clear = if adapter.supports_truncate() {
        format!("TRUNCATE TABLE {name}")
    } else {
        format!("DELETE FROM {name}")
    };
    let insert = format!("INSERT INTO {name} {query}");

    match adapter.begin_statement() {
        None => vec![clear, insert],
        Some(begin) => vec![script(&[
            begin.to_string(),
            clear,
            insert,
            "COMMIT".to_string(),
        ])],
    }
}

pub(crate) fn time_interval(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> RenderResult<Vec<String>> {
    let key = incremental_key(asset, MaterializationStrategy::TimeInterval)?;
    let granularity = asset
        .materialization
        .time_granularity
        .ok_or(RenderError::MissingTimeGranularity)?;

    let (start, end) = match granularity {
        TimeGranularity::Date => ("{{start_date}}", "{{end_date}}"),
        TimeGranularity::Timestamp => ("{{start_timestamp}}", "{{end_timestamp}}"),
    };

    let name = adapter.quote_identifier(&asset.name);
    let delete = format!(
        "DELETE FROM {name} WHERE {key} BETWEEN {} AND {}",
        adapter.time_literal(granularity, start),
        adapter.time_literal(granularity, end)
    );
    let insert = format!("INSERT INTO {name} {query}");

    match adapter.begin_statement() {
        None => Ok(vec![delete, insert]),
        Some(begin) if adapter.transactional_time_interval() => Ok(vec![script(&[
            begin.to_string(),
            delete,
            insert,
            "COMMIT".to_string(),
        ])]),
        Some(_) => Ok(vec![script(&[delete, insert])]),
    }
}

pub(crate) fn merge(
    adapter: &dyn DialectAdapter,
    asset: &Asset,
    query: &str,
) -> RenderResult<Vec<String>> {
    if !adapter.supports_merge() {
        return Err(unsupported(asset, MaterializationStrategy::Merge));
    }
    if asset.columns.is_empty() {
        return Err(RenderError::MissingColumns {
            strategy: MaterializationStrategy::Merge,
        });
    }
    let primary_keys = asset.column_names_with_primary_key();
    if primary_keys.is_empty() {
        return Err(RenderError::MissingPrimaryKey {
            strategy: MaterializationStrategy::Merge,
        });
    }

    let name = adapter.quote_identifier(&asset.name);
    let on = primary_keys
        .iter()
        .map(|key| format!("target.{key} = source.{key}"))
        .collect::<Vec<_>>()
        .join(" AND ");

    // merge_sql wins over the default source.col assignment; columns
    // flagged neither way are left untouched on match.
    let updates = asset
        .columns
        .iter()
        .filter(|col| !col.primary_key)
        .filter_map(|col| match &col.merge_sql {
            Some(expr) => Some(format!("target.{} = {expr}", col.name)),
            None if col.update_on_merge => {
                Some(format!("target.{0} = source.{0}", col.name))
            }
            None => None,
        })
        .collect::<Vec<_>>();

    let columns = asset.column_names();
    let insert_columns = columns.join(", ");
    let insert_values = columns
        .iter()
        .map(|col| format!("source.{col}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("MERGE INTO {name} target"),
        format!("USING ({query}) source ON {on}"),
    ];
    if !updates.is_empty() {
        lines.push(format!("WHEN MATCHED THEN UPDATE SET {}", updates.join(", ")));
    }
    lines.push(format!(
        "WHEN NOT MATCHED THEN INSERT({insert_columns}) VALUES({insert_values})"
    ));

    Ok(vec![terminate(adapter, lines.join("\n"))])
}

pub(crate) fn ddl(adapter: &dyn DialectAdapter, asset: &Asset) -> RenderResult<Vec<String>> {
    if asset.columns.is_empty() {
        return Err(RenderError::MissingColumns {
            strategy: MaterializationStrategy::Ddl,
        });
    }

    let mat = &asset.materialization;
    let name = adapter.quote_identifier(&asset.name);
    let prefix = adapter.ddl_prefix(mat)?;
    let suffix = adapter.ddl_suffix(mat)?;
    let pk_style = adapter.ddl_primary_key();

    let mut definitions = asset
        .columns
        .iter()
        .map(|col| {
            let mut def = format!("{} {}", col.name, col.data_type);
            if col.primary_key && pk_style == DdlPrimaryKey::Inline {
                def.push_str(" PRIMARY KEY");
            }
            if !col.description.is_empty() {
                def.push_str(&format!(" COMMENT '{}'", escape_sql_string(&col.description)));
            }
            def
        })
        .collect::<Vec<_>>();

    if pk_style == DdlPrimaryKey::TableConstraint {
        let primary_keys = asset.column_names_with_primary_key();
        if !primary_keys.is_empty() {
            definitions.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
        }
    }

    Ok(vec![format!(
        "CREATE TABLE IF NOT EXISTS {name}{prefix} (\n{}\n){suffix}",
        definitions.join(",\n")
    )])
}

fn incremental_key(
    asset: &Asset,
    strategy: MaterializationStrategy,
) -> RenderResult<&str> {
    asset
        .materialization
        .incremental_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(RenderError::MissingIncrementalKey { strategy })
}
