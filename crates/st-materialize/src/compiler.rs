//! The materialization compiler entry point.

use log::debug;
use st_core::asset::{Asset, MaterializationStrategy, MaterializationType};
use st_core::sql_utils::{strip_block_comments, trim_trailing_semicolon};
use uuid::Uuid;

use crate::dialects::Dialect;
use crate::error::{RenderError, RenderResult};
use crate::{scd2, strategies};

/// Source of uniqueness for staged temp-object names. Injectable so
/// tests can pin it; the default draws a fresh v4 UUID per render.
pub type SuffixGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Compiles an asset's materialization policy plus its rendered query
/// into the ordered SQL statement list for one target dialect.
///
/// Rendering is a pure function of `(asset, query)` apart from the
/// temp-name suffix; with a pinned [`SuffixGenerator`] the output is
/// byte-identical across calls.
pub struct Materializer {
    dialect: Dialect,
    full_refresh: bool,
    suffix: SuffixGenerator,
}

impl Materializer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            full_refresh: false,
            suffix: Box::new(|| Uuid::new_v4().simple().to_string()),
        }
    }

    /// In full-refresh mode every table strategy rebuilds from scratch:
    /// incremental strategies compile as `create+replace`, the SCD2
    /// strategies as their history-seeding rebuild, and `ddl` stays DDL.
    pub fn with_full_refresh(mut self, full_refresh: bool) -> Self {
        self.full_refresh = full_refresh;
        self
    }

    pub fn with_suffix_generator(mut self, generator: SuffixGenerator) -> Self {
        self.suffix = generator;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Compile `asset` with its rendered `query` into the statement
    /// list to run, in order. Errors are terminal: no partial output.
    pub fn render(&self, asset: &Asset, query: &str) -> RenderResult<Vec<String>> {
        let mat = &asset.materialization;
        let adapter = self.dialect.adapter();
        debug!(
            "materializing {} as {}/{} on {}",
            asset.name, mat.kind, mat.strategy, self.dialect
        );
        // Trailing `;` is trimmed before the query is embedded in
        // generated DDL/DML; the unmaterialized passthrough keeps it.
        let trimmed = trim_trailing_semicolon(query);

        match mat.kind {
            // Unmaterialized assets run their query as-is; block
            // comments may carry embedded configuration and never reach
            // the warehouse.
            MaterializationType::None => Ok(vec![strip_block_comments(query)]),
            MaterializationType::View => match mat.strategy {
                MaterializationStrategy::None => Ok(strategies::view(adapter, asset, trimmed)),
                strategy => Err(RenderError::UnsupportedCombination {
                    kind: mat.kind,
                    strategy,
                }),
            },
            MaterializationType::Table => {
                let strategy = self.effective_strategy(mat.strategy);
                match strategy {
                    MaterializationStrategy::None | MaterializationStrategy::CreateReplace => {
                        strategies::create_replace(adapter, asset, trimmed, &(self.suffix)())
                    }
                    MaterializationStrategy::Append => {
                        Ok(strategies::append(adapter, asset, trimmed))
                    }
                    MaterializationStrategy::DeleteInsert => {
                        strategies::delete_insert(adapter, asset, trimmed, &(self.suffix)())
                    }
                    MaterializationStrategy::TruncateInsert => {
                        Ok(strategies::truncate_insert(adapter, asset, trimmed))
                    }
                    MaterializationStrategy::Merge => strategies::merge(adapter, asset, trimmed),
                    MaterializationStrategy::TimeInterval => {
                        strategies::time_interval(adapter, asset, trimmed)
                    }
                    MaterializationStrategy::Ddl => strategies::ddl(adapter, asset),
                    MaterializationStrategy::Scd2ByColumn => {
                        if self.full_refresh {
                            scd2::by_column_full_refresh(adapter, asset, trimmed)
                        } else {
                            scd2::by_column(adapter, asset, trimmed)
                        }
                    }
                    MaterializationStrategy::Scd2ByTime => {
                        if self.full_refresh {
                            scd2::by_time_full_refresh(adapter, asset, trimmed)
                        } else {
                            scd2::by_time(adapter, asset, trimmed)
                        }
                    }
                }
            }
        }
    }

    fn effective_strategy(&self, strategy: MaterializationStrategy) -> MaterializationStrategy {
        if !self.full_refresh {
            return strategy;
        }
        match strategy {
            MaterializationStrategy::Ddl
            | MaterializationStrategy::Scd2ByColumn
            | MaterializationStrategy::Scd2ByTime => strategy,
            _ => MaterializationStrategy::CreateReplace,
        }
    }
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod tests;
