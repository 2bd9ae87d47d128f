//! The supported warehouse dialects.

use std::fmt;
use std::str::FromStr;

use crate::dialect::DialectAdapter;

mod databricks;
mod snowflake;
mod trino;
mod vertica;

pub use databricks::Databricks;
pub use snowflake::Snowflake;
pub use trino::Trino;
pub use vertica::Vertica;

/// A supported target warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Databricks,
    Snowflake,
    Trino,
    Vertica,
}

impl Dialect {
    /// All dialects, in a stable order.
    pub const ALL: [Dialect; 4] = [
        Dialect::Databricks,
        Dialect::Snowflake,
        Dialect::Trino,
        Dialect::Vertica,
    ];

    /// The adapter carrying this dialect's formatting rules.
    pub fn adapter(&self) -> &'static dyn DialectAdapter {
        match self {
            Dialect::Databricks => &Databricks,
            Dialect::Snowflake => &Snowflake,
            Dialect::Trino => &Trino,
            Dialect::Vertica => &Vertica,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Databricks => "databricks",
            Dialect::Snowflake => "snowflake",
            Dialect::Trino => "trino",
            Dialect::Vertica => "vertica",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "databricks" => Ok(Dialect::Databricks),
            "snowflake" => Ok(Dialect::Snowflake),
            "trino" => Ok(Dialect::Trino),
            "vertica" => Ok(Dialect::Vertica),
            other => Err(format!(
                "unknown dialect `{other}`, expected one of: databricks, snowflake, trino, vertica"
            )),
        }
    }
}
