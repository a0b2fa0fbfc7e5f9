/// Describes how a database platform renders datetime values as text
///
/// Format strings use chrono's strftime syntax: <https://docs.rs/chrono/latest/chrono/format/strftime/index.html>
pub trait Platform: Send + Sync {
    fn name(&self) -> &str;

    /// Format of a full date and time value, e.g. `%Y-%m-%d %H:%M:%S`
    fn datetime_format_string(&self) -> &str;

    /// Format of a date without time of day, e.g. `%Y-%m-%d`
    fn date_format_string(&self) -> &str;
}

/// A platform described entirely by its format strings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlPlatform {
    pub name: &'static str,
    pub datetime_format: &'static str,
    pub date_format: &'static str,
}

pub const MYSQL: SqlPlatform = SqlPlatform {
    name: "mysql",
    datetime_format: "%Y-%m-%d %H:%M:%S",
    date_format: "%Y-%m-%d",
};

pub const POSTGRESQL: SqlPlatform = SqlPlatform {
    name: "postgresql",
    datetime_format: "%Y-%m-%d %H:%M:%S",
    date_format: "%Y-%m-%d",
};

pub const SQLITE: SqlPlatform = SqlPlatform {
    name: "sqlite",
    datetime_format: "%Y-%m-%d %H:%M:%S",
    date_format: "%Y-%m-%d",
};

impl Platform for SqlPlatform {
    fn name(&self) -> &str {
        self.name
    }

    fn datetime_format_string(&self) -> &str {
        self.datetime_format
    }

    fn date_format_string(&self) -> &str {
        self.date_format
    }
}
