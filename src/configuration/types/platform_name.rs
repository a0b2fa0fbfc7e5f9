use clap::ValueEnum;
use doku::Document;
use serde::{Deserialize, Serialize};

use crate::model::platform::{SqlPlatform, MYSQL, POSTGRESQL, SQLITE};

/// The database platform whose format strings are used when converting values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Document, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlatformName {
    #[default]
    Mysql,
    Postgresql,
    Sqlite,
}

impl PlatformName {
    pub fn platform(self) -> &'static SqlPlatform {
        match self {
            PlatformName::Mysql => &MYSQL,
            PlatformName::Postgresql => &POSTGRESQL,
            PlatformName::Sqlite => &SQLITE,
        }
    }
}
