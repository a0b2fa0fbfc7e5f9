use color_eyre::eyre::{Result, WrapErr};
use doku::Document;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    options::Overrides,
    types::{config_time_zone::ConfigTimeZone, platform_name::PlatformName},
};

/// Prefix of environment variables that override config values, e.g. `DBTZ_DATABASE`
pub const ENV_PREFIX: &str = "DBTZ_";

#[derive(Debug, Deserialize, Serialize, Document)]
pub struct Config {
    /// The timezone of the datetime values which are saved and will be saved in the database
    ///
    /// If empty, the timezone of the host is used (the `TZ` environment variable or the system setting).
    /// See available timezones here: <https://docs.rs/chrono-tz/latest/chrono_tz/enum.Tz.html>
    #[doku(example = "Europe/Berlin")]
    pub database: Option<String>,

    // this field will be created from database in Config::from_figment() hence the serde skip
    // this is the machine readable version of the above
    #[serde(skip)]
    pub database_timezone: Option<ConfigTimeZone>,

    /// The database platform whose datetime and date formats are used (mysql, postgresql or sqlite)
    #[doku(example = "mysql")]
    pub platform: PlatformName,

    /// Whether to also bind the date-only codec to the `date` type
    pub register_date_type: bool,
}

/// Sane default values for the config struct.
impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            database_timezone: None,
            platform: PlatformName::Mysql,
            register_date_type: false,
        }
    }
}

impl Config {
    /// Read the config file, then the environment, then the command line overrides
    pub fn new(config_path: &str, overrides: &Overrides) -> Result<Config> {
        debug!("reading configuration from {}...", config_path);
        Config::from_figment(Config::figment(config_path, overrides))
    }

    pub fn figment(config_path: &str, overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Extract and validate a config from any figment
    pub fn from_figment(figment: Figment) -> Result<Config> {
        let mut config: Config = figment
            .extract()
            .wrap_err("could not read configuration")?;
        config.database_timezone = config.parse_database_timezone()?;

        debug!("config is: {:#?}", config);
        Ok(config)
    }

    /// The configured database timezone, `None` if the host timezone should be used
    pub fn database_timezone(&self) -> Option<ConfigTimeZone> {
        self.database_timezone
    }

    /// An example config file with every option documented
    pub fn example_toml() -> String {
        doku::to_toml::<Config>()
    }

    fn parse_database_timezone(&self) -> Result<Option<ConfigTimeZone>> {
        match self.database.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name.parse().map(Some).wrap_err_with(|| {
                format!("invalid timezone \"{}\" for config parameter \"database\"", name)
            }),
        }
    }
}
