use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use super::types::platform_name::PlatformName;

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "dbtz", author, version, about)]
pub struct Opt {
    /// The config file to read
    ///
    /// A missing file is not an error, defaults and the environment are used instead.
    #[clap(short, long, default_value_t = String::from("dbtz.toml"))]
    pub config: String,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Config values that can be given on the command line, these win over the config file
#[derive(Args, Debug, Default, Serialize)]
pub struct Overrides {
    /// The timezone in which datetime values are stored
    #[clap(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// The database platform whose formats are used
    #[clap(long, value_enum, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformName>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an application datetime into its stored text
    ToStorage {
        /// The registered type to convert with
        #[clap(long = "type", default_value = "datetime")]
        type_name: String,

        /// The timezone `value` is given in (defaults to the application timezone)
        #[clap(long)]
        timezone: Option<String>,

        /// A datetime as `YYYY-MM-DD HH:MM:SS`, or `null`
        value: String,
    },

    /// Convert stored text into an application datetime
    ToApplication {
        /// The registered type to convert with
        #[clap(long = "type", default_value = "datetime")]
        type_name: String,

        /// The stored text, or `null`
        raw: String,
    },

    /// List the valid timezone names
    ListTimezones {
        /// Only show names containing this text (case insensitive)
        filter: Option<String>,
    },

    /// Validate the configuration and print the resolved timezones
    CheckConfig,

    /// Print an example config file
    ExampleConfig,
}
