use chrono::NaiveDateTime;
use chrono_tz::Tz;
use clap::Parser;
use color_eyre::eyre::{self, eyre, WrapErr};
use flexi_logger::Logger;
use itertools::Itertools;
use std::sync::Arc;

use database_timezone::bundle::DatabaseTimezoneBundle;
use database_timezone::configuration::config::Config;
use database_timezone::configuration::options::{Command, Opt, Overrides};
use database_timezone::configuration::types::config_time_zone::ConfigTimeZone;
use database_timezone::model::codec::{localize, Codec};
use database_timezone::model::lifecycle::LifecycleEvent;
use database_timezone::model::registry::TimezoneContext;
use database_timezone::model::type_registry::TypeRegistry;
use database_timezone::model::value::Value;

/// How datetimes are given and printed on the command line
const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NULL: &str = "null";

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let Opt {
        config,
        overrides,
        command,
    } = Opt::parse();
    log::debug!("Command: {:#?}", command);

    match command {
        Command::ExampleConfig => println!("{}", Config::example_toml()),
        Command::ListTimezones { filter } => list_timezones(filter.as_deref()),
        Command::CheckConfig => {
            let (bundle, context) = load(&config, &overrides)?;
            println!("database timezone:    {}", context.database);
            println!("application timezone: {}", context.application);
            println!("platform:             {}", bundle.platform().name);
            println!("types:                {}", bundle.types().names().join(", "));
        }
        Command::ToStorage {
            type_name,
            timezone,
            value,
        } => {
            let (bundle, context) = load(&config, &overrides)?;
            let codec = codec(&bundle, &type_name)?;
            let timezone = match timezone {
                Some(name) => name.parse::<ConfigTimeZone>()?.timezone(),
                None => context.application,
            };
            let value = parse_input(&value, timezone)?;

            let stored = codec.to_storage(&value, bundle.platform(), &context)?;
            println!("{}", stored.as_deref().unwrap_or(NULL));
        }
        Command::ToApplication { type_name, raw } => {
            let (bundle, context) = load(&config, &overrides)?;
            let codec = codec(&bundle, &type_name)?;
            let raw = if raw == NULL { Value::Null } else { Value::Text(raw) };

            match codec.to_application(raw, bundle.platform(), &context)? {
                Some(datetime) => println!("{} {}", datetime.format(INPUT_FORMAT), datetime.timezone()),
                None => println!("{}", NULL),
            }
        }
    }

    Ok(())
}

/// Read the configuration, wire the bundle and start a unit of work for this command
fn load(config: &str, overrides: &Overrides) -> eyre::Result<(DatabaseTimezoneBundle, TimezoneContext)> {
    let config = Config::new(config, overrides)?;
    let bundle = DatabaseTimezoneBundle::load(&config, TypeRegistry::new())
        .wrap_err("could not register the database timezone types")?;
    let context = bundle.begin(LifecycleEvent::Command);
    Ok((bundle, context))
}

fn codec(bundle: &DatabaseTimezoneBundle, type_name: &str) -> eyre::Result<Arc<dyn Codec>> {
    bundle.types().get(type_name).ok_or_else(|| {
        eyre!(
            "unknown type {:?}, registered types are: {}",
            type_name,
            bundle.types().names().join(", ")
        )
    })
}

/// Parse a command line datetime given as wall clock time in `timezone`
fn parse_input(value: &str, timezone: Tz) -> eyre::Result<Value> {
    if value == NULL {
        return Ok(Value::Null);
    }
    let local = NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
        .wrap_err_with(|| format!("could not parse {:?}, expected {}", value, INPUT_FORMAT))?;
    Ok(Value::DateTime(localize(local, timezone)))
}

fn list_timezones(filter: Option<&str>) {
    let filter = filter.map(str::to_lowercase);

    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| match &filter {
            Some(filter) => name.to_lowercase().contains(filter),
            None => true,
        })
        .sorted()
        .for_each(|name| println!("{}", name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_input_reads_null() {
        assert_eq!(parse_input("null", Tz::UTC).unwrap(), Value::Null);
    }

    #[test]
    fn parse_input_reads_wall_clock_in_timezone() {
        let Value::DateTime(datetime) = parse_input("2020-11-24 16:00:00", Tz::America__Nassau).unwrap() else {
            panic!("expected a datetime");
        };
        assert_eq!(datetime.timezone(), Tz::America__Nassau);
        assert_eq!(
            datetime.with_timezone(&Tz::UTC).format(INPUT_FORMAT).to_string(),
            "2020-11-24 21:00:00"
        );
    }

    #[test]
    fn parse_input_accepts_times_skipped_by_dst() {
        let Value::DateTime(datetime) = parse_input("2021-03-28 02:30:00", Tz::Europe__Berlin).unwrap() else {
            panic!("expected a datetime");
        };
        assert_eq!(datetime.format(INPUT_FORMAT).to_string(), "2021-03-28 03:30:00");
    }

    #[test]
    fn parse_input_rejects_other_formats() {
        let err = parse_input("24.11.2020", Tz::UTC).unwrap_err();
        assert!(err.to_string().contains("24.11.2020"));
    }
}
