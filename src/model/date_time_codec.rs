use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use log::trace;

use super::codec::{invalid_format, invalid_type, localize, Codec};
use super::error::ConversionFailure;
use super::platform::Platform;
use super::registry::Timezones;
use super::value::Value;

pub const DATETIME: &str = "datetime";
pub const DATETIMETZ: &str = "datetimetz";

/// Stores date and time values in the database timezone
///
/// Values are shifted, not relabeled: `21:00 UTC` is stored as `16:00` when the database
/// timezone is `America/Nassau`, and read back as the same instant in the application timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeCodec;

impl Codec for DateTimeCodec {
    fn name(&self) -> &'static str {
        DATETIME
    }

    fn to_storage(
        &self,
        value: &Value,
        platform: &dyn Platform,
        zones: &dyn Timezones,
    ) -> Result<Option<String>, ConversionFailure> {
        match value {
            Value::Null => Ok(None),
            Value::DateTime(dt) => {
                let stored = dt.with_timezone(&zones.database_timezone());
                trace!("storing {} as {}", dt, stored);
                Ok(Some(stored.format(platform.datetime_format_string()).to_string()))
            }
            other => Err(invalid_type(other, self.name())),
        }
    }

    fn to_application(
        &self,
        raw: Value,
        platform: &dyn Platform,
        zones: &dyn Timezones,
    ) -> Result<Option<DateTime<Tz>>, ConversionFailure> {
        let text = match raw {
            Value::Null => return Ok(None),
            // already converted
            Value::DateTime(dt) => return Ok(Some(dt)),
            Value::Text(text) => text,
            other => return Err(invalid_type(&other, self.name())),
        };

        let format = platform.datetime_format_string();
        let local = NaiveDateTime::parse_from_str(&text, format)
            .map_err(|_| invalid_format(&text, self.name(), format))?;
        let stored = localize(local, zones.database_timezone());

        Ok(Some(stored.with_timezone(&zones.default_timezone())))
    }
}
