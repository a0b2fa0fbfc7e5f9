use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use log::trace;

use super::codec::{invalid_format, invalid_type, localize, Codec};
use super::error::ConversionFailure;
use super::platform::Platform;
use super::registry::Timezones;
use super::value::Value;

pub const DATE: &str = "date";

/// Stores calendar dates, discarding the time of day
///
/// The calendar date written is the one the value shows on its own wall clock, the database
/// timezone only labels it. Stored dates are read back as the start of that day in the application
/// timezone, which is midnight unless daylight saving skips it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateCodec;

impl Codec for DateCodec {
    fn name(&self) -> &'static str {
        DATE
    }

    fn to_storage(
        &self,
        value: &Value,
        platform: &dyn Platform,
        zones: &dyn Timezones,
    ) -> Result<Option<String>, ConversionFailure> {
        let dt = match value {
            Value::Null => return Ok(None),
            Value::DateTime(dt) => dt,
            other => return Err(invalid_type(other, self.name())),
        };

        // re-read the rendered wall clock, it is labeled with the database timezone as is
        let format = platform.datetime_format_string();
        let rendered = dt.format(format).to_string();
        let local = NaiveDateTime::parse_from_str(&rendered, format)
            .map_err(|_| invalid_format(&rendered, self.name(), format))?;
        trace!("storing {} as date of {} in {}", dt, local, zones.database_timezone());

        Ok(Some(local.format(platform.date_format_string()).to_string()))
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

        let format = platform.date_format_string();
        let date = NaiveDate::parse_from_str(&text, format)
            .map_err(|_| invalid_format(&text, self.name(), format))?;

        // first instant of the day where midnight is skipped by daylight saving
        Ok(Some(localize(date.and_time(NaiveTime::MIN), zones.default_timezone())))
    }
}
