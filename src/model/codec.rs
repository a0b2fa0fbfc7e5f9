use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use std::fmt;

use super::error::ConversionFailure;
use super::platform::Platform;
use super::registry::Timezones;
use super::value::Value;

/// Converts datetime values at the storage boundary
///
/// The ORM calls [`Codec::to_storage`] before writing and [`Codec::to_application`] after reading.
/// `zones` decides which timezone the stored text is in and which one the application expects.
pub trait Codec: fmt::Debug + Send + Sync {
    /// The type name reported in conversion errors, e.g. `datetime`
    fn name(&self) -> &'static str;

    /// Render `value` as stored text, `None` meaning the platform's null
    fn to_storage(
        &self,
        value: &Value,
        platform: &dyn Platform,
        zones: &dyn Timezones,
    ) -> Result<Option<String>, ConversionFailure>;

    /// Turn stored text back into an application value
    fn to_application(
        &self,
        raw: Value,
        platform: &dyn Platform,
        zones: &dyn Timezones,
    ) -> Result<Option<DateTime<Tz>>, ConversionFailure>;
}

/// Attach `timezone` to a wall-clock time
///
/// Ambiguous times take the earlier instant. Times skipped by a daylight saving gap are read with
/// the offset in effect before the gap, which moves them forward by the length of the gap.
pub fn localize(local: NaiveDateTime, timezone: Tz) -> DateTime<Tz> {
    match timezone.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            // assumes no two transitions within a day of each other
            let before = timezone
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix();
            let utc = local - Duration::seconds(i64::from(before.local_minus_utc()));
            timezone.from_utc_datetime(&utc)
        }
    }
}

pub(crate) fn invalid_type(value: &Value, type_name: &'static str) -> ConversionFailure {
    ConversionFailure::InvalidType {
        value: value.to_string(),
        actual: value.kind(),
        type_name,
        expected: &["null", "DateTime"],
    }
}

pub(crate) fn invalid_format(
    value: &str,
    type_name: &'static str,
    expected_format: &str,
) -> ConversionFailure {
    ConversionFailure::InvalidFormat {
        value: value.to_string(),
        type_name,
        expected_format: expected_format.to_string(),
    }
}
