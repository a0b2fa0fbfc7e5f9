use chrono_tz::Tz as ChronoTz;
use std::{fmt, ops::Deref, str::FromStr};

use crate::util::parse_timezone;

/// Wrapper type for chrono_tz::Tz so configured names are validated with a helpful error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigTimeZone(pub chrono_tz::Tz);

impl ConfigTimeZone {
    pub fn timezone(&self) -> ChronoTz {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

/// Error for names that are not in the IANA timezone database
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timezone \"{0}\", see https://en.wikipedia.org/wiki/List_of_tz_database_time_zones for valid names")]
pub struct InvalidTimeZone(pub String);

impl FromStr for ConfigTimeZone {
    type Err = InvalidTimeZone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timezone(s)
            .map(ConfigTimeZone)
            .ok_or_else(|| InvalidTimeZone(s.to_string()))
    }
}

impl fmt::Display for ConfigTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Deref for ConfigTimeZone {
    type Target = chrono_tz::Tz;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ConfigTimeZone> for chrono_tz::Tz {
    fn from(value: ConfigTimeZone) -> Self {
        value.0
    }
}

impl From<chrono_tz::Tz> for ConfigTimeZone {
    fn from(value: chrono_tz::Tz) -> Self {
        ConfigTimeZone(value)
    }
}

impl doku::Document for ConfigTimeZone {
    fn ty() -> doku::Type {
        doku::Type::from(doku::TypeKind::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_names_parse() {
        let tz: ConfigTimeZone = "Pacific/Tahiti".parse().unwrap();
        assert_eq!(tz.timezone(), ChronoTz::Pacific__Tahiti);
        assert_eq!(tz.to_string(), "Pacific/Tahiti");
    }

    #[test]
    fn invalid_names_are_reported_by_value() {
        let err = "Not/AZone".parse::<ConfigTimeZone>().unwrap_err();
        assert_eq!(err, InvalidTimeZone("Not/AZone".into()));
        assert!(err.to_string().contains("\"Not/AZone\""));
    }
}
