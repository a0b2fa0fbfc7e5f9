use chrono_tz::Tz;
use std::env;

/// Determine the timezone the host process runs in
///
/// The `TZ` environment variable wins if it names a valid timezone, otherwise this asks the
/// operating system via [`iana_time_zone::get_timezone()`]. Falls back to UTC when neither works.
pub fn system_timezone() -> Tz {
    if let Some(tz) = env::var("TZ").ok().and_then(|name| parse_timezone(&name)) {
        log::trace!("ambient timezone taken from TZ: {}", tz);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => parse_timezone(&name).unwrap_or_else(|| {
            log::warn!("system timezone {:?} is unknown, falling back to UTC", name);
            Tz::UTC
        }),
        Err(e) => {
            log::warn!("could not determine system timezone ({}), falling back to UTC", e);
            Tz::UTC
        }
    }
}

/// Parse an IANA timezone identifier, ignoring a leading `:` as POSIX allows in `TZ`
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().trim_start_matches(':').parse::<Tz>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_identifiers() {
        assert_eq!(parse_timezone("Europe/Berlin"), Some(Tz::Europe__Berlin));
        assert_eq!(parse_timezone(":America/Nassau"), Some(Tz::America__Nassau));
        assert_eq!(parse_timezone(" UTC "), Some(Tz::UTC));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert_eq!(parse_timezone("Not/AZone"), None);
        assert_eq!(parse_timezone(""), None);
    }
}
