use chrono_tz::Tz;
use log::debug;
use parking_lot::RwLock;
use std::fmt;
use std::sync::OnceLock;

use crate::util::system_timezone;

/// Source of the ambient host timezone used to fill unset slots
pub type AmbientTimezone = Box<dyn Fn() -> Tz + Send + Sync>;

/// Read access to the two timezones every codec needs
pub trait Timezones {
    /// The timezone in which datetime values are stored
    fn database_timezone(&self) -> Tz;

    /// The timezone in which the application expresses datetime values
    fn default_timezone(&self) -> Tz;
}

/// Shared holder for the database and the application timezone
///
/// Both slots start out empty and are filled from the ambient timezone on first read. The database
/// timezone can be overwritten at any time (once per unit of work by
/// [`DatabaseTimezoneListener`](crate::model::lifecycle::DatabaseTimezoneListener)), the default
/// timezone stays fixed once it has been read.
pub struct TimezoneRegistry {
    database_timezone: RwLock<Option<Tz>>,
    default_timezone: OnceLock<Tz>,
    ambient: AmbientTimezone,
}

impl TimezoneRegistry {
    /// A registry falling back to the host's system timezone
    pub fn new() -> TimezoneRegistry {
        TimezoneRegistry::with_ambient(system_timezone)
    }

    /// A registry falling back to whatever `ambient` returns at first access
    pub fn with_ambient<F>(ambient: F) -> TimezoneRegistry
    where
        F: Fn() -> Tz + Send + Sync + 'static,
    {
        TimezoneRegistry {
            database_timezone: RwLock::new(None),
            default_timezone: OnceLock::new(),
            ambient: Box::new(ambient),
        }
    }

    pub fn set_database_timezone(&self, timezone: Tz) {
        debug!("setting database timezone to {}", timezone);
        *self.database_timezone.write() = Some(timezone);
    }

    pub fn database_timezone(&self) -> Tz {
        if let Some(tz) = *self.database_timezone.read() {
            return tz;
        }

        // another thread may have filled the slot between the two locks
        *self.database_timezone.write().get_or_insert_with(|| {
            let tz = (self.ambient)();
            debug!("database timezone not set, using ambient timezone {}", tz);
            tz
        })
    }

    pub fn default_timezone(&self) -> Tz {
        *self.default_timezone.get_or_init(|| {
            let tz = (self.ambient)();
            debug!("default timezone resolved to {}", tz);
            tz
        })
    }

    /// Freeze the current timezones for one unit of work
    pub fn context(&self) -> TimezoneContext {
        TimezoneContext {
            database: self.database_timezone(),
            application: self.default_timezone(),
        }
    }
}

impl Default for TimezoneRegistry {
    fn default() -> Self {
        TimezoneRegistry::new()
    }
}

impl fmt::Debug for TimezoneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimezoneRegistry")
            .field("database_timezone", &*self.database_timezone.read())
            .field("default_timezone", &self.default_timezone.get())
            .finish_non_exhaustive()
    }
}

impl Timezones for TimezoneRegistry {
    fn database_timezone(&self) -> Tz {
        TimezoneRegistry::database_timezone(self)
    }

    fn default_timezone(&self) -> Tz {
        TimezoneRegistry::default_timezone(self)
    }
}

/// The timezones in effect for a single unit of work
///
/// Unlike the registry this never changes, so a request holding it is unaffected by other requests
/// reconfiguring the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimezoneContext {
    pub database: Tz,
    pub application: Tz,
}

impl TimezoneContext {
    pub fn new(database: Tz, application: Tz) -> TimezoneContext {
        TimezoneContext {
            database,
            application,
        }
    }
}

impl Timezones for TimezoneContext {
    fn database_timezone(&self) -> Tz {
        self.database
    }

    fn default_timezone(&self) -> Tz {
        self.application
    }
}
