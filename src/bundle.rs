use chrono_tz::Tz;
use log::info;
use std::sync::Arc;

use crate::configuration::config::Config;
use crate::model::codec::Codec;
use crate::model::date_codec::{DateCodec, DATE};
use crate::model::date_time_codec::{DateTimeCodec, DATETIME, DATETIMETZ};
use crate::model::error::WiringError;
use crate::model::lifecycle::{DatabaseTimezoneListener, Dispatcher, LifecycleEvent};
use crate::model::platform::SqlPlatform;
use crate::model::registry::{TimezoneContext, TimezoneRegistry};
use crate::model::type_registry::TypeRegistry;
use crate::util::system_timezone;

/// Everything a host needs to persist datetimes in the database timezone
///
/// Loading the bundle binds the datetime codec to the `datetime` and `datetimetz` types and makes
/// sure the configured database timezone is applied before every request and command.
#[derive(Debug)]
pub struct DatabaseTimezoneBundle {
    registry: Arc<TimezoneRegistry>,
    types: TypeRegistry,
    dispatcher: Dispatcher,
    database_timezone: Tz,
    platform: &'static SqlPlatform,
}

impl DatabaseTimezoneBundle {
    /// Wire the bundle using the host's system timezone as fallback
    pub fn load(config: &Config, types: TypeRegistry) -> Result<Self, WiringError> {
        DatabaseTimezoneBundle::load_with_ambient(config, types, system_timezone)
    }

    /// Wire the bundle into `types`, falling back to `ambient` wherever no timezone is configured
    pub fn load_with_ambient<F>(config: &Config, mut types: TypeRegistry, ambient: F) -> Result<Self, WiringError>
    where
        F: Fn() -> Tz + Send + Sync + 'static,
    {
        let database_timezone = config
            .database_timezone()
            .map(Into::into)
            .unwrap_or_else(&ambient);
        info!("database timezone is {}", database_timezone);

        // both names share one codec, like the `datetime` column type does for `datetimetz`
        for name in [DATETIME, DATETIMETZ] {
            if types.contains(name) {
                return Err(WiringError::AlreadyBound { name: name.into() });
            }
        }
        let datetime: Arc<dyn Codec> = Arc::new(DateTimeCodec);
        types.register(DATETIME, datetime.clone())?;
        types.register(DATETIMETZ, datetime)?;

        if config.register_date_type {
            types.register(DATE, Arc::new(DateCodec))?;
        }

        let listener = Arc::new(DatabaseTimezoneListener::new(database_timezone));
        let mut dispatcher = Dispatcher::new();
        dispatcher.subscribe(LifecycleEvent::Request, listener.clone());
        dispatcher.subscribe(LifecycleEvent::Command, listener);

        Ok(DatabaseTimezoneBundle {
            registry: Arc::new(TimezoneRegistry::with_ambient(ambient)),
            types,
            dispatcher,
            database_timezone,
            platform: config.platform.platform(),
        })
    }

    /// Start a unit of work and return the timezones to convert with until it ends
    pub fn begin(&self, event: LifecycleEvent) -> TimezoneContext {
        self.dispatcher.dispatch(event, &self.registry);
        self.registry.context()
    }

    pub fn registry(&self) -> &Arc<TimezoneRegistry> {
        &self.registry
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The resolved database timezone parameter
    pub fn database_timezone(&self) -> Tz {
        self.database_timezone
    }

    pub fn platform(&self) -> &'static SqlPlatform {
        self.platform
    }
}
