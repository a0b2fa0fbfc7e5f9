use chrono_tz::Tz;
use log::{debug, info};
use std::fmt;
use std::sync::Arc;

use super::registry::TimezoneRegistry;

/// Points at which a unit of work starts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// An inbound request is about to be handled
    Request,
    /// A console command is about to run
    Command,
}

pub trait Listener: fmt::Debug + Send + Sync {
    fn on_event(&self, event: LifecycleEvent, registry: &TimezoneRegistry);
}

/// Applies the configured database timezone at the start of every unit of work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatabaseTimezoneListener {
    timezone: Tz,
}

impl DatabaseTimezoneListener {
    /// `timezone` is expected to have been validated by the configuration
    pub fn new(timezone: Tz) -> DatabaseTimezoneListener {
        DatabaseTimezoneListener { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn apply_configured_timezone(&self, registry: &TimezoneRegistry) {
        registry.set_database_timezone(self.timezone);
    }
}

impl Listener for DatabaseTimezoneListener {
    fn on_event(&self, event: LifecycleEvent, registry: &TimezoneRegistry) {
        debug!("{:?} started, applying database timezone {}", event, self.timezone);
        self.apply_configured_timezone(registry);
    }
}

/// Calls the listeners subscribed to an event, in subscription order
#[derive(Debug, Default, Clone)]
pub struct Dispatcher {
    listeners: Vec<(LifecycleEvent, Arc<dyn Listener>)>,
}

impl Dispatcher {
    pub fn new() -> Dispatcher {
        Dispatcher::default()
    }

    pub fn subscribe(&mut self, event: LifecycleEvent, listener: Arc<dyn Listener>) {
        info!("subscribing {:?} to {:?}", listener, event);
        self.listeners.push((event, listener));
    }

    pub fn dispatch(&self, event: LifecycleEvent, registry: &TimezoneRegistry) {
        self.listeners
            .iter()
            .filter(|(subscribed, _)| *subscribed == event)
            .for_each(|(_, listener)| listener.on_event(event, registry));
    }

    pub fn listener_count(&self, event: LifecycleEvent) -> usize {
        self.listeners.iter().filter(|(e, _)| *e == event).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Counter(AtomicUsize);

    impl Listener for Counter {
        fn on_event(&self, _event: LifecycleEvent, _registry: &TimezoneRegistry) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn listener_replaces_ambient_database_timezone() {
        let registry = TimezoneRegistry::with_ambient(|| Tz::Africa__Kampala);
        let listener = DatabaseTimezoneListener::new(Tz::Pacific__Tahiti);

        assert_eq!(registry.database_timezone(), Tz::Africa__Kampala);
        listener.apply_configured_timezone(&registry);
        assert_eq!(registry.database_timezone(), Tz::Pacific__Tahiti);
    }

    #[test]
    fn dispatch_only_reaches_subscribed_listeners() {
        let registry = TimezoneRegistry::with_ambient(|| Tz::UTC);
        let requests = Arc::new(Counter::default());
        let commands = Arc::new(Counter::default());

        let mut dispatcher = Dispatcher::new();
        dispatcher.subscribe(LifecycleEvent::Request, requests.clone());
        dispatcher.subscribe(LifecycleEvent::Command, commands.clone());

        dispatcher.dispatch(LifecycleEvent::Request, &registry);
        dispatcher.dispatch(LifecycleEvent::Request, &registry);
        dispatcher.dispatch(LifecycleEvent::Command, &registry);

        assert_eq!(requests.0.load(Ordering::SeqCst), 2);
        assert_eq!(commands.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_resets_database_timezone_per_unit_of_work() {
        let registry = TimezoneRegistry::with_ambient(|| Tz::UTC);
        let mut dispatcher = Dispatcher::new();
        dispatcher.subscribe(
            LifecycleEvent::Command,
            Arc::new(DatabaseTimezoneListener::new(Tz::Europe__Berlin)),
        );

        // something changed the timezone during the previous command
        registry.set_database_timezone(Tz::Asia__Tokyo);
        dispatcher.dispatch(LifecycleEvent::Command, &registry);

        assert_eq!(registry.database_timezone(), Tz::Europe__Berlin);
    }
}
