//! Store datetime values in a configured database timezone and read them back in the
//! application timezone.
//!
//! Load a [`Config`](configuration::config::Config), wire a
//! [`DatabaseTimezoneBundle`](bundle::DatabaseTimezoneBundle) into the ORM's
//! [`TypeRegistry`](model::type_registry::TypeRegistry), and call
//! [`begin`](bundle::DatabaseTimezoneBundle::begin) at the start of every request or command.
//! The returned [`TimezoneContext`](model::registry::TimezoneContext) is what the codecs convert with.

pub mod bundle;
pub mod configuration;
pub mod model;
pub mod util;
