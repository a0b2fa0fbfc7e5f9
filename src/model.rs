pub mod codec;
pub mod date_codec;
pub mod date_time_codec;
pub mod error;
pub mod lifecycle;
pub mod platform;
pub mod registry;
pub mod type_registry;
pub mod value;
