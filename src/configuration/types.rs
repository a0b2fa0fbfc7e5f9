pub mod config_time_zone;
pub mod platform_name;
