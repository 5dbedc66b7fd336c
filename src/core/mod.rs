pub mod aggregate;
pub mod config;
pub mod export;
pub mod geocode;
pub mod log;
pub mod record;
pub mod roster;
