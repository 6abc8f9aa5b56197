//! Electric vehicle profiles kept in a TOML or JSON file

pub mod backup;
pub mod codec;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod store;
pub mod validation;
pub mod vehicle_status;
