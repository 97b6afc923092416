//! Configuration loading and discovery

pub mod loader;
pub mod stub;

pub use loader::{load_config, parse_config};
pub use stub::stub_config;
