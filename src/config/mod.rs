//! Configuration loading and management for the schedule engine.
//!
//! This module loads the shared pricing constants and listing fixtures from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use schedule_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load_or_default("./config").unwrap();
//! println!("Site markup: {}", config.pricing().overall_site_markup);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::PriceConfig;
