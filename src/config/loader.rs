//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the shared
//! pricing configuration and listing fixtures from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::ListingConfig;

use super::types::PriceConfig;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── pricing.yaml          # Shared markup/discount constants
/// └── listings/
///     └── listing_001.yaml  # One listing per file (optional directory)
/// ```
///
/// # Example
///
/// ```no_run
/// use schedule_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Site markup: {}", loader.pricing().overall_site_markup);
///
/// let listing = loader.get_listing("listing_nightly").unwrap();
/// println!("Rental type: {}", listing.rental_type);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    pricing: PriceConfig,
    listings: HashMap<String, ListingConfig>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `pricing.yaml` is missing or malformed, if any
    /// listing file is malformed, or if a listing fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let pricing = Self::load_yaml::<PriceConfig>(&path.join("pricing.yaml"))?;
        let listings = Self::load_listings(&path.join("listings"))?;

        debug!(
            path = %path.display(),
            listings = listings.len(),
            "Loaded engine configuration"
        );

        Ok(Self { pricing, listings })
    }

    /// Loads configuration, using the default pricing constants when
    /// `pricing.yaml` is not present.
    ///
    /// Malformed files are still reported as errors.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        match Self::load(path.as_ref()) {
            Err(EngineError::ConfigNotFound { path: missing }) if missing.ends_with("pricing.yaml") => {
                warn!(path = %missing, "Pricing configuration unavailable, using defaults");
                let listings = Self::load_listings(&path.as_ref().join("listings"))?;
                Ok(Self {
                    pricing: PriceConfig::default(),
                    listings,
                })
            }
            other => other,
        }
    }

    /// Creates a loader from already-built parts.
    pub fn from_parts(pricing: PriceConfig, listings: Vec<ListingConfig>) -> Self {
        Self {
            pricing,
            listings: listings.into_iter().map(|l| (l.id.clone(), l)).collect(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all listing files from the listings directory, if it exists.
    fn load_listings(listings_dir: &Path) -> EngineResult<HashMap<String, ListingConfig>> {
        let mut listings = HashMap::new();

        if !listings_dir.exists() {
            return Ok(listings);
        }

        let dir_str = listings_dir.display().to_string();
        let entries = fs::read_dir(listings_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let listing = Self::load_yaml::<ListingConfig>(&path)?;
                listing.validate()?;
                listings.insert(listing.id.clone(), listing);
            }
        }

        Ok(listings)
    }

    /// Returns the shared pricing configuration.
    pub fn pricing(&self) -> &PriceConfig {
        &self.pricing
    }

    /// Returns all loaded listings.
    pub fn listings(&self) -> &HashMap<String, ListingConfig> {
        &self.listings
    }

    /// Gets a listing by its id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ListingNotFound`] if no listing has this id.
    pub fn get_listing(&self, listing_id: &str) -> EngineResult<&ListingConfig> {
        self.listings
            .get(listing_id)
            .ok_or_else(|| EngineError::ListingNotFound {
                listing_id: listing_id.to_string(),
            })
    }
}
