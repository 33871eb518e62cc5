//! Configuration module for the jersey studio

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;

use crate::cart::{default_tiers, ShippingPolicy, ShippingTier, BASE_SHIPPING_CENTS};
use crate::domain::{GarmentSize, DEFAULT_DESIGN_ID};

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub shipping: ShippingSettings,
    pub catalog: CatalogSettings,
    pub preview: PreviewSettings,
}

/// Log output
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// JSON lines instead of human-readable output
    pub json: bool,
}

/// Shipping charge and bulk discount tiers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShippingSettings {
    pub base_cents: u32,
    pub tiers: Vec<ShippingTier>,
}

/// Design catalog source
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Extra design entries merged over the built-in catalog
    pub designs_path: Option<PathBuf>,
    pub default_design: String,
}

/// Preview defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub default_size: GarmentSize,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with JERSEY_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // JERSEY_SHIPPING__BASE_CENTS, JERSEY_LOGGING__JSON, etc.
            .add_source(
                Environment::with_prefix("JERSEY")
                    .separator("__")
                    .try_parsing(true)
            );

        builder.build()?.try_deserialize()
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.shipping.base_cents, self.shipping.tiers.clone())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            logging: LoggingSettings::default(),
            shipping: ShippingSettings::default(),
            catalog: CatalogSettings::default(),
            preview: PreviewSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: "jersey_studio=info".to_string(),
            json: false,
        }
    }
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            base_cents: BASE_SHIPPING_CENTS,
            tiers: default_tiers(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            designs_path: None,
            default_design: DEFAULT_DESIGN_ID.to_string(),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        PreviewSettings {
            default_size: GarmentSize::M,
        }
    }
}
