//! Configuration loading and management for the Settlement Engine.
//!
//! This module loads settlement policies from YAML files: policy metadata
//! plus effective-dated rate files, resolved into [`SettlementRules`] for a
//! given termination date.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    PolicyMetadata, RateConfig, SettlementConfig, SettlementRules, SeveranceFundRates,
    SocialSecurityBand, SocialSecurityConfig, TenureBasis,
};
