pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub frontend: FrontendConfig,
    pub ui: UiConfig,
}

// Frontend pacing and reproducibility knobs. Gameplay tuning (speeds,
// cadence, catch band) is code constants in `game`, not configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Milliseconds between sim ticks; 16 gives the ~60 Hz target rate.
    pub tick_interval_ms: u64,
    /// Fixed PRNG seed for reproducible spawn sequences; random if unset.
    pub rng_seed: Option<u64>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub good_reaction_color: String,
    pub bad_reaction_color: String,
    pub show_controls: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            good_reaction_color: "green".to_string(),
            bad_reaction_color: "red".to_string(),
            show_controls: true,
        }
    }
}

impl Config {
    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        if let Ok(new_config) = loader::load_config_from_file() {
            let mut config = CONFIG.write().unwrap();
            *config = new_config;
            true
        } else {
            false
        }
    }
}
