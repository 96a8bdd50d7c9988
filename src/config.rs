//! Loading service configuration (server settings + per-challenge rule overrides) from TOML.
//!
//! See `AppConfig` for the expected schema. Every section is optional.

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub server: ServerCfg,
  #[serde(default)]
  pub challenges: Vec<ChallengeCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerCfg {
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_max_body_bytes")]
  pub max_body_bytes: usize,
}

impl Default for ServerCfg {
  fn default() -> Self {
    Self { port: DEFAULT_PORT, max_body_bytes: DEFAULT_MAX_BODY_BYTES }
  }
}

fn default_port() -> u16 { DEFAULT_PORT }
fn default_max_body_bytes() -> usize { DEFAULT_MAX_BODY_BYTES }

/// Rule override for one challenge id (exact match).
/// Unset fields fall back to the built-in mapping.
#[derive(Clone, Debug, Deserialize)]
pub struct ChallengeCfg {
  pub id: String,
  #[serde(default)] pub min_test_cases: Option<usize>,
  #[serde(default)] pub required_test_types: Option<Vec<String>>,
}

impl AppConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str::<AppConfig>(s)
  }

  /// Port to bind: `PORT` env wins over the file.
  pub fn effective_port(&self) -> u16 {
    std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(self.server.port)
  }
}

/// Load `AppConfig` from QA_ARENA_CONFIG_PATH. Missing variable, IO or parse errors yield defaults.
pub fn load_app_config_from_env() -> AppConfig {
  let Ok(path) = std::env::var("QA_ARENA_CONFIG_PATH") else {
    info!(target: "qa_arena", "QA_ARENA_CONFIG_PATH not set; using defaults");
    return AppConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match AppConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "qa_arena", %path, overrides = cfg.challenges.len(), "Loaded config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "qa_arena", %path, error = %e, "Failed to parse TOML config; using defaults");
        AppConfig::default()
      }
    },
    Err(e) => {
      error!(target: "qa_arena", %path, error = %e, "Failed to read TOML config file; using defaults");
      AppConfig::default()
    }
  }
}
