//! Wiring config loader (strict parsing).

pub mod schema;

use std::fs;

use pundit_core::error::{PunditError, Result};

pub use schema::{PostSeed, PunditConfig, RegistrySection, SeedSection, UserSeed};

pub fn load_from_file(path: &str) -> Result<PunditConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PunditError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PunditConfig> {
    let cfg: PunditConfig = serde_yaml::from_str(s)
        .map_err(|e| PunditError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
