use std::collections::HashSet;

use serde::Deserialize;

use pundit_core::error::{PunditError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PunditConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub seed: SeedSection,
}

impl PunditConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PunditError::UnsupportedVersion);
        }
        self.registry.validate()?;
        self.seed.validate()?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Entity type tags that must resolve to a policy.
    #[serde(default)]
    pub required_types: Vec<String>,

    /// Missing coverage fails wiring instead of logging a warning.
    #[serde(default)]
    pub fail_fast: bool,
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for t in &self.required_types {
            if t.trim().is_empty() {
                return Err(PunditError::Config(
                    "registry.required_types entries must not be empty".into(),
                ));
            }
            if !seen.insert(t.as_str()) {
                return Err(PunditError::Config(format!(
                    "registry.required_types lists {t} twice"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedSection {
    #[serde(default)]
    pub users: Vec<UserSeed>,

    #[serde(default)]
    pub posts: Vec<PostSeed>,
}

impl SeedSection {
    pub fn validate(&self) -> Result<()> {
        let mut user_ids = HashSet::new();
        for u in &self.users {
            if !user_ids.insert(u.id) {
                return Err(PunditError::Config(format!("seed.users: duplicate id {}", u.id)));
            }
        }

        let mut post_ids = HashSet::new();
        for p in &self.posts {
            if !post_ids.insert(p.id) {
                return Err(PunditError::Config(format!("seed.posts: duplicate id {}", p.id)));
            }
            if !user_ids.contains(&p.author_id) {
                return Err(PunditError::Config(format!(
                    "seed.posts: post {} refers to unknown author {}",
                    p.id, p.author_id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostSeed {
    pub id: u64,
    pub author_id: u64,
    pub title: String,
    #[serde(default)]
    pub published: bool,
}
