//! Application wiring for the blog demo.
//!
//! Seeds the store from config, registers the blog policies, and checks the
//! registry against the entity types the config says must be covered.
//! Returns Result so the binary can fail without panicking.

use std::sync::Arc;

use pundit_core::error::{PunditError, Result};
use pundit_core::TypeDescriptor;

use crate::blog::{self, BlogStore, PolicyContext, Post, PostPolicy, User, UserPolicy};
use crate::config::{PunditConfig, RegistrySection};
use crate::policy::{Context, PolicyError};
use crate::registry::Registry;

/// Outcome of [`check_coverage`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Required types no policy claims.
    pub missing: Vec<TypeDescriptor>,
    /// Types claimed by more than one policy, with claimants in order.
    pub shadowed: Vec<(TypeDescriptor, Vec<&'static str>)>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Map config type tags onto the application's entity catalog.
pub fn required_types(
    section: &RegistrySection,
    catalog: &[TypeDescriptor],
) -> Result<Vec<TypeDescriptor>> {
    section
        .required_types
        .iter()
        .map(|tag| {
            catalog
                .iter()
                .copied()
                .find(|t| t.as_str() == tag)
                .ok_or_else(|| {
                    PunditError::Config(format!(
                        "registry.required_types: unknown entity type {tag}"
                    ))
                })
        })
        .collect()
}

/// Verify every required type resolves. Shadowing is reported, never fatal.
/// Missing coverage fails only when `fail_fast` is set.
pub fn check_coverage<C: Context, E: PolicyError>(
    registry: &Registry<C, E>,
    required: &[TypeDescriptor],
    fail_fast: bool,
) -> Result<Coverage> {
    let mut coverage = Coverage::default();

    for &ty in required {
        let claimants = registry.claimants(ty);
        match claimants.len() {
            0 => {
                tracing::warn!(model = %ty, "no policy registered for required type");
                coverage.missing.push(ty);
            }
            1 => {}
            _ => {
                tracing::warn!(
                    model = %ty,
                    winner = claimants[0],
                    shadowed = ?&claimants[1..],
                    "several policies claim this type; the first registered wins"
                );
                coverage.shadowed.push((ty, claimants));
            }
        }
    }

    if fail_fast && !coverage.is_complete() {
        return Err(PunditError::MissingPolicies(coverage.missing));
    }
    Ok(coverage)
}

/// Wired blog application: store, registry, config.
#[derive(Clone)]
pub struct Wiring {
    cfg: Arc<PunditConfig>,
    store: Arc<BlogStore>,
    registry: Registry<PolicyContext>,
}

impl Wiring {
    pub fn new(cfg: PunditConfig) -> Result<Self> {
        Self::with_registry(cfg, blog_registry())
    }

    /// Wire with a caller-built registry (tests use this to drop policies).
    pub fn with_registry(cfg: PunditConfig, registry: Registry<PolicyContext>) -> Result<Self> {
        // 1) Seed the store
        let store = Arc::new(BlogStore::new());
        for u in &cfg.seed.users {
            store.insert_user(User::new(u.id, u.name.clone(), u.admin));
        }
        for p in &cfg.seed.posts {
            let mut post = Post::new(p.id, p.author_id, p.title.clone());
            post.published = p.published;
            store.insert_post(post);
        }

        // 2) Registry sanity check
        let required = required_types(&cfg.registry, &blog::catalog())?;
        check_coverage(&registry, &required, cfg.registry.fail_fast)?;

        tracing::info!(
            policies = ?registry.policy_names(),
            users = cfg.seed.users.len(),
            posts = cfg.seed.posts.len(),
            "registry wired"
        );

        Ok(Self {
            cfg: Arc::new(cfg),
            store,
            registry,
        })
    }

    pub fn cfg(&self) -> &PunditConfig {
        &self.cfg
    }

    pub fn store(&self) -> Arc<BlogStore> {
        Arc::clone(&self.store)
    }

    pub fn registry(&self) -> &Registry<PolicyContext> {
        &self.registry
    }

    /// Context for a seeded user, or anonymous for `None`.
    pub fn context_for(&self, user_id: Option<u64>) -> Result<PolicyContext> {
        let actor = match user_id {
            None => None,
            Some(id) => Some(
                self.store
                    .user(id)
                    .ok_or_else(|| PunditError::Config(format!("unknown user: {id}")))?,
            ),
        };
        Ok(PolicyContext::new(self.store(), actor))
    }
}

/// The blog's policies, in registration order.
pub fn blog_registry() -> Registry<PolicyContext> {
    Registry::<PolicyContext>::new()
        .register(UserPolicy)
        .register(PostPolicy)
}
