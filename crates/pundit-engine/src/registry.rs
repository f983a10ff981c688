//! Ordered, immutable-update policy registry.
//!
//! `register` never mutates the receiver: it returns a new registry holding
//! the previous policies plus the new one at the end. Earlier registry values
//! keep resolving exactly as before.
//!
//! Registration order is significant: the first policy that claims an
//! instance or type wins. Two policies claiming the same type is not an
//! error; the later one is silently shadowed. Use [`Registry::claimants`]
//! (or `wiring::check_coverage`) to spot this at startup.

use std::fmt;
use std::sync::Arc;

use pundit_core::{PunditError, TypeDescriptor};

use crate::policy::erased::{Adapter, ErasedPolicy};
use crate::policy::{Context, Policy, PolicyError};

pub struct Registry<C, E = PunditError> {
    policies: Arc<[Arc<dyn ErasedPolicy<C, E>>]>,
}

impl<C, E> Clone for Registry<C, E> {
    fn clone(&self) -> Self {
        Self {
            policies: Arc::clone(&self.policies),
        }
    }
}

impl<C: Context, E: PolicyError> Default for Registry<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Context, E: PolicyError> Registry<C, E> {
    pub fn new() -> Self {
        Self {
            policies: Arc::from(Vec::new()),
        }
    }

    /// Returns a new registry with `policy` appended.
    pub fn register<P: Policy<C, E>>(&self, policy: P) -> Self {
        let mut policies: Vec<Arc<dyn ErasedPolicy<C, E>>> =
            Vec::with_capacity(self.policies.len() + 1);
        policies.extend(self.policies.iter().cloned());
        policies.push(Arc::new(Adapter(policy)));
        Self {
            policies: policies.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Policy names in registration order.
    pub fn policy_names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    /// Every policy that claims `ty`, in registration order. Index 0 wins.
    pub fn claimants(&self, ty: TypeDescriptor) -> Vec<&'static str> {
        self.policies
            .iter()
            .filter(|p| p.handles_model_type(ty))
            .map(|p| p.name())
            .collect()
    }

    pub fn handles(&self, ty: TypeDescriptor) -> bool {
        self.policies.iter().any(|p| p.handles_model_type(ty))
    }

    pub(crate) fn policies(&self) -> &[Arc<dyn ErasedPolicy<C, E>>] {
        &self.policies
    }
}

impl<C, E> fmt::Debug for Registry<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.policies.iter().map(|p| p.name()))
            .finish()
    }
}
