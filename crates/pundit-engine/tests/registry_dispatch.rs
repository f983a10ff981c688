//! Registry, resolver, and dispatcher behavior with purpose-built policies.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;

use pundit_core::{Entity, Model, PunditError, Scope, TypeDescriptor, MATCH_NOTHING};
use pundit_engine::{resolve_by_instance, resolve_by_type, Policy, Registry};

struct Ctx {
    actor: Option<u64>,
}

struct Alpha {
    owner: u64,
}
impl Entity for Alpha {
    const TYPE: TypeDescriptor = TypeDescriptor::new("alpha");
}

struct Beta;
impl Entity for Beta {
    const TYPE: TypeDescriptor = TypeDescriptor::new("beta");
}

struct Gamma;
impl Entity for Gamma {
    const TYPE: TypeDescriptor = TypeDescriptor::new("gamma");
}

#[derive(Debug)]
enum AlphaAction {
    Read,
    Write,
}

#[derive(Debug)]
enum BetaAction {
    Poke,
}

/// Owner-only policy for Alpha that counts how often its bodies run.
#[derive(Default, Clone)]
struct AlphaPolicy {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Policy<Ctx> for AlphaPolicy {
    type Model = Alpha;
    type Action = AlphaAction;
    type Filter = Option<u64>;
    type FilterFor = Option<u64>;

    async fn authorize(
        &self,
        ctx: &Ctx,
        object: &Alpha,
        action: AlphaAction,
    ) -> Result<bool, PunditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match action {
            AlphaAction::Read => Ok(true),
            AlphaAction::Write => Ok(ctx.actor == Some(object.owner)),
        }
    }

    async fn filter(&self, ctx: &Ctx) -> Result<Scope<Option<u64>>, PunditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match ctx.actor {
            None => Ok(MATCH_NOTHING.into()),
            // `None` here means "no restriction", which must not read as MatchNothing.
            Some(0) => Ok(Scope::Rows(None)),
            Some(id) => Ok(Scope::Rows(Some(id))),
        }
    }
}

/// Claims Alpha too, always denies. Registered second it is shadowed.
struct DenyAlpha;

#[async_trait]
impl Policy<Ctx> for DenyAlpha {
    type Model = Alpha;
    type Action = AlphaAction;
    type Filter = Option<u64>;
    type FilterFor = Option<u64>;

    async fn authorize(&self, _: &Ctx, _: &Alpha, _: AlphaAction) -> Result<bool, PunditError> {
        Ok(false)
    }

    async fn filter(&self, _: &Ctx) -> Result<Scope<Option<u64>>, PunditError> {
        Ok(MATCH_NOTHING.into())
    }
}

#[derive(Default, Clone)]
struct BetaPolicy {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Policy<Ctx> for BetaPolicy {
    type Model = Beta;
    type Action = BetaAction;
    type Filter = String;
    type FilterFor = String;

    async fn authorize(&self, _: &Ctx, _: &Beta, action: BetaAction) -> Result<bool, PunditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match action {
            BetaAction::Poke => Ok(true),
        }
    }

    async fn filter(&self, _: &Ctx) -> Result<Scope<String>, PunditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Scope::Rows(String::new()))
    }

    async fn filter_for(&self, _: &Ctx, action: BetaAction) -> Result<Scope<String>, PunditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Scope::Rows(format!("beta filter for {action:?}")))
    }
}

/// Claims every instance, but can only read Alpha.
struct GreedyAlpha;

#[async_trait]
impl Policy<Ctx> for GreedyAlpha {
    type Model = Alpha;
    type Action = AlphaAction;
    type Filter = ();
    type FilterFor = ();

    async fn authorize(&self, _: &Ctx, _: &Alpha, _: AlphaAction) -> Result<bool, PunditError> {
        Ok(true)
    }

    async fn filter(&self, _: &Ctx) -> Result<Scope<()>, PunditError> {
        Ok(Scope::Rows(()))
    }

    fn handles_model(&self, _: &dyn Model) -> bool {
        true
    }
}

fn ctx(actor: Option<u64>) -> Ctx {
    Ctx { actor }
}

#[tokio::test]
async fn first_registered_policy_wins() {
    let registry = Registry::<Ctx>::new()
        .register(AlphaPolicy::default())
        .register(DenyAlpha);

    for _ in 0..3 {
        let allowed = registry
            .authorize(&ctx(None), &Alpha { owner: 1 }, AlphaAction::Read)
            .await
            .unwrap();
        assert!(allowed);
    }

    let resolved = resolve_by_instance(&registry, &Alpha { owner: 1 }).unwrap();
    assert_eq!(resolved.index(), 0);
    assert_eq!(resolved.name(), "AlphaPolicy");
    assert_eq!(
        registry.claimants(Alpha::TYPE),
        vec!["AlphaPolicy", "DenyAlpha"]
    );

    let flipped = Registry::<Ctx>::new()
        .register(DenyAlpha)
        .register(AlphaPolicy::default());
    let allowed = flipped
        .authorize(&ctx(None), &Alpha { owner: 1 }, AlphaAction::Read)
        .await
        .unwrap();
    assert!(!allowed);
    assert_eq!(resolve_by_type(&flipped, Alpha::TYPE).unwrap().name(), "DenyAlpha");
}

#[tokio::test]
async fn register_leaves_earlier_registries_untouched() {
    let empty = Registry::<Ctx>::new();
    let with_alpha = empty.register(AlphaPolicy::default());
    let with_both = with_alpha.register(BetaPolicy::default());

    assert!(empty.is_empty());
    assert_eq!(with_alpha.len(), 1);
    assert_eq!(with_both.policy_names(), vec!["AlphaPolicy", "BetaPolicy"]);

    let err = with_alpha
        .authorize(&ctx(None), &Beta, BetaAction::Poke)
        .await
        .unwrap_err();
    assert_eq!(err, PunditError::PolicyNotFound { model: Beta::TYPE });
    assert!(with_both
        .authorize(&ctx(None), &Beta, BetaAction::Poke)
        .await
        .unwrap());

    // shadowing in a derived registry does not leak back
    let shadowed = with_alpha.register(DenyAlpha);
    assert_eq!(shadowed.claimants(Alpha::TYPE).len(), 2);
    assert_eq!(with_alpha.claimants(Alpha::TYPE), vec!["AlphaPolicy"]);
}

#[tokio::test]
async fn unknown_model_fails_without_invoking_policies() {
    let alpha = AlphaPolicy::default();
    let beta = BetaPolicy::default();
    let registry = Registry::<Ctx>::new()
        .register(alpha.clone())
        .register(beta.clone());

    let not_found = PunditError::PolicyNotFound { model: Gamma::TYPE };

    let err = registry
        .authorize(&ctx(Some(1)), &Gamma, AlphaAction::Read)
        .await
        .unwrap_err();
    assert_eq!(err, not_found);
    assert_eq!(err.to_string(), "no policy found for model gamma");

    let err = registry
        .filter::<Option<u64>>(&ctx(Some(1)), Gamma::TYPE)
        .await
        .unwrap_err();
    assert_eq!(err, not_found);

    let err = registry
        .filter_for::<String, _>(&ctx(Some(1)), Gamma::TYPE, BetaAction::Poke)
        .await
        .unwrap_err();
    assert_eq!(err, not_found);

    assert!(!registry.handles(Gamma::TYPE));
    assert_eq!(alpha.calls.load(Ordering::SeqCst), 0);
    assert_eq!(beta.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn foreign_action_type_is_not_handled() {
    let alpha = AlphaPolicy::default();
    let registry = Registry::<Ctx>::new().register(alpha.clone());

    let err = registry
        .authorize(&ctx(Some(1)), &Alpha { owner: 1 }, BetaAction::Poke)
        .await
        .unwrap_err();
    assert_eq!(err.code().as_str(), "ACTION_NOT_HANDLED");
    match err {
        PunditError::ActionNotHandled { policy, action } => {
            assert_eq!(policy, "AlphaPolicy");
            assert!(action.ends_with("BetaAction"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(alpha.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn authorize_returns_the_policy_decision() {
    let registry = Registry::<Ctx>::new().register(AlphaPolicy::default());
    let object = Alpha { owner: 1 };

    for (actor, expected) in [(Some(1), true), (Some(2), false), (None, false)] {
        let allowed = registry
            .authorize(&ctx(actor), &object, AlphaAction::Write)
            .await
            .unwrap();
        assert_eq!(allowed, expected, "actor {actor:?}");
    }
}

#[tokio::test]
async fn filter_for_without_override_is_not_implemented() {
    let alpha = AlphaPolicy::default();
    let registry = Registry::<Ctx>::new().register(alpha.clone());

    for (actor, action) in [
        (None, AlphaAction::Read),
        (Some(1), AlphaAction::Write),
        (Some(0), AlphaAction::Read),
    ] {
        let err = registry
            .filter_for::<Option<u64>, _>(&ctx(actor), Alpha::TYPE, action)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PunditError::NotImplemented {
                policy: "AlphaPolicy",
                operation: "filter_for",
            }
        );
    }
    // the default body does not fall back to filter
    assert_eq!(alpha.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn filter_distinguishes_match_nothing_from_empty_payloads() {
    let registry = Registry::<Ctx>::new()
        .register(AlphaPolicy::default())
        .register(BetaPolicy::default());

    let anonymous = registry
        .filter::<Option<u64>>(&ctx(None), Alpha::TYPE)
        .await
        .unwrap();
    assert_eq!(anonymous, MATCH_NOTHING);

    let unrestricted = registry
        .filter::<Option<u64>>(&ctx(Some(0)), Alpha::TYPE)
        .await
        .unwrap();
    assert_eq!(unrestricted, Scope::Rows(None));
    assert_ne!(unrestricted, MATCH_NOTHING);

    let own = registry
        .filter::<Option<u64>>(&ctx(Some(7)), Alpha::TYPE)
        .await
        .unwrap();
    assert_eq!(own.into_rows(), Some(Some(7)));

    let empty = registry
        .filter::<String>(&ctx(None), Beta::TYPE)
        .await
        .unwrap();
    assert_eq!(empty, Scope::Rows(String::new()));
    assert!(!empty.is_match_nothing());
}

#[tokio::test]
async fn filter_for_routes_the_action() {
    let registry = Registry::<Ctx>::new()
        .register(AlphaPolicy::default())
        .register(BetaPolicy::default());

    let scope = registry
        .filter_for::<String, _>(&ctx(None), Beta::TYPE, BetaAction::Poke)
        .await
        .unwrap();
    assert_eq!(scope.into_rows().as_deref(), Some("beta filter for Poke"));

    let err = registry
        .filter_for::<String, _>(&ctx(None), Beta::TYPE, AlphaAction::Read)
        .await
        .unwrap_err();
    assert_eq!(err.code().as_str(), "ACTION_NOT_HANDLED");
}

#[tokio::test]
async fn wrong_payload_type_is_rejected_before_the_policy_runs() {
    let beta = BetaPolicy::default();
    let registry = Registry::<Ctx>::new().register(beta.clone());

    let err = registry
        .filter::<Vec<u8>>(&ctx(None), Beta::TYPE)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PunditError::PayloadMismatch {
            policy: "BetaPolicy",
            expected: std::any::type_name::<Vec<u8>>(),
        }
    );
    assert_eq!(beta.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn instance_claimed_by_the_wrong_policy_is_a_model_mismatch() {
    let registry = Registry::<Ctx>::new()
        .register(GreedyAlpha)
        .register(BetaPolicy::default());

    let err = registry
        .authorize(&ctx(None), &Beta, AlphaAction::Read)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PunditError::ModelMismatch {
            policy: "GreedyAlpha",
            model: Beta::TYPE,
        }
    );

    // type-level matching still uses the tag, so Beta filters resolve normally
    let scope = registry
        .filter::<String>(&ctx(None), Beta::TYPE)
        .await
        .unwrap();
    assert!(!scope.is_match_nothing());
}

#[tokio::test]
async fn shared_registry_serves_concurrent_calls() {
    let alpha = AlphaPolicy::default();
    let registry = Registry::<Ctx>::new().register(alpha.clone());
    let object = Alpha { owner: 3 };

    let contexts: Vec<Ctx> = (0..16).map(|i| ctx(Some(i))).collect();
    let decisions = join_all(
        contexts
            .iter()
            .map(|c| registry.authorize(c, &object, AlphaAction::Write)),
    )
    .await;

    let allowed: Vec<bool> = decisions.into_iter().map(|d| d.unwrap()).collect();
    assert_eq!(allowed.iter().filter(|a| **a).count(), 1);
    assert!(allowed[3]);
    assert_eq!(alpha.calls.load(Ordering::SeqCst), 16);
}

// Policies with their own error type get their failures back untouched.

#[derive(Debug, PartialEq)]
enum AppError {
    Engine(PunditError),
    Db(&'static str),
}

impl From<PunditError> for AppError {
    fn from(e: PunditError) -> Self {
        AppError::Engine(e)
    }
}

struct FlakyAlpha;

#[async_trait]
impl Policy<Ctx, AppError> for FlakyAlpha {
    type Model = Alpha;
    type Action = AlphaAction;
    type Filter = ();
    type FilterFor = ();

    async fn authorize(&self, _: &Ctx, _: &Alpha, _: AlphaAction) -> Result<bool, AppError> {
        Err(AppError::Db("connection reset"))
    }

    async fn filter(&self, _: &Ctx) -> Result<Scope<()>, AppError> {
        Err(AppError::Db("timeout"))
    }
}

#[tokio::test]
async fn policy_failures_propagate_unchanged() {
    let registry = Registry::<Ctx, AppError>::new().register(FlakyAlpha);

    let err = registry
        .authorize(&ctx(None), &Alpha { owner: 1 }, AlphaAction::Read)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Db("connection reset"));

    let err = registry
        .filter::<()>(&ctx(None), Alpha::TYPE)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Db("timeout"));

    let err = registry
        .filter::<()>(&ctx(None), Beta::TYPE)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::Engine(PunditError::PolicyNotFound { model: Beta::TYPE })
    );

    let err = registry
        .filter_for::<(), _>(&ctx(None), Alpha::TYPE, AlphaAction::Read)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Engine(PunditError::NotImplemented { .. })
    ));
}
