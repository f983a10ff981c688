//! pundit demo
//!
//! Loads the wiring config, seeds the blog store, wires the registry, and
//! walks through a few authorization checks and filters.
//! Usage: `pundit-demo [config.yaml]` (default `pundit.yaml`).

use tracing_subscriber::{fmt, EnvFilter};

use pundit_core::error::Result;
use pundit_core::Entity;
use pundit_engine::blog::{Post, PostAction, PostQuery};
use pundit_engine::{config, wiring::Wiring};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "pundit.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let wiring = Wiring::new(cfg)?;
    let store = wiring.store();

    let users: Vec<Option<u64>> = std::iter::once(None)
        .chain(wiring.cfg().seed.users.iter().map(|u| Some(u.id)))
        .collect();
    let posts = store.find_posts(&PostQuery::all()).await;

    for user_id in &users {
        let ctx = wiring.context_for(*user_id)?;
        let actor = ctx
            .actor
            .as_ref()
            .map_or_else(|| "anonymous".to_string(), |a| a.to_string());

        for post in &posts {
            let allowed = wiring
                .registry()
                .authorize(&ctx, post, PostAction::Update)
                .await?;
            tracing::info!(
                %actor,
                %post,
                action = "update",
                allowed,
                "authorization check"
            );
        }

        match wiring.registry().filter::<PostQuery>(&ctx, Post::TYPE).await? {
            pundit_core::Scope::MatchNothing => {
                tracing::info!(%actor, "post filter: match nothing");
            }
            pundit_core::Scope::Rows(q) => {
                let visible = store.find_posts(&q).await;
                match serde_json::to_string(&q) {
                    Ok(payload) => {
                        tracing::info!(
                            %actor,
                            filter = %payload,
                            visible = visible.len(),
                            "post filter"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            %actor,
                            error = %e,
                            visible = visible.len(),
                            "post filter not printable"
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
