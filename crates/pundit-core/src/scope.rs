//! Filter outcomes and the `MatchNothing` sentinel.
//!
//! A policy's filter returns either a payload describing which rows the
//! context may see, or `MatchNothing`: the context may see zero rows. Callers
//! must branch on [`Scope::is_match_nothing`] before using a payload. A payload
//! that merely looks empty (`None`, an empty query) is still `Rows`.

/// Sentinel meaning "authorize zero rows of this entity type".
///
/// Zero-sized; every value is identical to [`MATCH_NOTHING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchNothing;

/// The process-wide sentinel value.
pub const MATCH_NOTHING: MatchNothing = MatchNothing;

/// Result of `filter` / `filter_for`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a MatchNothing scope must be checked before querying"]
pub enum Scope<F> {
    /// Opaque payload for the persistence layer.
    Rows(F),
    /// No rows are visible.
    MatchNothing,
}

impl<F> Scope<F> {
    pub fn is_match_nothing(&self) -> bool {
        matches!(self, Scope::MatchNothing)
    }

    pub fn rows(&self) -> Option<&F> {
        match self {
            Scope::Rows(f) => Some(f),
            Scope::MatchNothing => None,
        }
    }

    pub fn into_rows(self) -> Option<F> {
        match self {
            Scope::Rows(f) => Some(f),
            Scope::MatchNothing => None,
        }
    }

    /// Turn `MatchNothing` into the caller's own access-denied error.
    pub fn ok_or<E>(self, err: E) -> Result<F, E> {
        self.into_rows().ok_or(err)
    }

    pub fn ok_or_else<E>(self, err: impl FnOnce() -> E) -> Result<F, E> {
        self.into_rows().ok_or_else(err)
    }

    pub fn map<G>(self, f: impl FnOnce(F) -> G) -> Scope<G> {
        match self {
            Scope::Rows(v) => Scope::Rows(f(v)),
            Scope::MatchNothing => Scope::MatchNothing,
        }
    }
}

impl<F> From<MatchNothing> for Scope<F> {
    fn from(_: MatchNothing) -> Self {
        Scope::MatchNothing
    }
}

impl<F> PartialEq<MatchNothing> for Scope<F> {
    fn eq(&self, _: &MatchNothing) -> bool {
        self.is_match_nothing()
    }
}
