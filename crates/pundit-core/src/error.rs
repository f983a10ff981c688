//! Shared error type across pundit crates.

use thiserror::Error;

use crate::model::TypeDescriptor;

/// Stable error codes, suitable for logs and for mapping onto HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No registered policy claims the model.
    PolicyNotFound,
    /// The resolved policy does not take this action type.
    ActionNotHandled,
    /// The policy did not supply the requested operation.
    NotImplemented,
    /// Instance matching and type matching disagree.
    ModelMismatch,
    /// Caller asked for a payload type the policy does not produce.
    PayloadMismatch,
    /// Failure raised by a policy body.
    Policy,
    /// Invalid wiring configuration.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Required entity types left without a policy.
    MissingPolicies,
}

impl ErrorCode {
    /// String representation used in logs and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::PolicyNotFound => "POLICY_NOT_FOUND",
            ErrorCode::ActionNotHandled => "ACTION_NOT_HANDLED",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
            ErrorCode::ModelMismatch => "MODEL_MISMATCH",
            ErrorCode::PayloadMismatch => "PAYLOAD_MISMATCH",
            ErrorCode::Policy => "POLICY",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::MissingPolicies => "MISSING_POLICIES",
        }
    }
}

/// Shared result type.
pub type Result<T, E = PunditError> = std::result::Result<T, E>;

/// Unified error type used by core and engine.
///
/// Policies that need richer failures can use their own error type instead;
/// the engine only requires `From<PunditError>` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PunditError {
    #[error("no policy found for model {model}")]
    PolicyNotFound { model: TypeDescriptor },
    #[error("policy {policy} does not handle action of type {action}")]
    ActionNotHandled {
        policy: &'static str,
        action: &'static str,
    },
    #[error("{policy}::{operation} is not implemented")]
    NotImplemented {
        policy: &'static str,
        operation: &'static str,
    },
    #[error("policy {policy} claimed a {model} instance it cannot read")]
    ModelMismatch {
        policy: &'static str,
        model: TypeDescriptor,
    },
    #[error("policy {policy} does not produce filter payloads of type {expected}")]
    PayloadMismatch {
        policy: &'static str,
        expected: &'static str,
    },
    #[error("policy failure: {0}")]
    Policy(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("no policy registered for: {}", join_tags(.0))]
    MissingPolicies(Vec<TypeDescriptor>),
}

impl PunditError {
    /// Map an error onto its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PunditError::PolicyNotFound { .. } => ErrorCode::PolicyNotFound,
            PunditError::ActionNotHandled { .. } => ErrorCode::ActionNotHandled,
            PunditError::NotImplemented { .. } => ErrorCode::NotImplemented,
            PunditError::ModelMismatch { .. } => ErrorCode::ModelMismatch,
            PunditError::PayloadMismatch { .. } => ErrorCode::PayloadMismatch,
            PunditError::Policy(_) => ErrorCode::Policy,
            PunditError::Config(_) => ErrorCode::Config,
            PunditError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            PunditError::MissingPolicies(_) => ErrorCode::MissingPolicies,
        }
    }
}

fn join_tags(tags: &[TypeDescriptor]) -> String {
    tags.iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
