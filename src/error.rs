//! Error types for form validation, data-source access and the board controller.

use thiserror::Error;

/// Reasons a create/edit form cannot be turned into a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// Supply sector selected without a concrete supply type.
    #[error("select a supply type (solar, wind, battery or grid_connection)")]
    MissingSupplyType,

    /// Capacity text is not a finite, non-negative number.
    #[error("capacity \"{0}\" is not a non-negative number")]
    InvalidCapacity(String),

    /// Type string outside the known set. Non-fatal when listing assets.
    #[error("unknown asset type \"{0}\"")]
    UnknownAssetType(String),
}

/// Failure talking to the asset backend.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection, timeout or body decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend rejected the bearer token (HTTP 401).
    #[error("not authorized; sign in again")]
    Unauthorized,

    /// Asset id does not exist (HTTP 404).
    #[error("asset {0} not found")]
    NotFound(String),

    /// Any other non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Failure inside a non-HTTP source.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Operation that triggered a [`BoardError::Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Error surfaced to the shell by [`crate::board::AssetBoard`].
///
/// Every variant is user-visible and retryable by re-invoking the action.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} failed: {source}", .op.as_str())]
    Network {
        op: Operation,
        #[source]
        source: NetworkError,
    },

    /// The dialog is not in a state that allows the requested action.
    #[error("no asset dialog is open")]
    DialogClosed,
}

impl BoardError {
    pub fn network(op: Operation, source: NetworkError) -> Self {
        Self::Network { op, source }
    }
}
