//! Console error types

use bookdesk_rbac::{AccountError, EnforcementError};
use bookdesk_types::Module;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Role {0:?} has no access to the console")]
    UnknownRole(String),

    #[error("Unknown module: {0:?}")]
    UnknownModule(String),

    #[error("Access to \"{}\" denied", .module.name())]
    ModuleDenied { module: Module },

    /// A permission edit was refused; the message is user-facing.
    #[error(transparent)]
    Enforcement(#[from] EnforcementError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

/// Result type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
