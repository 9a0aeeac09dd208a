//! Permission checks and permission edits.
//!
//! Editing goes through [`AccessEvaluator`], which refuses any revocation
//! that would leave a critical module without a holder.

use bookdesk_types::{Module, Role};
use thiserror::Error;
use tracing::{info, warn};

use crate::matrix::PermissionMatrix;

/// A refused permission edit.
///
/// This is an expected, user-facing outcome: the matrix is left unchanged
/// and the message is meant to be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnforcementError {
    /// The acting user's own role is the last holder of a critical module.
    #[error(
        "You cannot revoke access to \"{}\" because you are the only user with this permission. The system would be left without administration.",
        .module.name()
    )]
    SelfLockout { role: Role, module: Module },

    /// Another role is the last holder of a critical module.
    #[error(
        "Cannot revoke \"{}\" from {}: at least one role must keep access to this critical module.",
        .module.name(),
        .role.display_name()
    )]
    SystemLockout { role: Role, module: Module },
}

impl EnforcementError {
    pub fn role(&self) -> Role {
        match self {
            Self::SelfLockout { role, .. } | Self::SystemLockout { role, .. } => *role,
        }
    }

    pub fn module(&self) -> Module {
        match self {
            Self::SelfLockout { module, .. } | Self::SystemLockout { module, .. } => *module,
        }
    }

    pub fn is_self_lockout(&self) -> bool {
        matches!(self, Self::SelfLockout { .. })
    }
}

/// Result type for enforcement operations.
pub type Result<T> = std::result::Result<T, EnforcementError>;

/// The single membership change applied by a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Granted,
    Revoked,
}

/// Returns whether `role` may reach `module`.
///
/// A missing role (the user has no staff role) never has access.
pub fn has_permission(role: Option<Role>, module: Module, matrix: &PermissionMatrix) -> bool {
    role.is_some_and(|r| matrix.allows(r, module))
}

/// Checks whether `module` may be revoked from `role` without knowing who is
/// acting. Equivalent to an evaluator with no acting role.
pub fn can_revoke(matrix: &PermissionMatrix, role: Role, module: Module) -> Result<()> {
    AccessEvaluator::new(None)
        .without_audit()
        .can_revoke(matrix, role, module)
}

/// Permission evaluator for one acting user.
///
/// Evaluation is synchronous and side-effect free apart from audit events;
/// the only mutation happens in [`toggle_permission`](Self::toggle_permission)
/// on the matrix the caller owns.
pub struct AccessEvaluator {
    /// Role of the user making edits, used to tell self-lockout apart.
    acting_role: Option<Role>,

    /// Whether to emit audit events.
    audit_enabled: bool,
}

impl AccessEvaluator {
    /// Creates an evaluator acting for a user with `acting_role`.
    pub fn new(acting_role: Option<Role>) -> Self {
        Self {
            acting_role,
            audit_enabled: true,
        }
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    pub fn acting_role(&self) -> Option<Role> {
        self.acting_role
    }

    /// Returns whether `role` may reach `module`.
    pub fn has_permission(
        &self,
        role: Option<Role>,
        module: Module,
        matrix: &PermissionMatrix,
    ) -> bool {
        has_permission(role, module, matrix)
    }

    /// Checks whether removing `module` from `role` keeps the critical-module
    /// invariant.
    ///
    /// Non-critical modules, and modules `role` does not hold (a grant, not a
    /// revoke), are always allowed.
    ///
    /// # Errors
    ///
    /// [`EnforcementError::SelfLockout`] when `role` is the acting user's role
    /// and the last holder; [`EnforcementError::SystemLockout`] when another
    /// role is the last holder.
    pub fn can_revoke(&self, matrix: &PermissionMatrix, role: Role, module: Module) -> Result<()> {
        if !module.is_critical() || !matrix.allows(role, module) {
            return Ok(());
        }

        let other_holders = matrix.holders(module).filter(|r| *r != role).count();
        if other_holders > 0 {
            return Ok(());
        }

        if self.acting_role == Some(role) {
            Err(EnforcementError::SelfLockout { role, module })
        } else {
            Err(EnforcementError::SystemLockout { role, module })
        }
    }

    /// Flips `module` for `role`: revokes it if held, grants it otherwise.
    ///
    /// Revocations are checked with [`can_revoke`](Self::can_revoke) first;
    /// a refusal leaves `matrix` untouched. Exactly one membership changes on
    /// success.
    ///
    /// **Audit:** logs every grant, revoke and refusal.
    pub fn toggle_permission(
        &self,
        matrix: &mut PermissionMatrix,
        role: Role,
        module: Module,
    ) -> Result<Toggle> {
        if matrix.allows(role, module) {
            if let Err(refusal) = self.can_revoke(matrix, role, module) {
                if self.audit_enabled {
                    warn!(
                        role = %role,
                        module = %module,
                        acting_role = ?self.acting_role,
                        self_lockout = refusal.is_self_lockout(),
                        "Permission revoke refused"
                    );
                }
                return Err(refusal);
            }

            matrix.revoke(role, module);
            if self.audit_enabled {
                info!(
                    role = %role,
                    module = %module,
                    acting_role = ?self.acting_role,
                    "Permission revoked"
                );
            }
            Ok(Toggle::Revoked)
        } else {
            matrix.grant(role, module);
            if self.audit_enabled {
                info!(
                    role = %role,
                    module = %module,
                    acting_role = ?self.acting_role,
                    "Permission granted"
                );
            }
            Ok(Toggle::Granted)
        }
    }

    /// Replaces `matrix` with the default policy.
    pub fn reset(&self, matrix: &mut PermissionMatrix) {
        *matrix = crate::policy::reset_to_default();
        if self.audit_enabled {
            info!(acting_role = ?self.acting_role, "Permissions reset to default");
        }
    }
}
