//! Guard for deactivating staff accounts.
//!
//! The console checks these rules before asking the backend to deactivate
//! an account, so the system is never left without an active user or an
//! active administrator.

use bookdesk_types::{Role, StaffAccount};
use thiserror::Error;
use tracing::warn;

/// A refused deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Account {0} not found")]
    UnknownAccount(u64),

    #[error("You cannot deactivate the only active user of the system")]
    OnlyActiveAccount,

    #[error("You cannot deactivate the only administrator of the system")]
    LastAdministrator,

    #[error("You cannot deactivate yourself while you are the only administrator")]
    SelfLastAdministrator,
}

/// Checks whether the account `target_id` may be deactivated by the user
/// signed in as `acting_email`.
///
/// Rules, in order:
/// 1. the target is not the only active account;
/// 2. the target is not an administrator while exactly one active
///    administrator exists (this holds for inactive targets too);
/// 3. the acting user is not deactivating themself while exactly one active
///    administrator exists.
pub fn can_deactivate(
    accounts: &[StaffAccount],
    target_id: u64,
    acting_email: Option<&str>,
) -> Result<(), AccountError> {
    let target = accounts
        .iter()
        .find(|a| a.id == target_id)
        .ok_or(AccountError::UnknownAccount(target_id))?;

    let active = accounts.iter().filter(|a| a.active).count();
    let active_admins = accounts
        .iter()
        .filter(|a| a.is_active_administrator())
        .count();

    let refusal = if active == 1 {
        Some(AccountError::OnlyActiveAccount)
    } else if target.staff_role() == Some(Role::Administrator) && active_admins == 1 {
        Some(AccountError::LastAdministrator)
    } else if acting_email.is_some_and(|email| email.eq_ignore_ascii_case(&target.email))
        && active_admins == 1
    {
        Some(AccountError::SelfLastAdministrator)
    } else {
        None
    };

    match refusal {
        Some(err) => {
            warn!(account = target_id, reason = %err, "Account deactivation refused");
            Err(err)
        }
        None => Ok(()),
    }
}
