//! Default access policy.
//!
//! Every session starts from this matrix, and "reset to default" restores it.

use bookdesk_types::{Module, Role};

use crate::matrix::{ModuleSet, PermissionMatrix};

/// The fixed default grants for each role.
pub struct DefaultPolicy;

impl DefaultPolicy {
    /// Creates the default grants for an Administrator.
    ///
    /// **Access:** every module, including both critical ones.
    pub fn administrator() -> ModuleSet {
        ModuleSet::all()
    }

    /// Creates the default grants for a Supervisor.
    ///
    /// **Access:** everything except users and configuration.
    pub fn supervisor() -> ModuleSet {
        ModuleSet::new(vec![
            Module::Dashboard,
            Module::Reservations,
            Module::ReservationManagement,
            Module::Services,
            Module::Clients,
            Module::Reports,
        ])
    }

    /// Creates the default grants for an Employee.
    ///
    /// **Access:** dashboard, reservations and clients.
    pub fn employee() -> ModuleSet {
        ModuleSet::new(vec![Module::Dashboard, Module::Reservations, Module::Clients])
    }

    /// Default grants for `role`.
    pub fn for_role(role: Role) -> ModuleSet {
        match role {
            Role::Administrator => Self::administrator(),
            Role::Supervisor => Self::supervisor(),
            Role::Employee => Self::employee(),
        }
    }

    /// A fresh copy of the default matrix. Independent of any prior state.
    pub fn matrix() -> PermissionMatrix {
        Role::ALL
            .into_iter()
            .fold(PermissionMatrix::empty(), |matrix, role| {
                matrix.with_grants(role, Self::for_role(role).iter())
            })
    }
}

/// Returns a fresh copy of the default matrix.
pub fn reset_to_default() -> PermissionMatrix {
    DefaultPolicy::matrix()
}
