//! # bookdesk-types: Core types for `bookdesk`
//!
//! This crate contains the vocabulary shared by every part of the
//! administration console:
//! - Staff roles ([`Role`])
//! - Addressable console sections ([`Module`])
//! - The signed-in user and login payload ([`CurrentUser`], [`LoginResponse`])
//! - Staff account rows ([`StaffAccount`])
//! - Reservation lifecycle ([`ReservationStatus`], [`ReservationStats`])
//!
//! Role and module identifiers are shared verbatim with anything that renders
//! or filters by them, so their string forms are defined exactly once here.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod reservation;
mod user;

pub use reservation::{ReservationStats, ReservationStatus};
pub use user::{CurrentUser, LoginResponse, StaffAccount};

/// Error returned when an identifier is not part of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    #[error("unknown module: {0:?}")]
    UnknownModule(String),

    #[error("unknown reservation status: {0:?}")]
    UnknownStatus(String),
}

// ============================================================================
// Roles
// ============================================================================

/// Staff role in the console.
///
/// The set is closed. Customers authenticate against the same backend but
/// have no role here, so they can never reach a console section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Full access, including accounts and configuration.
    Administrator,
    /// Runs day-to-day operations: reservations, services, reports.
    Supervisor,
    /// Front-desk access to reservations and clients.
    Employee,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Supervisor, Role::Employee];

    /// Parses a role string as returned by the backend.
    ///
    /// Matching is case-insensitive and accepts both the backend's stored
    /// names and their English spellings. Anything else (notably the
    /// customer role) yields `None`.
    ///
    /// ```
    /// use bookdesk_types::Role;
    ///
    /// assert_eq!(Role::parse("ADMINISTRADOR"), Some(Role::Administrator));
    /// assert_eq!(Role::parse("Supervisor"), Some(Role::Supervisor));
    /// assert_eq!(Role::parse("CLIENTE"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "administrador" | "administrator" | "admin" => Some(Self::Administrator),
            "supervisor" => Some(Self::Supervisor),
            "empleado" | "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Supervisor => "supervisor",
            Self::Employee => "employee",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Supervisor => "Supervisor",
            Self::Employee => "Employee",
        }
    }

    /// One-line summary shown next to the role on the permissions screen.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Administrator => {
                "Full access to the system, including users, configuration and every module."
            }
            Self::Supervisor => {
                "Manages reservations and services and generates reports. No configuration access."
            }
            Self::Employee => "Basic access to handle reservations and look up clients.",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownRole(s.to_string()))
    }
}

// ============================================================================
// Modules
// ============================================================================

/// A named, addressable section of the console.
///
/// Variant order is the canonical navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Dashboard,
    Reservations,
    ReservationManagement,
    Services,
    Users,
    Clients,
    Reports,
    Configuration,
}

impl Module {
    /// Every module in canonical order.
    pub const ALL: [Module; 8] = [
        Module::Dashboard,
        Module::Reservations,
        Module::ReservationManagement,
        Module::Services,
        Module::Users,
        Module::Clients,
        Module::Reports,
        Module::Configuration,
    ];

    /// Modules that at least one role must always be able to reach.
    pub const CRITICAL: [Module; 2] = [Module::Users, Module::Configuration];

    /// Parses a kebab-case module identifier. Unknown identifiers yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s.trim())
    }

    /// Canonical kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Reservations => "reservations",
            Self::ReservationManagement => "reservation-management",
            Self::Services => "services",
            Self::Users => "users",
            Self::Clients => "clients",
            Self::Reports => "reports",
            Self::Configuration => "configuration",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Reservations => "Reservations",
            Self::ReservationManagement => "Reservation Management",
            Self::Services => "Services",
            Self::Users => "Users",
            Self::Clients => "Clients",
            Self::Reports => "Reports",
            Self::Configuration => "Configuration",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Dashboard => "System overview",
            Self::Reservations => "Reservation handling",
            Self::ReservationManagement => "Tracking of the staff handling each reservation",
            Self::Services => "Service catalog administration",
            Self::Users => "User and role management",
            Self::Clients => "Client administration",
            Self::Reports => "Analytics and reports",
            Self::Configuration => "System configuration",
        }
    }

    /// Returns whether losing every holder of this module would lock the
    /// system out of administration.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Users | Self::Configuration)
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownModule(s.to_string()))
    }
}
