//! Top-level routes and the guard in front of them.

use std::fmt::{self, Display};

use bookdesk_rbac::{PermissionMatrix, has_permission, landing_module};
use bookdesk_types::{Module, Role};
use tracing::debug;

use crate::console::Console;

/// A page the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, the sign-in page.
    Login,
    /// `/reservar`, the public booking form.
    PublicBooking,
    /// `/dashboard`, the console.
    Dashboard,
    /// `/reserva/{id}`, one reservation's detail page.
    Reservation(u64),
}

impl Route {
    /// Parses a request path. Trailing slashes are ignored; reservation ids
    /// are plain decimal digits.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Login),
            "/reservar" => Some(Self::PublicBooking),
            "/dashboard" => Some(Self::Dashboard),
            _ => trimmed
                .strip_prefix("/reserva/")
                .filter(|id| id.starts_with(|c: char| c.is_ascii_digit()))
                .and_then(|id| id.parse().ok())
                .map(Self::Reservation),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::PublicBooking => "/reservar".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Reservation(id) => format!("/reserva/{id}"),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::PublicBooking)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow(Route),
    Redirect(Route),
}

/// Decides whether a user may open `route`.
///
/// `signed_in` and `role` describe the current user. A signed-in user with
/// an unknown role has `role == None` and so reaches nothing protected.
pub fn authorize(
    route: Route,
    signed_in: bool,
    role: Option<Role>,
    matrix: &PermissionMatrix,
) -> RouteDecision {
    let allowed = match route {
        Route::Login | Route::PublicBooking => true,
        Route::Dashboard => signed_in && landing_module(role, matrix).is_some(),
        Route::Reservation(_) => {
            signed_in
                && (has_permission(role, Module::Reservations, matrix)
                    || has_permission(role, Module::ReservationManagement, matrix))
        }
    };

    if allowed {
        RouteDecision::Allow(route)
    } else {
        debug!(route = %route, role = ?role, "Route refused");
        RouteDecision::Redirect(Route::Login)
    }
}

impl Console {
    /// Runs the route guard for `path` against this session.
    ///
    /// Unknown paths redirect to the sign-in page.
    pub fn route(&self, path: &str) -> RouteDecision {
        match Route::parse(path) {
            Some(route) => authorize(route, self.is_signed_in(), self.role(), self.matrix()),
            None => {
                debug!(path, "Unknown route");
                RouteDecision::Redirect(Route::Login)
            }
        }
    }
}
