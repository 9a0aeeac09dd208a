//! The signed-in user and the account rows the console manages.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Payload returned by the backend's login endpoint.
///
/// Field names follow the backend's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,

    /// Credential scheme; the backend always sends `Bearer`.
    #[serde(default = "default_token_type")]
    pub tipo: String,

    pub nombre: String,
    pub email: String,

    /// Raw role string, mapped into [`Role`] by [`LoginResponse::role`].
    pub rol: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl LoginResponse {
    /// The staff role carried by this login, if any.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.rol)
    }

    /// Value for an `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.tipo, self.token)
    }

    /// Splits the payload into the user identity and the bearer token.
    pub fn into_parts(self) -> (CurrentUser, String) {
        let role = self.role();
        let user = CurrentUser {
            name: self.nombre,
            email: self.email,
            role,
        };
        (user, self.token)
    }
}

/// The user the console is acting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,

    /// `None` when the backend role is not a staff role.
    pub role: Option<Role>,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// A staff account as listed on the users screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAccount {
    pub id: u64,
    pub name: String,
    pub email: String,

    /// Raw role string as stored by the backend.
    pub role: String,

    pub active: bool,
}

impl StaffAccount {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: role.into(),
            active: true,
        }
    }

    /// Marks the account inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn staff_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn is_active_administrator(&self) -> bool {
        self.active && self.staff_role() == Some(Role::Administrator)
    }
}
