//! The console session: who is signed in, what they may see, and the
//! permission matrix they may edit.

use bookdesk_config::{BookdeskConfig, SessionConfig};
use bookdesk_rbac::{
    AccessEvaluator, PermissionMatrix, Toggle, can_deactivate, has_permission, landing_module,
    reset_to_default, resolve_section, visible_modules,
};
use bookdesk_types::{CurrentUser, LoginResponse, Module, Role, StaffAccount};
use tracing::{debug, info, warn};

use crate::error::{ConsoleError, Result};

/// One console session.
///
/// The console is the only owner of the permission matrix. Permission edits
/// go through [`toggle_permission`](Self::toggle_permission) and
/// [`reset_permissions`](Self::reset_permissions); navigation and module
/// guards read it through [`matrix`](Self::matrix).
#[derive(Debug)]
pub struct Console {
    config: SessionConfig,
    user: Option<CurrentUser>,
    token: Option<String>,
    matrix: PermissionMatrix,
    active: Option<Module>,
}

impl Console {
    /// Creates a signed-out console holding the default matrix.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            user: None,
            token: None,
            matrix: reset_to_default(),
            active: None,
        }
    }

    pub fn from_config(config: &BookdeskConfig) -> Self {
        Self::new(config.session.clone())
    }

    /// Starts a session from a login response.
    ///
    /// An accepted sign-in ends any previous session first, so the new one
    /// starts from the default matrix. A refused sign-in leaves the current
    /// session as it was.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::UnknownRole`] when the role is not a staff role and
    /// the console is configured to reject such users.
    pub fn sign_in(&mut self, response: LoginResponse) -> Result<&CurrentUser> {
        if response.role().is_none() && self.config.reject_unknown_roles {
            warn!(email = %response.email, role = %response.rol, "Sign-in refused for non-staff role");
            return Err(ConsoleError::UnknownRole(response.rol));
        }

        if self.user.is_some() {
            self.sign_out();
        }

        let (user, token) = response.into_parts();
        let role = user.role;
        info!(email = %user.email, role = ?role, "Signed in");

        self.active = if has_permission(role, self.config.landing_module, &self.matrix) {
            Some(self.config.landing_module)
        } else {
            landing_module(role, &self.matrix)
        };
        if self.active.is_none() {
            warn!(email = %user.email, "Signed-in user cannot see any section");
        }

        self.token = Some(token);
        Ok(self.user.insert(user))
    }

    /// Ends the session and discards permission edits.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "Signed out");
        }
        self.token = None;
        self.active = None;
        self.matrix = reset_to_default();
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|u| u.role)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Read-only view of the current matrix.
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// The section currently shown, or `None` when the user can see nothing.
    pub fn active_section(&self) -> Option<Module> {
        self.active
    }

    /// Returns whether the signed-in user may reach `module`.
    pub fn has_permission(&self, module: Module) -> bool {
        has_permission(self.role(), module, &self.matrix)
    }

    /// Sections the signed-in user may see, in canonical order.
    pub fn visible_modules(&self) -> impl Iterator<Item = Module> + '_ {
        visible_modules(self.role(), &self.matrix, &Module::ALL)
    }

    /// Switches to `module`.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ModuleDenied`] leaves the active section unchanged.
    pub fn navigate(&mut self, module: Module) -> Result<Module> {
        self.require_signed_in()?;
        self.require_module(module)?;
        self.active = Some(module);
        debug!(module = %module, "Navigated");
        Ok(module)
    }

    /// Switches to the module named `id`.
    pub fn navigate_to(&mut self, id: &str) -> Result<Module> {
        let module = Module::parse(id).ok_or_else(|| ConsoleError::UnknownModule(id.to_string()))?;
        self.navigate(module)
    }

    /// Flips `module` for `role` on behalf of the signed-in user.
    ///
    /// Only users who can reach the configuration section may edit. After a
    /// successful edit the active section is re-resolved, since the user may
    /// have revoked their own access to it.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::Enforcement`] carries the refusal message when the edit
    /// would orphan a critical module; the matrix is unchanged.
    pub fn toggle_permission(&mut self, role: Role, module: Module) -> Result<Toggle> {
        self.require_signed_in()?;
        self.require_module(Module::Configuration)?;

        let toggle = self
            .evaluator()
            .toggle_permission(&mut self.matrix, role, module)?;
        self.refresh_section();
        Ok(toggle)
    }

    /// Restores the default matrix on behalf of the signed-in user.
    pub fn reset_permissions(&mut self) -> Result<()> {
        self.require_signed_in()?;
        self.require_module(Module::Configuration)?;

        self.evaluator().reset(&mut self.matrix);
        self.refresh_section();
        Ok(())
    }

    /// Checks whether the account `target_id` may be deactivated by the
    /// signed-in user.
    pub fn can_deactivate(&self, accounts: &[StaffAccount], target_id: u64) -> Result<()> {
        let user = self.require_signed_in()?;
        self.require_module(Module::Users)?;
        can_deactivate(accounts, target_id, Some(user.email.as_str()))?;
        Ok(())
    }

    fn evaluator(&self) -> AccessEvaluator {
        let evaluator = AccessEvaluator::new(self.role());
        if self.config.audit {
            evaluator
        } else {
            evaluator.without_audit()
        }
    }

    fn require_signed_in(&self) -> Result<&CurrentUser> {
        self.user.as_ref().ok_or(ConsoleError::NotSignedIn)
    }

    fn require_module(&self, module: Module) -> Result<()> {
        if self.has_permission(module) {
            Ok(())
        } else {
            warn!(module = %module, role = ?self.role(), "Module access denied");
            Err(ConsoleError::ModuleDenied { module })
        }
    }

    fn refresh_section(&mut self) {
        let resolved = resolve_section(self.active, self.role(), &self.matrix);
        if resolved != self.active {
            info!(from = ?self.active, to = ?resolved, "Active section no longer reachable");
            self.active = resolved;
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(rol: &str) -> LoginResponse {
        LoginResponse {
            token: "token-123".to_string(),
            tipo: "Bearer".to_string(),
            nombre: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            rol: rol.to_string(),
        }
    }

    fn quiet() -> SessionConfig {
        SessionConfig {
            audit: false,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_new_console_is_signed_out() {
        let console = Console::default();
        assert!(!console.is_signed_in());
        assert_eq!(console.active_section(), None);
        assert_eq!(console.visible_modules().count(), 0);
        assert_eq!(console.matrix(), &reset_to_default());
    }

    #[test]
    fn test_sign_in_lands_on_dashboard() {
        let mut console = Console::new(quiet());
        let user = console.sign_in(login("EMPLEADO")).unwrap();
        assert_eq!(user.role, Some(Role::Employee));

        assert_eq!(console.active_section(), Some(Module::Dashboard));
        assert_eq!(console.bearer_token(), Some("token-123"));
        assert_eq!(
            console.visible_modules().collect::<Vec<_>>(),
            [Module::Dashboard, Module::Reservations, Module::Clients]
        );
    }

    #[test]
    fn test_configured_landing_falls_back_when_hidden() {
        let mut console = Console::new(SessionConfig {
            landing_module: Module::Reports,
            ..quiet()
        });

        console.sign_in(login("SUPERVISOR")).unwrap();
        assert_eq!(console.active_section(), Some(Module::Reports));

        console.sign_in(login("EMPLEADO")).unwrap();
        assert_eq!(console.active_section(), Some(Module::Dashboard));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let mut console = Console::new(quiet());
        let err = console.sign_in(login("CLIENTE")).unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownRole(ref r) if r == "CLIENTE"));
        assert!(!console.is_signed_in());
        assert_eq!(console.bearer_token(), None);
    }

    #[test]
    fn test_refused_sign_in_keeps_current_session() {
        let mut console = Console::new(quiet());
        console.sign_in(login("ADMINISTRADOR")).unwrap();
        console
            .toggle_permission(Role::Employee, Module::Reports)
            .unwrap();
        console.navigate(Module::Reports).unwrap();
        let matrix = console.matrix().clone();

        assert!(matches!(
            console.sign_in(login("CLIENTE")),
            Err(ConsoleError::UnknownRole(_))
        ));
        assert_eq!(console.role(), Some(Role::Administrator));
        assert_eq!(console.bearer_token(), Some("token-123"));
        assert_eq!(console.active_section(), Some(Module::Reports));
        assert_eq!(console.matrix(), &matrix);
    }

    #[test]
    fn test_unknown_role_admitted_without_access() {
        let mut console = Console::new(SessionConfig {
            reject_unknown_roles: false,
            ..quiet()
        });

        console.sign_in(login("CLIENTE")).unwrap();
        assert!(console.is_signed_in());
        assert_eq!(console.role(), None);
        assert_eq!(console.active_section(), None);
        assert!(matches!(
            console.navigate(Module::Dashboard),
            Err(ConsoleError::ModuleDenied { .. })
        ));
    }

    #[test]
    fn test_navigate() {
        let mut console = Console::new(quiet());
        assert!(matches!(
            console.navigate(Module::Dashboard),
            Err(ConsoleError::NotSignedIn)
        ));

        console.sign_in(login("EMPLEADO")).unwrap();
        assert_eq!(console.navigate_to("clients").unwrap(), Module::Clients);
        assert_eq!(console.active_section(), Some(Module::Clients));

        let err = console.navigate(Module::Configuration).unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::ModuleDenied {
                module: Module::Configuration
            }
        ));
        assert_eq!(console.active_section(), Some(Module::Clients));

        assert!(matches!(
            console.navigate_to("billing"),
            Err(ConsoleError::UnknownModule(_))
        ));
    }

    #[test]
    fn test_only_configuration_holders_edit() {
        let mut console = Console::new(quiet());
        console.sign_in(login("SUPERVISOR")).unwrap();

        let err = console
            .toggle_permission(Role::Employee, Module::Reports)
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::ModuleDenied {
                module: Module::Configuration
            }
        ));
        assert!(console.reset_permissions().is_err());
        assert_eq!(console.matrix(), &reset_to_default());
    }

    #[test]
    fn test_refusal_surfaces_message() {
        let mut console = Console::new(quiet());
        console.sign_in(login("ADMINISTRADOR")).unwrap();

        let err = console
            .toggle_permission(Role::Administrator, Module::Users)
            .unwrap_err();
        assert!(err.to_string().contains("only user with this permission"));
        assert!(console.has_permission(Module::Users));
    }

    #[test]
    fn test_self_revocation_moves_active_section() {
        let mut console = Console::new(quiet());
        console.sign_in(login("ADMINISTRADOR")).unwrap();
        console.navigate(Module::Reports).unwrap();

        console
            .toggle_permission(Role::Administrator, Module::Reports)
            .unwrap();
        assert!(!console.has_permission(Module::Reports));
        assert_eq!(console.active_section(), Some(Module::Dashboard));
    }

    #[test]
    fn test_sign_out_resets_matrix() {
        let mut console = Console::new(quiet());
        console.sign_in(login("ADMINISTRADOR")).unwrap();
        console
            .toggle_permission(Role::Employee, Module::Reports)
            .unwrap();
        assert_ne!(console.matrix(), &reset_to_default());

        console.sign_out();
        assert!(!console.is_signed_in());
        assert_eq!(console.bearer_token(), None);
        assert_eq!(console.matrix(), &reset_to_default());
    }

    #[test]
    fn test_can_deactivate_requires_users_module() {
        let accounts = vec![
            StaffAccount::new(1, "Ana Torres", "ana@example.com", "ADMINISTRADOR"),
            StaffAccount::new(2, "Bruno", "bruno@example.com", "EMPLEADO"),
        ];

        let mut console = Console::new(quiet());
        console.sign_in(login("EMPLEADO")).unwrap();
        assert!(matches!(
            console.can_deactivate(&accounts, 2),
            Err(ConsoleError::ModuleDenied { .. })
        ));

        console.sign_in(login("ADMINISTRADOR")).unwrap();
        assert!(console.can_deactivate(&accounts, 2).is_ok());
        assert!(matches!(
            console.can_deactivate(&accounts, 1),
            Err(ConsoleError::Account(_))
        ));
    }
}
