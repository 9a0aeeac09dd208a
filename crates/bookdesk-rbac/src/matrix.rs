//! Permission matrix: which modules each role may reach.

use std::collections::BTreeMap;

use bookdesk_types::{Module, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by [`PermissionMatrix::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No role holds a critical module.
    #[error("no role has access to critical module \"{module}\"")]
    OrphanedCriticalModule { module: Module },

    /// A matrix snapshot could not be encoded or decoded.
    #[error("permission matrix snapshot: {0}")]
    Snapshot(String),
}

/// Ordered set of modules granted to one role.
///
/// Membership is what access checks use; order is kept only so the
/// permissions screen lists grants in the order they were made. Decoding
/// goes through [`ModuleSet::new`], so duplicates never survive a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Module>", into = "Vec<Module>")]
pub struct ModuleSet {
    modules: Vec<Module>,
}

impl ModuleSet {
    /// Creates a set, dropping duplicates but keeping first-seen order.
    pub fn new(modules: Vec<Module>) -> Self {
        modules.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Every module in canonical order.
    pub fn all() -> Self {
        Self::new(Module::ALL.to_vec())
    }

    pub fn contains(&self, module: Module) -> bool {
        self.modules.contains(&module)
    }

    /// Adds a module. Returns `false` if it was already present.
    pub fn grant(&mut self, module: Module) -> bool {
        if self.contains(module) {
            return false;
        }
        self.modules.push(module);
        true
    }

    /// Removes a module. Returns `false` if it was not present.
    pub fn revoke(&mut self, module: Module) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| *m != module);
        self.modules.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = Module> + '_ {
        self.modules.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns whether any granted module is critical.
    pub fn has_critical_module(&self) -> bool {
        self.modules.iter().any(Module::is_critical)
    }
}

impl FromIterator<Module> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        let mut set = Self::empty();
        for module in iter {
            set.grant(module);
        }
        set
    }
}

impl From<Vec<Module>> for ModuleSet {
    fn from(modules: Vec<Module>) -> Self {
        Self::new(modules)
    }
}

impl From<ModuleSet> for Vec<Module> {
    fn from(set: ModuleSet) -> Self {
        set.modules
    }
}

/// Mapping from role to the modules it may access.
///
/// Values are owned by a single session and edited only through
/// [`AccessEvaluator::toggle_permission`](crate::AccessEvaluator::toggle_permission),
/// which keeps every critical module reachable by at least one role.
/// Readers take `&PermissionMatrix` or a clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMatrix {
    grants: BTreeMap<Role, ModuleSet>,
}

impl PermissionMatrix {
    /// A matrix in which no role holds anything.
    ///
    /// This violates the critical-module invariant; it is a starting point
    /// for [`with_grants`](Self::with_grants), not a usable session state.
    pub fn empty() -> Self {
        Self {
            grants: Role::ALL.into_iter().map(|r| (r, ModuleSet::empty())).collect(),
        }
    }

    /// Replaces the grants of `role`.
    pub fn with_grants(mut self, role: Role, modules: impl IntoIterator<Item = Module>) -> Self {
        self.grants.insert(role, modules.into_iter().collect());
        self
    }

    /// Returns whether `role` may access `module`.
    pub fn allows(&self, role: Role, module: Module) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|set| set.contains(module))
    }

    /// Modules granted to `role`, in grant order.
    pub fn modules(&self, role: Role) -> impl Iterator<Item = Module> + '_ {
        self.grants.get(&role).into_iter().flat_map(|set| set.iter())
    }

    /// Number of modules granted to `role`.
    pub fn module_count(&self, role: Role) -> usize {
        self.grants.get(&role).map_or(0, ModuleSet::len)
    }

    /// Roles holding `module`, in role order.
    pub fn holders(&self, module: Module) -> impl Iterator<Item = Role> + '_ {
        self.grants
            .iter()
            .filter(move |(_, set)| set.contains(module))
            .map(|(role, _)| *role)
    }

    pub fn holder_count(&self, module: Module) -> usize {
        self.holders(module).count()
    }

    /// Checks the critical-module invariant.
    ///
    /// # Errors
    ///
    /// Returns the first critical module (canonical order) that no role holds.
    pub fn validate(&self) -> Result<(), MatrixError> {
        match Module::CRITICAL
            .into_iter()
            .find(|m| self.holder_count(*m) == 0)
        {
            Some(module) => Err(MatrixError::OrphanedCriticalModule { module }),
            None => Ok(()),
        }
    }

    /// Encodes the matrix as JSON, e.g. for the permissions screen or a
    /// debug dump.
    pub fn to_json(&self) -> Result<String, MatrixError> {
        serde_json::to_string(self).map_err(|e| MatrixError::Snapshot(e.to_string()))
    }

    /// Decodes a JSON snapshot and checks the critical-module invariant.
    pub fn from_json(json: &str) -> Result<Self, MatrixError> {
        let matrix: Self =
            serde_json::from_str(json).map_err(|e| MatrixError::Snapshot(e.to_string()))?;
        matrix.validate()?;
        Ok(matrix)
    }

    pub(crate) fn grant(&mut self, role: Role, module: Module) -> bool {
        self.grants.entry(role).or_default().grant(module)
    }

    pub(crate) fn revoke(&mut self, role: Role, module: Module) -> bool {
        self.grants
            .get_mut(&role)
            .is_some_and(|set| set.revoke(module))
    }
}

impl Default for PermissionMatrix {
    /// The fixed default policy.
    fn default() -> Self {
        crate::policy::DefaultPolicy::matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_set_operations() {
        let mut set = ModuleSet::empty();
        assert!(!set.contains(Module::Reports));

        assert!(set.grant(Module::Reports));
        assert!(set.contains(Module::Reports));

        assert!(!set.grant(Module::Reports)); // Duplicate grant is no-op
        assert_eq!(set.len(), 1);

        set.grant(Module::Dashboard);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [Module::Reports, Module::Dashboard]
        );

        assert!(set.revoke(Module::Reports));
        assert!(!set.revoke(Module::Reports));
        assert!(!set.contains(Module::Reports));
        assert!(set.contains(Module::Dashboard));
    }

    #[test]
    fn test_module_set_from_vec_dedups() {
        let set = ModuleSet::from(vec![Module::Users, Module::Clients, Module::Users]);
        assert_eq!(set.len(), 2);
        assert!(set.has_critical_module());
        assert!(!ModuleSet::from(vec![Module::Clients]).has_critical_module());
    }

    #[test]
    fn test_allows_and_holders() {
        let matrix = PermissionMatrix::empty()
            .with_grants(Role::Administrator, [Module::Users, Module::Reports])
            .with_grants(Role::Supervisor, [Module::Reports]);

        assert!(matrix.allows(Role::Administrator, Module::Users));
        assert!(!matrix.allows(Role::Supervisor, Module::Users));
        assert!(!matrix.allows(Role::Employee, Module::Reports));

        assert_eq!(
            matrix.holders(Module::Reports).collect::<Vec<_>>(),
            [Role::Administrator, Role::Supervisor]
        );
        assert_eq!(matrix.holder_count(Module::Configuration), 0);
        assert_eq!(matrix.module_count(Role::Administrator), 2);
    }

    #[test]
    fn test_validate_reports_orphaned_critical_module() {
        let matrix = PermissionMatrix::empty().with_grants(Role::Administrator, [Module::Users]);
        assert_eq!(
            matrix.validate(),
            Err(MatrixError::OrphanedCriticalModule {
                module: Module::Configuration
            })
        );

        let matrix = matrix.with_grants(Role::Supervisor, [Module::Configuration]);
        assert!(matrix.validate().is_ok());
    }

    #[test]
    fn test_json_snapshot() {
        let matrix = PermissionMatrix::default();
        let json = matrix.to_json().unwrap();
        assert!(json.contains("\"reservation-management\""));
        assert_eq!(PermissionMatrix::from_json(&json).unwrap(), matrix);

        let orphaned = PermissionMatrix::empty().to_json().unwrap();
        assert!(matches!(
            PermissionMatrix::from_json(&orphaned),
            Err(MatrixError::OrphanedCriticalModule { .. })
        ));
        assert!(matches!(
            PermissionMatrix::from_json("not json"),
            Err(MatrixError::Snapshot(_))
        ));
    }

    #[test]
    fn test_json_snapshot_drops_duplicates() {
        let matrix = PermissionMatrix::from_json(
            r#"{"grants":{"administrator":["users","users","configuration"]}}"#,
        )
        .unwrap();
        assert_eq!(matrix.module_count(Role::Administrator), 2);
        assert_eq!(
            matrix.modules(Role::Administrator).collect::<Vec<_>>(),
            [Module::Users, Module::Configuration]
        );

        let json = matrix.to_json().unwrap();
        assert_eq!(json.matches("\"users\"").count(), 1);
    }

    #[test]
    fn test_missing_role_has_no_access() {
        let matrix: PermissionMatrix =
            serde_json::from_str(r#"{"grants":{"administrator":["users","configuration"]}}"#)
                .unwrap();
        assert!(!matrix.allows(Role::Employee, Module::Dashboard));
        assert_eq!(matrix.modules(Role::Employee).count(), 0);
    }
}
