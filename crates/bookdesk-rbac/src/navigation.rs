//! Which sections a role can see, and where to land when the current one
//! goes away.

use bookdesk_types::{Module, Role};

use crate::enforcement::has_permission;
use crate::matrix::PermissionMatrix;

/// Modules `role` may see, in the order of `all_modules`.
///
/// The iterator is lazy and holds no state of its own; call again to
/// restart it against the current matrix.
pub fn visible_modules<'a>(
    role: Option<Role>,
    matrix: &'a PermissionMatrix,
    all_modules: &'a [Module],
) -> impl Iterator<Item = Module> + 'a {
    all_modules
        .iter()
        .copied()
        .filter(move |module| has_permission(role, *module, matrix))
}

/// First visible module in canonical order, or `None` when the role can see
/// nothing.
pub fn landing_module(role: Option<Role>, matrix: &PermissionMatrix) -> Option<Module> {
    visible_modules(role, matrix, &Module::ALL).next()
}

/// Keeps `current` if it is still reachable, otherwise falls back to the
/// landing module.
pub fn resolve_section(
    current: Option<Module>,
    role: Option<Role>,
    matrix: &PermissionMatrix,
) -> Option<Module> {
    match current {
        Some(module) if has_permission(role, module, matrix) => Some(module),
        _ => landing_module(role, matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::reset_to_default;

    #[test]
    fn test_visible_modules_follow_canonical_order() {
        // Employee grants made out of canonical order
        let matrix = reset_to_default()
            .with_grants(Role::Employee, [Module::Clients, Module::Dashboard]);

        let visible: Vec<Module> =
            visible_modules(Some(Role::Employee), &matrix, &Module::ALL).collect();
        assert_eq!(visible, [Module::Dashboard, Module::Clients]);
    }

    #[test]
    fn test_visible_modules_respects_given_order() {
        let matrix = reset_to_default();
        let order = [Module::Reports, Module::Dashboard, Module::Users];

        let visible: Vec<Module> =
            visible_modules(Some(Role::Supervisor), &matrix, &order).collect();
        assert_eq!(visible, [Module::Reports, Module::Dashboard]);
    }

    #[test]
    fn test_visible_modules_is_restartable() {
        let matrix = reset_to_default();
        let first: Vec<Module> =
            visible_modules(Some(Role::Administrator), &matrix, &Module::ALL).collect();
        let second: Vec<Module> =
            visible_modules(Some(Role::Administrator), &matrix, &Module::ALL).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), Module::ALL.len());
    }

    #[test]
    fn test_landing_module() {
        let matrix = reset_to_default();
        assert_eq!(
            landing_module(Some(Role::Employee), &matrix),
            Some(Module::Dashboard)
        );
        assert_eq!(landing_module(None, &matrix), None);

        let bare = PermissionMatrix::empty().with_grants(Role::Employee, [Module::Reports]);
        assert_eq!(
            landing_module(Some(Role::Employee), &bare),
            Some(Module::Reports)
        );
        assert_eq!(landing_module(Some(Role::Supervisor), &bare), None);
    }

    #[test]
    fn test_resolve_section_falls_back() {
        let matrix = reset_to_default();

        assert_eq!(
            resolve_section(Some(Module::Clients), Some(Role::Employee), &matrix),
            Some(Module::Clients)
        );
        assert_eq!(
            resolve_section(Some(Module::Configuration), Some(Role::Employee), &matrix),
            Some(Module::Dashboard)
        );
        assert_eq!(
            resolve_section(None, Some(Role::Supervisor), &matrix),
            Some(Module::Dashboard)
        );
        assert_eq!(resolve_section(Some(Module::Dashboard), None, &matrix), None);
    }
}
