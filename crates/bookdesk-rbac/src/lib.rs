//! # bookdesk-rbac: Role-Based Access Control
//!
//! Decides which console sections a staff member may reach and which
//! permission edits are safe to apply:
//! - **Permission matrix** (role → modules, 3 roles × 8 modules)
//! - **Critical-module guard** (`users` and `configuration` always keep a holder)
//! - **Navigation** (visible modules, landing section fallback)
//! - **Account guard** (never deactivate the last active user or administrator)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Toggle request (role, module)               │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessEvaluator                             │
//! │  ├─ Grant: always applied                    │
//! │  └─ Revoke: can_revoke() first               │
//! │       ├─ other holder left → applied         │
//! │       └─ last holder → refused, unchanged    │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  PermissionMatrix (single owner)             │
//! │  read by navigation and module guards        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Default policy
//!
//! | Module                 | Administrator | Supervisor | Employee |
//! |------------------------|---------------|------------|----------|
//! | dashboard              | ✓             | ✓          | ✓        |
//! | reservations           | ✓             | ✓          | ✓        |
//! | reservation-management | ✓             | ✓          | ✗        |
//! | services               | ✓             | ✓          | ✗        |
//! | users (critical)       | ✓             | ✗          | ✗        |
//! | clients                | ✓             | ✓          | ✓        |
//! | reports                | ✓             | ✓          | ✗        |
//! | configuration (crit.)  | ✓             | ✗          | ✗        |
//!
//! ## Examples
//!
//! ```
//! use bookdesk_rbac::{AccessEvaluator, PermissionMatrix, Toggle, has_permission};
//! use bookdesk_types::{Module, Role};
//!
//! let mut matrix = PermissionMatrix::default();
//! assert!(!has_permission(Some(Role::Employee), Module::Configuration, &matrix));
//!
//! let evaluator = AccessEvaluator::new(Some(Role::Administrator));
//!
//! // Non-critical edits always apply
//! let toggle = evaluator.toggle_permission(&mut matrix, Role::Supervisor, Module::Reports)?;
//! assert_eq!(toggle, Toggle::Revoked);
//!
//! // The last holder of a critical module cannot lose it
//! let refusal = evaluator
//!     .toggle_permission(&mut matrix, Role::Administrator, Module::Users)
//!     .unwrap_err();
//! assert!(refusal.is_self_lockout());
//! assert!(has_permission(Some(Role::Administrator), Module::Users, &matrix));
//! # Ok::<(), bookdesk_rbac::EnforcementError>(())
//! ```

pub mod accounts;
pub mod enforcement;
pub mod matrix;
pub mod navigation;
pub mod policy;

// Re-export commonly used types
pub use accounts::{AccountError, can_deactivate};
pub use enforcement::{AccessEvaluator, EnforcementError, Toggle, can_revoke, has_permission};
pub use matrix::{MatrixError, ModuleSet, PermissionMatrix};
pub use navigation::{landing_module, resolve_section, visible_modules};
pub use policy::{DefaultPolicy, reset_to_default};
