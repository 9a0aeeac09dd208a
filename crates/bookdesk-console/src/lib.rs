//! # bookdesk-console: the administration console session
//!
//! Owns the permission matrix for one signed-in staff member and routes every
//! read and edit through `bookdesk-rbac`:
//! - [`Console`] signs users in and out, tracks the active section and
//!   applies permission edits from the configuration screen
//! - [`routes`] guards the top-level pages with the same matrix
//! - [`logging`] installs a `tracing` subscriber from [`LoggingConfig`]
//!
//! ```
//! use bookdesk_console::Console;
//! use bookdesk_types::{LoginResponse, Module, Role};
//!
//! let mut console = Console::default();
//! console.sign_in(LoginResponse {
//!     token: "t0k3n".into(),
//!     tipo: "Bearer".into(),
//!     nombre: "Marta".into(),
//!     email: "marta@example.com".into(),
//!     rol: "ADMINISTRADOR".into(),
//! })?;
//!
//! assert_eq!(console.active_section(), Some(Module::Dashboard));
//! console.toggle_permission(Role::Employee, Module::Reports)?;
//! assert!(console.matrix().allows(Role::Employee, Module::Reports));
//!
//! // Sessions never share edits
//! console.sign_out();
//! assert!(!console.matrix().allows(Role::Employee, Module::Reports));
//! # Ok::<(), bookdesk_console::ConsoleError>(())
//! ```
//!
//! [`LoggingConfig`]: bookdesk_config::LoggingConfig

mod console;
mod error;
pub mod logging;
pub mod routes;

pub use console::Console;
pub use error::{ConsoleError, Result};
pub use routes::{Route, RouteDecision, authorize};
