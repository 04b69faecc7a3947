//! User Admin Common Types
//!
//! User records, the directory that owns them, and the filter/statistics
//! pipeline the admin dashboard is rendered from. Everything here is pure;
//! the backend crate owns the one live directory and serves it over HTTP.

pub mod directory;
pub mod filter;
pub mod seed;
pub mod stats;
pub mod user;

pub use directory::{set_role, toggle_status, DirectoryError, UserDirectory};
pub use filter::{filter_users, UserFilter};
pub use stats::{compute_statistics, DirectoryStats};
pub use user::{ParseRoleError, ParseStatusError, Role, Status, User};
