//! Git operations for cloning charm repositories
//!
//! This module handles:
//! - Shallow-cloning repositories (HTTPS, SSH, and local file URLs)
//! - Resolving refs (branches, tags) to exact SHAs
//! - Checking out pinned commits for image discovery
//!
//! Authentication is delegated to git's native credential system; the charm
//! repos this tool mirrors are public, so anonymous access is the norm.

mod auth;
mod checkout;
mod clone;
mod refs;

pub use checkout::checkout_commit;
pub use clone::clone;
pub use refs::{ls_remote, resolve_ref};
