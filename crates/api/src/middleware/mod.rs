//! Identity resolution and authorization extractors.
//!
//! - [`auth::Identity`] -- Resolves the caller from a session or staff token.
//! - [`rbac::RequireAuth`] -- Requires any resolved identity.
//! - [`rbac::RequireStaff`] -- Requires the `agent` or `admin` role.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::OptionalIdentity`] -- Resolves the caller without rejecting.

pub mod auth;
pub mod rbac;
