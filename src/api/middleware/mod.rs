//! API middleware.

mod auth;
mod policy;

pub use auth::{route_guard, CurrentUser, RouteGuard};
pub use policy::{AccessPolicy, Capability, RolePolicy};
