//! Role-based access policy.

use super::auth::CurrentUser;
use crate::domain::UserType;

/// What a guarded route requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageNews,
    ModerateComments,
    ManageLocations,
    ManageUsers,
    ViewRequests,
    RespondToRequests,
}

/// Decides whether an authenticated caller holds a capability.
pub trait AccessPolicy: Send + Sync {
    fn allows(&self, user: &CurrentUser, capability: Capability) -> bool;
}

/// Default policy: admins may do everything, politicians may read and
/// answer citizen requests, visitors get nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl AccessPolicy for RolePolicy {
    fn allows(&self, user: &CurrentUser, capability: Capability) -> bool {
        match user.user_type {
            UserType::Admin => true,
            UserType::Politician => matches!(
                capability,
                Capability::ViewRequests | Capability::RespondToRequests
            ),
            UserType::Visitor => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn caller(user_type: UserType) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: None,
            user_type,
        }
    }

    #[test]
    fn test_role_policy() {
        let policy = RolePolicy;
        let admin = caller(UserType::Admin);
        let politician = caller(UserType::Politician);
        let visitor = caller(UserType::Visitor);

        assert!(policy.allows(&admin, Capability::ManageUsers));
        assert!(policy.allows(&politician, Capability::RespondToRequests));
        assert!(policy.allows(&politician, Capability::ViewRequests));
        assert!(!policy.allows(&politician, Capability::ManageNews));
        assert!(!policy.allows(&politician, Capability::ModerateComments));
        assert!(!policy.allows(&visitor, Capability::ViewRequests));
    }
}
