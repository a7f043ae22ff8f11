/// Role and resource permission checks
///
/// Two roles exist: `USER` and `ADMIN`. Admin-only operations (approving
/// tools, reading the contact inbox, dashboard stats) go through
/// [`require_admin`]; every check here runs before any state is touched.
///
/// # Example
///
/// ```
/// use toolshub_shared::auth::authorization::{require_admin, require_role};
/// use toolshub_shared::auth::middleware::AuthContext;
/// use toolshub_shared::models::user::Role;
/// use uuid::Uuid;
///
/// let user = AuthContext::new(Uuid::new_v4(), Role::User);
/// assert!(require_role(&user, Role::User).is_ok());
/// assert!(require_admin(&user).is_err());
/// ```

use uuid::Uuid;

use super::middleware::AuthContext;
use crate::models::{tool::Tool, user::Role};

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Caller's role is below the required one
    #[error("Insufficient permissions: requires {}, has {}", required.as_str(), actual.as_str())]
    InsufficientRole { required: Role, actual: Role },

    /// Caller doesn't own the resource
    #[error("Not authorized to access this resource")]
    NotAuthorized,
}

/// Checks that the caller holds `required` or a higher role
pub fn require_role(auth: &AuthContext, required: Role) -> Result<(), AuthzError> {
    if !auth.role.has_permission(&required) {
        return Err(AuthzError::InsufficientRole {
            required,
            actual: auth.role,
        });
    }

    Ok(())
}

pub fn require_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    require_role(auth, Role::Admin)
}

/// Checks that the caller is the resource owner or an admin
pub fn require_owner_or_admin(auth: &AuthContext, owner_id: Option<Uuid>) -> Result<(), AuthzError> {
    if auth.is_admin() || owner_id == Some(auth.user_id) {
        return Ok(());
    }

    Err(AuthzError::NotAuthorized)
}

/// Whether a caller may see a tool
///
/// Approved tools are public. Pending tools are visible to admins and to the
/// account that submitted them.
pub fn can_view_tool(auth: Option<&AuthContext>, tool: &Tool) -> bool {
    if tool.status().is_published() {
        return true;
    }

    auth.map(|auth| require_owner_or_admin(auth, tool.submitted_by).is_ok())
        .unwrap_or(false)
}
