//! Role assignments and the privileged-role set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Roles a user can hold. A user may hold several at once.
///
/// Wire names and human labels are explicit per-variant mappings so that
/// every recognized role is a compile-time-checked value rather than a
/// runtime string transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Moderator,
    Admin,
    SystemAdmin,
}

impl Role {
    /// Roles protected by the last-holder safeguard.
    pub const PRIVILEGED: [Role; 2] = [Role::Admin, Role::SystemAdmin];

    /// Database/wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SystemAdmin => "system_admin",
        }
    }

    /// Human-readable label, used in safeguard messages.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Moderator => "Moderator",
            Role::Admin => "Admin",
            Role::SystemAdmin => "System Admin",
        }
    }

    /// Parse a database/wire name.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "member" => Some(Role::Member),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            "system_admin" => Some(Role::SystemAdmin),
            _ => None,
        }
    }

    /// Whether this role is subject to the last-holder safeguard.
    pub fn is_privileged(&self) -> bool {
        Role::PRIVILEGED.contains(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the guarded role-row deletion during account removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleGuardOutcome {
    /// All role rows removed; lists the roles the target held
    Deleted { roles: Vec<Role> },
    /// Target is the sole holder of a privileged role; nothing was changed
    Blocked { role: Role },
}
