//! Audit log models.
//!
//! Entries are append-only. Every authorization decision and every terminal
//! outcome of a sensitive operation produces exactly one entry.

use uuid::Uuid;

/// Recognized audit action tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    DeleteUserDenied,
    DeleteUserSuccess,
}

impl AuditAction {
    /// Stable tag stored in the audit log.
    pub fn tag(&self) -> &'static str {
        match self {
            AuditAction::DeleteUserDenied => "DELETE_USER_DENIED",
            AuditAction::DeleteUserSuccess => "DELETE_USER_SUCCESS",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A new audit entry ready to be recorded.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    /// Who performed (or attempted) the action
    pub actor_id: Uuid,
    pub action: AuditAction,
    pub resource_type: &'static str,
    pub resource_id: String,
    /// Free-form detail map
    pub details: serde_json::Value,
}

impl NewAuditEntry {
    /// Entry for a user-targeting action.
    pub fn for_user(
        actor_id: Uuid,
        action: AuditAction,
        target: Uuid,
        details: serde_json::Value,
    ) -> Self {
        Self {
            actor_id,
            action,
            resource_type: "user",
            resource_id: target.to_string(),
            details,
        }
    }
}
