//! Database operations for the audit log.

use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entity::audit_log;
use crate::error::AppResult;
use crate::models::NewAuditEntry;

/// Append an audit entry. Rows are never updated or deleted here.
pub async fn insert(db: &DatabaseConnection, entry: &NewAuditEntry) -> AppResult<()> {
    let model = audit_log::ActiveModel {
        user_id: Set(Some(entry.actor_id)),
        action: Set(entry.action.tag().to_string()),
        resource_type: Set(entry.resource_type.to_string()),
        resource_id: Set(Some(entry.resource_id.clone())),
        details: Set(Some(entry.details.clone())),
        ..Default::default()
    };

    audit_log::Entity::insert(model).exec(db).await?;

    Ok(())
}
