//! Fire-and-forget audit recording.

use tracing::error;

use crate::models::NewAuditEntry;
use crate::store::Store;

/// Record an audit entry without letting a failed write change the outcome
/// of the operation it describes. Failures surface in operational logs only.
pub async fn record(store: &dyn Store, entry: NewAuditEntry) {
    if let Err(e) = store.record_audit(&entry).await {
        error!(
            action = %entry.action,
            resource_type = entry.resource_type,
            resource_id = %entry.resource_id,
            "Failed to write audit entry: {}",
            e
        );
    }
}
