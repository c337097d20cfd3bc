use chrono::{DateTime, Utc};

/// The outbound payload committing a playbook to run at or after `earliest`.
///
/// `inventory_path` stays `None` when the user made no selection; the server
/// falls back to the playbook's default inventory in that case, so this is a
/// valid submission, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub playbook_path: String,
    pub inventory_path: Option<String>,
    pub control_node_id: i64,
    pub earliest: DateTime<Utc>,
}
