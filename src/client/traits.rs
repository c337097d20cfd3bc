use async_trait::async_trait;
use thiserror::Error;

use crate::domain::*;

#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("login failed: {0}")]
    Login(String),
    #[error("request failed with status {0}")]
    Http(u16),
    #[error("server reported {} problem(s)", .0.len())]
    Api(Vec<String>),
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Expand this failure into the banner's message list: the server's
    /// structured problem list when it carries one, otherwise a single line
    /// derived from the transport failure. Callers replace their current
    /// list with the result, they never append.
    pub fn to_messages(&self) -> Vec<Message> {
        match self {
            Self::Api(problems) if !problems.is_empty() => {
                problems.iter().map(|p| Message::error(p.clone())).collect()
            }
            Self::Http(status) => vec![Message::error(status_text(*status))],
            other => vec![Message::error(other.to_string())],
        }
    }
}

fn status_text(status: u16) -> String {
    match status {
        401 => "Session expired, please log in again.".to_string(),
        403 => "Authorization error, try logging out and back in.".to_string(),
        404 => "Document not found.".to_string(),
        500..=599 => "Internal server error, check the server logs.".to_string(),
        other => format!("Request failed with status code {}", other),
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait UyuniClient: Send + Sync {
    /// Playbooks discovered under every playbook path of the control node.
    async fn discover_playbooks(&self, minion_server_id: i64) -> ClientResult<Vec<Playbook>>;

    async fn list_inventory_paths(&self, minion_server_id: i64)
        -> ClientResult<Vec<AnsiblePath>>;

    async fn playbook_contents(
        &self,
        path_id: i64,
        playbook_rel_path: &str,
    ) -> ClientResult<String>;

    /// Returns the id of the scheduled action.
    async fn schedule_playbook(&self, request: &ScheduleRequest) -> ClientResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    #[test]
    fn structured_problems_map_one_message_each() {
        let err = ClientError::Api(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        let messages = err.to_messages();
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.severity == Severity::Error));
        assert_eq!(messages[0].text, "a");
        assert_eq!(messages[2].text, "c");
    }

    #[test]
    fn empty_problem_list_falls_back_to_generic_text() {
        let messages = ClientError::Api(vec![]).to_messages();
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn http_status_maps_to_derived_text() {
        let messages = ClientError::Http(404).to_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Document not found.");

        let messages = ClientError::Http(503).to_messages();
        assert_eq!(messages[0].text, "Internal server error, check the server logs.");
    }
}
