use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ClientError, ClientResult, UyuniClient};
use crate::domain::*;

/// Envelope every Uyuni API endpoint wraps its payload in. A 2xx response
/// with `success: false` carries the server's problem list in `messages`.
#[derive(Debug, Deserialize)]
struct JsonResult<T> {
    success: bool,
    #[serde(default)]
    messages: Vec<String>,
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnsiblePathJson {
    id: i64,
    minion_server_id: i64,
    path: String,
}

impl From<AnsiblePathJson> for AnsiblePath {
    fn from(json: AnsiblePathJson) -> Self {
        Self {
            id: json.id,
            minion_server_id: json.minion_server_id,
            path: json.path,
        }
    }
}

/// Discovery payload, keyed by the playbook's path-relative file name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaybookJson {
    full_path: String,
    #[serde(default)]
    custom_inventory: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaybookContentsRequest<'a> {
    path_id: i64,
    playbook_rel_path_str: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SchedulePlaybookRequest<'a> {
    playbook_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventory_path: Option<&'a str>,
    control_node_id: i64,
    earliest: String,
}

pub struct HttpUyuniClient {
    client: Client,
    base_url: String,
}

impl HttpUyuniClient {
    /// Log in and keep the session cookie for every later call.
    pub async fn connect(
        url: &str,
        user: &str,
        password: &str,
        insecure: bool,
    ) -> ClientResult<Self> {
        tracing::info!("Logging in to {} as {}", url, user);

        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(insecure)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Connection(format!("failed to build HTTP client: {}", e)))?;

        let this = Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        };

        let response = this
            .client
            .post(this.url("/rhn/manager/api/auth/login"))
            .json(&LoginRequest {
                login: user,
                password,
            })
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: JsonResult<serde_json::Value> = parse(response).await?;
        if !envelope.success {
            return Err(ClientError::Login(envelope.messages.join("; ")));
        }

        tracing::info!("Login succeeded");
        Ok(this)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        unwrap_data(parse(response).await?)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        unwrap_data(parse(response).await?)
    }
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<JsonResult<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Http(status.as_u16()));
    }
    response
        .json::<JsonResult<T>>()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

fn unwrap_data<T>(envelope: JsonResult<T>) -> ClientResult<T> {
    if !envelope.success {
        return Err(ClientError::Api(envelope.messages));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::Parse("response carried no data".to_string()))
}

fn transport_error(err: reqwest::Error) -> ClientError {
    match err.status() {
        Some(status) => ClientError::Http(status.as_u16()),
        None => ClientError::Connection(err.to_string()),
    }
}

#[async_trait]
impl UyuniClient for HttpUyuniClient {
    async fn discover_playbooks(&self, minion_server_id: i64) -> ClientResult<Vec<Playbook>> {
        let paths: Vec<AnsiblePathJson> = self
            .get(&format!(
                "/rhn/manager/api/systems/details/ansible/paths/playbook/{}",
                minion_server_id
            ))
            .await?;

        let mut playbooks = Vec::new();
        for path in paths {
            let discovered: BTreeMap<String, PlaybookJson> = self
                .get(&format!(
                    "/rhn/manager/api/systems/details/ansible/discover-playbooks/{}",
                    path.id
                ))
                .await?;
            let path = AnsiblePath::from(path);
            for (name, details) in discovered {
                playbooks.push(Playbook {
                    name,
                    full_path: details.full_path,
                    custom_inventory: details.custom_inventory,
                    path: path.clone(),
                });
            }
        }
        Ok(playbooks)
    }

    async fn list_inventory_paths(
        &self,
        minion_server_id: i64,
    ) -> ClientResult<Vec<AnsiblePath>> {
        let paths: Vec<AnsiblePathJson> = self
            .get(&format!(
                "/rhn/manager/api/systems/details/ansible/paths/inventory/{}",
                minion_server_id
            ))
            .await?;
        Ok(paths.into_iter().map(AnsiblePath::from).collect())
    }

    async fn playbook_contents(
        &self,
        path_id: i64,
        playbook_rel_path: &str,
    ) -> ClientResult<String> {
        self.post(
            "/rhn/manager/api/systems/details/ansible/paths/playbook-contents",
            &PlaybookContentsRequest {
                path_id,
                playbook_rel_path_str: playbook_rel_path,
            },
        )
        .await
    }

    async fn schedule_playbook(&self, request: &ScheduleRequest) -> ClientResult<i64> {
        self.post(
            "/rhn/manager/api/systems/details/ansible/schedule-playbook",
            &SchedulePlaybookRequest {
                playbook_path: &request.playbook_path,
                inventory_path: request.inventory_path.as_deref(),
                control_node_id: request.control_node_id,
                earliest: request.earliest.to_rfc3339(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> HttpUyuniClient {
        HttpUyuniClient {
            client: Client::new(),
            base_url: server.url(),
        }
    }

    #[tokio::test]
    async fn inventory_paths_unwrap_the_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/rhn/manager/api/systems/details/ansible/paths/inventory/42",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "data": [
                    {"id": 1, "minionServerId": 42, "path": "/etc/ansible/hosts", "type": "inventory"}
                ]}"#,
            )
            .create_async()
            .await;

        let paths = client_for(&server).list_inventory_paths(42).await.unwrap();
        assert_eq!(
            paths,
            vec![AnsiblePath {
                id: 1,
                minion_server_id: 42,
                path: "/etc/ansible/hosts".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn failed_envelope_surfaces_the_problem_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/rhn/manager/api/systems/details/ansible/paths/inventory/42",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "messages": ["minion not found"]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_inventory_paths(42)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api(problems) if problems == ["minion not found"]));
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/rhn/manager/api/systems/details/ansible/paths/inventory/42",
            )
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_inventory_paths(42)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Http(500)));
    }

    #[tokio::test]
    async fn schedule_request_omits_inventory_when_none_selected() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/rhn/manager/api/systems/details/ansible/schedule-playbook",
            )
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "playbookPath": "/srv/playbooks/site.yml",
                "controlNodeId": 42,
                "earliest": "2026-08-06T12:00:00+00:00"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "data": 9001}"#)
            .create_async()
            .await;

        let request = ScheduleRequest {
            playbook_path: "/srv/playbooks/site.yml".to_string(),
            inventory_path: None,
            control_node_id: 42,
            earliest: chrono::Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
        };
        let action_id = client_for(&server)
            .schedule_playbook(&request)
            .await
            .unwrap();
        assert_eq!(action_id, 9001);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn playbook_contents_posts_path_id_and_relative_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/rhn/manager/api/systems/details/ansible/paths/playbook-contents",
            )
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "pathId": 7,
                "playbookRelPathStr": "site.yml"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "data": "---\n- hosts: all\n"}"#)
            .create_async()
            .await;

        let content = client_for(&server)
            .playbook_contents(7, "site.yml")
            .await
            .unwrap();
        assert_eq!(content, "---\n- hosts: all\n");
        mock.assert_async().await;
    }
}
