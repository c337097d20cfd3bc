use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::client::UyuniClient;
use crate::domain::{Playbook, ScheduleRequest};

#[derive(Debug)]
pub enum ApiRequest {
    LoadPlaybooks {
        minion_server_id: i64,
    },
    LoadScheduleForm {
        playbook: Playbook,
        generation: u64,
    },
    SchedulePlaybook {
        request: ScheduleRequest,
    },
}

#[derive(Clone)]
pub struct ApiHandle {
    tx: mpsc::UnboundedSender<ApiRequest>,
}

impl ApiHandle {
    pub fn send(&self, request: ApiRequest) {
        let _ = self.tx.send(request);
    }
}

pub struct ApiWorker {
    client: Arc<dyn UyuniClient>,
    rx: mpsc::UnboundedReceiver<ApiRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ApiWorker {
    pub fn new(
        client: Arc<dyn UyuniClient>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, ApiHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ApiHandle { tx };
        let worker = Self {
            client,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            self.process(request).await;
        }
    }

    async fn process(&self, request: ApiRequest) {
        match request {
            ApiRequest::LoadPlaybooks { minion_server_id } => {
                let result = self.client.discover_playbooks(minion_server_id).await;
                self.send(Action::PlaybooksLoaded(result));
            }
            ApiRequest::LoadScheduleForm {
                playbook,
                generation,
            } => {
                // Both fetches run concurrently and each reports as it
                // settles; neither failure cancels the other. The settled
                // marker is only sent once both are done.
                let inventories = async {
                    let result = self
                        .client
                        .list_inventory_paths(playbook.control_node_id())
                        .await
                        .map(|paths| paths.into_iter().map(|p| p.path).collect());
                    self.send(Action::InventoriesLoaded { generation, result });
                };
                let content = async {
                    let result = self
                        .client
                        .playbook_contents(playbook.path.id, &playbook.name)
                        .await;
                    self.send(Action::PlaybookContentLoaded { generation, result });
                };
                tokio::join!(inventories, content);
                self.send(Action::ScheduleFormSettled { generation });
            }
            ApiRequest::SchedulePlaybook { request } => {
                let result = self.client.schedule_playbook(&request).await;
                self.send(Action::ScheduleFinished(result));
            }
        }
    }

    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::client::{ClientError, ClientResult};
    use crate::domain::AnsiblePath;

    fn sample_playbook() -> Playbook {
        Playbook {
            name: "site.yml".to_string(),
            full_path: "/srv/playbooks/site.yml".to_string(),
            custom_inventory: None,
            path: AnsiblePath {
                id: 7,
                minion_server_id: 42,
                path: "/srv/playbooks".to_string(),
            },
        }
    }

    /// Inventory paths resolve immediately; playbook content blocks until
    /// released by the test.
    struct BlockingContentClient {
        release_content: Arc<Notify>,
    }

    #[async_trait]
    impl UyuniClient for BlockingContentClient {
        async fn discover_playbooks(&self, _: i64) -> ClientResult<Vec<Playbook>> {
            Ok(vec![])
        }

        async fn list_inventory_paths(&self, _: i64) -> ClientResult<Vec<AnsiblePath>> {
            Ok(vec![AnsiblePath {
                id: 1,
                minion_server_id: 42,
                path: "/etc/ansible/hosts".to_string(),
            }])
        }

        async fn playbook_contents(&self, _: i64, _: &str) -> ClientResult<String> {
            self.release_content.notified().await;
            Ok("---\n".to_string())
        }

        async fn schedule_playbook(&self, _: &ScheduleRequest) -> ClientResult<i64> {
            Ok(1)
        }
    }

    struct FailingInventoryClient;

    #[async_trait]
    impl UyuniClient for FailingInventoryClient {
        async fn discover_playbooks(&self, _: i64) -> ClientResult<Vec<Playbook>> {
            Ok(vec![])
        }

        async fn list_inventory_paths(&self, _: i64) -> ClientResult<Vec<AnsiblePath>> {
            Err(ClientError::Api(vec!["no inventory source".to_string()]))
        }

        async fn playbook_contents(&self, _: i64, _: &str) -> ClientResult<String> {
            Ok("---\n".to_string())
        }

        async fn schedule_playbook(&self, _: &ScheduleRequest) -> ClientResult<i64> {
            Ok(1)
        }
    }

    #[tokio::test]
    async fn settled_marker_waits_for_the_slower_fetch() {
        let release_content = Arc::new(Notify::new());
        let client = Arc::new(BlockingContentClient {
            release_content: release_content.clone(),
        });
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (worker, handle) = ApiWorker::new(client, action_tx);
        tokio::spawn(worker.run());

        handle.send(ApiRequest::LoadScheduleForm {
            playbook: sample_playbook(),
            generation: 1,
        });

        // The inventory fetch settles on its own while content is blocked.
        let first = action_rx.recv().await.expect("inventory action");
        assert!(matches!(
            first,
            Action::InventoriesLoaded {
                generation: 1,
                result: Ok(_)
            }
        ));
        assert!(action_rx.try_recv().is_err());

        release_content.notify_one();
        let second = action_rx.recv().await.expect("content action");
        assert!(matches!(
            second,
            Action::PlaybookContentLoaded {
                generation: 1,
                result: Ok(_)
            }
        ));
        let third = action_rx.recv().await.expect("settled action");
        assert!(matches!(third, Action::ScheduleFormSettled { generation: 1 }));
    }

    #[tokio::test]
    async fn one_fetch_failing_does_not_block_the_other() {
        let client = Arc::new(FailingInventoryClient);
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (worker, handle) = ApiWorker::new(client, action_tx);
        tokio::spawn(worker.run());

        handle.send(ApiRequest::LoadScheduleForm {
            playbook: sample_playbook(),
            generation: 3,
        });

        let mut saw_inventory_failure = false;
        let mut saw_content = false;
        loop {
            match action_rx.recv().await.expect("action") {
                Action::InventoriesLoaded {
                    generation: 3,
                    result: Err(_),
                } => saw_inventory_failure = true,
                Action::PlaybookContentLoaded {
                    generation: 3,
                    result: Ok(content),
                } => {
                    assert_eq!(content, "---\n");
                    saw_content = true;
                }
                Action::ScheduleFormSettled { generation: 3 } => break,
                other => panic!("unexpected action: {:?}", other),
            }
        }
        assert!(saw_inventory_failure);
        assert!(saw_content);
    }
}
