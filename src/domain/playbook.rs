/// One configured Ansible path on a control node. Paths are either
/// inventory files or directories playbooks get discovered under; the
/// server reports both with the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiblePath {
    pub id: i64,
    pub minion_server_id: i64,
    pub path: String,
}

/// A playbook discovered under one of a control node's playbook paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playbook {
    /// File name relative to the owning path entry.
    pub name: String,
    pub full_path: String,
    /// Inventory pinned next to the playbook, if the directory carries one.
    pub custom_inventory: Option<String>,
    /// The path entry this playbook was discovered under.
    pub path: AnsiblePath,
}

impl Playbook {
    pub fn control_node_id(&self) -> i64 {
        self.path.minion_server_id
    }
}
