//! EKS managed node group access.

mod client;

use async_trait::async_trait;

pub use client::EksClient;

use crate::error::ApiError;

/// Release version reported when the node group has none.
pub const UNKNOWN_RELEASE: &str = "unknown";

/// Node group state relevant to AMI release updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodegroupState {
    pub kubernetes_version: String,
    pub release_version: Option<String>,
    pub ami_type: Option<String>,
}

impl NodegroupState {
    /// Returns the current release version or "unknown" if not set.
    pub fn current_release(&self) -> &str {
        self.release_version.as_deref().unwrap_or(UNKNOWN_RELEASE)
    }
}

/// AMI release update for a managed node group.
///
/// Only the release version changes; the Kubernetes version is left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub cluster: String,
    pub nodegroup: String,
    pub release_version: String,
    /// Force replacement even when pods cannot be drained due to a
    /// PodDisruptionBudget.
    pub force: bool,
}

impl UpdateRequest {
    /// Rolling update that respects PodDisruptionBudgets.
    pub fn non_disruptive(cluster: &str, nodegroup: &str, release_version: &str) -> Self {
        Self {
            cluster: cluster.to_string(),
            nodegroup: nodegroup.to_string(),
            release_version: release_version.to_string(),
            force: false,
        }
    }
}

/// Cluster management operations used by the updater.
#[async_trait]
pub trait NodegroupApi: Send + Sync {
    async fn describe(&self, cluster: &str, nodegroup: &str) -> Result<NodegroupState, ApiError>;

    /// Start the update and return its id.
    async fn update(&self, request: &UpdateRequest) -> Result<String, ApiError>;
}
