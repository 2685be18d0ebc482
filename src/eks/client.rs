use async_trait::async_trait;
use aws_sdk_eks::Client;
use tracing::debug;

use super::{NodegroupApi, NodegroupState, UpdateRequest};
use crate::error::ApiError;

/// EKS client wrapper for node group operations.
#[derive(Clone)]
pub struct EksClient {
    client: Client,
}

impl EksClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl NodegroupApi for EksClient {
    async fn describe(&self, cluster: &str, nodegroup: &str) -> Result<NodegroupState, ApiError> {
        debug!(
            cluster = %cluster,
            nodegroup = %nodegroup,
            api_action = "DescribeNodegroup",
            "Sending request to AWS EKS API"
        );

        let response = self
            .client
            .describe_nodegroup()
            .cluster_name(cluster)
            .nodegroup_name(nodegroup)
            .send()
            .await
            .map_err(ApiError::from_sdk)?;

        let ng = response.nodegroup().ok_or_else(|| {
            ApiError::Unexpected(format!("DescribeNodegroup returned no node group for {nodegroup}"))
        })?;

        let kubernetes_version = ng.version().ok_or_else(|| {
            ApiError::Unexpected(format!("Node group {nodegroup} has no Kubernetes version"))
        })?;

        Ok(NodegroupState {
            kubernetes_version: kubernetes_version.to_string(),
            release_version: ng.release_version().map(|s| s.to_string()),
            ami_type: ng.ami_type().map(|t| t.as_str().to_string()),
        })
    }

    async fn update(&self, request: &UpdateRequest) -> Result<String, ApiError> {
        debug!(
            cluster = %request.cluster,
            nodegroup = %request.nodegroup,
            release_version = %request.release_version,
            force = request.force,
            api_action = "UpdateNodegroupVersion",
            "Sending request to AWS EKS API"
        );

        let response = self
            .client
            .update_nodegroup_version()
            .cluster_name(&request.cluster)
            .nodegroup_name(&request.nodegroup)
            .release_version(&request.release_version)
            .force(request.force)
            .send()
            .await
            .map_err(ApiError::from_sdk)?;

        response
            .update()
            .and_then(|u| u.id())
            .map(|id| id.to_string())
            .ok_or_else(|| {
                ApiError::Unexpected("UpdateNodegroupVersion returned no update id".to_string())
            })
    }
}
