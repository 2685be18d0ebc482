//! SSM Parameter Store lookups.

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use tracing::debug;

use crate::error::ApiError;

/// Read-only parameter registry.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Value of the named parameter. A missing parameter is
    /// `ApiError::ParameterNotFound`.
    async fn lookup(&self, name: &str) -> Result<String, ApiError>;
}

/// SSM client wrapper for parameter lookups.
#[derive(Clone)]
pub struct SsmClient {
    client: Client,
}

impl SsmClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmClient {
    async fn lookup(&self, name: &str) -> Result<String, ApiError> {
        debug!(
            parameter = %name,
            api_action = "GetParameter",
            "Sending request to AWS SSM API"
        );

        let response = self
            .client
            .get_parameter()
            .name(name)
            .send()
            .await
            .map_err(ApiError::from_sdk)?;

        response
            .parameter()
            .and_then(|p| p.value())
            .map(|v| v.to_string())
            .ok_or_else(|| ApiError::Unexpected(format!("Parameter {name} has no value")))
    }
}
