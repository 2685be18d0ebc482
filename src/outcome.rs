//! Terminal outcomes of one updater invocation.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{ApiError, ConfigError};

/// Result of a single invocation. Exactly one is produced per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ConfigInvalid {
        missing: Vec<&'static str>,
    },
    UpToDate {
        release_version: String,
    },
    UpdateInitiated {
        update_id: String,
        target_version: String,
    },
    /// Dry run with a newer release available.
    UpdateAvailable {
        current_version: String,
        target_version: String,
    },
    NotFound {
        cluster: String,
        nodegroup: String,
    },
    Unsupported {
        kubernetes_version: String,
        reason: String,
    },
    TransientOrInputError {
        code: String,
        message: String,
    },
    UnexpectedError {
        message: String,
    },
}

/// Response document written to stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

impl Outcome {
    /// Classify a node group API failure for the given node group.
    pub fn from_api_error(err: &ApiError, cluster: &str, nodegroup: &str) -> Self {
        match err {
            ApiError::NotFound(_) => Self::NotFound {
                cluster: cluster.to_string(),
                nodegroup: nodegroup.to_string(),
            },
            ApiError::Unexpected(message) => Self::UnexpectedError {
                message: message.clone(),
            },
            other => Self::TransientOrInputError {
                code: other.code().unwrap_or("Unknown").to_string(),
                message: other.message().to_string(),
            },
        }
    }

    /// Short machine-readable name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigInvalid { .. } => "ConfigInvalid",
            Self::UpToDate { .. } => "UpToDate",
            Self::UpdateInitiated { .. } => "UpdateInitiated",
            Self::UpdateAvailable { .. } => "UpdateAvailable",
            Self::NotFound { .. } => "NotFound",
            Self::Unsupported { .. } => "Unsupported",
            Self::TransientOrInputError { .. } => "TransientOrInputError",
            Self::UnexpectedError { .. } => "UnexpectedError",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::UpToDate { .. } | Self::UpdateInitiated { .. } | Self::UpdateAvailable { .. } => {
                200
            }
            Self::ConfigInvalid { .. } | Self::Unsupported { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::TransientOrInputError { code, .. } if code == "InvalidParameterException" => 400,
            Self::TransientOrInputError { .. } | Self::UnexpectedError { .. } => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code() < 400
    }

    pub fn message(&self) -> String {
        match self {
            Self::ConfigInvalid { missing } => {
                ConfigError::MissingFields(missing.clone()).to_string()
            }
            Self::UpToDate { .. } => "Node group is up to date".to_string(),
            Self::UpdateInitiated { target_version, .. } => format!(
                "Node group update initiated to AMI release version {}",
                target_version
            ),
            Self::UpdateAvailable { target_version, .. } => format!(
                "Dry run: node group would be updated to AMI release version {}",
                target_version
            ),
            Self::NotFound { cluster, nodegroup } => {
                format!("Cluster {} or node group {} not found", cluster, nodegroup)
            }
            Self::Unsupported {
                kubernetes_version, ..
            } => format!("No AMI found for Kubernetes version {}", kubernetes_version),
            Self::TransientOrInputError { code, message } => {
                if code == "InvalidParameterException" {
                    format!("Invalid parameters: {}", message)
                } else {
                    format!("Error updating node group: {}", message)
                }
            }
            Self::UnexpectedError { message } => format!("Unexpected error: {}", message),
        }
    }

    /// Response body: a message plus the outcome payload.
    pub fn body(&self) -> Value {
        let mut body = json!({
            "outcome": self.kind(),
            "message": self.message(),
        });

        let payload = match self {
            Self::ConfigInvalid { missing } => json!({ "missing": missing }),
            Self::UpToDate { release_version } => json!({ "releaseVersion": release_version }),
            Self::UpdateInitiated {
                update_id,
                target_version,
            } => json!({ "updateId": update_id, "targetVersion": target_version }),
            Self::UpdateAvailable {
                current_version,
                target_version,
            } => json!({ "currentVersion": current_version, "targetVersion": target_version }),
            Self::NotFound { cluster, nodegroup } => {
                json!({ "clusterName": cluster, "nodegroupName": nodegroup })
            }
            Self::Unsupported {
                kubernetes_version,
                reason,
            } => json!({ "kubernetesVersion": kubernetes_version, "reason": reason }),
            Self::TransientOrInputError { code, .. } => json!({ "errorCode": code }),
            Self::UnexpectedError { .. } => json!({}),
        };

        if let (Value::Object(body), Value::Object(payload)) = (&mut body, payload) {
            body.extend(payload);
        }
        body
    }

    pub fn to_response(&self) -> Response {
        Response {
            status_code: self.status_code(),
            body: self.body(),
        }
    }
}

impl From<ConfigError> for Outcome {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingFields(missing) => Self::ConfigInvalid { missing },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (Outcome::ConfigInvalid { missing: vec!["CLUSTER_NAME"] }, 400),
            (
                Outcome::UpToDate {
                    release_version: "1.26.12-20240329".to_string(),
                },
                200,
            ),
            (
                Outcome::NotFound {
                    cluster: "prod".to_string(),
                    nodegroup: "workers".to_string(),
                },
                404,
            ),
            (
                Outcome::Unsupported {
                    kubernetes_version: "1.19".to_string(),
                    reason: "no parameter".to_string(),
                },
                400,
            ),
            (
                Outcome::TransientOrInputError {
                    code: "InvalidParameterException".to_string(),
                    message: "bad".to_string(),
                },
                400,
            ),
            (
                Outcome::TransientOrInputError {
                    code: "ServerException".to_string(),
                    message: "boom".to_string(),
                },
                500,
            ),
            (
                Outcome::UnexpectedError {
                    message: "timeout".to_string(),
                },
                500,
            ),
        ];

        for (outcome, expected) in cases {
            assert_eq!(outcome.status_code(), expected, "{}", outcome.kind());
        }
    }

    #[test]
    fn test_from_api_error_not_found() {
        let err = ApiError::NotFound("No node group found for name: workers".to_string());
        assert_eq!(
            Outcome::from_api_error(&err, "prod", "workers"),
            Outcome::NotFound {
                cluster: "prod".to_string(),
                nodegroup: "workers".to_string(),
            }
        );
    }

    #[test]
    fn test_from_api_error_invalid_parameter() {
        let err = ApiError::InvalidParameter("launch template with custom AMI".to_string());
        let outcome = Outcome::from_api_error(&err, "prod", "workers");
        assert_eq!(outcome.status_code(), 400);
        assert_eq!(
            outcome.message(),
            "Invalid parameters: launch template with custom AMI"
        );
    }

    #[test]
    fn test_from_api_error_unexpected() {
        let err = ApiError::Unexpected("dispatch failure".to_string());
        let outcome = Outcome::from_api_error(&err, "prod", "workers");
        assert_eq!(outcome.kind(), "UnexpectedError");
        assert_eq!(outcome.message(), "Unexpected error: dispatch failure");
    }

    #[test]
    fn test_update_initiated_response() {
        let outcome = Outcome::UpdateInitiated {
            update_id: "b4f8c6a2-1d3e-4f5a-9b7c-0e2d4f6a8b1c".to_string(),
            target_version: "1.26.12-20240329".to_string(),
        };
        let response = serde_json::to_value(outcome.to_response()).unwrap();

        assert_eq!(response["statusCode"], 200);
        assert_eq!(response["body"]["outcome"], "UpdateInitiated");
        assert_eq!(
            response["body"]["updateId"],
            "b4f8c6a2-1d3e-4f5a-9b7c-0e2d4f6a8b1c"
        );
        assert_eq!(response["body"]["targetVersion"], "1.26.12-20240329");
        assert_eq!(
            response["body"]["message"],
            "Node group update initiated to AMI release version 1.26.12-20240329"
        );
    }

    #[test]
    fn test_config_invalid_from_config_error() {
        let outcome = Outcome::from(ConfigError::MissingFields(vec!["NODEGROUP_NAME"]));
        let body = outcome.body();
        assert_eq!(body["missing"], json!(["NODEGROUP_NAME"]));
        assert!(!outcome.is_success());
    }
}
