//! Node group AMI release update orchestration.
//!
//! One invocation describes the node group, looks up the recommended release
//! for its Kubernetes version and starts a rolling update only when the two
//! release versions differ. Every failure ends the run with an [`Outcome`].

use crate::config::{Config, NodegroupTarget};
use crate::eks::{NodegroupApi, UpdateRequest};
use crate::error::ApiError;
use crate::observer::{UpdateEvent, UpdateObserver};
use crate::outcome::Outcome;
use crate::parameter::{recommended_release_parameter, resolve_family};
use crate::ssm::ParameterStore;

pub struct Updater<'a, N, P> {
    eks: &'a N,
    ssm: &'a P,
    observer: &'a dyn UpdateObserver,
}

impl<'a, N, P> Updater<'a, N, P>
where
    N: NodegroupApi,
    P: ParameterStore,
{
    pub fn new(eks: &'a N, ssm: &'a P, observer: &'a dyn UpdateObserver) -> Self {
        Self { eks, ssm, observer }
    }

    /// Validate the configuration, then run against the node group.
    ///
    /// Invalid configuration returns before any remote call.
    pub async fn run(&self, config: &Config) -> Outcome {
        match config.target() {
            Ok(target) => self.run_target(&target).await,
            Err(err) => self.fail(Outcome::from(err), "configuration".to_string()),
        }
    }

    pub async fn run_target(&self, target: &NodegroupTarget) -> Outcome {
        let cluster = target.cluster.as_str();
        let nodegroup = target.nodegroup.as_str();
        let context = format!("cluster={} nodegroup={}", cluster, nodegroup);

        self.observer.notify(&UpdateEvent::Describing {
            cluster: cluster.to_string(),
            nodegroup: nodegroup.to_string(),
        });

        let state = match self.eks.describe(cluster, nodegroup).await {
            Ok(state) => state,
            Err(err) => return self.fail(Outcome::from_api_error(&err, cluster, nodegroup), context),
        };
        let current = state.current_release();

        self.observer.notify(&UpdateEvent::Described {
            kubernetes_version: state.kubernetes_version.clone(),
            release_version: current.to_string(),
            ami_type: state.ami_type.clone(),
        });

        let Some(family) = resolve_family(&target.ami_family, state.ami_type.as_deref()) else {
            let ami_type = state.ami_type.as_deref().unwrap_or("unknown");
            return self.fail(
                Outcome::Unsupported {
                    kubernetes_version: state.kubernetes_version.clone(),
                    reason: format!("AMI type {} has no recommended release parameter", ami_type),
                },
                format!("{} ami_type={}", context, ami_type),
            );
        };

        let parameter = recommended_release_parameter(&state.kubernetes_version, family);
        self.observer.notify(&UpdateEvent::QueryingParameter {
            parameter: parameter.clone(),
        });

        let recommended = match self.ssm.lookup(&parameter).await {
            Ok(value) => value,
            Err(ApiError::ParameterNotFound(_)) => {
                return self.fail(
                    Outcome::Unsupported {
                        kubernetes_version: state.kubernetes_version.clone(),
                        reason: format!("SSM parameter {} not found", parameter),
                    },
                    format!("{} parameter={}", context, parameter),
                );
            }
            Err(err) => {
                return self.fail(
                    Outcome::from_api_error(&err, cluster, nodegroup),
                    format!("{} parameter={}", context, parameter),
                );
            }
        };

        self.observer.notify(&UpdateEvent::Recommended {
            release_version: recommended.clone(),
        });

        if current == recommended {
            self.observer.notify(&UpdateEvent::AlreadyLatest {
                release_version: recommended.clone(),
            });
            return Outcome::UpToDate {
                release_version: recommended,
            };
        }

        if target.dry_run {
            self.observer.notify(&UpdateEvent::DryRunSkipped {
                target_version: recommended.clone(),
            });
            return Outcome::UpdateAvailable {
                current_version: current.to_string(),
                target_version: recommended,
            };
        }

        self.observer.notify(&UpdateEvent::Updating {
            current_version: current.to_string(),
            target_version: recommended.clone(),
        });

        let request = UpdateRequest::non_disruptive(cluster, nodegroup, &recommended);
        match self.eks.update(&request).await {
            Ok(update_id) => {
                self.observer.notify(&UpdateEvent::UpdateStarted {
                    update_id: update_id.clone(),
                });
                Outcome::UpdateInitiated {
                    update_id,
                    target_version: recommended,
                }
            }
            Err(err) => self.fail(
                Outcome::from_api_error(&err, cluster, nodegroup),
                format!("{} target_version={}", context, recommended),
            ),
        }
    }

    fn fail(&self, outcome: Outcome, context: String) -> Outcome {
        self.observer.notify(&UpdateEvent::Failed {
            outcome: outcome.clone(),
            context,
        });
        outcome
    }
}
