//! Progress events emitted by the updater.
//!
//! The updater reports through an injected [`UpdateObserver`] instead of
//! calling the logger directly, so tests can capture events without a global
//! subscriber.

use tracing::{error, info, warn};

use crate::outcome::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    Describing {
        cluster: String,
        nodegroup: String,
    },
    Described {
        kubernetes_version: String,
        release_version: String,
        ami_type: Option<String>,
    },
    QueryingParameter {
        parameter: String,
    },
    Recommended {
        release_version: String,
    },
    AlreadyLatest {
        release_version: String,
    },
    Updating {
        current_version: String,
        target_version: String,
    },
    UpdateStarted {
        update_id: String,
    },
    DryRunSkipped {
        target_version: String,
    },
    Failed {
        outcome: Outcome,
        context: String,
    },
}

pub trait UpdateObserver: Send + Sync {
    fn notify(&self, event: &UpdateEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl UpdateObserver for TracingObserver {
    fn notify(&self, event: &UpdateEvent) {
        match event {
            UpdateEvent::Describing { cluster, nodegroup } => info!(
                cluster = %cluster,
                nodegroup = %nodegroup,
                "Describing node group"
            ),
            UpdateEvent::Described {
                kubernetes_version,
                release_version,
                ami_type,
            } => info!(
                kubernetes_version = %kubernetes_version,
                release_version = %release_version,
                ami_type = ami_type.as_deref().unwrap_or("unknown"),
                "Fetched node group versions"
            ),
            UpdateEvent::QueryingParameter { parameter } => {
                info!(parameter = %parameter, "Querying SSM parameter")
            }
            UpdateEvent::Recommended { release_version } => info!(
                release_version = %release_version,
                "Fetched latest recommended AMI release version"
            ),
            UpdateEvent::AlreadyLatest { release_version } => info!(
                release_version = %release_version,
                "Node group is already using the latest AMI release version"
            ),
            UpdateEvent::Updating {
                current_version,
                target_version,
            } => info!(
                current_version = %current_version,
                target_version = %target_version,
                force = false,
                "Updating node group AMI release version"
            ),
            UpdateEvent::UpdateStarted { update_id } => {
                info!(update_id = %update_id, "Node group update initiated")
            }
            UpdateEvent::DryRunSkipped { target_version } => warn!(
                target_version = %target_version,
                "DRY RUN: would update node group (no action taken)"
            ),
            UpdateEvent::Failed { outcome, context } => error!(
                outcome = outcome.kind(),
                status_code = outcome.status_code(),
                context = %context,
                "{}",
                outcome.message()
            ),
        }
    }
}
