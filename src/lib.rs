//! ngup - keep EKS managed node groups on the latest recommended AMI release.
//!
//! Each run:
//! - describes the node group (Kubernetes version, release version, AMI type)
//! - reads the recommended release from the public SSM parameter for that version
//! - starts a rolling `UpdateNodegroupVersion` with `force = false` when they differ

pub mod config;
pub mod eks;
pub mod error;
pub mod logging;
pub mod observer;
pub mod outcome;
pub mod parameter;
pub mod ssm;
pub mod updater;
