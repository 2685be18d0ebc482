//! CLI configuration and validation.

use clap::Parser;

use crate::error::ConfigError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COMMIT: &str = env!("BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Fallback region when `AWS_REGION` is unset or empty.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Parameter store family used when none is configured.
pub const DEFAULT_AMI_FAMILY: &str = "amazon-linux-2";

/// Keep an EKS managed node group on the latest recommended AMI release.
///
/// Runs once: compares the node group release version with the recommended
/// release published in SSM Parameter Store and starts a rolling update when
/// they differ.
#[derive(Parser, Debug, Clone)]
#[command(name = "ngup")]
#[command(about = "Keep EKS managed node groups on the latest recommended AMI release")]
#[command(version = const_format::formatcp!(
    "{} (commit: {}, build date: {})",
    VERSION, COMMIT, BUILD_DATE
))]
pub struct Config {
    /// EKS cluster name
    #[arg(long, env = "CLUSTER_NAME")]
    pub cluster_name: Option<String>,

    /// Managed node group name
    #[arg(long, env = "NODEGROUP_NAME")]
    pub nodegroup_name: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// AMI family path segment (e.g. amazon-linux-2023/x86_64/standard), or "auto"
    #[arg(long, env = "AMI_FAMILY", default_value = DEFAULT_AMI_FAMILY)]
    pub ami_family: String,

    /// Report the available update without starting it
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Log format: json or pretty
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Validated node group coordinates for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodegroupTarget {
    pub cluster: String,
    pub nodegroup: String,
    pub ami_family: String,
    pub dry_run: bool,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Region with the fallback applied. Never empty.
    pub fn region(&self) -> &str {
        non_blank(Some(&self.region)).unwrap_or(DEFAULT_REGION)
    }

    /// Validate required values and build the invocation target.
    pub fn target(&self) -> Result<NodegroupTarget, ConfigError> {
        let cluster = non_blank(self.cluster_name.as_ref());
        let nodegroup = non_blank(self.nodegroup_name.as_ref());

        let mut missing = Vec::new();
        if cluster.is_none() {
            missing.push("CLUSTER_NAME");
        }
        if nodegroup.is_none() {
            missing.push("NODEGROUP_NAME");
        }

        match (cluster, nodegroup) {
            (Some(cluster), Some(nodegroup)) => Ok(NodegroupTarget {
                cluster: cluster.to_string(),
                nodegroup: nodegroup.to_string(),
                ami_family: non_blank(Some(&self.ami_family))
                    .unwrap_or(DEFAULT_AMI_FAMILY)
                    .to_string(),
                dry_run: self.dry_run,
            }),
            _ => Err(ConfigError::MissingFields(missing)),
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config(cluster: Option<&str>, nodegroup: Option<&str>, region: &str) -> Config {
        Config {
            cluster_name: cluster.map(String::from),
            nodegroup_name: nodegroup.map(String::from),
            region: region.to_string(),
            ami_family: DEFAULT_AMI_FAMILY.to_string(),
            dry_run: false,
            log_format: "json".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_target_valid() {
        let config = create_test_config(Some("prod"), Some("workers"), "ap-northeast-2");
        let target = config.target().unwrap();
        assert_eq!(target.cluster, "prod");
        assert_eq!(target.nodegroup, "workers");
        assert_eq!(config.region(), "ap-northeast-2");
        assert_eq!(target.ami_family, "amazon-linux-2");
        assert!(!target.dry_run);
    }

    #[test]
    fn test_target_missing_cluster() {
        let config = create_test_config(None, Some("workers"), DEFAULT_REGION);
        assert_eq!(
            config.target(),
            Err(ConfigError::MissingFields(vec!["CLUSTER_NAME"]))
        );
    }

    #[test]
    fn test_target_missing_both() {
        let config = create_test_config(None, None, DEFAULT_REGION);
        assert_eq!(
            config.target(),
            Err(ConfigError::MissingFields(vec![
                "CLUSTER_NAME",
                "NODEGROUP_NAME"
            ]))
        );
    }

    #[test]
    fn test_target_blank_values_are_missing() {
        let config = create_test_config(Some(""), Some("   "), DEFAULT_REGION);
        assert_eq!(
            config.target(),
            Err(ConfigError::MissingFields(vec![
                "CLUSTER_NAME",
                "NODEGROUP_NAME"
            ]))
        );
    }

    #[test]
    fn test_empty_region_falls_back() {
        let config = create_test_config(Some("prod"), Some("workers"), "");
        assert_eq!(config.region(), DEFAULT_REGION);
        assert!(config.target().is_ok());
    }

    #[test]
    fn test_blank_ami_family_falls_back() {
        let mut config = create_test_config(Some("prod"), Some("workers"), DEFAULT_REGION);
        config.ami_family = " ".to_string();
        assert_eq!(config.target().unwrap().ami_family, DEFAULT_AMI_FAMILY);
    }

    #[test]
    fn test_parse_flags() {
        let config = Config::parse_from([
            "ngup",
            "--cluster-name",
            "prod",
            "--nodegroup-name",
            "workers",
            "--region",
            "eu-west-1",
            "--ami-family",
            "auto",
            "--dry-run",
        ]);
        let target = config.target().unwrap();
        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(target.ami_family, "auto");
        assert!(target.dry_run);
    }
}
