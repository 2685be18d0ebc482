//! SSM parameter paths for recommended EKS optimized AMI releases.

/// Family value that derives the path segment from the node group AMI type.
pub const AUTO_FAMILY: &str = "auto";

const PARAMETER_PREFIX: &str = "/aws/service/eks/optimized-ami";

// EKS `amiType` -> public parameter family
const AMI_TYPE_FAMILIES: &[(&str, &str)] = &[
    ("AL2_x86_64", "amazon-linux-2"),
    ("AL2_x86_64_GPU", "amazon-linux-2-gpu"),
    ("AL2_ARM_64", "amazon-linux-2-arm64"),
    ("AL2023_x86_64_STANDARD", "amazon-linux-2023/x86_64/standard"),
    ("AL2023_ARM_64_STANDARD", "amazon-linux-2023/arm64/standard"),
    ("AL2023_x86_64_NVIDIA", "amazon-linux-2023/x86_64/nvidia"),
    ("AL2023_x86_64_NEURON", "amazon-linux-2023/x86_64/neuron"),
];

/// Parameter holding the recommended release version for a Kubernetes version.
pub fn recommended_release_parameter(kubernetes_version: &str, family: &str) -> String {
    format!(
        "{}/{}/{}/recommended/release_version",
        PARAMETER_PREFIX, kubernetes_version, family
    )
}

/// Parameter family for an EKS AMI type, if it has a public release parameter.
pub fn family_for_ami_type(ami_type: &str) -> Option<&'static str> {
    AMI_TYPE_FAMILIES
        .iter()
        .find(|(t, _)| *t == ami_type)
        .map(|(_, family)| *family)
}

/// Resolve the configured family against the node group AMI type.
///
/// Explicit families are used as-is. `auto` needs a known AMI type; `None`
/// means the node group has no public release parameter (custom AMI,
/// Bottlerocket, Windows).
pub fn resolve_family<'a>(configured: &'a str, ami_type: Option<&str>) -> Option<&'a str> {
    if configured != AUTO_FAMILY {
        return Some(configured);
    }
    ami_type.and_then(family_for_ami_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_release_parameter_default_family() {
        assert_eq!(
            recommended_release_parameter("1.26", "amazon-linux-2"),
            "/aws/service/eks/optimized-ami/1.26/amazon-linux-2/recommended/release_version"
        );
    }

    #[test]
    fn test_recommended_release_parameter_al2023() {
        assert_eq!(
            recommended_release_parameter("1.31", "amazon-linux-2023/arm64/standard"),
            "/aws/service/eks/optimized-ami/1.31/amazon-linux-2023/arm64/standard/recommended/release_version"
        );
    }

    #[test]
    fn test_family_for_known_ami_types() {
        assert_eq!(family_for_ami_type("AL2_x86_64"), Some("amazon-linux-2"));
        assert_eq!(family_for_ami_type("AL2_ARM_64"), Some("amazon-linux-2-arm64"));
        assert_eq!(
            family_for_ami_type("AL2023_x86_64_STANDARD"),
            Some("amazon-linux-2023/x86_64/standard")
        );
    }

    #[test]
    fn test_family_for_unsupported_ami_types() {
        assert_eq!(family_for_ami_type("CUSTOM"), None);
        assert_eq!(family_for_ami_type("BOTTLEROCKET_x86_64"), None);
        assert_eq!(family_for_ami_type("WINDOWS_CORE_2022_x86_64"), None);
        assert_eq!(family_for_ami_type("al2_x86_64"), None);
    }

    #[test]
    fn test_resolve_family_explicit_ignores_ami_type() {
        assert_eq!(
            resolve_family("amazon-linux-2", Some("CUSTOM")),
            Some("amazon-linux-2")
        );
        assert_eq!(resolve_family("amazon-linux-2-gpu", None), Some("amazon-linux-2-gpu"));
    }

    #[test]
    fn test_resolve_family_auto() {
        assert_eq!(
            resolve_family(AUTO_FAMILY, Some("AL2023_ARM_64_STANDARD")),
            Some("amazon-linux-2023/arm64/standard")
        );
        assert_eq!(resolve_family(AUTO_FAMILY, Some("CUSTOM")), None);
        assert_eq!(resolve_family(AUTO_FAMILY, None), None);
    }
}
