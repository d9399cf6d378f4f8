//! Resource and release skip rules.

use crate::analyzer::images::parser::helm::ReleaseInfo;
use crate::analyzer::images::types::SkipRule;
use crate::error::{ImagesError, Result};

/// Whether a resource is excluded by any skip rule.
///
/// Both kind and name must match; comparison is case-insensitive.
pub fn should_skip(rules: &[SkipRule], kind: &str, name: &str) -> bool {
    match rules.iter().find(|rule| rule.matches(kind, name)) {
        Some(_) => {
            log::debug!("skipping '{}' bearing name '{}' since it is set to skip", kind, name);
            true
        }
        None => false,
    }
}

/// A release excluded from the `all` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSkip {
    pub name: String,
    pub namespace: String,
}

impl ReleaseSkip {
    /// Parse a `NAME=NAMESPACE` operator value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.split_once('=') {
            Some((name, namespace)) if !name.is_empty() && !namespace.is_empty() => Ok(Self {
                name: name.to_string(),
                namespace: namespace.to_string(),
            }),
            _ => Err(ImagesError::InvalidReleaseSkip(value.to_string())),
        }
    }

    pub fn matches(&self, release: &ReleaseInfo) -> bool {
        self.name == release.name && self.namespace == release.namespace
    }
}

/// Drop releases matched by any skip.
pub fn filter_releases(releases: Vec<ReleaseInfo>, skips: &[ReleaseSkip]) -> Vec<ReleaseInfo> {
    releases
        .into_iter()
        .filter(|release| {
            let skipped = skips.iter().any(|skip| skip.matches(release));
            if skipped {
                log::debug!(
                    "skipping release '{}' of namespace '{}'",
                    release.name,
                    release.namespace
                );
            }
            !skipped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_requires_kind_and_name() {
        let rules = vec![SkipRule::new("deployment", "web")];
        assert!(should_skip(&rules, "Deployment", "WEB"));
        assert!(!should_skip(&rules, "StatefulSet", "web"));
        assert!(!should_skip(&rules, "Deployment", "api"));
        assert!(!should_skip(&[], "Deployment", "web"));
    }

    #[test]
    fn test_release_skip() {
        let skip = ReleaseSkip::parse("traefik=kube-system").unwrap();
        let releases = vec![
            ReleaseInfo { name: "traefik".into(), namespace: "kube-system".into() },
            ReleaseInfo { name: "traefik".into(), namespace: "edge".into() },
        ];
        let kept = filter_releases(releases, &[skip]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].namespace, "edge");

        assert!(ReleaseSkip::parse("traefik").is_err());
        assert!(ReleaseSkip::parse("traefik=").is_err());
    }
}
