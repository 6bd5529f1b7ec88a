//! Host header to site resolution.

use std::collections::HashMap;
use thiserror::Error;

use crate::domain::entities::{Environment, LayoutKind, Site, SiteDescriptor, builtin_sites};
use crate::utils::extract_host::normalize_host;

/// Errors raised while building the host table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Hostname '{host}' is claimed by both {first} and {second}")]
    DuplicateHost {
        host: String,
        first: Site,
        second: Site,
    },

    #[error("Site {0} is registered more than once")]
    DuplicateSite(Site),

    #[error("Site {0} cannot be registered")]
    ReservedSite(Site),

    #[error("Default site {0} has no layout")]
    DefaultWithoutLayout(Site),
}

/// Maps `Host` header values to sites.
///
/// Built once from the per-site, per-environment host table and inverted
/// into a flat hostname lookup covering every environment. Immutable after
/// construction.
#[derive(Debug)]
pub struct HostResolver {
    descriptors: Vec<SiteDescriptor>,
    hosts: HashMap<String, Site>,
    default_site: Site,
    default_index: usize,
    default_layout: LayoutKind,
}

impl HostResolver {
    /// Builds a resolver from site descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a hostname belongs to two different
    /// sites, a site is listed twice, [`Site::Unknown`] is registered, or the
    /// default site has no layout.
    pub fn new(descriptors: Vec<SiteDescriptor>, default_site: Site) -> Result<Self, RegistryError> {
        let mut hosts: HashMap<String, Site> = HashMap::new();

        for (i, descriptor) in descriptors.iter().enumerate() {
            if descriptor.site == Site::Unknown {
                return Err(RegistryError::ReservedSite(Site::Unknown));
            }
            if descriptors[..i].iter().any(|d| d.site == descriptor.site) {
                return Err(RegistryError::DuplicateSite(descriptor.site));
            }

            for (_, host) in descriptor.hosts.iter() {
                let host = normalize_host(host);
                match hosts.get(&host) {
                    Some(&existing) if existing != descriptor.site => {
                        return Err(RegistryError::DuplicateHost {
                            host,
                            first: existing,
                            second: descriptor.site,
                        });
                    }
                    _ => {
                        hosts.insert(host, descriptor.site);
                    }
                }
            }
        }

        let (default_index, default_layout) = descriptors
            .iter()
            .enumerate()
            .find(|(_, d)| d.site == default_site)
            .and_then(|(i, d)| d.layout.map(|layout| (i, layout)))
            .ok_or(RegistryError::DefaultWithoutLayout(default_site))?;

        Ok(Self {
            descriptors,
            hosts,
            default_site,
            default_index,
            default_layout,
        })
    }

    /// Builds the resolver for the built-in site table with `Primary` as default.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(builtin_sites(), Site::Primary)
    }

    /// Resolves a raw host value to a site.
    ///
    /// Ports are ignored and matching is case-insensitive. Unmatched hosts
    /// log a warning and resolve to [`Site::Unknown`].
    pub fn resolve(&self, host: &str) -> Site {
        let host = normalize_host(host);

        match self.hosts.get(&host) {
            Some(&site) => site,
            None => {
                tracing::warn!("Unknown host: {}. Defaulting to {}", host, self.default_site);
                Site::Unknown
            }
        }
    }

    /// Resolves an optional host, treating a missing header as unknown.
    pub fn resolve_optional(&self, host: Option<&str>) -> Site {
        match host {
            Some(host) => self.resolve(host),
            None => {
                tracing::warn!("Missing Host header. Defaulting to {}", self.default_site);
                Site::Unknown
            }
        }
    }

    pub fn default_site(&self) -> Site {
        self.default_site
    }

    /// Descriptor of the default site, which always has a layout.
    pub fn default_descriptor(&self) -> &SiteDescriptor {
        &self.descriptors[self.default_index]
    }

    pub fn default_layout(&self) -> LayoutKind {
        self.default_layout
    }

    pub fn descriptor(&self, site: Site) -> Option<&SiteDescriptor> {
        self.descriptors.iter().find(|d| d.site == site)
    }

    pub fn descriptors(&self) -> &[SiteDescriptor] {
        &self.descriptors
    }

    /// Hostnames a site answers to in one environment.
    pub fn host_for(&self, site: Site, env: Environment) -> Option<&str> {
        self.descriptor(site).map(|d| d.hosts.for_env(env))
    }

    /// Number of distinct hostnames known to the resolver.
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{SiteHosts, SlotName};

    fn primary(hosts: SiteHosts) -> SiteDescriptor {
        SiteDescriptor::new(
            Site::Primary,
            "tr1p.io",
            hosts,
            Some(LayoutKind::Tr1p),
            Some(SlotName::Tr1pIo),
        )
    }

    #[test]
    fn test_resolves_every_configured_host() {
        let resolver = HostResolver::builtin().unwrap();

        for descriptor in builtin_sites() {
            for (_, host) in descriptor.hosts.iter() {
                assert_eq!(resolver.resolve(host), descriptor.site, "host {}", host);
            }
        }
    }

    #[test]
    fn test_resolve_ignores_port_and_case() {
        let resolver = HostResolver::builtin().unwrap();

        assert_eq!(resolver.resolve("tr1p.local:3000"), Site::Primary);
        assert_eq!(resolver.resolve("TR1P.IO"), Site::Primary);
        assert_eq!(resolver.resolve("gameraven.gg:443"), Site::GameRaven);
    }

    #[test]
    fn test_unknown_host_resolves_to_unknown() {
        let resolver = HostResolver::builtin().unwrap();

        assert_eq!(resolver.resolve("example.com"), Site::Unknown);
        assert_eq!(resolver.resolve(""), Site::Unknown);
        assert_eq!(resolver.resolve("[::1]:8080"), Site::Unknown);
        assert_eq!(resolver.resolve_optional(None), Site::Unknown);
        assert_eq!(resolver.default_site(), Site::Primary);
    }

    #[test]
    fn test_host_count_collapses_shared_env_hosts() {
        let resolver = HostResolver::builtin().unwrap();
        // tr1p.local and gameraven.local are shared by local and dev.
        assert_eq!(resolver.host_count(), 4);
        assert_eq!(
            resolver.host_for(Site::GameRaven, Environment::Dev),
            Some("gameraven.local")
        );
        assert_eq!(resolver.host_for(Site::Unknown, Environment::Dev), None);
    }

    #[test]
    fn test_duplicate_host_across_sites_is_rejected() {
        let sites = vec![
            primary(SiteHosts::new("shared.local", "tr1p.dev", "tr1p.io")),
            SiteDescriptor::new(
                Site::GameRaven,
                "gameraven.gg",
                SiteHosts::new("Shared.Local", "gameraven.dev", "gameraven.gg"),
                None,
                None,
            ),
        ];

        let err = HostResolver::new(sites, Site::Primary).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateHost {
                host: "shared.local".to_string(),
                first: Site::Primary,
                second: Site::GameRaven,
            }
        );
    }

    #[test]
    fn test_duplicate_site_is_rejected() {
        let sites = vec![
            primary(SiteHosts::new("a.local", "a.local", "a.io")),
            primary(SiteHosts::new("b.local", "b.local", "b.io")),
        ];

        assert_eq!(
            HostResolver::new(sites, Site::Primary).unwrap_err(),
            RegistryError::DuplicateSite(Site::Primary)
        );
    }

    #[test]
    fn test_default_site_must_have_layout() {
        let result = HostResolver::new(builtin_sites(), Site::GameRaven);
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DefaultWithoutLayout(Site::GameRaven)
        );

        let result = HostResolver::new(vec![], Site::Primary);
        assert!(result.is_err());
    }
}
