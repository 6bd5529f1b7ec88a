//! Site (tenant) entities and the static host table.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A logical site served by this deployment.
///
/// Sites are distinguished by the `Host` header of the incoming request.
/// [`Site::Unknown`] marks a host that matched no registered site; it is
/// never an error and callers fall back to the default site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    /// The tr1p.io portfolio.
    Primary,
    /// gameraven.gg. Registered, but ships no layout of its own.
    GameRaven,
    Unknown,
}

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Primary => "tr1p.io",
            Site::GameRaven => "gameraven.gg",
            Site::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment environment a hostname belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Local, Environment::Dev, Environment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Top-level page shell a site renders inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Gradient shell with the tr1p.io navbar and footer.
    Tr1p,
}

/// Named page region a site fills with its own content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Tr1pIo,
}

/// Hostnames a site answers to, one per environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteHosts {
    pub local: String,
    pub dev: String,
    pub prod: String,
}

impl SiteHosts {
    pub fn new(local: &str, dev: &str, prod: &str) -> Self {
        Self {
            local: local.to_string(),
            dev: dev.to_string(),
            prod: prod.to_string(),
        }
    }

    pub fn for_env(&self, env: Environment) -> &str {
        match env {
            Environment::Local => &self.local,
            Environment::Dev => &self.dev,
            Environment::Prod => &self.prod,
        }
    }

    /// All `(environment, hostname)` pairs, including repeats across environments.
    pub fn iter(&self) -> impl Iterator<Item = (Environment, &str)> {
        Environment::ALL
            .into_iter()
            .map(move |env| (env, self.for_env(env)))
    }
}

/// Static description of a site.
///
/// A site without a `layout` is still recognized by the resolver, but the
/// layout selector renders it with the default site's shell.
#[derive(Debug, Clone)]
pub struct SiteDescriptor {
    pub site: Site,
    pub canonical_name: String,
    pub hosts: SiteHosts,
    pub layout: Option<LayoutKind>,
    pub slot: Option<SlotName>,
}

impl SiteDescriptor {
    pub fn new(
        site: Site,
        canonical_name: &str,
        hosts: SiteHosts,
        layout: Option<LayoutKind>,
        slot: Option<SlotName>,
    ) -> Self {
        Self {
            site,
            canonical_name: canonical_name.to_string(),
            hosts,
            layout,
            slot,
        }
    }
}

/// The built-in site table.
pub fn builtin_sites() -> Vec<SiteDescriptor> {
    vec![
        SiteDescriptor::new(
            Site::Primary,
            "tr1p.io",
            SiteHosts::new("tr1p.local", "tr1p.local", "tr1p.io"),
            Some(LayoutKind::Tr1p),
            Some(SlotName::Tr1pIo),
        ),
        SiteDescriptor::new(
            Site::GameRaven,
            "gameraven.gg",
            SiteHosts::new("gameraven.local", "gameraven.local", "gameraven.gg"),
            None,
            None,
        ),
    ]
}
