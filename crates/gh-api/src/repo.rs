//! Repository references (`[HOST/]OWNER/REPO`).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Host used when a reference does not name one.
pub const DEFAULT_HOST: &str = "github.com";

/// A repository on a specific GitHub host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    host: String,
    owner: String,
    name: String,
}

impl RepoRef {
    /// Creates a reference on the default host.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_host(DEFAULT_HOST, owner, name)
    }

    /// Creates a reference on the given host. The host is lowercased.
    pub fn with_host(
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into().to_ascii_lowercase(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `https://<host>/<owner>/<name>`.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(Error::InvalidRepo(s.to_string()));
        }
        match parts.as_slice() {
            [owner, name] => Ok(Self::new(*owner, *name)),
            [host, owner, name] => Ok(Self::with_host(*host, *owner, *name)),
            _ => Err(Error::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host == DEFAULT_HOST {
            write!(f, "{}/{}", self.owner, self.name)
        } else {
            write!(f, "{}/{}/{}", self.host, self.owner, self.name)
        }
    }
}
