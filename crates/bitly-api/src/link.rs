//! Bitlink references: the `{domain, hash}` pair Bitly uses to address a
//! shortened link.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Domain assumed when a link is given as a bare hash.
pub const DEFAULT_DOMAIN: &str = "bit.ly";

/// A bitlink, addressed by domain and hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkReference {
    pub domain: String,
    pub hash: String,
}

impl LinkReference {
    pub fn new(domain: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            hash: hash.into(),
        }
    }

    /// Split a link string into domain and hash.
    ///
    /// Anything containing `/` is read as a path: the last segment is the
    /// hash and the one before it the domain, so `https://bit.ly/493eBBU`,
    /// `bit.ly/493eBBU` and the `id` returned by the shorten endpoint all
    /// resolve the same way. Without a `/` the whole input is the hash on
    /// [`DEFAULT_DOMAIN`].
    ///
    /// The input must be non-empty. Domain and hash are not validated.
    pub fn parse(link: &str) -> Self {
        let mut segments = link.rsplit('/');
        match (segments.next(), segments.next()) {
            (Some(hash), Some(domain)) => Self::new(domain, hash),
            _ => Self::new(DEFAULT_DOMAIN, link),
        }
    }
}

impl FromStr for LinkReference {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Renders as the bitlink id form, `domain/hash`.
impl fmt::Display for LinkReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.hash)
    }
}
