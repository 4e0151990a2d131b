use std::{fmt::Display, net::Ipv4Addr, str::FromStr};

use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 2379;

/// A client endpoint of an etcd member, such as `http://10.0.0.1:2379`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub scheme: Scheme,
    host: url::Host,
    port: u16,
}

impl Address {
    pub fn is_tls(&self) -> bool {
        matches!(self.scheme, Scheme::Https)
    }
}

impl Default for Address {
    /// `http://127.0.0.1:2379`
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            host: url::Host::Ipv4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse url: {0}")]
    ParseError(#[from] url::ParseError),
    #[error("found an unsupported scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("host missing in url")]
    MissingHost,
}

impl TryFrom<&str> for Address {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(value)?;
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            e => return Err(Error::UnsupportedScheme(e.to_owned())),
        };
        let host = match url.host() {
            Some(h) => h.to_owned(),
            None => return Err(Error::MissingHost),
        };
        let port = url.port().unwrap_or(DEFAULT_PORT);
        Ok(Self { scheme, host, port })
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::try_from(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Http => "http",
                Self::Https => "https",
            }
        )
    }
}
