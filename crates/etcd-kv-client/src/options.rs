use std::{path::PathBuf, time::Duration};

use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tracing::debug;

use crate::address::Address;
use crate::Error;
use crate::Result;

/// How to reach the cluster.
#[derive(Debug, Clone, clap::Args)]
pub struct ClientOptions {
    /// Client urls of the cluster members.
    #[clap(long, default_value = "http://127.0.0.1:2379", value_delimiter = ',')]
    pub endpoints: Vec<Address>,

    /// CA certificate used to verify https endpoints.
    #[clap(long)]
    pub cacert: Option<PathBuf>,

    #[clap(long, default_value = "5000")]
    pub connect_timeout_ms: u64,

    /// Duration of a request before it times out, in milliseconds. Watches
    /// are not affected.
    #[clap(long, default_value = "10000")]
    pub timeout_ms: u64,

    /// Interval between http2 keep-alive pings, disabled when absent.
    #[clap(long)]
    pub keep_alive_interval_ms: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoints: vec![Address::default()],
            cacert: None,
            connect_timeout_ms: 5000,
            timeout_ms: 10000,
            keep_alive_interval_ms: None,
        }
    }
}

impl ClientOptions {
    pub fn with_endpoints(mut self, endpoints: Vec<Address>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    async fn endpoints(&self) -> Result<Vec<Endpoint>> {
        let mut tls = None;
        let mut endpoints = Vec::new();
        for address in &self.endpoints {
            let mut endpoint = Endpoint::from_shared(address.to_string())?
                .connect_timeout(Duration::from_millis(self.connect_timeout_ms));
            if let Some(interval) = self.keep_alive_interval_ms {
                endpoint = endpoint
                    .http2_keep_alive_interval(Duration::from_millis(interval))
                    .keep_alive_while_idle(true);
            }
            if address.is_tls() {
                if tls.is_none() {
                    let Some(cacert) = &self.cacert else {
                        return Err(Error::MissingCertificate(address.to_string()));
                    };
                    let pem = tokio::fs::read(cacert)
                        .await
                        .map_err(|source| Error::Certificate {
                            path: cacert.clone(),
                            source,
                        })?;
                    tls = Some(ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem)));
                }
                if let Some(tls) = &tls {
                    endpoint = endpoint.tls_config(tls.clone())?;
                }
            }
            endpoints.push(endpoint);
        }
        Ok(endpoints)
    }

    /// Builds a channel over every endpoint.
    ///
    /// With a single endpoint the connection is made straight away so that an
    /// unreachable member is reported here rather than on the first call.
    pub async fn channel(&self) -> Result<Channel> {
        let mut endpoints = self.endpoints().await?;
        debug!(endpoints = ?self.endpoints.iter().map(ToString::to_string).collect::<Vec<_>>(), "Building channel");
        if endpoints.len() == 1 {
            if let Some(endpoint) = endpoints.pop() {
                return Ok(endpoint.connect().await?);
            }
        }
        Ok(Channel::balance_list(endpoints.into_iter()))
    }
}
