use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{redirect::Policy, Client};
use std::error::Error;
use std::io;
use std::time::Duration;

use super::{FetchedPage, PageFetcher};
use crate::config::ImporterConfig;
use crate::error::{ImportError, NetworkFaultKind};

/// Fetches pages with a single reqwest GET per call.
pub struct RequestFetcher {
    client: Client,
    extract_error_pages: bool,
}

impl RequestFetcher {
    pub fn new(config: &ImporterConfig) -> Result<Self, ImportError> {
        Self::with_timeout(config, config.timeout())
    }

    /// Like [`RequestFetcher::new`] but with an explicit total timeout.
    pub fn with_timeout(config: &ImporterConfig, timeout: Duration) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);

        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(ImportError::HttpClient)?;

        Ok(Self {
            client,
            extract_error_pages: config.extract_error_pages,
        })
    }
}

#[async_trait]
impl PageFetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ImportError> {
        debug!("RequestFetcher: GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| log_fault(url, classify_fetch_error(e)))?;

        let status = response.status();
        let final_url = response.url().to_string();
        if final_url != url {
            debug!("RequestFetcher: Redirected to {final_url}");
        }

        if !status.is_success() && !self.extract_error_pages {
            return Err(log_fault(
                url,
                ImportError::OriginHttp {
                    status: status.as_u16(),
                },
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| log_fault(url, classify_fetch_error(e)))?;

        if !status.is_success() {
            if body.trim().is_empty() {
                return Err(log_fault(
                    url,
                    ImportError::OriginHttp {
                        status: status.as_u16(),
                    },
                ));
            }
            debug!("RequestFetcher: Extracting from HTTP {status} body");
        }

        debug!("RequestFetcher: Received {} bytes", body.len());
        Ok(FetchedPage {
            body,
            final_url,
            status: status.as_u16(),
        })
    }
}

fn log_fault(url: &str, err: ImportError) -> ImportError {
    warn!("RequestFetcher: Fetching {url} failed: {err}");
    err
}

/// Map a transport error to the matching fault class.
pub fn classify_fetch_error(err: reqwest::Error) -> ImportError {
    if let Some(status) = err.status() {
        return ImportError::OriginHttp {
            status: status.as_u16(),
        };
    }
    match network_fault_kind(&err) {
        Some(kind) => ImportError::Network { kind, source: err },
        None => ImportError::UnknownFetch(err),
    }
}

fn network_fault_kind(err: &reqwest::Error) -> Option<NetworkFaultKind> {
    if err.is_timeout() {
        return Some(NetworkFaultKind::Timeout);
    }

    // The top-level message embeds the URL, so only the causes are inspected.
    let mut cause = err.source();
    while let Some(current) = cause {
        if let Some(kind) = current.downcast_ref::<io::Error>().and_then(io_fault_kind) {
            return Some(kind);
        }

        let message = current.to_string().to_lowercase();
        if message.contains("dns error") || message.contains("failed to lookup address") {
            return Some(NetworkFaultKind::DnsResolution);
        }
        if ["certificate", "tls", "ssl", "handshake"]
            .iter()
            .any(|marker| message.contains(marker))
        {
            return Some(NetworkFaultKind::Tls);
        }

        cause = current.source();
    }

    None
}

fn io_fault_kind(err: &io::Error) -> Option<NetworkFaultKind> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => Some(NetworkFaultKind::ConnectionRefused),
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            Some(NetworkFaultKind::ConnectionReset)
        }
        io::ErrorKind::TimedOut => Some(NetworkFaultKind::Timeout),
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            Some(NetworkFaultKind::HostUnreachable)
        }
        _ => None,
    }
}
