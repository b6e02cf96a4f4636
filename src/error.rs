use std::fmt;

use thiserror::Error;

/// Transport-level reasons an origin could not be reached or trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFaultKind {
    ConnectionRefused,
    DnsResolution,
    ConnectionReset,
    Timeout,
    HostUnreachable,
    Tls,
}

impl fmt::Display for NetworkFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NetworkFaultKind::ConnectionRefused => "connection refused",
            NetworkFaultKind::DnsResolution => "DNS resolution failed",
            NetworkFaultKind::ConnectionReset => "connection reset",
            NetworkFaultKind::Timeout => "timed out",
            NetworkFaultKind::HostUnreachable => "host unreachable",
            NetworkFaultKind::Tls => "TLS/certificate failure",
        };
        f.write_str(label)
    }
}

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// The URL handed to a validating entry point was not an absolute http(s) URL
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The origin could not be reached or its certificate was rejected
    #[error("Network fault ({kind}): {source}")]
    Network {
        kind: NetworkFaultKind,
        #[source]
        source: reqwest::Error,
    },

    /// The origin answered with a non-success status
    #[error("Origin responded with HTTP {status}")]
    OriginHttp { status: u16 },

    /// Transport failure outside the known network classes
    #[error("Failed to fetch URL: {0}")]
    UnknownFetch(#[source] reqwest::Error),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// The imported record could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ImportError {
    /// The network classification, if this is a transport fault.
    pub fn network_fault(&self) -> Option<NetworkFaultKind> {
        match self {
            ImportError::Network { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The status code returned by the origin, if it answered with an error.
    pub fn origin_status(&self) -> Option<u16> {
        match self {
            ImportError::OriginHttp { status } => Some(*status),
            _ => None,
        }
    }

    /// True for faults raised while fetching the page, as opposed to
    /// misconfiguration of the importer itself.
    pub fn is_fetch_fault(&self) -> bool {
        matches!(
            self,
            ImportError::Network { .. }
                | ImportError::OriginHttp { .. }
                | ImportError::UnknownFetch(_)
        )
    }

    /// Sentence suitable for showing to the person who asked for the import.
    pub fn user_message(&self) -> String {
        match self {
            ImportError::InvalidInput(reason) => reason.clone(),
            ImportError::Network {
                kind: NetworkFaultKind::Tls,
                ..
            } => "SSL certificate error when connecting to the URL.".to_string(),
            ImportError::Network { .. } => {
                "Could not reach the URL. Check that it is publicly accessible and try again."
                    .to_string()
            }
            ImportError::OriginHttp { status } => format!(
                "The website returned an error (HTTP {status}). \
                 It may be blocking automated requests."
            ),
            ImportError::UnknownFetch(_) => "Could not fetch the URL.".to_string(),
            other => other.to_string(),
        }
    }
}
