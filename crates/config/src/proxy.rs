//! Outbound HTTPS proxy configuration.
//!
//! The proxy applies to alert provider requests, not to Kubernetes API
//! traffic. Components that build HTTP clients should take the proxy from
//! [`Settings::proxy`](crate::Settings::proxy) and configure it explicitly.
//! [`ProxyConfig::export_env`] exists for clients that only read
//! `HTTPS_PROXY` from the environment.

use url::Url;

/// Environment variable read by environment-configured HTTP clients.
pub const HTTPS_PROXY_ENV: &str = "HTTPS_PROXY";

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid proxy URL {raw:?}: {source}")]
    Parse {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported proxy scheme '{scheme}', expected one of http, https, socks5, socks5h")]
    UnsupportedScheme { scheme: String },
}

/// A validated outbound proxy URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    url: Url,
}

impl ProxyConfig {
    /// Parse a proxy URL. A value without `://` is taken as `http://<value>`,
    /// so `proxy.local:3128` works as it does for `HTTPS_PROXY`.
    pub fn parse(raw: &str) -> Result<Self, ProxyError> {
        let raw = raw.trim();
        let candidate = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{raw}")
        };

        let url = Url::parse(&candidate).map_err(|source| ProxyError::Parse {
            raw: raw.to_string(),
            source,
        })?;

        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(ProxyError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            });
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL with any password replaced, safe for logs.
    pub fn redacted(&self) -> String {
        let mut url = self.url.clone();
        if url.password().is_some() {
            // Only fails for URLs that cannot carry credentials, which
            // cannot have a password to begin with.
            let _ = url.set_password(Some("***"));
        }
        url.to_string()
    }

    /// Set `HTTPS_PROXY` for the current process.
    ///
    /// This mutates process-wide state: call it during startup before any
    /// HTTP client is constructed, and never while other threads may read
    /// the environment.
    pub fn export_env(&self) {
        std::env::set_var(HTTPS_PROXY_ENV, self.url.as_str());
        tracing::info!(proxy = %self.redacted(), "exported {}", HTTPS_PROXY_ENV);
    }
}
