//! HTML fragment loading.
//!
//! Pages assemble their shared chrome (header, footer) from HTML fragments
//! fetched at load time. [`FragmentLoader`] fetches a fragment's text; the
//! host splices it over the placeholder element and then runs the
//! post-insertion initializers that depend on the new markup.
//!
//! A fragment that cannot be fetched is logged to the
//! `montra_net::fragment` target and its placeholder is left as-is,
//! visibly broken and never retried, while the rest of the page keeps
//! working.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;
use url::Url;

use crate::error::{FetchError, Result};

/// Configuration for the fragment loader.
#[derive(Clone, Debug)]
pub struct FragmentLoaderConfig {
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
    /// Default user agent.
    pub user_agent: Option<String>,
}

impl Default for FragmentLoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            follow_redirects: true,
            user_agent: Some(format!("montra/{} (Rust)", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// A fetch target: which placeholder to fill, from which resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    /// Identifier of the placeholder element to replace.
    pub placeholder_id: String,
    /// Resource path of the fragment, resolved against the base URL.
    pub path: String,
}

impl FragmentRequest {
    /// Create a fetch target.
    pub fn new(placeholder_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            placeholder_id: placeholder_id.into(),
            path: path.into(),
        }
    }
}

/// A successfully fetched fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Identifier of the placeholder element this fragment replaces.
    pub placeholder_id: String,
    /// The fragment's HTML text.
    pub html: String,
}

/// Builder for creating a fragment loader with custom configuration.
pub struct FragmentLoaderBuilder {
    config: FragmentLoaderConfig,
    base_url: Option<Url>,
    default_headers: http::HeaderMap,
}

impl Default for FragmentLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentLoaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: FragmentLoaderConfig::default(),
            base_url: None,
            default_headers: http::HeaderMap::new(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Disable redirect following.
    pub fn no_redirects(mut self) -> Self {
        self.config.follow_redirects = false;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set the base URL relative fragment paths resolve against.
    pub fn base_url(mut self, base: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(base.as_ref())?);
        Ok(self)
    }

    /// Add a default header sent with every request.
    pub fn default_header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Result<Self> {
        let name = name
            .try_into()
            .map_err(|_| FetchError::InvalidHeader("Invalid header name".to_string()))?;
        let value = value
            .try_into()
            .map_err(|_| FetchError::InvalidHeader("Invalid header value".to_string()))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Build the fragment loader.
    pub fn build(self) -> Result<FragmentLoader> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if self.config.follow_redirects {
            builder = builder.redirect(Policy::limited(10));
        } else {
            builder = builder.redirect(Policy::none());
        }
        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(ua);
        }
        builder = builder.default_headers(self.default_headers);

        let client = builder.build()?;

        Ok(FragmentLoader {
            inner: Arc::new(FragmentLoaderInner {
                client,
                base_url: self.base_url,
                config: self.config,
            }),
        })
    }
}

/// Internal state for the fragment loader.
struct FragmentLoaderInner {
    client: reqwest::Client,
    base_url: Option<Url>,
    config: FragmentLoaderConfig,
}

/// Fetches HTML fragments for placeholder replacement.
///
/// The loader is cheaply cloneable; clones share the same underlying
/// connection pool and configuration.
///
/// # Example
///
/// ```ignore
/// use montra_net::{FragmentLoader, FragmentRequest};
///
/// let loader = FragmentLoader::builder()
///     .base_url("https://example.com/")?
///     .build()?;
///
/// let fragment = loader.load("header-placeholder", "header.html").await?;
/// // Splice fragment.html over the placeholder, then run the
/// // post-insertion initializers.
/// ```
#[derive(Clone)]
pub struct FragmentLoader {
    inner: Arc<FragmentLoaderInner>,
}

impl Default for FragmentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentLoader {
    /// Create a loader with default configuration and no base URL.
    pub fn new() -> Self {
        FragmentLoaderBuilder::new()
            .build()
            .expect("Failed to create fragment loader with default configuration")
    }

    /// Create a builder for configuring a new loader.
    pub fn builder() -> FragmentLoaderBuilder {
        FragmentLoaderBuilder::new()
    }

    /// Get the loader's configuration.
    pub fn config(&self) -> &FragmentLoaderConfig {
        &self.inner.config
    }

    /// Fetch the fragment at `path` for the given placeholder.
    ///
    /// A non-success status is an error. Every failure, transport or
    /// status, is logged to the `montra_net::fragment` target; the caller
    /// leaves the placeholder unmodified and does not retry.
    pub async fn load(&self, placeholder_id: &str, path: &str) -> Result<Fragment> {
        match self.fetch(placeholder_id, path).await {
            Ok(fragment) => Ok(fragment),
            Err(err) => {
                tracing::error!(
                    target: "montra_net::fragment",
                    placeholder_id,
                    path,
                    error = %err,
                    "fragment fetch failed"
                );
                Err(err)
            }
        }
    }

    async fn fetch(&self, placeholder_id: &str, path: &str) -> Result<Fragment> {
        let url = self.resolve(path)?;
        tracing::debug!(
            target: "montra_net::fragment",
            placeholder_id,
            %url,
            "loading fragment"
        );

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(Fragment {
            placeholder_id: placeholder_id.to_string(),
            html,
        })
    }

    /// Fetch a set of fragments, isolating failures per fragment.
    ///
    /// Results are returned in request order. Failures are logged (by
    /// [`load`](Self::load)) and reported in place; the remaining
    /// fragments still load; every placeholder is independently optional.
    pub async fn load_all(&self, requests: &[FragmentRequest]) -> Vec<Result<Fragment>> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.load(&request.placeholder_id, &request.path).await);
        }
        results
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        match &self.inner.base_url {
            Some(base) => Ok(base.join(path)?),
            None => Ok(Url::parse(path)?),
        }
    }
}

impl std::fmt::Debug for FragmentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentLoader")
            .field("base_url", &self.inner.base_url.as_ref().map(Url::as_str))
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_base() {
        let loader = FragmentLoader::builder()
            .base_url("http://localhost:8080/site/index.html")
            .unwrap()
            .build()
            .unwrap();

        let url = loader.resolve("header.html").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/site/header.html");
    }

    #[test]
    fn test_relative_path_without_base_is_invalid() {
        let loader = FragmentLoader::new();
        assert!(matches!(
            loader.resolve("header.html"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(FragmentLoader::builder().base_url("not a url").is_err());
    }

    #[test]
    fn test_invalid_default_header_rejected() {
        let result = FragmentLoader::builder().default_header("bad header\n", "value");
        assert!(matches!(result, Err(FetchError::InvalidHeader(_))));
    }
}
