//! Configuration types for the SOAP client.

use crate::envelope::{is_xml_name, SOAP_ENV_NAMESPACE, SOAP_ENV_PREFIX};
use crate::error::{SoapError, SoapResult};

/// User agent sent with every request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = "NanoSOAP for Drupal";

/// Configuration for the SOAP client.
///
/// The `SOAP-ENV` namespace is always declared. A caller-supplied binding
/// for the same prefix takes precedence.
///
/// # Example
///
/// ```rust
/// use cql_soap::SoapClientConfig;
///
/// let config = SoapClientConfig::builder()
///     .with_namespace("os", "http://oss.dbc.dk/ns/opensearch")
///     .with_user_agent("easyscreen")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.namespaces.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoapClientConfig {
    /// Namespace bindings as (prefix, URI). An empty prefix is the default
    /// namespace.
    pub namespaces: Vec<(String, String)>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for SoapClientConfig {
    fn default() -> Self {
        Self {
            namespaces: vec![(SOAP_ENV_PREFIX.to_string(), SOAP_ENV_NAMESPACE.to_string())],
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SoapClientConfig {
    /// Creates a new builder for SoapClientConfig.
    pub fn builder() -> SoapClientConfigBuilder {
        SoapClientConfigBuilder::default()
    }
}

/// Builder for SoapClientConfig.
#[derive(Debug, Clone, Default)]
pub struct SoapClientConfigBuilder {
    namespaces: Vec<(String, String)>,
    user_agent: Option<String>,
}

impl SoapClientConfigBuilder {
    /// Declares a namespace on the envelope.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.push((prefix.into(), uri.into()));
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the SoapClientConfig, checking every namespace prefix.
    pub fn build(self) -> SoapResult<SoapClientConfig> {
        let mut namespaces = self.namespaces;

        if let Some((prefix, _)) = namespaces
            .iter()
            .find(|(prefix, _)| !prefix.is_empty() && !is_xml_name(prefix))
        {
            return Err(SoapError::InvalidNamespacePrefix(prefix.clone()));
        }

        if !namespaces.iter().any(|(prefix, _)| prefix == SOAP_ENV_PREFIX) {
            namespaces.push((SOAP_ENV_PREFIX.to_string(), SOAP_ENV_NAMESPACE.to_string()));
        }

        Ok(SoapClientConfig {
            namespaces,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}
