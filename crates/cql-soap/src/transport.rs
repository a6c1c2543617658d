//! The request/response boundary.
//!
//! [`Transport`] is the seam between request building and the network. The
//! client only ever hands a fully prepared [`HttpRequest`] to a transport
//! and gets back the response body.
//!
//! With the `http` feature enabled, [`HttpTransport`] sends requests with a
//! blocking `reqwest` client:
//!
//! ```ignore
//! use cql_soap::{HttpTransport, SoapClient};
//!
//! let transport = HttpTransport::new();
//! let client = SoapClient::new("https://opensearch.addi.dk/b3.5_5.2/", &transport);
//! ```

use std::fmt;

use crate::error::SoapResult;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Method {
    /// GET request; any body is ignored.
    #[default]
    Get,
    /// POST request.
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A prepared HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Target URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Request body, only ever set for non-empty POST bodies.
    pub body: Option<String>,
    /// Extra headers as (name, value).
    pub headers: Vec<(String, String)>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

/// Sends prepared requests and returns the response body.
///
/// A response with any HTTP status is returned as-is; only a request that
/// could not be completed is an error.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response body.
    fn send(&self, request: &HttpRequest) -> SoapResult<String>;
}

#[cfg(feature = "http")]
pub use self::http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use reqwest::blocking::Client;
    use reqwest::header::USER_AGENT;
    use tracing::warn;

    use super::{HttpRequest, Method, Transport};
    use crate::error::{SoapError, SoapResult};

    /// Blocking HTTP transport backed by `reqwest`.
    #[derive(Debug, Clone, Default)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        /// Creates a transport with a default client.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a transport using `client`.
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl Transport for HttpTransport {
        fn send(&self, request: &HttpRequest) -> SoapResult<String> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };

            builder = builder.header(USER_AGENT, request.user_agent.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder
                .send()
                .map_err(|e| SoapError::transport(&request.url, e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                warn!(url = request.url.as_str(), status = status.as_u16(), "non-success response");
            }

            response
                .text()
                .map_err(|e| SoapError::transport(&request.url, e.to_string()))
        }
    }
}
