//! # cql-soap
//!
//! A minimal SOAP request client used to submit cured CQL searches to a
//! remote search service.
//!
//! The client builds the envelope and headers; the network round trip is
//! delegated to a [`Transport`], so the client can be driven by a real HTTP
//! client (feature `http`) or by a test double.
//!
//! ## Usage
//!
//! ```rust
//! use cql_doctor::{CqlDoctor, KeyCounter};
//! use cql_soap::{HttpRequest, SoapClient, SoapResult, SoapValue, Transport};
//!
//! struct Echo;
//!
//! impl Transport for Echo {
//!     fn send(&self, request: &HttpRequest) -> SoapResult<String> {
//!         Ok(request.body.clone().unwrap_or_default())
//!     }
//! }
//!
//! let keys = KeyCounter::default();
//! let doctor = CqlDoctor::with_keys(&keys);
//! let client = SoapClient::new("http://opensearch.example/", &Echo);
//!
//! let body = client
//!     .search(
//!         "searchRequest",
//!         &doctor,
//!         "portland (film)",
//!         vec![("agency".to_string(), SoapValue::from("100200"))],
//!     )
//!     .unwrap();
//!
//! assert!(body.contains("<query>portland and &quot;(film)&quot;</query>"));
//! assert!(body.contains("<agency>100200</agency>"));
//! ```
//!
//! ## Feature Flags
//!
//! - `http` - Enables [`HttpTransport`], a blocking `reqwest` transport
//! - `serde` - Derives `Serialize`/`Deserialize` for configuration and values

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod client;
mod config;
mod envelope;
mod error;
mod transport;

pub use client::{SoapClient, QUERY_PARAMETER};
pub use config::{SoapClientConfig, SoapClientConfigBuilder, DEFAULT_USER_AGENT};
pub use envelope::{
    envelope, escape, is_xml_name, render_parameter, SoapValue, SOAP_ENV_NAMESPACE,
    SOAP_ENV_PREFIX, XML_HEADER,
};
pub use error::{SoapError, SoapResult};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{HttpRequest, Method, Transport};
