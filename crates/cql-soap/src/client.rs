//! The SOAP client.

use cql_doctor::CqlDoctor;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::SoapClientConfig;
use crate::envelope::{envelope, render_parameter, SoapValue};
use crate::error::SoapResult;
use crate::transport::{HttpRequest, Method, Transport};

/// Name of the parameter carrying the cured query in [`SoapClient::search`].
pub const QUERY_PARAMETER: &str = "query";

/// Builds SOAP requests and hands them to a [`Transport`].
///
/// # Example
///
/// ```ignore
/// use cql_soap::{HttpTransport, SoapClient, SoapValue};
///
/// let transport = HttpTransport::new();
/// let client = SoapClient::new("https://opensearch.addi.dk/b3.5_5.2/", &transport);
///
/// let response = client.call(
///     "searchRequest",
///     &SoapValue::map().with("query", "harry and potter").with("agency", "100200"),
/// )?;
/// ```
pub struct SoapClient<'a> {
    /// URL every SOAP call is posted to.
    endpoint: String,
    /// Client configuration.
    config: SoapClientConfig,
    /// The transport requests are sent through.
    transport: &'a dyn Transport,
    /// Body of the most recent SOAP call.
    last_request_body: Mutex<Option<String>>,
}

impl<'a> SoapClient<'a> {
    /// Creates a client with default configuration.
    pub fn new(endpoint: impl Into<String>, transport: &'a dyn Transport) -> Self {
        Self::with_config(endpoint, SoapClientConfig::default(), transport)
    }

    /// Creates a client with custom configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        config: SoapClientConfig,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            config,
            transport,
            last_request_body: Mutex::new(None),
        }
    }

    /// Returns the SOAP endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SoapClientConfig {
        &self.config
    }

    /// Returns the envelope sent by the most recent [`call`](Self::call).
    pub fn last_request_body(&self) -> Option<String> {
        self.last_request_body.lock().clone()
    }

    /// Sends a raw request.
    ///
    /// The body is only attached to POST requests, and only when it is not
    /// empty.
    pub fn request(
        &self,
        url: &str,
        method: Method,
        body: &str,
        headers: &[(String, String)],
    ) -> SoapResult<String> {
        let body = (method == Method::Post && !body.is_empty()).then(|| body.to_string());
        let request = HttpRequest {
            url: url.to_string(),
            method,
            body,
            headers: headers.to_vec(),
            user_agent: self.config.user_agent.clone(),
        };

        debug!(
            url,
            %method,
            body_len = request.body.as_ref().map_or(0, String::len),
            "sending request"
        );

        self.transport.send(&request).inspect_err(|err| {
            warn!(url, error = %err, "request failed");
        })
    }

    /// Performs a SOAP call: `parameters` are rendered under an element
    /// named `action` and posted to the endpoint inside an envelope.
    pub fn call(&self, action: &str, parameters: &SoapValue) -> SoapResult<String> {
        let payload = render_parameter(action, parameters)?;
        let body = envelope(&self.config.namespaces, &payload);
        *self.last_request_body.lock() = Some(body.clone());

        let headers = vec![
            ("Content-Type".to_string(), "text/xml".to_string()),
            ("SOAPAction".to_string(), action.to_string()),
        ];
        self.request(&self.endpoint, Method::Post, &body, &headers)
    }

    /// Cures `phrase` into CQL and performs `action` with it as the
    /// `query` parameter, followed by `parameters`.
    pub fn search(
        &self,
        action: &str,
        doctor: &CqlDoctor<'_>,
        phrase: &str,
        parameters: Vec<(String, SoapValue)>,
    ) -> SoapResult<String> {
        let query = doctor.cure(phrase);
        debug!(phrase, query = query.as_str(), "searching");

        let mut entries = Vec::with_capacity(parameters.len() + 1);
        entries.push((QUERY_PARAMETER.to_string(), SoapValue::Text(query)));
        entries.extend(parameters);
        self.call(action, &SoapValue::Map(entries))
    }
}
