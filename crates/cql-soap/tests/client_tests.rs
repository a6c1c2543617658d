//! Integration tests for the SOAP client.

use std::sync::Mutex;

use cql_doctor::{CqlDoctor, KeyCounter};
use cql_soap::{
    HttpRequest, Method, SoapClient, SoapClientConfig, SoapError, SoapResult, SoapValue,
    Transport, SOAP_ENV_NAMESPACE,
};

const ENDPOINT: &str = "http://opensearch.addi.dk/b3.5_5.2/";

/// Mock transport recording every request it receives.
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    response: SoapResult<String>,
}

impl RecordingTransport {
    fn responding(body: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(body.to_string()),
        }
    }

    fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Err(SoapError::transport(ENDPOINT, "connection refused")),
        }
    }

    fn last(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> SoapResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

fn header<'r>(request: &'r HttpRequest, name: &str) -> Option<&'r str> {
    request
        .headers
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// Raw requests
// ============================================================================

#[test]
fn test_get_request_drops_body() {
    let transport = RecordingTransport::responding("ok");
    let client = SoapClient::new(ENDPOINT, &transport);

    let response = client.request(ENDPOINT, Method::Get, "ignored", &[]).unwrap();
    let request = transport.last();

    assert_eq!(response, "ok");
    assert_eq!(request.method, Method::Get);
    assert!(request.body.is_none());
    assert!(request.headers.is_empty());
    assert_eq!(request.user_agent, "NanoSOAP for Drupal");
}

#[test]
fn test_post_request_with_empty_body() {
    let transport = RecordingTransport::responding("ok");
    let client = SoapClient::new(ENDPOINT, &transport);

    client.request(ENDPOINT, Method::Post, "", &[]).unwrap();
    assert!(transport.last().body.is_none());

    client.request(ENDPOINT, Method::Post, "payload", &[]).unwrap();
    assert_eq!(transport.last().body.as_deref(), Some("payload"));
}

#[test]
fn test_transport_failure_propagates() {
    let transport = RecordingTransport::failing();
    let client = SoapClient::new(ENDPOINT, &transport);

    let err = client.call("ping", &SoapValue::map()).unwrap_err();
    assert!(matches!(err, SoapError::Transport { .. }));
    assert_eq!(transport.count(), 1);
}

// ============================================================================
// SOAP calls
// ============================================================================

#[test]
fn test_call_sets_soap_headers() {
    let transport = RecordingTransport::responding("<response/>");
    let client = SoapClient::new(ENDPOINT, &transport);

    client
        .call("searchRequest", &SoapValue::map().with("query", "dune"))
        .unwrap();
    let request = transport.last();

    assert_eq!(request.url, ENDPOINT);
    assert_eq!(request.method, Method::Post);
    assert_eq!(header(&request, "Content-Type"), Some("text/xml"));
    assert_eq!(header(&request, "SOAPAction"), Some("searchRequest"));
}

#[test]
fn test_call_envelope_is_well_formed() {
    let transport = RecordingTransport::responding("<response/>");
    let config = SoapClientConfig::builder()
        .with_namespace("os", "http://oss.dbc.dk/ns/opensearch")
        .build()
        .unwrap();
    let client = SoapClient::with_config(ENDPOINT, config, &transport);

    let parameters = SoapValue::map()
        .with("query", "title=\"war & peace\"")
        .with("objectFormat", vec!["dkabm", "marcxchange"]);
    client.call("searchRequest", &parameters).unwrap();

    let body = transport.last().body.unwrap();
    assert_eq!(client.last_request_body().as_deref(), Some(body.as_str()));

    let doc = roxmltree::Document::parse(&body).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "Envelope");
    assert_eq!(root.tag_name().namespace(), Some(SOAP_ENV_NAMESPACE));

    let search = doc
        .descendants()
        .find(|n| n.has_tag_name("searchRequest"))
        .unwrap();
    let query = search
        .children()
        .find(|n| n.has_tag_name("query"))
        .unwrap();
    assert_eq!(query.text(), Some("title=\"war & peace\""));

    let formats: Vec<&str> = search
        .children()
        .filter(|n| n.has_tag_name("objectFormat"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(formats, vec!["dkabm", "marcxchange"]);
}

#[test]
fn test_call_rejects_invalid_action() {
    let transport = RecordingTransport::responding("ok");
    let client = SoapClient::new(ENDPOINT, &transport);

    let err = client.call("bad action", &SoapValue::map()).unwrap_err();
    assert_eq!(err, SoapError::InvalidElementName("bad action".to_string()));
    assert_eq!(transport.count(), 0);
    assert!(client.last_request_body().is_none());
}

// ============================================================================
// Searches
// ============================================================================

#[test]
fn test_search_sends_cured_query_first() {
    let transport = RecordingTransport::responding("<result/>");
    let client = SoapClient::new(ENDPOINT, &transport);
    let keys = KeyCounter::default();
    let doctor = CqlDoctor::with_keys(&keys);

    let response = client
        .search(
            "searchRequest",
            &doctor,
            "henning   mortensen (f. 1939)",
            vec![("agency".to_string(), "100200".into())],
        )
        .unwrap();
    assert_eq!(response, "<result/>");

    let body = transport.last().body.unwrap();
    let doc = roxmltree::Document::parse(&body).unwrap();
    let search = doc
        .descendants()
        .find(|n| n.has_tag_name("searchRequest"))
        .unwrap();
    let children: Vec<_> = search.children().filter(|n| n.is_element()).collect();

    assert_eq!(children[0].tag_name().name(), "query");
    assert_eq!(
        children[0].text(),
        Some(r#"henning and mortensen and "(f. 1939)""#)
    );
    assert_eq!(children[1].tag_name().name(), "agency");
}

#[test]
fn test_search_leaves_valid_cql_alone() {
    let transport = RecordingTransport::responding("<result/>");
    let client = SoapClient::new(ENDPOINT, &transport);
    let keys = KeyCounter::default();
    let doctor = CqlDoctor::with_keys(&keys);

    let cql = "dkcclterm.sf=v and (term.type=bog)";
    client.search("searchRequest", &doctor, cql, Vec::new()).unwrap();

    let body = transport.last().body.unwrap();
    assert!(body.contains("<query>dkcclterm.sf=v and (term.type=bog)</query>"));
}
