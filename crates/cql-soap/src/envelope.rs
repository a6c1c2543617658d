//! SOAP envelope and parameter rendering.
//!
//! Parameters form a small tree that maps onto XML elements:
//!
//! | Value | Rendering under name `n` |
//! |-------|--------------------------|
//! | `Text("v")` | `<n>v</n>` |
//! | `List([a, b])` | `<n>a</n><n>b</n>` |
//! | `Map([("k", v)])` | `<n><k>v</k></n>` |

use std::borrow::Cow;

use crate::error::{SoapError, SoapResult};

/// XML declaration opening every envelope.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Prefix of the SOAP envelope namespace.
pub const SOAP_ENV_PREFIX: &str = "SOAP-ENV";

/// URI of the SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// A SOAP request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoapValue {
    /// Text content, escaped on rendering.
    Text(String),
    /// Repeated elements sharing the parent name.
    List(Vec<SoapValue>),
    /// Named child elements in order.
    Map(Vec<(String, SoapValue)>),
}

impl SoapValue {
    /// Creates an empty map.
    pub fn map() -> Self {
        Self::Map(Vec::new())
    }

    /// Appends a named child, turning a non-map value into a map.
    pub fn with(self, name: impl Into<String>, value: impl Into<SoapValue>) -> Self {
        let mut entries = match self {
            Self::Map(entries) => entries,
            _ => Vec::new(),
        };
        entries.push((name.into(), value.into()));
        Self::Map(entries)
    }
}

impl From<&str> for SoapValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SoapValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<SoapValue>> From<Vec<T>> for SoapValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Returns true if `name` is a valid XML element name.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

/// Escapes `& < > " '` for use in XML text or attribute values.
///
/// Existing entity references are left alone, so escaping twice is a no-op.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for (i, c) in text.char_indices() {
        match c {
            '&' if starts_entity(&text[i..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Returns true if `text` (starting at `&`) is a named, decimal or
/// hexadecimal entity reference.
fn starts_entity(text: &str) -> bool {
    let Some(end) = text.find(';') else {
        return false;
    };
    let body = &text[1..end];

    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = body.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Renders `value` as XML elements named `name`.
pub fn render_parameter(name: &str, value: &SoapValue) -> SoapResult<String> {
    let mut out = String::new();
    write_parameter(&mut out, name, value)?;
    Ok(out)
}

fn write_parameter(out: &mut String, name: &str, value: &SoapValue) -> SoapResult<()> {
    if !is_xml_name(name) {
        return Err(SoapError::InvalidElementName(name.to_string()));
    }

    match value {
        SoapValue::Text(text) if text.is_empty() => {
            out.push_str(&format!("<{name}/>"));
        }
        SoapValue::Text(text) => {
            out.push_str(&format!("<{name}>{}</{name}>", escape(text)));
        }
        SoapValue::List(items) => {
            for item in items {
                write_parameter(out, name, item)?;
            }
        }
        SoapValue::Map(entries) if entries.is_empty() => {
            out.push_str(&format!("<{name}/>"));
        }
        SoapValue::Map(entries) => {
            out.push_str(&format!("<{name}>"));
            for (child, child_value) in entries {
                write_parameter(out, child, child_value)?;
            }
            out.push_str(&format!("</{name}>"));
        }
    }

    Ok(())
}

/// Wraps `payload` in a SOAP envelope declaring `namespaces`.
pub fn envelope(namespaces: &[(String, String)], payload: &str) -> String {
    let declarations: String = namespaces
        .iter()
        .map(|(prefix, uri)| {
            if prefix.is_empty() {
                format!(r#" xmlns="{}""#, escape(uri))
            } else {
                format!(r#" xmlns:{prefix}="{}""#, escape(uri))
            }
        })
        .collect();

    [
        XML_HEADER.to_string(),
        format!("<{SOAP_ENV_PREFIX}:Envelope{declarations}>"),
        format!("<{SOAP_ENV_PREFIX}:Body>"),
        payload.to_string(),
        format!("</{SOAP_ENV_PREFIX}:Body>"),
        format!("</{SOAP_ENV_PREFIX}:Envelope>"),
    ]
    .join("\n")
}
