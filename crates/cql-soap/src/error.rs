//! Error types for SOAP requests.

use thiserror::Error;

/// Errors that can occur while building or sending a SOAP request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoapError {
    /// The transport could not complete the request.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// The URL the request was sent to.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// A parameter name is not a valid XML element name.
    #[error("invalid XML element name: '{0}'")]
    InvalidElementName(String),

    /// A namespace prefix is not a valid XML name.
    #[error("invalid namespace prefix: '{0}'")]
    InvalidNamespacePrefix(String),
}

impl SoapError {
    /// Creates a transport error for `url`.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Result type for SOAP operations.
pub type SoapResult<T> = std::result::Result<T, SoapError>;
