//! Configuration types for the CQL doctor.

use crate::error::{DoctorError, DoctorResult};
use crate::key::{KEY_CLOSE, KEY_OPEN};

/// Prefix used for placeholder keys unless configured otherwise.
pub const DEFAULT_KEY_PREFIX: &str = "zxcv";

/// First number handed out by a fresh key counter.
pub const DEFAULT_FIRST_KEY: u64 = 10;

/// Configuration for the CQL doctor.
///
/// # Example
///
/// ```rust
/// use cql_doctor::DoctorConfig;
///
/// let config = DoctorConfig::builder()
///     .with_reserved_characters(['/', '\\'])
///     .with_literalize_bare_groups(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.reserved_characters, vec!['/', '\\']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DoctorConfig {
    /// Letters placed in front of the counter value inside every placeholder.
    pub key_prefix: String,
    /// Characters isolated as their own quoted token.
    pub reserved_characters: Vec<char>,
    /// Quote single-word parenthesized groups that carry no CQL operator.
    pub literalize_bare_groups: bool,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            reserved_characters: vec!['/'],
            literalize_bare_groups: true,
        }
    }
}

impl DoctorConfig {
    /// Creates a new builder for DoctorConfig.
    pub fn builder() -> DoctorConfigBuilder {
        DoctorConfigBuilder::default()
    }

    /// Checks that the configuration can produce unambiguous placeholders
    /// and escapable reserved characters.
    pub fn validate(&self) -> DoctorResult<()> {
        if self.key_prefix.is_empty() {
            return Err(DoctorError::EmptyKeyPrefix);
        }
        if !self.key_prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DoctorError::InvalidKeyPrefix {
                prefix: self.key_prefix.clone(),
            });
        }
        if let Some(&c) = self
            .reserved_characters
            .iter()
            .find(|&&c| !is_escapable(c))
        {
            return Err(DoctorError::InvalidReservedCharacter(c));
        }
        Ok(())
    }
}

/// Placeholders are letters and digits between two sentinels, and escaping
/// wraps a character in quotes and spaces, so none of those may be reserved.
fn is_escapable(c: char) -> bool {
    !(c.is_whitespace() || c.is_alphanumeric() || c == '"' || c == KEY_OPEN || c == KEY_CLOSE)
}

/// Builder for DoctorConfig.
#[derive(Debug, Clone, Default)]
pub struct DoctorConfigBuilder {
    key_prefix: Option<String>,
    reserved_characters: Option<Vec<char>>,
    literalize_bare_groups: Option<bool>,
}

impl DoctorConfigBuilder {
    /// Sets the placeholder key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Replaces the set of reserved characters.
    pub fn with_reserved_characters(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.reserved_characters = Some(chars.into_iter().collect());
        self
    }

    /// Enables or disables literalizing bare single-word groups.
    pub fn with_literalize_bare_groups(mut self, enabled: bool) -> Self {
        self.literalize_bare_groups = Some(enabled);
        self
    }

    /// Builds and validates the DoctorConfig.
    pub fn build(self) -> DoctorResult<DoctorConfig> {
        let defaults = DoctorConfig::default();
        let config = DoctorConfig {
            key_prefix: self.key_prefix.unwrap_or(defaults.key_prefix),
            reserved_characters: self
                .reserved_characters
                .unwrap_or(defaults.reserved_characters),
            literalize_bare_groups: self
                .literalize_bare_groups
                .unwrap_or(defaults.literalize_bare_groups),
        };
        config.validate()?;
        Ok(config)
    }
}
