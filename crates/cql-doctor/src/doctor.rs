//! The CQL doctor engine.

use tracing::debug;

use crate::classifier::phrase_is_cql;
use crate::config::DoctorConfig;
use crate::error::DoctorResult;
use crate::key::{KeyCounter, KeyGenerator, KEY_CLOSE, KEY_OPEN};
use crate::protector::Protector;
use crate::reassembler;
use crate::table::SubstitutionTable;

/// Repairs free-text search phrases into well-formed CQL.
///
/// # Example
///
/// ```rust
/// use cql_doctor::{CqlDoctor, KeyCounter};
///
/// let keys = KeyCounter::default();
/// let doctor = CqlDoctor::with_keys(&keys);
///
/// assert_eq!(
///     doctor.cure("henning mortensen (f. 1939)"),
///     r#"henning and mortensen and "(f. 1939)""#
/// );
/// assert_eq!(doctor.cure("  (term.type=bog) "), "(term.type=bog)");
/// ```
pub struct CqlDoctor<'a> {
    /// Engine configuration.
    config: DoctorConfig,
    /// Source of placeholder numbers.
    keys: &'a dyn KeyGenerator,
}

/// Intermediate and final state of one repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    /// Input after whitespace normalization.
    pub normalized: String,
    /// Working phrase after protection and reserved-character escaping.
    pub protected: String,
    /// Whether the protected phrase already read as valid CQL.
    pub valid: bool,
    /// Substitutions registered during protection.
    pub table: SubstitutionTable,
    /// The repaired phrase.
    pub output: String,
}

impl CqlDoctor<'static> {
    /// Creates a doctor with default configuration using the process-wide
    /// key counter.
    pub fn new() -> Self {
        Self::with_keys(KeyCounter::global())
    }
}

impl Default for CqlDoctor<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CqlDoctor<'a> {
    /// Creates a doctor with default configuration drawing keys from `keys`.
    pub fn with_keys(keys: &'a dyn KeyGenerator) -> Self {
        Self {
            config: DoctorConfig::default(),
            keys,
        }
    }

    /// Creates a doctor with custom configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_config(config: DoctorConfig, keys: &'a dyn KeyGenerator) -> DoctorResult<Self> {
        config.validate()?;
        Ok(Self { config, keys })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DoctorConfig {
        &self.config
    }

    /// Converts `phrase` into CQL.
    ///
    /// Never fails: malformed input yields a best-effort repair, and
    /// unbalanced quotes or parentheses pass through untouched.
    pub fn cure(&self, phrase: &str) -> String {
        self.diagnose(phrase).output
    }

    /// Converts `phrase` into CQL, keeping the intermediate state.
    pub fn diagnose(&self, phrase: &str) -> Diagnosis {
        let normalized = normalize_whitespace(phrase);

        let mut protector = Protector::new(normalized.clone(), self.keys, &self.config.key_prefix);
        protector.protect_quotes();
        protector.protect_groups(self.config.literalize_bare_groups);
        protector.escape_reserved(&self.config.reserved_characters);
        let (protected, table) = protector.into_parts();

        // Decided on the protected phrase, applied after restoration.
        let valid = phrase_is_cql(&protected);

        let tokens = reassembler::restore(&protected, &table);
        let output = reassembler::join(&tokens, valid);

        debug!(
            input = phrase,
            output = output.as_str(),
            valid,
            protected_fragments = table.len(),
            "cured search phrase"
        );

        Diagnosis {
            normalized,
            protected,
            valid,
            table,
            output,
        }
    }
}

/// Converts `phrase` into CQL with the default configuration and the
/// process-wide key counter.
///
/// ```rust
/// use cql_doctor::string_to_cql;
///
/// assert_eq!(string_to_cql("portland (film)"), r#"portland and "(film)""#);
/// ```
pub fn string_to_cql(phrase: &str) -> String {
    CqlDoctor::new().cure(phrase)
}

/// Trims, collapses ASCII whitespace runs to one space and strips placeholder
/// sentinels. Other Unicode spaces stay part of the word they sit in.
fn normalize_whitespace(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|&c| c != KEY_OPEN && c != KEY_CLOSE)
        .collect();
    stripped.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
        assert_eq!(normalize_whitespace("a \u{E000} b\u{E001}"), "a b");
        assert_eq!(normalize_whitespace(" a\u{00A0}b "), "a\u{00A0}b");
    }

    #[test]
    fn test_diagnose_exposes_state() {
        let keys = KeyCounter::default();
        let doctor = CqlDoctor::with_keys(&keys);
        let diagnosis = doctor.diagnose("henning  mortensen (f. 1939)");

        assert_eq!(diagnosis.normalized, "henning mortensen (f. 1939)");
        assert!(!diagnosis.valid);
        assert_eq!(diagnosis.table.len(), 1);
        assert!(diagnosis.protected.starts_with("henning mortensen "));
        assert_eq!(diagnosis.output, r#"henning and mortensen and "(f. 1939)""#);
    }

    #[test]
    fn test_with_config_validates() {
        let keys = KeyCounter::default();
        let config = DoctorConfig {
            key_prefix: String::new(),
            ..DoctorConfig::default()
        };
        assert!(CqlDoctor::with_config(config, &keys).is_err());
    }

    #[test]
    fn test_custom_key_prefix_used() {
        let keys = KeyCounter::default();
        let config = DoctorConfig::builder().with_key_prefix("qq").build().unwrap();
        let doctor = CqlDoctor::with_config(config, &keys).unwrap();

        let diagnosis = doctor.diagnose(r#""x y""#);
        assert!(diagnosis.table.entries()[0].key.contains("qq10"));
        assert_eq!(diagnosis.output, r#""x y""#);
    }

    #[test]
    fn test_keys_drawn_from_injected_generator() {
        let keys = KeyCounter::starting_at(500);
        let doctor = CqlDoctor::with_keys(&keys);
        doctor.cure(r#""a" (b c)"#);
        assert_eq!(keys.peek(), 502);
    }
}
