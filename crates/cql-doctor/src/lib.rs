//! # cql-doctor
//!
//! Repairs loosely typed search phrases into well-formed Contextual Query
//! Language (CQL) for a bibliographic search backend.
//!
//! Users mix natural language with CQL fragments: boolean operators,
//! relations, parentheses and quoted phrases. The doctor leaves deliberate
//! CQL alone and quotes or conjoins everything else, so that a strict CQL
//! grammar accepts the result. It repairs lexical form only; field names and
//! relations are never checked.
//!
//! ## Usage
//!
//! ```rust
//! use cql_doctor::string_to_cql;
//!
//! assert_eq!(string_to_cql("portland (film)"), r#"portland and "(film)""#);
//! assert_eq!(
//!     string_to_cql("harry and (White night)"),
//!     r#"harry and "(White night)""#
//! );
//!
//! // Valid CQL stays the same.
//! let cql = "dkcclterm.sf=v and dkcclterm.uu=nt and (term.type=bog) not term.literaryForm=fiktion";
//! assert_eq!(string_to_cql(cql), cql);
//! ```
//!
//! ## With an injected key counter
//!
//! ```rust
//! use cql_doctor::{CqlDoctor, DoctorConfig, KeyCounter};
//!
//! let keys = KeyCounter::default();
//! let config = DoctorConfig::builder()
//!     .with_literalize_bare_groups(false)
//!     .build()
//!     .unwrap();
//! let doctor = CqlDoctor::with_config(config, &keys).unwrap();
//!
//! assert_eq!(doctor.cure("portland (film)"), "portland (film)");
//! ```
//!
//! ## Pipeline
//!
//! | Step | Effect |
//! |------|--------|
//! | normalize | trim, collapse whitespace runs |
//! | quotes | `"..."` runs swapped for placeholders |
//! | groups | innermost `(...)` swapped for placeholders, quoted unless they hold CQL |
//! | reserved | `/` becomes ` "/" ` |
//! | classify | every operator-delimited segment checked once |
//! | restore | placeholders resolved until none remain, empty tokens dropped |
//! | join | `" "` if the phrase was valid CQL, `" and "` otherwise |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod classifier;
mod config;
mod doctor;
mod error;
mod key;
mod lexer;
mod protector;
mod reassembler;
mod table;

pub use classifier::{contains_operator, is_cql, phrase_is_cql, split_on_operators};
pub use config::{DoctorConfig, DoctorConfigBuilder, DEFAULT_FIRST_KEY, DEFAULT_KEY_PREFIX};
pub use doctor::{string_to_cql, CqlDoctor, Diagnosis};
pub use error::{DoctorError, DoctorResult};
pub use key::{has_sentinel, KeyCounter, KeyGenerator, Placeholder, KEY_CLOSE, KEY_OPEN};
pub use table::{Substitution, SubstitutionTable};
