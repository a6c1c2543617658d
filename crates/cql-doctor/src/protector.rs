//! Placeholder protection of quoted and parenthesized fragments.

use tracing::trace;

use crate::classifier::{contains_operator, is_cql};
use crate::key::{has_sentinel, KeyGenerator, Placeholder};
use crate::lexer;
use crate::table::SubstitutionTable;

/// Rewrites a working phrase, swapping protected fragments for placeholders.
pub(crate) struct Protector<'a> {
    phrase: String,
    table: SubstitutionTable,
    keys: &'a dyn KeyGenerator,
    key_prefix: &'a str,
}

impl<'a> Protector<'a> {
    pub(crate) fn new(phrase: String, keys: &'a dyn KeyGenerator, key_prefix: &'a str) -> Self {
        Self {
            phrase,
            table: SubstitutionTable::new(),
            keys,
            key_prefix,
        }
    }

    /// Protects every quoted run, quotes included, verbatim.
    pub(crate) fn protect_quotes(&mut self) {
        let phrase = std::mem::take(&mut self.phrase);
        let mut rebuilt = String::with_capacity(phrase.len());
        let mut last = 0;

        for span in lexer::quoted_phrases(&phrase) {
            rebuilt.push_str(&phrase[last..span.start]);
            let key = self.register(span.text, span.text.to_string());
            rebuilt.push_str(key.as_str());
            last = span.end;
        }

        rebuilt.push_str(&phrase[last..]);
        self.phrase = rebuilt;
    }

    /// Protects every innermost parenthesized group.
    ///
    /// Groups holding CQL keep their parentheses and only the content is
    /// protected. Other groups become a single quoted literal. Content that
    /// already holds a protected fragment is never literalized on the bare
    /// group rule, since wrapping it would nest quotes.
    pub(crate) fn protect_groups(&mut self, literalize_bare_groups: bool) {
        let phrase = std::mem::take(&mut self.phrase);
        let mut rebuilt = String::with_capacity(phrase.len());
        let mut last = 0;

        for span in lexer::innermost_groups(&phrase) {
            rebuilt.push_str(&phrase[last..span.start]);
            let inner = span.value;
            let keeps_grouping = if literalize_bare_groups && !has_sentinel(inner) {
                contains_operator(inner)
            } else {
                is_cql(inner)
            };

            if !keeps_grouping {
                let key = self.register(span.text, format!("\"{}\"", span.text));
                rebuilt.push_str(key.as_str());
            } else if inner.is_empty() {
                rebuilt.push_str(span.text);
            } else {
                let key = self.register(inner, inner.to_string());
                rebuilt.push('(');
                rebuilt.push_str(key.as_str());
                rebuilt.push(')');
            }
            last = span.end;
        }

        rebuilt.push_str(&phrase[last..]);
        self.phrase = rebuilt;
    }

    /// Isolates each reserved character as its own quoted token.
    pub(crate) fn escape_reserved(&mut self, reserved: &[char]) {
        for &c in reserved {
            if self.phrase.contains(c) {
                self.phrase = self.phrase.replace(c, &format!(" \"{c}\" "));
            }
        }
    }

    /// Returns the working phrase and the table built so far.
    pub(crate) fn into_parts(self) -> (String, SubstitutionTable) {
        (self.phrase, self.table)
    }

    fn register(&mut self, fragment: &str, replacement: String) -> Placeholder {
        let key = Placeholder::new(self.key_prefix, self.keys.next_key());
        trace!(fragment, key = key.as_str(), "protecting fragment");
        self.table.push(&key, replacement);
        key
    }
}
