//! Validity classification of phrase fragments.
//!
//! A fragment "is CQL" when it cannot break the grammar on its own: either
//! it is a single word, or it already carries an operator and is therefore
//! assumed to be deliberate CQL.

use crate::lexer;

/// Returns true if `fragment` contains a CQL operator.
///
/// Boolean keywords (`and`, `any`, `all`, `adj`, `or`, `not`) only count as
/// whole words padded by spaces, case-insensitively. `=`, `(` and `)` count
/// anywhere.
///
/// ```rust
/// use cql_doctor::contains_operator;
///
/// assert!(contains_operator("harry AND potter"));
/// assert!(contains_operator("term.type=bog"));
/// assert!(!contains_operator("android anderson"));
/// ```
pub fn contains_operator(fragment: &str) -> bool {
    !lexer::operators(fragment).is_empty()
}

/// Returns true if `fragment` should be treated as valid CQL.
///
/// ```rust
/// use cql_doctor::is_cql;
///
/// assert!(is_cql("portland"));
/// assert!(is_cql("dogs or cats"));
/// assert!(!is_cql("f. 1939"));
/// ```
pub fn is_cql(fragment: &str) -> bool {
    let trimmed = fragment.trim_matches(|c: char| c.is_ascii_whitespace());
    !trimmed.contains(' ') || contains_operator(fragment)
}

/// Splits `phrase` on every CQL operator, dropping the operators.
pub fn split_on_operators(phrase: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut last = 0;
    for op in lexer::operators(phrase) {
        segments.push(&phrase[last..op.start]);
        last = op.end;
    }
    segments.push(&phrase[last..]);
    segments
}

/// Returns true if every operator-delimited segment of `phrase` is valid.
pub fn phrase_is_cql(phrase: &str) -> bool {
    split_on_operators(phrase).into_iter().all(is_cql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_is_cql() {
        assert!(is_cql("film"));
        assert!(is_cql(" film "));
        assert!(is_cql(""));
    }

    #[test]
    fn test_words_without_operator_are_not_cql() {
        assert!(!is_cql("f. 1939"));
        assert!(!is_cql("White night"));
        assert!(!is_cql("android anderson"));
    }

    #[test]
    fn test_keyword_operators_case_insensitive() {
        for phrase in [
            "a and b", "a AND b", "a Any b", "a all b", "a adj b", "a or b", "a NOT b",
        ] {
            assert!(is_cql(phrase), "{phrase} should be cql");
        }
    }

    #[test]
    fn test_keyword_at_edge_does_not_count() {
        assert!(!contains_operator("and b"));
        assert!(!contains_operator("a and"));
        assert!(!is_cql("and then"));
    }

    #[test]
    fn test_relation_and_parens_count_anywhere() {
        assert!(is_cql("title = dune"));
        assert!(is_cql("x (y z"));
        assert!(is_cql("x y) z"));
    }

    #[test]
    fn test_split_on_operators() {
        let parts = split_on_operators("dc.title=dune and dc.creator=herbert");
        assert_eq!(parts, vec!["dc.title", "dune", "dc.creator", "herbert"]);
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        let parts = split_on_operators("a and (b)");
        assert_eq!(parts, vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_phrase_is_cql() {
        assert!(phrase_is_cql(
            "dkcclterm.sf=v and dkcclterm.uu=nt and (x) not term.literaryForm=fiktion"
        ));
        assert!(phrase_is_cql("harry and potter"));
        assert!(!phrase_is_cql("harry potter"));
        assert!(!phrase_is_cql("title=dune frank herbert"));
    }
}
