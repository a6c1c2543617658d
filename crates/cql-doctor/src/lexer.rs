//! Lexical scanners built with nom.
//!
//! Each scanner walks the input left to right, trying its parser at every
//! character boundary and skipping past each match, so matches never overlap.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while},
    character::complete::char,
    combinator::recognize,
    sequence::delimited,
    IResult,
};

/// A match found by a scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span<'a, O> {
    /// Byte offset of the first matched character.
    pub start: usize,
    /// Byte offset one past the last matched character.
    pub end: usize,
    /// The matched text.
    pub text: &'a str,
    /// Parser output for the match.
    pub value: O,
}

fn scan<'a, O, P>(input: &'a str, mut parser: P) -> Vec<Span<'a, O>>
where
    P: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        match parser(rest) {
            Ok((remaining, value)) if remaining.len() < rest.len() => {
                let end = input.len() - remaining.len();
                found.push(Span {
                    start: pos,
                    end,
                    text: &input[pos..end],
                    value,
                });
                pos = end;
            }
            _ => pos += rest.chars().next().map_or(1, char::len_utf8),
        }
    }

    found
}

// ============================================================================
// Parsers
// ============================================================================

fn quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('"'), take_while(|c: char| c != '"'), char('"')))(input)
}

fn group(input: &str) -> IResult<&str, &str> {
    delimited(
        char('('),
        take_while(|c: char| c != '(' && c != ')'),
        char(')'),
    )(input)
}

/// A CQL operator: a boolean keyword padded by single spaces, or one of the
/// relation and grouping characters.
fn operator(input: &str) -> IResult<&str, &str> {
    alt((
        tag_no_case(" and "),
        tag_no_case(" any "),
        tag_no_case(" all "),
        tag_no_case(" adj "),
        tag_no_case(" or "),
        tag_no_case(" not "),
        tag("="),
        tag("("),
        tag(")"),
    ))(input)
}

// ============================================================================
// Scanners
// ============================================================================

/// Returns every double-quoted run in order of appearance. The span text
/// includes the quotes.
pub(crate) fn quoted_phrases(input: &str) -> Vec<Span<'_, &str>> {
    scan(input, quoted)
}

/// Returns every parenthesized group that holds no nested parentheses. The
/// span text is the whole group; the value is the content between the
/// parentheses.
pub(crate) fn innermost_groups(input: &str) -> Vec<Span<'_, &str>> {
    scan(input, group)
}

/// Returns the location of every CQL operator.
pub(crate) fn operators(input: &str) -> Vec<Span<'_, &str>> {
    scan(input, operator)
}
