//! Token restoration and final joining.

use std::collections::VecDeque;

use tracing::trace;

use crate::table::SubstitutionTable;

/// Splits the protected phrase into tokens and restores every placeholder.
///
/// Restoration runs one ordered pass of the table over all tokens, then
/// drains a worklist of tokens that still hold a placeholder. A replacement
/// can only hold keys registered before its own, so every resolution moves
/// strictly down the registration order and the worklist empties.
pub(crate) fn restore(phrase: &str, table: &SubstitutionTable) -> Vec<String> {
    let mut tokens: Vec<String> = phrase.split(' ').map(|t| table.apply(t)).collect();

    let mut pending: VecDeque<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| table.first_match(token).is_some())
        .map(|(i, _)| i)
        .collect();

    while let Some(i) = pending.pop_front() {
        let Some(entry) = table.first_match(&tokens[i]) else {
            continue;
        };
        trace!(token = i, key = entry.key.as_str(), "unnesting placeholder");
        tokens[i] = tokens[i].replace(&entry.key, &entry.replacement);
        pending.push_front(i);
    }

    tokens.retain(|token| !token.is_empty());
    tokens
}

/// Joins restored tokens, forcing a conjunction unless the phrase was valid.
pub(crate) fn join(tokens: &[String], valid: bool) -> String {
    if valid {
        tokens.join(" ")
    } else {
        tokens.join(" and ")
    }
}
