//! Placeholder keys for protected fragments.
//!
//! A placeholder is written as `U+E000 <prefix><n> U+E001`. The two
//! private-use sentinels bound every key, so no key is a prefix of another
//! (`zxcv10` vs `zxcv100`) and none can be spelled by user input, which has
//! the sentinels stripped before protection starts.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::DEFAULT_FIRST_KEY;

/// Opening sentinel of a placeholder.
pub const KEY_OPEN: char = '\u{E000}';

/// Closing sentinel of a placeholder.
pub const KEY_CLOSE: char = '\u{E001}';

/// Source of placeholder numbers.
///
/// Implementations must never hand out the same number twice for the
/// lifetime of the generator.
pub trait KeyGenerator: Send + Sync {
    /// Returns the next unused number.
    fn next_key(&self) -> u64;
}

/// Thread-safe, monotonically increasing key counter.
///
/// # Example
///
/// ```rust
/// use cql_doctor::{KeyCounter, KeyGenerator};
///
/// let counter = KeyCounter::starting_at(10);
/// assert_eq!(counter.next_key(), 10);
/// assert_eq!(counter.next_key(), 11);
/// ```
#[derive(Debug)]
pub struct KeyCounter {
    next: AtomicU64,
}

static GLOBAL_COUNTER: KeyCounter = KeyCounter::starting_at(DEFAULT_FIRST_KEY);

impl KeyCounter {
    /// Creates a counter whose first key is `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Returns the process-wide counter.
    pub fn global() -> &'static KeyCounter {
        &GLOBAL_COUNTER
    }

    /// Returns the number the next call to [`next_key`](KeyGenerator::next_key) yields.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for KeyCounter {
    fn default() -> Self {
        Self::starting_at(DEFAULT_FIRST_KEY)
    }
}

impl KeyGenerator for KeyCounter {
    fn next_key(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// A formatted placeholder token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder(String);

impl Placeholder {
    /// Formats the placeholder for key number `n`.
    pub fn new(prefix: &str, n: u64) -> Self {
        Self(format!("{KEY_OPEN}{prefix}{n}{KEY_CLOSE}"))
    }

    /// Returns the placeholder text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `text` contains a placeholder sentinel.
pub fn has_sentinel(text: &str) -> bool {
    text.contains(|c: char| c == KEY_OPEN || c == KEY_CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counter_increments() {
        let counter = KeyCounter::starting_at(42);
        assert_eq!(counter.next_key(), 42);
        assert_eq!(counter.next_key(), 43);
        assert_eq!(counter.peek(), 44);
    }

    #[test]
    fn test_default_counter_starts_at_ten() {
        assert_eq!(KeyCounter::default().next_key(), 10);
    }

    #[test]
    fn test_global_counter_is_monotonic() {
        let a = KeyCounter::global().next_key();
        let b = KeyCounter::global().next_key();
        assert!(b > a);
        assert!(a >= DEFAULT_FIRST_KEY);
    }

    #[test]
    fn test_counter_unique_across_threads() {
        let counter = Arc::new(KeyCounter::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || (0..250).map(|_| counter.next_key()).collect::<Vec<_>>())
            })
            .collect();

        let mut keys: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_placeholder_format() {
        let key = Placeholder::new("zxcv", 10);
        assert_eq!(key.as_str(), "\u{E000}zxcv10\u{E001}");
        assert_eq!(key.to_string(), key.as_str());
        assert!(has_sentinel(key.as_str()));
    }

    #[test]
    fn test_placeholder_not_prefix_of_larger_key() {
        let small = Placeholder::new("zxcv", 10);
        let large = Placeholder::new("zxcv", 100);
        assert!(!large.as_str().contains(small.as_str()));
    }
}
