//! Random alias generation.
//!
//! Aliases are drawn from ASCII letters and digits. The generator makes no
//! uniqueness promise: a collision with an existing alias is reported by the
//! store as [`crate::error::StoreError::AliasExists`].

use rand::Rng;
use rand::distr::Alphanumeric;

/// Alias length used when configuration does not override it.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Generates a random alias of exactly `length` characters.
///
/// Each character is sampled independently and uniformly from `A-Z`, `a-z`
/// and `0-9` using the thread-local generator, so concurrent callers share
/// no state.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(6);
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_alias_has_requested_length() {
        for length in [1, 6, 12, 64] {
            assert_eq!(generate_alias(length).len(), length);
        }
    }

    #[test]
    fn test_generate_alias_zero_length_is_empty() {
        assert!(generate_alias(0).is_empty());
    }

    #[test]
    fn test_generate_alias_uses_alphanumeric_characters() {
        let alias = generate_alias(256);
        assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_alias_produces_distinct_values() {
        let aliases: HashSet<String> = (0..1000).map(|_| generate_alias(12)).collect();

        assert_eq!(aliases.len(), 1000);
    }

    #[test]
    fn test_generate_alias_independent_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| generate_alias(16)))
            .collect();

        let aliases: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(aliases.len(), 8);
    }
}
