//! `snapgraph-ident` — pattern-based token minting.
//!
//! Replaces every run of `x` in a pattern with random base-36 characters,
//! leaving all other characters in place. Tokens are probabilistically
//! unique, not cryptographically unique; the workspace uses them to label
//! one operation's log events. The crate has no dependency on the rest of
//! the workspace.

use rand::Rng;

/// Placeholder character replaced during generation.
const PLACEHOLDER: char = 'x';

/// Alphabet the placeholders are filled from.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint a token from `pattern` using the thread-local RNG.
///
/// Every `x` becomes a random base-36 character; everything else is copied
/// through unchanged. The output always has the same number of characters
/// as the pattern.
///
/// ```
/// let token = snapgraph_ident::generate("req-xxxx-xxxx");
/// assert_eq!(token.len(), "req-xxxx-xxxx".len());
/// assert!(token.starts_with("req-"));
/// ```
pub fn generate(pattern: &str) -> String {
    generate_with(pattern, &mut rand::rng())
}

/// Same contract as [`generate`], against a caller-supplied RNG.
///
/// Useful where token streams must be reproducible (tests, replayable
/// diagnostics).
pub fn generate_with(pattern: &str, rng: &mut impl Rng) -> String {
    pattern
        .chars()
        .map(|c| {
            if c == PLACEHOLDER {
                ALPHABET[rng.random_range(0..ALPHABET.len())] as char
            } else {
                c
            }
        })
        .collect()
}
