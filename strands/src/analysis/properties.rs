use sha2::{Digest, Sha256};

use crate::models::{CharacterFrequency, PropertySet};

/// Derive the full property set for an already-trimmed, non-empty string.
///
/// Pure: the same input always produces the same output.
pub fn derive_properties(input: &str) -> PropertySet {
    let character_frequency = character_frequency(input);

    PropertySet {
        length: input.chars().count() as i64,
        word_count: word_count(input),
        unique_characters: character_frequency.len() as i64,
        character_frequency,
        is_palindrome: is_palindrome(input),
        content_hash: content_hash(input),
    }
}

/// Number of maximal non-whitespace runs.
pub fn word_count(input: &str) -> i64 {
    input.split_whitespace().count() as i64
}

/// Occurrences of each lowercased character, spaces excluded.
pub fn character_frequency(input: &str) -> CharacterFrequency {
    let mut frequency = CharacterFrequency::new();
    for c in input.to_lowercase().chars().filter(|c| *c != ' ') {
        *frequency.entry(c.to_string()).or_insert(0) += 1;
    }
    frequency
}

/// Case-insensitive palindrome check that ignores spaces.
pub fn is_palindrome(input: &str) -> bool {
    let folded: Vec<char> = input.to_lowercase().chars().filter(|c| *c != ' ').collect();
    folded.iter().eq(folded.iter().rev())
}

/// SHA-256 of the raw bytes, lowercase hex.
pub fn content_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    format!("{digest:x}")
}
