pub mod phrase;
pub mod properties;

pub use phrase::{parse_phrase, PhraseRule, PHRASE_RULES};
pub use properties::{character_frequency, content_hash, derive_properties, is_palindrome, word_count};
