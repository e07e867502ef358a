mod strings;

pub use strings::{FilteredEntries, PhraseEntries, StringService};
