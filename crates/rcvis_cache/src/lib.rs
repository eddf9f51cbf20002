//! Text-to-speech dedup cache.
//!
//! Maps exact narration text to the stored audio synthesized for it. The
//! cache is passive and unbounded: nothing is ever evicted, and staleness is
//! only observable through each entry's last-used time.

#![warn(missing_docs)]

mod cache;
mod validation;

pub use cache::InMemorySpeechCache;
pub use validation::validate_entry;
