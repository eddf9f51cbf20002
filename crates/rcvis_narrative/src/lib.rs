//! Narration scripts for RCVis movies.
//!
//! Each round of a tabulation is explained with a short list of questions
//! and answers. The [`FaqRegistry`] holds the rules that decide which
//! questions apply to a round and how they are worded; [`FaqNarrator`]
//! exposes the registry as a [`NarrationSource`](rcvis_interface::NarrationSource).

#![warn(missing_docs)]

mod narrator;
mod registry;
mod rules;
mod text;

pub use narrator::FaqNarrator;
pub use registry::{FaqRegistry, FaqRule};
pub use text::{comma_separated_names_with_and, format_votes, intify_or_aboutify};
