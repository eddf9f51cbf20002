//! Narration script types.

use serde::{Deserialize, Serialize};

/// A question read aloud followed by its answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrationPair {
    /// The question
    pub question: String,
    /// The answer
    pub answer: String,
}

/// Everything narrated over one round of tabulation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundNarration {
    /// Zero-based round number
    pub round: usize,
    /// Narrated pairs in the order they are read
    pub pairs: Vec<NarrationPair>,
}

impl RoundNarration {
    /// Creates the narration for a round.
    pub fn new(round: usize, pairs: Vec<NarrationPair>) -> Self {
        Self { round, pairs }
    }

    /// The text sent to speech synthesis for this round.
    ///
    /// Returns `None` when the round has nothing to say.
    ///
    /// ```
    /// use rcvis_core::{NarrationPair, RoundNarration};
    ///
    /// let round = RoundNarration::new(0, vec![NarrationPair {
    ///     question: "Why?".to_string(),
    ///     answer: "Because.".to_string(),
    /// }]);
    /// assert_eq!(round.speech_text().as_deref(), Some("Why? Because."));
    /// assert_eq!(RoundNarration::default().speech_text(), None);
    /// ```
    pub fn speech_text(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let text = self
            .pairs
            .iter()
            .flat_map(|p| [p.question.trim(), p.answer.trim()])
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!text.is_empty()).then_some(text)
    }
}
