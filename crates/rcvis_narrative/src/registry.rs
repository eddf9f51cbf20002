//! Ordered registry of FAQ rules.

use crate::rules;
use rcvis_core::{ElectionSummary, NarrationPair, RoundNarration};

/// Decides whether a rule applies to a round.
pub type ActivationFn = fn(&ElectionSummary, usize) -> bool;

/// Produces the question or answer text for a round.
pub type TextFn = fn(&ElectionSummary, usize) -> String;

/// One question that may be asked about a round.
///
/// `question` and `answer` are only called when `is_active` returned true
/// for the same round.
#[derive(Debug, Clone, Copy)]
pub struct FaqRule {
    /// Stable identifier
    pub name: &'static str,
    /// Activation predicate
    pub is_active: ActivationFn,
    /// Question wording
    pub question: TextFn,
    /// Answer wording
    pub answer: TextFn,
}

impl FaqRule {
    fn describe(&self, summary: &ElectionSummary, round: usize) -> Option<NarrationPair> {
        (self.is_active)(summary, round).then(|| NarrationPair {
            question: (self.question)(summary, round),
            answer: (self.answer)(summary, round),
        })
    }
}

/// FAQ rules evaluated in priority order.
///
/// # Example
///
/// ```
/// use rcvis_core::{ElectionSummary, RoundSummary};
/// use rcvis_narrative::FaqRegistry;
///
/// let summary = ElectionSummary {
///     title: "Mayor".to_string(),
///     threshold: 51.0,
///     winner_names: vec!["Ada".to_string()],
///     rounds: vec![RoundSummary {
///         eliminated_names: vec!["Bob".to_string()],
///         ..Default::default()
///     }],
/// };
///
/// let pairs = FaqRegistry::standard().describe_round(&summary, 0);
/// assert_eq!(pairs[0].question, "What is happening?");
/// assert_eq!(pairs[1].question, "Why was Bob eliminated?");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FaqRegistry {
    rules: Vec<FaqRule>,
}

impl FaqRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard ranked-choice FAQ.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for rule in rules::standard_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Appends a rule at the lowest priority.
    ///
    /// A rule with the same name is replaced in place, keeping its priority.
    #[tracing::instrument(skip(self, rule), fields(rule_name = rule.name))]
    pub fn register(&mut self, rule: FaqRule) {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.name == rule.name) {
            tracing::warn!(rule = %rule.name, "FAQ rule already registered, overwriting previous registration");
            *existing = rule;
        } else {
            tracing::debug!("Registering FAQ rule");
            self.rules.push(rule);
        }
    }

    /// Rule names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every active question for `round`, in priority order.
    ///
    /// Rounds past the end of the summary have nothing to say.
    pub fn describe_round(&self, summary: &ElectionSummary, round: usize) -> Vec<NarrationPair> {
        if round >= summary.num_rounds() {
            return Vec::new();
        }
        self.rules
            .iter()
            .filter_map(|rule| rule.describe(summary, round))
            .collect()
    }

    /// Narration for every round of `summary`.
    pub fn describe_all_rounds(&self, summary: &ElectionSummary) -> Vec<RoundNarration> {
        (0..summary.num_rounds())
            .map(|round| RoundNarration::new(round, self.describe_round(summary, round)))
            .collect()
    }
}
