//! Narration source backed by the FAQ registry.

use crate::FaqRegistry;
use rcvis_core::{ResultRecord, RoundNarration};
use rcvis_error::{MovieError, MovieErrorKind, RcvisResult};
use rcvis_interface::NarrationSource;

/// Narrates a result record with the standard FAQ.
#[derive(Debug, Clone)]
pub struct FaqNarrator {
    registry: FaqRegistry,
}

impl FaqNarrator {
    /// Narrates with a custom registry.
    pub fn new(registry: FaqRegistry) -> Self {
        Self { registry }
    }

    /// The rules in use.
    pub fn registry(&self) -> &FaqRegistry {
        &self.registry
    }
}

impl Default for FaqNarrator {
    fn default() -> Self {
        Self::new(FaqRegistry::standard())
    }
}

impl NarrationSource for FaqNarrator {
    #[tracing::instrument(skip(self, record), fields(record_id = record.id, slug = %record.slug))]
    fn describe_all_rounds(&self, record: &ResultRecord) -> RcvisResult<Vec<RoundNarration>> {
        if record.summary.rounds.is_empty() {
            return Err(MovieError::new(MovieErrorKind::MissingNarration(record.id)).into());
        }
        let rounds = self.registry.describe_all_rounds(&record.summary);
        tracing::debug!(rounds = rounds.len(), "Described all rounds");
        Ok(rounds)
    }
}
