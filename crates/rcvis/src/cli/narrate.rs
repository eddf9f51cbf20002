//! Narration and configuration output.

use rcvis::{
    BackendError, ElectionSummary, FaqNarrator, NarrationSource, RcvisConfig, RcvisResult,
    ResultRecord, StorageError, StorageErrorKind,
};
use std::path::Path;

/// Reads a tabulation summary from a JSON file.
pub fn load_summary(path: &Path) -> RcvisResult<ElectionSummary> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    Ok(serde_json::from_str(&contents).map_err(|e| {
        BackendError::new(format!("Invalid summary {}: {}", path.display(), e))
    })?)
}

/// Prints every round's narration.
pub fn narrate(summary_path: &Path) -> RcvisResult<()> {
    let summary = load_summary(summary_path)?;
    let record = ResultRecord::builder()
        .id(0)
        .slug("narration")
        .summary(summary)
        .build()
        .map_err(|e| BackendError::new(e.to_string()))?;

    for round in FaqNarrator::default().describe_all_rounds(&record)? {
        println!("Round {}", round.round + 1);
        for pair in &round.pairs {
            println!("  Q: {}", pair.question);
            println!("  A: {}", pair.answer);
        }
    }
    Ok(())
}

/// Prints the resolved configuration as JSON.
pub fn show_config(config: &RcvisConfig) -> RcvisResult<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| BackendError::new(format!("Failed to serialize configuration: {}", e)))?;
    println!("{}", json);
    Ok(())
}
