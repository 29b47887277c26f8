use std::path::PathBuf;

use qabot_core::config::Settings;
use qabot_core::dataset::load_records;
use qabot_core::error::Result;
use qabot_text::{ModelArtifact, QaIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainReport {
    pub records: usize,
    pub vocabulary: usize,
    pub fingerprint: u64,
    pub artifact: PathBuf,
    /// The previous artifact was fitted on the same records.
    pub unchanged: bool,
}

/// Fits the model on the configured dataset and replaces the artifact.
///
/// Nothing is written unless the dataset loads and fits cleanly.
pub fn train(settings: &Settings) -> Result<TrainReport> {
    let paths = &settings.paths;
    let records = load_records(&paths.dataset)?;
    let index = QaIndex::build(records)?;
    let artifact = ModelArtifact::from_index(&index);

    let unchanged = paths.model.exists()
        && ModelArtifact::load(&paths.model).map(|prev| prev.fingerprint == artifact.fingerprint).unwrap_or(false);
    artifact.save(&paths.model)?;

    let report = TrainReport {
        records: artifact.records.len(),
        vocabulary: artifact.model.vocabulary_len(),
        fingerprint: artifact.fingerprint,
        artifact: paths.model.clone(),
        unchanged,
    };
    tracing::info!(records = report.records, vocabulary = report.vocabulary, unchanged, "training completed");
    Ok(report)
}
