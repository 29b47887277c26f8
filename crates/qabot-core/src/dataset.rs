use std::fs;
use std::hash::Hasher;
use std::path::Path;

use twox_hash::XxHash64;

use crate::error::{Error, Result};
use crate::types::QaRecord;

/// Reads a JSON array of `{question, answer}` objects.
///
/// Fails fast on the first malformed entry; an absent file is `MissingInput`.
pub fn load_records(path: &Path) -> Result<Vec<QaRecord>> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let records = parse_records(&raw).map_err(|e| match e {
        Error::InvalidDataset { reason, .. } => Error::InvalidDataset { path: path.to_path_buf(), reason },
        other => other,
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

pub fn parse_records(raw: &str) -> Result<Vec<QaRecord>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)
        .map_err(|e| Error::InvalidDataset { path: Default::default(), reason: e.to_string() })?;
    if entries.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let record: QaRecord = serde_json::from_value(entry)
            .map_err(|e| Error::InvalidRecord { index, reason: e.to_string() })?;
        validate_record(index, &record)?;
        records.push(record);
    }
    Ok(records)
}

pub fn validate_record(index: usize, record: &QaRecord) -> Result<()> {
    if record.question.trim().is_empty() {
        return Err(Error::InvalidRecord { index, reason: "question is empty".to_string() });
    }
    Ok(())
}

/// Stable content hash of an ordered record collection.
pub fn fingerprint(records: &[QaRecord]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    for r in records {
        hasher.write(r.question.as_bytes());
        hasher.write_u8(0);
        hasher.write(r.answer.as_bytes());
        hasher.write_u8(0);
    }
    hasher.finish()
}
