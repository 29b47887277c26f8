//! On-disk bundle of the fitted model and the records it was fitted on.
//!
//! Written to a temp file next to the target and renamed over it, so a reader
//! sees either the previous artifact or the new one, never a partial write.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use qabot_core::dataset::{fingerprint, validate_record};
use qabot_core::error::{Error, Result};
use qabot_core::types::QaRecord;

use crate::index::QaIndex;
use crate::tfidf::TfidfModel;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
	pub format_version: u32,
	pub fingerprint: u64,
	pub model: TfidfModel,
	pub records: Vec<QaRecord>,
}

impl ModelArtifact {
	pub fn from_index(index: &QaIndex) -> Self {
		Self {
			format_version: FORMAT_VERSION,
			fingerprint: fingerprint(index.records()),
			model: index.model().clone(),
			records: index.records().to_vec(),
		}
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		let dir = match path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
			_ => std::path::PathBuf::from("."),
		};
		fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
		let tmp = NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
		{
			let mut writer = BufWriter::new(tmp.as_file());
			serde_json::to_writer_pretty(&mut writer, self)
				.map_err(|e| Error::io(tmp.path(), std::io::Error::other(e)))?;
			writer.flush().map_err(|e| Error::io(tmp.path(), e))?;
		}
		tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
		tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
		tracing::info!(path = %path.display(), records = self.records.len(), "model artifact saved");
		Ok(())
	}

	pub fn load(path: &Path) -> Result<Self> {
		if !path.exists() {
			return Err(Error::ModelNotTrained(path.to_path_buf()));
		}
		let corrupt = |reason: String| Error::CorruptArtifact { path: path.to_path_buf(), reason };
		let file = File::open(path).map_err(|e| Error::io(path, e))?;
		let artifact: ModelArtifact =
			serde_json::from_reader(BufReader::new(file)).map_err(|e| corrupt(e.to_string()))?;
		if artifact.format_version != FORMAT_VERSION {
			return Err(corrupt(format!(
				"unsupported format version {} (expected {})",
				artifact.format_version, FORMAT_VERSION
			)));
		}
		artifact.model.check().map_err(corrupt)?;
		if artifact.records.is_empty() {
			return Err(corrupt("artifact holds no records".to_string()));
		}
		if artifact.model.num_docs() != artifact.records.len() {
			return Err(corrupt(format!(
				"model fitted on {} questions but {} records stored",
				artifact.model.num_docs(),
				artifact.records.len()
			)));
		}
		for (i, r) in artifact.records.iter().enumerate() {
			validate_record(i, r).map_err(|e| corrupt(e.to_string()))?;
		}
		if fingerprint(&artifact.records) != artifact.fingerprint {
			return Err(corrupt("record fingerprint mismatch".to_string()));
		}
		tracing::info!(
			path = %path.display(),
			records = artifact.records.len(),
			vocabulary = artifact.model.vocabulary_len(),
			"model artifact loaded"
		);
		Ok(artifact)
	}

	pub fn into_index(self) -> QaIndex { QaIndex::from_parts(self.model, self.records) }
}
