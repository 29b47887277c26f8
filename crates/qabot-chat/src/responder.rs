use qabot_core::config::{ResponderSettings, Settings};
use qabot_core::error::Result;
use qabot_core::traits::Retriever;
use qabot_core::types::RecordIndex;
use qabot_text::{ModelArtifact, QaIndex};

/// What the bot says for one input.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Answer { text: String, index: RecordIndex, score: f32 },
    Fallback { text: String, score: f32 },
    Goodbye { text: String },
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Answer { text, .. } | Reply::Fallback { text, .. } | Reply::Goodbye { text } => text,
        }
    }

    /// Confidence of the best candidate; `None` for a goodbye.
    pub fn score(&self) -> Option<f32> {
        match self {
            Reply::Answer { score, .. } | Reply::Fallback { score, .. } => Some(*score),
            Reply::Goodbye { .. } => None,
        }
    }

    pub fn is_goodbye(&self) -> bool { matches!(self, Reply::Goodbye { .. }) }
}

pub struct Responder<R = QaIndex> where R: Retriever {
    retriever: R,
    settings: ResponderSettings,
}

impl Responder<QaIndex> {
    /// Loads the trained artifact named in `settings`.
    pub fn open(settings: &Settings) -> Result<Self> {
        let index = ModelArtifact::load(&settings.paths.model)?.into_index();
        Ok(Self::new(index, settings.responder.clone()))
    }
}

impl<R> Responder<R> where R: Retriever {
    pub fn new(retriever: R, settings: ResponderSettings) -> Self { Self { retriever, settings } }

    pub fn settings(&self) -> &ResponderSettings { &self.settings }

    pub fn retriever(&self) -> &R { &self.retriever }

    /// Exit keywords end the conversation; everything else is answered.
    pub fn respond(&self, input: &str) -> Reply {
        if self.settings.is_exit(input) {
            return Reply::Goodbye { text: self.settings.goodbye.clone() };
        }
        self.answer(input)
    }

    pub fn answer(&self, query: &str) -> Reply {
        let normalized = query.trim().to_lowercase();
        let candidates = self.retriever.rank(&normalized, self.settings.candidates.max(1));
        let Some(best) = candidates.first().copied() else {
            return Reply::Fallback { text: self.settings.fallback.clone(), score: 0.0 };
        };
        tracing::debug!(query = %normalized, index = best.index, score = best.score, candidates = candidates.len(), "best candidate");
        if best.score < self.settings.threshold {
            tracing::warn!(query = %normalized, score = best.score, threshold = self.settings.threshold, "no confident match");
            return Reply::Fallback { text: self.settings.fallback.clone(), score: best.score };
        }
        match self.retriever.record(best.index) {
            Some(record) => Reply::Answer { text: record.answer.clone(), index: best.index, score: best.score },
            None => Reply::Fallback { text: self.settings.fallback.clone(), score: best.score },
        }
    }
}
