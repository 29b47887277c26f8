//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`). Relative paths are
//! resolved against the directory the configuration was loaded from.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_THRESHOLD: f32 = 0.3;
pub const DEFAULT_CANDIDATES: usize = 2;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| Error::io(".", e))?;
        Self::load_from(&cwd)
    }

    pub fn load_from(base_dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => {
                figment = figment.merge(Toml::file(base_dir.join("config.dev.toml")));
            }
            "prod" | "production" => {
                figment = figment.merge(Toml::file(base_dir.join("config.prod.toml")));
            }
            "test" | "testing" => {
                figment = figment.merge(Toml::file(base_dir.join("config.test.toml")));
            }
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?;
        tracing::debug!(env = %env_name, base_dir = %base_dir.display(), "configuration loaded");
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Typed, validated settings with every path resolved against the base directory.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings.resolved(&self.base_dir))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub responder: ResponderSettings,
}

/// Locations of the dataset, the trained artifact and the interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub dataset: PathBuf,
    pub model: PathBuf,
    pub log: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("train_data.json"),
            model: PathBuf::from("chatbot_model.json"),
            log: PathBuf::from("chat_history.txt"),
        }
    }
}

/// Answer selection knobs.
///
/// - `threshold`: a best score strictly below this yields `fallback`
/// - `candidates`: how many top-ranked questions are considered per query
/// - `exit_keywords`: inputs (case-insensitive) that end a chat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderSettings {
    pub threshold: f32,
    pub candidates: usize,
    pub exit_keywords: Vec<String>,
    pub fallback: String,
    pub goodbye: String,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            candidates: DEFAULT_CANDIDATES,
            exit_keywords: vec!["bye".to_string(), "exit".to_string(), "quit".to_string()],
            fallback: "Sorry, I don't understand.".to_string(),
            goodbye: "Goodbye!".to_string(),
        }
    }
}

impl ResponderSettings {
    pub fn is_exit(&self, input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        self.exit_keywords.iter().any(|k| k.trim().to_lowercase() == normalized)
    }
}

impl Settings {
    /// Copy of these settings whose paths are resolved against `base`.
    pub fn resolved(&self, base: &Path) -> Self {
        let resolve = |p: &Path| resolve_with_base(base, p.to_string_lossy());
        Self {
            paths: PathSettings {
                dataset: resolve(&self.paths.dataset),
                model: resolve(&self.paths.model),
                log: resolve(&self.paths.log),
            },
            responder: self.responder.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.responder;
        if !(0.0..=1.0).contains(&r.threshold) {
            return Err(Error::InvalidConfig(format!(
                "responder.threshold must be within [0, 1], got {}",
                r.threshold
            )));
        }
        if r.candidates == 0 {
            return Err(Error::InvalidConfig("responder.candidates must be at least 1".to_string()));
        }
        if r.exit_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(Error::InvalidConfig(
                "responder.exit_keywords needs at least one keyword".to_string(),
            ));
        }
        let paths = [
            ("paths.dataset", &self.paths.dataset),
            ("paths.model", &self.paths.model),
            ("paths.log", &self.paths.log),
        ];
        for (key, p) in paths {
            if p.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
