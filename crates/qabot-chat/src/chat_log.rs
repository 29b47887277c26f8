//! Append-only interaction log.
//!
//! Each turn writes `[ts] You: ...`, `[ts] Bot: ...` and a blank line. The file
//! is opened in append mode per turn and closed before returning.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use qabot_core::error::{Error, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }

    pub fn append(&self, user_input: &str, bot_response: &str) -> Result<()> {
        self.append_at(Local::now().naive_local(), user_input, bot_response)
    }

    pub fn append_at(&self, at: NaiveDateTime, user_input: &str, bot_response: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let timestamp = at.format(TIMESTAMP_FORMAT);
        let entry = format!("[{timestamp}] You: {user_input}\n[{timestamp}] Bot: {bot_response}\n\n");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;
        file.write_all(entry.as_bytes()).map_err(|e| Error::io(&self.path, e))?;
        Ok(())
    }
}
