use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use qabot_core::error::{Error, Result};

pub const BANNER: &str = "=== Custom NLP Chatbot ===";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Train,
    Chat,
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "train" => Ok(MenuChoice::Train),
            "2" | "chat" => Ok(MenuChoice::Chat),
            other => Err(Error::InvalidMenuChoice(other.to_string())),
        }
    }
}

/// Prints the menu and reads one choice.
pub fn prompt<I, O>(mut input: I, mut output: O) -> Result<MenuChoice>
where
    I: BufRead,
    O: Write,
{
    let console = |e: std::io::Error| Error::io(PathBuf::from("<console>"), e);
    writeln!(output, "{}", BANNER).map_err(console)?;
    writeln!(output, "1. Train the chatbot").map_err(console)?;
    writeln!(output, "2. Chat with the bot").map_err(console)?;
    write!(output, "Choose an option (1 or 2): ").map_err(console)?;
    output.flush().map_err(console)?;
    let mut line = String::new();
    input.read_line(&mut line).map_err(console)?;
    line.parse()
}
