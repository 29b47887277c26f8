use std::io::{BufRead, Write};
use std::path::PathBuf;

use qabot_core::error::{Error, Result};
use qabot_core::traits::Retriever;

use crate::chat_log::ChatLog;
use crate::responder::{Reply, Responder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub turns: usize,
    pub ended_by_keyword: bool,
}

/// Interactive loop: read a line, answer it, log the pair.
pub struct ChatSession<'a, R> where R: Retriever {
    responder: &'a Responder<R>,
    log: &'a ChatLog,
}

fn console_err(e: std::io::Error) -> Error { Error::io(PathBuf::from("<console>"), e) }

impl<'a, R> ChatSession<'a, R> where R: Retriever {
    pub fn new(responder: &'a Responder<R>, log: &'a ChatLog) -> Self { Self { responder, log } }

    /// Answers one input and appends it to the log, goodbyes included.
    pub fn turn(&self, input: &str) -> Result<Reply> {
        let reply = self.responder.respond(input);
        self.log.append(input, reply.text())?;
        Ok(reply)
    }

    pub fn run<I, O>(&self, mut input: I, mut output: O) -> Result<SessionSummary>
    where
        I: BufRead,
        O: Write,
    {
        let keyword = self.responder.settings().exit_keywords.first().cloned().unwrap_or_default();
        writeln!(output, "\n🤖 Chatbot is ready! Type '{}' to exit.\n", keyword).map_err(console_err)?;
        let mut summary = SessionSummary::default();
        loop {
            write!(output, "You: ").map_err(console_err)?;
            output.flush().map_err(console_err)?;

            let mut line = String::new();
            if input.read_line(&mut line).map_err(console_err)? == 0 {
                writeln!(output).map_err(console_err)?;
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() { continue; }

            let reply = self.turn(line)?;
            summary.turns += 1;
            writeln!(output, "Bot: {}", reply.text()).map_err(console_err)?;
            if reply.is_goodbye() {
                summary.ended_by_keyword = true;
                break;
            }
        }
        tracing::info!(turns = summary.turns, ended_by_keyword = summary.ended_by_keyword, "chat session finished");
        Ok(summary)
    }
}
