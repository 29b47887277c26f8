//! Training, answering and the console conversation built on `qabot-text`.

pub mod chat_log;
pub mod menu;
pub mod responder;
pub mod session;
pub mod trainer;

pub use chat_log::ChatLog;
pub use menu::MenuChoice;
pub use responder::{Reply, Responder};
pub use session::{ChatSession, SessionSummary};
pub use trainer::{train, TrainReport};
