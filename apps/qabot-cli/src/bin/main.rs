use std::env;
use std::io;

use qabot_chat::{menu, MenuChoice};

fn main() -> anyhow::Result<()> {
    qabot_cli::init_tracing();
    let settings = qabot_cli::load_settings()?;
    let choice = match env::args().nth(1) {
        Some(arg) => arg.parse::<MenuChoice>(),
        None => menu::prompt(io::stdin().lock(), io::stdout()),
    };
    let outcome = choice.and_then(|choice| match choice {
        MenuChoice::Train => qabot_cli::run_train(&settings),
        MenuChoice::Chat => qabot_cli::run_chat(&settings),
    });
    qabot_cli::finish(outcome)
}
